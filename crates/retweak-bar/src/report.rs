//! Per-line outcome of a load.
//!
//! Loading is best effort: a bad line is skipped and recorded here, and the
//! rest of the file still applies.

use core::fmt;

use retweak_core::{CodecError, LineError};

/// Why a line was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// Line is not valid UTF-8.
    InvalidEncoding,
    /// Line is not `name: TYPE value`.
    MalformedLine(LineError),
    /// Type name does not resolve.
    UnknownType(String),
    /// Value text does not parse for the type.
    MalformedValue(CodecError),
    /// No persisted variable with this name.
    NotFound,
    /// Line's type differs from the variable's registered type.
    TypeMismatch {
        /// Registered type name.
        expected: String,
        /// Type name on the line.
        found: String,
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::InvalidEncoding => f.write_str("line is not valid UTF-8"),
            IssueKind::MalformedLine(e) => write!(f, "malformed line: {e}"),
            IssueKind::UnknownType(name) => write!(f, "{name} type not found"),
            IssueKind::MalformedValue(e) => write!(f, "{e}"),
            IssueKind::NotFound => f.write_str("item not found"),
            IssueKind::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: registered as {expected}, file has {found}")
            }
        }
    }
}

/// A skipped line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineIssue {
    /// 1-based line number.
    pub line: usize,
    /// Variable name, when the line got far enough to have one.
    pub name: Option<String>,
    /// What went wrong.
    pub kind: IssueKind,
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "line {} ({name}): {}", self.line, self.kind),
            None => write!(f, "line {}: {}", self.line, self.kind),
        }
    }
}

/// Result of loading a bar file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Lines whose value was written to a variable.
    pub applied: usize,
    /// Lines that were skipped, in file order.
    pub issues: Vec<LineIssue>,
}

impl LoadReport {
    /// Whether every entry line applied.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of skipped lines.
    pub fn skipped(&self) -> usize {
        self.issues.len()
    }

    pub(crate) fn skip(&mut self, line: usize, name: Option<&str>, kind: IssueKind) {
        let issue = LineIssue {
            line,
            name: name.map(str::to_string),
            kind,
        };
        tracing::warn!("skipping {issue}");
        self.issues.push(issue);
    }
}
