//! Line-level file format.
//!
//! ```text
//! # comment line (ignored)
//!
//! name: TYPE_NAME field1 [field2 ...]
//! ```
//!
//! The name runs up to the first `:`. The type name is the next
//! whitespace-delimited token; everything after it is the value text handed
//! to [`parse`](crate::parse).

use std::str::Utf8Error;

use crate::error::LineError;

/// Lines whose first non-blank character is this are ignored.
pub const COMMENT_MARKER: char = '#';

/// A persisted line split into its three parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Variable name, trimmed.
    pub name: &'a str,
    /// Type name token.
    pub type_name: &'a str,
    /// Value text, trimmed; may be empty.
    pub value: &'a str,
}

/// Whether a line carries no entry (blank or comment).
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Decode one raw line, dropping a trailing `\n` or `\r\n`.
///
/// A blank or comment line that is not valid UTF-8 decodes to `""`, since
/// it would be skipped anyway.
pub fn decode_line(raw: &[u8]) -> Result<&str, Utf8Error> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(line) => Ok(line),
        Err(_) if is_skippable(&String::from_utf8_lossy(raw)) => Ok(""),
        Err(e) => Err(e),
    }
}

/// Split a line into name, type name and value text.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Example
///
/// ```rust
/// use retweak_core::split_line;
///
/// let line = split_line("speed: TW_TYPE_FLOAT 2.5").unwrap().unwrap();
/// assert_eq!(line.name, "speed");
/// assert_eq!(line.type_name, "TW_TYPE_FLOAT");
/// assert_eq!(line.value, "2.5");
///
/// assert!(split_line("# saved by retweak").unwrap().is_none());
/// ```
pub fn split_line(line: &str) -> Result<Option<RawLine<'_>>, LineError> {
    if is_skippable(line) {
        return Ok(None);
    }

    let (name, rest) = line.split_once(':').ok_or(LineError::MissingColon)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(LineError::MissingName);
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return Err(LineError::MissingType);
    }
    let (type_name, value) = match rest.split_once(char::is_whitespace) {
        Some((type_name, value)) => (type_name, value.trim()),
        None => (rest, ""),
    };

    Ok(Some(RawLine {
        name,
        type_name,
        value,
    }))
}

/// Format a line from a name and a serialized value.
pub fn format_line(name: &str, serialized: &str) -> String {
    format!("{name}: {serialized}")
}

/// Whether `name` can be written to and read back from a line unchanged.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name == name.trim()
        && !name.starts_with(COMMENT_MARKER)
        && !name.contains([':', '\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_strips_line_endings() {
        assert_eq!(decode_line(b"a: TW_TYPE_INT32 1\r\n"), Ok("a: TW_TYPE_INT32 1"));
        assert_eq!(decode_line(b"a: TW_TYPE_INT32 1\n"), Ok("a: TW_TYPE_INT32 1"));
        assert_eq!(decode_line(b"last"), Ok("last"));
    }

    #[test]
    fn decode_invalid_utf8() {
        assert_eq!(decode_line(b"# caf\xe9 comment\n"), Ok(""));
        assert!(decode_line(b"  \xff\n").is_err());
        assert!(decode_line(b"s: TW_TYPE_STDSTRING caf\xe9\n").is_err());
    }

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(split_line(""), Ok(None));
        assert_eq!(split_line("   \t"), Ok(None));
        assert_eq!(split_line("# comment"), Ok(None));
        assert_eq!(split_line("  # indented comment"), Ok(None));
    }

    #[test]
    fn vector_line() {
        let line = split_line("color: TW_TYPE_COLOR3F 1 0 0\r").unwrap().unwrap();
        assert_eq!(line.name, "color");
        assert_eq!(line.type_name, "TW_TYPE_COLOR3F");
        assert_eq!(line.value, "1 0 0");
    }

    #[test]
    fn value_keeps_inner_spaces() {
        let line = split_line("mode:Shading   Wire frame").unwrap().unwrap();
        assert_eq!(line.type_name, "Shading");
        assert_eq!(line.value, "Wire frame");
    }

    #[test]
    fn name_with_spaces() {
        let line = split_line("light dir: TW_TYPE_DIR3F 0 1 0").unwrap().unwrap();
        assert_eq!(line.name, "light dir");
    }

    #[test]
    fn missing_value_is_empty() {
        let line = split_line("title: TW_TYPE_STDSTRING").unwrap().unwrap();
        assert_eq!(line.value, "");
    }

    #[test]
    fn structural_errors() {
        assert_eq!(split_line("speed TW_TYPE_FLOAT 2.5"), Err(LineError::MissingColon));
        assert_eq!(split_line(": TW_TYPE_FLOAT 2.5"), Err(LineError::MissingName));
        assert_eq!(split_line("speed:   "), Err(LineError::MissingType));
    }

    #[test]
    fn format_then_split() {
        let text = format_line("speed", "TW_TYPE_FLOAT 2.5");
        assert_eq!(text, "speed: TW_TYPE_FLOAT 2.5");
        let line = split_line(&text).unwrap().unwrap();
        assert_eq!((line.name, line.value), ("speed", "2.5"));
    }

    #[test]
    fn name_validity() {
        assert!(is_valid_name("speed"));
        assert!(is_valid_name("light dir"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(" speed"));
        assert!(!is_valid_name("a:b"));
        assert!(!is_valid_name("#speed"));
        assert!(!is_valid_name("two\nlines"));
    }
}
