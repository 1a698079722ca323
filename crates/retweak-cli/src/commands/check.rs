//! Bar file validation command.
//!
//! Runs every line through the same split/resolve/parse steps a load uses,
//! without a bar to apply them to. Lines that would be skipped are reported.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use retweak_bar::{IssueKind, LineIssue};
use retweak_core::{TypeRegistry, decode_line, parse, split_line};

use super::common::load_types;

#[derive(Args)]
pub struct CheckArgs {
    /// Bar file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Enum catalog (TOML) defining the file's enum types
    #[arg(long, value_name = "FILE")]
    enums: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Outcome of checking one file.
struct CheckReport {
    entries: usize,
    issues: Vec<LineIssue>,
}

fn check_bytes(input: &[u8], types: &TypeRegistry) -> CheckReport {
    let mut report = CheckReport {
        entries: 0,
        issues: Vec::new(),
    };

    for (i, raw_line) in input.split_inclusive(|b| *b == b'\n').enumerate() {
        let issue = |name: Option<&str>, kind| LineIssue {
            line: i + 1,
            name: name.map(str::to_string),
            kind,
        };

        let Ok(line) = decode_line(raw_line) else {
            report.issues.push(issue(None, IssueKind::InvalidEncoding));
            continue;
        };
        let raw = match split_line(line) {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(e) => {
                report.issues.push(issue(None, IssueKind::MalformedLine(e)));
                continue;
            }
        };
        report.entries += 1;

        let Some(tag) = types.resolve(raw.type_name) else {
            let kind = IssueKind::UnknownType(raw.type_name.to_string());
            report.issues.push(issue(Some(raw.name), kind));
            continue;
        };
        if let Err(e) = parse(tag, raw.value, types) {
            report
                .issues
                .push(issue(Some(raw.name), IssueKind::MalformedValue(e)));
        }
    }

    report
}

fn kind_code(kind: &IssueKind) -> &'static str {
    match kind {
        IssueKind::InvalidEncoding => "invalid_encoding",
        IssueKind::MalformedLine(_) => "malformed_line",
        IssueKind::UnknownType(_) => "unknown_type",
        IssueKind::MalformedValue(_) => "malformed_value",
        IssueKind::NotFound => "not_found",
        IssueKind::TypeMismatch { .. } => "type_mismatch",
    }
}

fn print_json(path: &Path, report: &CheckReport) -> anyhow::Result<()> {
    let issues: Vec<_> = report
        .issues
        .iter()
        .map(|issue| {
            serde_json::json!({
                "line": issue.line,
                "name": issue.name,
                "kind": kind_code(&issue.kind),
                "message": issue.kind.to_string(),
            })
        })
        .collect();
    let json = serde_json::json!({
        "file": path.display().to_string(),
        "entries": report.entries,
        "issues": issues,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub fn run(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let types = load_types(args.enums.as_deref())?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let report = check_bytes(&bytes, &types);
    tracing::debug!(
        entries = report.entries,
        issues = report.issues.len(),
        "checked {}",
        args.file.display()
    );

    if args.json {
        print_json(&args.file, &report)?;
    } else {
        for issue in &report.issues {
            println!("{}:{issue}", args.file.display());
        }
        println!(
            "{}: {} entries, {} issues",
            args.file.display(),
            report.entries,
            report.issues.len()
        );
    }

    Ok(if report.issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use retweak_core::EnumDef;

    #[test]
    fn clean_file() {
        let types = TypeRegistry::new();
        let report = check_bytes(
            b"# saved\nspeed: TW_TYPE_FLOAT 2.5\ncolor: TW_TYPE_COLOR3F 1 0 0\n\n",
            &types,
        );
        assert_eq!(report.entries, 2);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn every_issue_is_reported() {
        let types = TypeRegistry::new();
        let report = check_bytes(
            b"oops\nspeed: TW_TYPE_NOPE 1\ncolor: TW_TYPE_COLOR3F 1 0\nok: TW_TYPE_INT8 3\n",
            &types,
        );
        assert_eq!(report.entries, 3);
        let codes: Vec<_> = report.issues.iter().map(|i| kind_code(&i.kind)).collect();
        assert_eq!(codes, ["malformed_line", "unknown_type", "malformed_value"]);
        assert_eq!(report.issues[2].line, 3);
    }

    #[test]
    fn enums_need_catalog() {
        let text = b"mode: Mode On\n";
        let report = check_bytes(text, &TypeRegistry::new());
        assert!(matches!(report.issues[0].kind, IssueKind::UnknownType(_)));

        let mut types = TypeRegistry::new();
        types
            .define_enum(EnumDef::new("Mode").with_value(0, "Off").with_value(1, "On"))
            .unwrap();
        assert!(check_bytes(text, &types).issues.is_empty());
    }

    #[test]
    fn undecodable_lines_are_reported() {
        let types = TypeRegistry::new();
        let report = check_bytes(
            b"# caf\xe9\nspeed: TW_TYPE_FLOAT 1\r\nname: TW_TYPE_STDSTRING caf\xe9\n",
            &types,
        );
        assert_eq!(report.entries, 1);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].line, 3);
        assert_eq!(kind_code(&report.issues[0].kind), "invalid_encoding");
    }
}
