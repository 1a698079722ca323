//! Type listing command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use retweak_core::BUILTIN_TYPES;

use super::common::load_types;

#[derive(Args)]
pub struct TypesArgs {
    /// Enum catalog (TOML) whose enums are listed too
    #[arg(long, value_name = "FILE")]
    enums: Option<PathBuf>,
}

pub fn run(args: TypesArgs) -> anyhow::Result<ExitCode> {
    let types = load_types(args.enums.as_deref())?;

    println!("Built-in Types");
    println!("==============");
    println!();
    for ty in BUILTIN_TYPES {
        let note = if ty.is_persistable() {
            String::new()
        } else {
            "  (saved as unsupported)".to_string()
        };
        println!("  {}{note}", ty.name());
    }

    if types.enum_count() > 0 {
        println!();
        println!("Enums");
        println!("=====");
        println!();
        for (_, def) in types.enums() {
            let labels: Vec<String> = def
                .values
                .iter()
                .map(|v| format!("{}={}", v.code, v.label))
                .collect();
            println!("  {:15} {}", def.name, labels.join(", "));
        }
    }

    Ok(ExitCode::SUCCESS)
}
