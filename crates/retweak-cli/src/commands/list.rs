//! Saved bar listing command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use retweak_bar::paths;

#[derive(Args)]
pub struct ListArgs {
    /// Directory to list instead of the per-user bars directory
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

pub fn run(args: ListArgs) -> anyhow::Result<ExitCode> {
    let (dir, bars) = match args.dir {
        Some(dir) => {
            let bars = paths::list_bars_in_dir(&dir);
            (dir, bars)
        }
        None => (paths::user_bars_dir(), paths::list_saved_bars()),
    };

    if bars.is_empty() {
        println!("No saved bars in {}", dir.display());
        return Ok(ExitCode::SUCCESS);
    }

    println!("Saved Bars ({})", dir.display());
    println!();
    for path in &bars {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        println!("  {name:<24} {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
