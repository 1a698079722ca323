//! Per-user locations for saved bar files.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/retweak/` (Linux), `~/Library/Application Support/retweak/` (macOS), `%APPDATA%\retweak\` (Windows)
//! - **Saved bars**: `<user config>/bars/<bar>.twb`
//!
//! # Example
//!
//! ```rust,no_run
//! use retweak_bar::paths;
//!
//! let path = paths::default_bar_path("Scene settings");
//! println!("Bar file: {}", path.display());
//! ```

use std::path::{Path, PathBuf};

use crate::error::BarError;

/// Application name used for directory paths.
const APP_NAME: &str = "retweak";

/// Subdirectory name for saved bars.
const BARS_SUBDIR: &str = "bars";

/// Extension of saved bar files.
pub const BAR_FILE_EXTENSION: &str = "twb";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the directory holding saved bars.
pub fn user_bars_dir() -> PathBuf {
    user_config_dir().join(BARS_SUBDIR)
}

/// Default file for a bar.
pub fn default_bar_path(bar: &str) -> PathBuf {
    user_bars_dir().join(bar_file_name(bar))
}

/// File name used for a bar in [`user_bars_dir`].
///
/// Characters that are unsafe in file names are replaced with `_`.
///
/// # Example
///
/// ```rust
/// use retweak_bar::paths::bar_file_name;
///
/// assert_eq!(bar_file_name("Scene/Lights"), "Scene_Lights.twb");
/// ```
pub fn bar_file_name(bar: &str) -> String {
    let stem: String = bar
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    let stem = if stem.is_empty() { "bar" } else { stem };
    format!("{stem}.{BAR_FILE_EXTENSION}")
}

/// Ensure the saved bars directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_bars_dir() -> Result<PathBuf, BarError> {
    let dir = user_bars_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| BarError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// List saved bar files in the user bars directory.
pub fn list_saved_bars() -> Vec<PathBuf> {
    list_bars_in_dir(&user_bars_dir())
}

/// List `.twb` files in `dir`, sorted. A missing directory lists nothing.
pub fn list_bars_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut bars: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == BAR_FILE_EXTENSION)
        })
        .collect();
    bars.sort();
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_config_dir() {
        let dir = user_config_dir();
        assert!(dir.to_string_lossy().contains("retweak"));
    }

    #[test]
    fn test_default_bar_path() {
        let path = default_bar_path("Main");
        assert!(path.starts_with(user_bars_dir()));
        assert_eq!(path.file_name().unwrap(), "Main.twb");
    }

    #[test]
    fn test_bar_file_name_sanitizes() {
        assert_eq!(bar_file_name("Lights: key/fill"), "Lights_ key_fill.twb");
        assert_eq!(bar_file_name("../escape"), "_escape.twb");
        assert_eq!(bar_file_name("  "), "bar.twb");
    }

    #[test]
    fn test_list_bars_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.twb"), "").unwrap();
        fs::write(temp_dir.path().join("a.twb"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let bars = list_bars_in_dir(temp_dir.path());
        let names: Vec<_> = bars
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.twb", "b.twb"]);
    }

    #[test]
    fn test_list_bars_nonexistent_dir() {
        assert!(list_bars_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }
}
