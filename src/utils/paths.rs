//! Where floorwatch looks for its config file.
//!
//! Lookup order:
//! 1. An explicit `--config` path
//! 2. `.floorwatch.yaml` in the current directory or any parent
//! 3. `~/.floorwatch/config.yaml`

use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const PROJECT_CONFIG_NAME: &str = ".floorwatch.yaml";

/// Find `.floorwatch.yaml` walking up the directory tree.
pub fn find_config_walking_up(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(PROJECT_CONFIG_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Per-user config path (`~/.floorwatch/config.yaml`), if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".floorwatch").join("config.yaml"))
}

/// Resolve which config file to load, if any.
pub fn locate_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    find_config_walking_up(cwd).or_else(|| user_config_path().filter(|p| p.is_file()))
}
