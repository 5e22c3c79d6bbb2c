pub mod defaults;
pub mod parser;
pub mod types;

use crate::utils::paths;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use parser::{parse_config_str, parse_duration, ConfigOverrides};
pub use types::{Config, SoundSettings};

/// A resolved config plus the file it came from (if any).
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

/// Locate, parse and validate the config, applying CLI overrides and `$FLOORWATCH_TOKEN`.
///
/// Without any config file, overrides alone are enough as long as they name a venue.
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<LoadedConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let path = paths::locate_config(explicit, &cwd);

    let raw = match &path {
        Some(path) => parser::parse_raw_file(path)?,
        None => parser::RawConfig::default(),
    };
    let env_token = std::env::var(defaults::TOKEN_ENV_VAR).ok();

    let config = parser::resolve(raw, overrides, env_token).with_context(|| match &path {
        Some(path) => format!("Invalid config in {}", path.display()),
        None => "No config file found (run `floorwatch init`)".to_string(),
    })?;

    Ok(LoadedConfig { config, path })
}
