//! YAML config parser for floorwatch.
//!
//! Parses the config file into a raw intermediate form, layers CLI
//! overrides and the environment on top, then validates.
//!
//! # Example config file:
//! ```yaml
//! base_url: http://10.0.0.5:8013
//! venue_id: "24477"
//! poll_interval: 3s
//! request_timeout: 10s
//! sound:
//!   enabled: true
//! ```

use crate::config::defaults::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, VENUE_PLACEHOLDER};
use crate::config::types::{Config, SoundSettings};
use crate::engine::DEFAULT_POLL_INTERVAL;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Raw YAML representation before defaults and validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    venue_id: Option<StringOrNumber>,
    #[serde(default)]
    poll_interval: Option<DurationValue>,
    #[serde(default)]
    request_timeout: Option<DurationValue>,
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default)]
    sound: Option<RawSound>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSound {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    command: Option<String>,
}

/// Venue ids are often numeric; accept them quoted or not:
/// ```yaml
/// venue_id: 24477        # number, works
/// venue_id: "MOCK_TO"    # string, also works
/// ```
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(u64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// A bare YAML number is milliseconds; strings take a unit (`500ms`, `3s`, `1m`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Millis(u64),
    Text(String),
}

impl DurationValue {
    fn into_duration(self) -> Result<Duration> {
        match self {
            DurationValue::Millis(ms) => Ok(Duration::from_millis(ms)),
            DurationValue::Text(s) => parse_duration(&s),
        }
    }
}

/// Values given on the command line, which win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub venue_id: Option<String>,
    pub base_url: Option<String>,
    pub poll_interval: Option<String>,
}

/// Parse a YAML config file from a path into its raw form.
pub fn parse_raw_file(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_raw_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a YAML config string into its raw form. An empty document is all defaults.
pub fn parse_raw_str(yaml: &str) -> Result<RawConfig> {
    let has_content = yaml.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(RawConfig::default());
    }
    serde_yaml::from_str(yaml).context("Invalid YAML syntax in config file")
}

/// Parse and validate a YAML config string with no overrides.
pub fn parse_config_str(yaml: &str) -> Result<Config> {
    resolve(parse_raw_str(yaml)?, &ConfigOverrides::default(), None)
}

/// Apply defaults, overrides and the environment token, then validate.
pub fn resolve(
    raw: RawConfig,
    overrides: &ConfigOverrides,
    env_token: Option<String>,
) -> Result<Config> {
    let base_url = overrides
        .base_url
        .clone()
        .or(raw.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let venue_id = match overrides.venue_id.clone() {
        Some(venue) => venue,
        None => raw
            .venue_id
            .map(StringOrNumber::into_string)
            .context("No venue configured. Set 'venue_id' in the config file or pass --venue")?,
    };

    let poll_interval = match &overrides.poll_interval {
        Some(text) => parse_duration(text).context("Invalid --interval")?,
        None => raw
            .poll_interval
            .map(DurationValue::into_duration)
            .transpose()
            .context("Invalid 'poll_interval'")?
            .unwrap_or(DEFAULT_POLL_INTERVAL),
    };

    let request_timeout = raw
        .request_timeout
        .map(DurationValue::into_duration)
        .transpose()
        .context("Invalid 'request_timeout'")?
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

    let raw_sound = raw.sound.unwrap_or_default();
    let sound = SoundSettings {
        enabled: raw_sound.enabled.unwrap_or(true),
        command: raw_sound.command.filter(|c| !c.trim().is_empty()),
    };

    let config = Config {
        base_url: base_url.trim().trim_end_matches('/').to_string(),
        venue_id: venue_id.trim().to_string(),
        poll_interval,
        request_timeout,
        auth_token: raw.auth_token.or(env_token).filter(|t| !t.trim().is_empty()),
        sound,
    };
    validate(&config)?;
    Ok(config)
}

/// Check that a resolved config is usable.
pub fn validate(config: &Config) -> Result<()> {
    if config.venue_id.is_empty() {
        bail!("'venue_id' must not be empty");
    }
    if config.venue_id.contains(VENUE_PLACEHOLDER) {
        bail!("'venue_id' still holds the template placeholder. Set it to your venue id");
    }
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        bail!(
            "'base_url' must start with http:// or https:// (got '{}')",
            config.base_url
        );
    }
    if config.poll_interval.is_zero() {
        bail!("'poll_interval' must be greater than zero");
    }
    if config.request_timeout.is_zero() {
        bail!("'request_timeout' must be greater than zero");
    }
    Ok(())
}

/// Parse `250ms`, `3s`, `2m` or a bare number of milliseconds.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let text = text.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(split);

    if digits.is_empty() {
        bail!("'{}' is not a duration (expected e.g. 500ms, 3s, 1m)", text);
    }
    let value: u64 = digits
        .parse()
        .with_context(|| format!("'{}' is out of range", digits))?;

    match unit.trim() {
        "" | "ms" => Ok(Duration::from_millis(value)),
        "s" | "sec" | "secs" => Ok(Duration::from_secs(value)),
        "m" | "min" | "mins" => {
            let secs = value
                .checked_mul(60)
                .with_context(|| format!("'{}' is out of range", text))?;
            Ok(Duration::from_secs(secs))
        }
        other => bail!("Unknown duration unit '{}' in '{}'", other, text),
    }
}
