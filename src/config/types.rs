//! Resolved configuration types.

use crate::engine::EngineOptions;
use std::fmt;
use std::time::Duration;

/// Fully validated settings for talking to one venue's backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Venue whose requests are watched
    pub venue_id: String,
    /// Delay between poll cycles
    pub poll_interval: Duration,
    /// Upper bound on each HTTP call
    pub request_timeout: Duration,
    /// Opaque bearer credential, if any
    pub auth_token: Option<String>,
    pub sound: SoundSettings,
}

impl Config {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions::new(self.venue_id.clone()).with_poll_interval(self.poll_interval)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "base_url:        {}", self.base_url)?;
        writeln!(f, "venue_id:        {}", self.venue_id)?;
        writeln!(f, "poll_interval:   {:?}", self.poll_interval)?;
        writeln!(f, "request_timeout: {:?}", self.request_timeout)?;
        writeln!(
            f,
            "auth_token:      {}",
            if self.auth_token.is_some() { "(set)" } else { "(none)" }
        )?;
        write!(
            f,
            "sound:           {}",
            match (&self.sound.enabled, &self.sound.command) {
                (false, _) => "off".to_string(),
                (true, None) => "terminal bell".to_string(),
                (true, Some(cmd)) => cmd.clone(),
            }
        )
    }
}

/// How arrivals are announced audibly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSettings {
    pub enabled: bool,
    /// External player command; the terminal bell is used when unset
    pub command: Option<String>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}
