//! Built-in config templates that ship with floorwatch.
//!
//! - `standard`: polls every 3 seconds, terminal bell on arrivals
//! - `fast`: polls every second, for busy floors
//! - `quiet`: standard cadence, no sound

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8013";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable consulted when the config file has no `auth_token`.
pub const TOKEN_ENV_VAR: &str = "FLOORWATCH_TOKEN";

/// Placeholder replaced by `floorwatch init --venue`.
pub const VENUE_PLACEHOLDER: &str = "{venue_id}";

pub const STANDARD_YAML: &str = r#"# floorwatch config: standard
# Watches one venue for staff approval requests.

base_url: http://localhost:8013
venue_id: "{venue_id}"

# How long to wait after one poll finishes before starting the next
poll_interval: 3s

# Give up on a single backend call after this long (retried next poll)
request_timeout: 10s

# Bearer credential for the backend. Leave unset to use $FLOORWATCH_TOKEN.
# auth_token: ...

sound:
  enabled: true
  # Play a file instead of ringing the terminal bell:
  # command: paplay /usr/share/sounds/freedesktop/stereo/message.oga
"#;

pub const FAST_YAML: &str = r#"# floorwatch config: fast
# Polls every second. Use on busy floors where requests pile up quickly.

base_url: http://localhost:8013
venue_id: "{venue_id}"
poll_interval: 1s
request_timeout: 5s

sound:
  enabled: true
"#;

pub const QUIET_YAML: &str = r#"# floorwatch config: quiet
# Standard cadence without any sound.

base_url: http://localhost:8013
venue_id: "{venue_id}"
poll_interval: 3s
request_timeout: 10s

sound:
  enabled: false
"#;

/// Get the YAML content for a named template.
pub fn get_template(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "standard" | "default" => Some(STANDARD_YAML),
        "fast" => Some(FAST_YAML),
        "quiet" | "silent" => Some(QUIET_YAML),
        _ => None,
    }
}

/// List all available template names.
pub fn available_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("standard", "Poll every 3s, terminal bell on new requests"),
        ("fast", "Poll every second for busy floors"),
        ("quiet", "Poll every 3s with sound turned off"),
    ]
}
