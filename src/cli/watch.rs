//! `floorwatch watch` / `floorwatch demo`: the live manager view.
//!
//! Starts the engine, redraws whenever its snapshot changes, and reads
//! manager commands from stdin:
//! - `a <n|id>` approve, `r <n|id>` reject
//! - `l` redraw, `h` help, `q` quit
//!
//! Decisions run on their own task so the view keeps updating while one is
//! in transit. Only one decision can be in transit at a time.

use crate::cli::render;
use crate::config::Config;
use crate::effect::TerminalEffect;
use crate::engine::{DecisionError, Engine, Snapshot};
use crate::request::Decision;
use crate::source::{DemoSource, HttpRequestSource, RequestSource};
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A line typed by the manager.
#[derive(Debug, PartialEq, Eq)]
pub enum WatchCommand {
    Decide { reference: String, decision: Decision },
    Redraw,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines redraw.
pub fn parse_command(line: &str) -> WatchCommand {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return WatchCommand::Redraw;
    };

    match verb.to_lowercase().as_str() {
        "q" | "quit" | "exit" => WatchCommand::Quit,
        "h" | "help" | "?" => WatchCommand::Help,
        "l" | "list" => WatchCommand::Redraw,
        other => match (Decision::from_str_loose(other), parts.next()) {
            (Some(decision), Some(reference)) => WatchCommand::Decide {
                reference: reference.to_string(),
                decision,
            },
            _ => WatchCommand::Unknown(line.trim().to_string()),
        },
    }
}

/// Resolve `3`, `#3`, a full id, or a unique id prefix to a pending request id.
pub fn resolve_reference(snapshot: &Snapshot, reference: &str) -> Option<String> {
    let reference = reference.trim();
    let numeric = reference.strip_prefix('#').unwrap_or(reference);
    if let Ok(number) = numeric.parse::<usize>() {
        if number >= 1 && number <= snapshot.pending.len() {
            return Some(snapshot.pending[number - 1].id.clone());
        }
    }

    if let Some(request) = snapshot.find_pending(reference) {
        return Some(request.id.clone());
    }

    let mut matches = snapshot
        .pending
        .iter()
        .filter(|r| !reference.is_empty() && r.id.starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(request), None) => Some(request.id.clone()),
        _ => None,
    }
}

/// Run `watch` against the configured HTTP backend.
pub async fn run_watch(config: &Config) -> Result<()> {
    let source = HttpRequestSource::new(config.base_url.clone(), config.request_timeout)
        .context("Failed to set up HTTP client")?
        .with_auth_token(config.auth_token.clone());

    println!();
    println!(
        "  {} floorwatch v{}",
        "🍽".to_string().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("  Venue:   {}", config.venue_id.cyan());
    println!("  Backend: {}", config.base_url.dimmed());
    println!("  Polling: every {:?}", config.poll_interval);

    watch_with_source(config, Arc::new(source)).await
}

/// Run `watch` against the in-memory demo backend.
pub async fn run_demo(config: &Config, every_polls: u64) -> Result<()> {
    println!();
    println!(
        "  {} floorwatch demo (a new request every {} polls)",
        "🍽".to_string().bold(),
        every_polls
    );
    let source = DemoSource::new(config.venue_id.clone(), every_polls);
    watch_with_source(config, Arc::new(source)).await
}

async fn watch_with_source(config: &Config, source: Arc<dyn RequestSource>) -> Result<()> {
    let effect = Arc::new(TerminalEffect::new(config.sound.clone()));
    let engine = Engine::new(config.engine_options(), source, effect);
    let mut updates = engine.subscribe();

    engine.start().await?;
    render::print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                render::print_snapshot(&snapshot);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    WatchCommand::Quit => break,
                    WatchCommand::Help => render::print_help(),
                    WatchCommand::Redraw => render::print_snapshot(&engine.snapshot()),
                    WatchCommand::Decide { reference, decision } => {
                        start_decision(&engine, &reference, decision);
                    }
                    WatchCommand::Unknown(input) => {
                        println!("  {} Unknown command '{}' (h for help)", "?".yellow(), input);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    engine.stop().await;
    println!("  {}", "Stopped watching.".dimmed());
    Ok(())
}

/// Kick off a decision on its own task, refusing it up front if one is in transit.
fn start_decision(engine: &Engine, reference: &str, decision: Decision) {
    let snapshot = engine.snapshot();
    if snapshot.in_flight {
        println!(
            "  {} Still sending the previous decision, hold on...",
            "⏳".yellow()
        );
        return;
    }

    let Some(request_id) = resolve_reference(&snapshot, reference) else {
        println!(
            "  {} No pending request matches '{}'",
            "✗".red(),
            reference
        );
        return;
    };

    let engine = engine.clone();
    tokio::spawn(async move {
        match engine.decide(&request_id, decision).await {
            Ok(()) => println!(
                "  {} {} sent for {}",
                "✓".green().bold(),
                decision,
                render::short_id(&request_id)
            ),
            Err(DecisionError::InFlight) => println!(
                "  {} Still sending the previous decision, hold on...",
                "⏳".yellow()
            ),
            Err(e) => {
                eprintln!("  {} {}", "✗".red().bold(), e);
                if let Some(cause) = std::error::Error::source(&e) {
                    eprintln!("  {} {}", "caused by:".dimmed(), cause);
                }
                eprintln!("  {}", "The request is still pending, you can retry.".dimmed());
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ApprovalRequest, RequestKind, RequestStatus};

    fn snapshot(ids: &[&str]) -> Snapshot {
        Snapshot {
            pending: ids
                .iter()
                .map(|id| ApprovalRequest {
                    id: id.to_string(),
                    venue_id: "v1".to_string(),
                    kind: RequestKind::Unknown,
                    status: RequestStatus::Requested,
                    created_at: None,
                    responded_at: None,
                })
                .collect(),
            resolved: Vec::new(),
            in_flight: false,
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("q"), WatchCommand::Quit);
        assert_eq!(parse_command("   "), WatchCommand::Redraw);
        assert_eq!(parse_command("help"), WatchCommand::Help);
        assert_eq!(
            parse_command("a 2"),
            WatchCommand::Decide {
                reference: "2".to_string(),
                decision: Decision::Approved
            }
        );
        assert_eq!(
            parse_command("reject 9f3c"),
            WatchCommand::Decide {
                reference: "9f3c".to_string(),
                decision: Decision::Rejected
            }
        );
        assert_eq!(
            parse_command("a"),
            WatchCommand::Unknown("a".to_string())
        );
        assert_eq!(
            parse_command("dance 1"),
            WatchCommand::Unknown("dance 1".to_string())
        );
    }

    #[test]
    fn test_resolve_by_number_id_and_prefix() {
        let snap = snapshot(&["abc123", "abd456", "zzz"]);
        assert_eq!(resolve_reference(&snap, "1").as_deref(), Some("abc123"));
        assert_eq!(resolve_reference(&snap, "#3").as_deref(), Some("zzz"));
        assert_eq!(resolve_reference(&snap, "abd456").as_deref(), Some("abd456"));
        assert_eq!(resolve_reference(&snap, "abc").as_deref(), Some("abc123"));
        // Ambiguous prefix
        assert_eq!(resolve_reference(&snap, "ab"), None);
        // Out of range
        assert_eq!(resolve_reference(&snap, "4"), None);
        assert_eq!(resolve_reference(&snap, ""), None);
    }
}
