//! `floorwatch decide`: approve or reject one request without the live view.

use crate::config::Config;
use crate::effect::NoopEffect;
use crate::engine::Engine;
use crate::request::Decision;
use crate::source::HttpRequestSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

/// Run the `floorwatch decide` command.
pub async fn run_decide(config: &Config, request_id: &str, decision: &str) -> Result<()> {
    let decision = Decision::from_str_loose(decision).with_context(|| {
        format!(
            "Unknown decision '{}' (use approve or reject)",
            decision
        )
    })?;

    let source = HttpRequestSource::new(config.base_url.clone(), config.request_timeout)
        .context("Failed to set up HTTP client")?
        .with_auth_token(config.auth_token.clone());
    let engine = Engine::new(config.engine_options(), Arc::new(source), Arc::new(NoopEffect));

    engine.decide(request_id, decision).await?;

    println!();
    println!(
        "  {} {} sent for request {}",
        "✓".green().bold(),
        decision,
        request_id.bold()
    );
    println!(
        "  {}",
        "It moves to Previous Requests once the backend records it.".dimmed()
    );
    println!();
    Ok(())
}
