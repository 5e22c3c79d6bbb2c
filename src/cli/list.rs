//! `floorwatch list`: run one reconciliation cycle and print the result.

use crate::cli::render;
use crate::config::Config;
use crate::effect::NoopEffect;
use crate::engine::Engine;
use crate::source::HttpRequestSource;
use anyhow::{bail, Context, Result};
use std::sync::Arc;

/// Run the `floorwatch list` command.
pub async fn run_list(config: &Config) -> Result<()> {
    let source = HttpRequestSource::new(config.base_url.clone(), config.request_timeout)
        .context("Failed to set up HTTP client")?
        .with_auth_token(config.auth_token.clone());
    let engine = Engine::new(config.engine_options(), Arc::new(source), Arc::new(NoopEffect));

    let report = engine.run_cycle().await;
    if !report.pending_ok && !report.resolved_ok {
        bail!(
            "Could not fetch requests for venue {} from {} (RUST_LOG=floorwatch=debug for details)",
            config.venue_id,
            config.base_url
        );
    }

    render::print_snapshot(&engine.snapshot());
    Ok(())
}
