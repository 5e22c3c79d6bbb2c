//! floorwatch: approval requests for restaurant-floor managers.
//!
//! Watches a venue for staff requests (discounts, early clock-ins) and lets
//! the manager approve or reject them from the terminal.
//!
//! Quick start:
//!   floorwatch init --venue 24477   # write .floorwatch.yaml
//!   floorwatch                      # watch for requests
//!   floorwatch demo                 # try it without a backend
//!
//! For more info: floorwatch --help

// Suppress warnings for items that are public API (used by tests)
#![allow(dead_code, unused_imports)]

mod cli;
mod config;
mod effect;
mod engine;
mod request;
mod source;
mod utils;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use config::{ConfigOverrides, LoadedConfig};
use std::path::PathBuf;

/// floorwatch: approve staff requests as they come in.
#[derive(Parser)]
#[command(
    name = "floorwatch",
    version,
    about = "Approve staff requests from the restaurant floor",
    long_about = "floorwatch polls your venue's backend for staff approval requests\n\
                  (discounts, early clock-ins), announces new ones, and lets you\n\
                  approve or reject them.\n\n\
                  Quick start:\n  \
                  floorwatch init --venue 24477   # write a config file\n  \
                  floorwatch                      # watch for requests\n  \
                  floorwatch demo                 # try it without a backend"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (default: .floorwatch.yaml walking up, then ~/.floorwatch/config.yaml)
    #[arg(short, long, global = true, env = "FLOORWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Venue to watch (overrides the config file)
    #[arg(long, global = true, env = "FLOORWATCH_VENUE")]
    venue: Option<String>,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Poll interval, e.g. 1s or 500ms (overrides the config file)
    #[arg(long, global = true)]
    interval: Option<String>,
}

impl GlobalArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            venue_id: self.venue.clone(),
            base_url: self.base_url.clone(),
            poll_interval: self.interval.clone(),
        }
    }

    fn load(&self) -> anyhow::Result<LoadedConfig> {
        config::load_config(self.config.as_deref(), &self.overrides())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Watch for requests and decide on them (the main command)
    Watch,

    /// Fetch once and print pending and previous requests
    List,

    /// Approve or reject a single request
    Decide {
        /// Request id
        id: String,

        /// approve or reject
        #[arg(help = "approve | reject")]
        decision: String,
    },

    /// Watch an in-memory fake backend that invents requests
    Demo {
        /// Invent a new request every N polls
        #[arg(long, default_value_t = 3)]
        every: u64,
    },

    /// Validate the config and show what will be used
    Check,

    /// Write a starter config file
    Init {
        #[arg(short, long, default_value = "standard")]
        template: String,
        /// Output path (default: ./.floorwatch.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Set up tracing (only show at RUST_LOG=debug level to keep output clean)
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "floorwatch=warn".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Watch) => match cli.global.load() {
            Ok(loaded) => cli::watch::run_watch(&loaded.config).await,
            Err(e) => Err(e),
        },

        Some(Commands::List) => match cli.global.load() {
            Ok(loaded) => cli::list::run_list(&loaded.config).await,
            Err(e) => Err(e),
        },

        Some(Commands::Decide { id, decision }) => match cli.global.load() {
            Ok(loaded) => cli::decide::run_decide(&loaded.config, &id, &decision).await,
            Err(e) => Err(e),
        },

        Some(Commands::Demo { every }) => run_demo(&cli.global, every).await,

        Some(Commands::Check) => run_check(&cli.global),

        Some(Commands::Init {
            template,
            output,
            force,
        }) => cli::init::run_init(
            Some(&template),
            cli.global.venue.as_deref(),
            output.as_deref(),
            force,
        ),
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}

/// The demo needs no config file; it falls back to a made-up venue.
async fn run_demo(global: &GlobalArgs, every: u64) -> anyhow::Result<()> {
    let mut overrides = global.overrides();
    if overrides.venue_id.is_none() {
        overrides.venue_id = Some("DEMO_VENUE".to_string());
    }
    let raw = config::parser::RawConfig::default();
    let config = config::parser::resolve(raw, &overrides, None)?;
    cli::watch::run_demo(&config, every).await
}

/// Run the `floorwatch check` command.
fn run_check(global: &GlobalArgs) -> anyhow::Result<()> {
    let loaded = global.load()?;

    println!();
    println!("  {} Config is valid!", "✓".green().bold());
    match &loaded.path {
        Some(path) => println!("  File: {}", path.display().to_string().dimmed()),
        None => println!("  File: {}", "(none, using command-line values)".dimmed()),
    }
    println!();
    for line in loaded.config.to_string().lines() {
        println!("  {}", line);
    }
    println!();
    Ok(())
}
