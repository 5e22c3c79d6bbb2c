//! floorwatch: approval request reconciliation for restaurant-floor managers.
//!
//! This library exposes the core components of floorwatch for integration
//! testing and embedding. The binary entrypoint is in `main.rs`.

// Many items are pub for use by integration tests, which are separate
// compilation units, so suppress false dead_code warnings.
#![allow(dead_code)]

pub mod cli;
pub mod config;
pub mod effect;
pub mod engine;
pub mod request;
pub mod source;
pub mod utils;
