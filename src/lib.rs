//! # Reschedule Maint
//!
//! Maintenance CLI for the Reschedule app's client-side cache. The client
//! persists a handful of keys (class list, user info, schedule data, current
//! class, current week) in whichever storage its runtime provides; this tool
//! detects the one that is present and operates on it:
//!
//! - **clean**: remove the managed keys, tolerating absence, never failing
//! - **inspect**: print what is cached, read-only
//! - **seed**: load the sample development fixture
//! - **shell**: interactive key-by-key management
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       Maintenance Tool                         │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────┐  │
//! │  │   CLI    │  │   Service   │  │   Storage   │  │  Domain  │  │
//! │  │  (clap)  │→ │   Layer     │→ │   Layer     │  │  Models  │  │
//! │  └──────────┘  └─────────────┘  └─────────────┘  └──────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::error::AppError;

/// Run the maintenance tool.
///
/// This function:
/// 1. Parses the command line
/// 2. Loads configuration from files and environment
/// 3. Applies the command-line backend override
/// 4. Dispatches to the selected operation
///
/// The `clean` operation never returns an error; the other operations
/// propagate theirs to the caller.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the selected
/// operation fails.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().map_err(AppError::from)?;

    // Initialize logging
    init_logging(&config);

    if let Some(store) = cli.store {
        config.storage.backend = store.into();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.storage.backend,
        "Starting Reschedule maintenance tool"
    );

    match cli.command.unwrap_or(Command::Clean) {
        Command::Clean => {
            // Catch-log-suppress: a cleanup pass always exits 0.
            service::cleaner::run(&config.storage).await;
            Ok(())
        }
        Command::Inspect => Ok(service::inspect::run(&config.storage).await?),
        Command::Seed => Ok(service::seed::run(&config.storage).await?),
        Command::Shell => Ok(service::shell::run(&config.storage).await?),
    }
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}
