//! Interactive cache manager.
//!
//! A line-oriented shell over the detected store for support sessions:
//! listing keys, reading and removing individual entries, and running the
//! cleaner or seeder in place. Command failures are reported and the loop
//! continues.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::config::StorageConfig;
use crate::error::{AppError, Result, StorageError};
use crate::service::{cleaner, seed};
use crate::storage::detect_store;
use crate::storage::traits::CacheStore;

/// Whether the shell keeps reading after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run the interactive shell against the detected store.
///
/// # Errors
///
/// Returns [`AppError::NoEnvironment`] when no store is present, or an I/O
/// error if stdin cannot be read.
pub async fn run(config: &StorageConfig) -> Result<()> {
    let store = detect_store(config)
        .await?
        .ok_or(AppError::NoEnvironment)?;

    println!("=== Reschedule cache manager ({}) ===", store.backend_name());
    println!("Type 'help' for available commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n> ");
        std::io::stdout().flush().map_err(StorageError::from)?;

        let Some(line) = lines.next_line().await.map_err(StorageError::from)? else {
            break;
        };

        if dispatch(store.as_ref(), &line).await == Flow::Exit {
            break;
        }
    }

    Ok(())
}

/// Execute one shell command line.
async fn dispatch(store: &dyn CacheStore, line: &str) -> Flow {
    let input = line.trim();
    if input.is_empty() {
        return Flow::Continue;
    }

    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "help" => show_help(),
        "keys" => match store.keys().await {
            Ok(keys) if keys.is_empty() => println!("(store is empty)"),
            Ok(keys) => {
                for key in keys {
                    println!("{key}");
                }
            }
            Err(err) => error!(error = %err, "Failed to list keys"),
        },
        "get" => match args.first() {
            None => println!("Usage: get <key>"),
            Some(key) => match store.get(key).await {
                Ok(Some(value)) => println!("{value}"),
                Ok(None) => println!("(absent)"),
                Err(err) => error!(key, error = %err, "Failed to read key"),
            },
        },
        "remove" => match args.first() {
            None => println!("Usage: remove <key>"),
            Some(key) => match store.remove(key).await {
                Ok(true) => println!("Removed '{key}'"),
                Ok(false) => println!("'{key}' was already absent"),
                Err(err) => error!(key, error = %err, "Failed to remove key"),
            },
        },
        "clean" => {
            cleaner::clean_store(store).await;
        }
        "seed" => {
            if let Err(err) = seed::seed_store(store).await {
                error!(error = %err, "Seeding failed");
            }
        }
        "exit" | "quit" => return Flow::Exit,
        other => println!("Unknown command '{other}'. Type 'help' for available commands"),
    }

    Flow::Continue
}

fn show_help() {
    println!("Available commands:");
    println!("  help          show this message");
    println!("  keys          list stored keys");
    println!("  get <key>     print the raw value stored under <key>");
    println!("  remove <key>  remove the value stored under <key>");
    println!("  clean         remove all managed cache keys");
    println!("  seed          load the sample fixture");
    println!("  exit          leave the shell");
}
