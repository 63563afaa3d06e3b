//! Command-line interface definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::StoreKind;

/// Client cache maintenance tool for the Reschedule app.
#[derive(Debug, Parser)]
#[command(name = "reschedule-maint", version, about)]
pub struct Cli {
    /// Storage backend to operate on (overrides configuration).
    #[arg(long, value_enum, global = true)]
    pub store: Option<StoreArg>,

    /// Operation to run; defaults to `clean`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Maintenance operations.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Remove the client's cached keys.
    Clean,
    /// Print the cached keys and values without modifying them.
    Inspect,
    /// Load the sample development fixture.
    Seed,
    /// Open an interactive cache manager.
    Shell,
}

/// Backend selection on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StoreArg {
    /// Probe for the app store, then the browser database.
    Auto,
    /// The app framework's key-value store.
    App,
    /// A browser local-storage database.
    Browser,
}

impl From<StoreArg> for StoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Auto => Self::Auto,
            StoreArg::App => Self::App,
            StoreArg::Browser => Self::Browser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["reschedule-maint"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.store.is_none());
    }

    #[test]
    fn test_store_override_parses() {
        let cli = Cli::try_parse_from(["reschedule-maint", "--store", "browser", "clean"]).unwrap();
        assert!(matches!(cli.store, Some(StoreArg::Browser)));
        assert!(matches!(cli.command, Some(Command::Clean)));
    }
}
