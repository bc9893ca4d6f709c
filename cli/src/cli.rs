//! # CLI Interface
//!
//! Defines the command-line argument structure for the `coral` binary
//! using `clap` derive. Two subcommands: `demo` and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CORAL collateral reserve ledger.
///
/// Operator tooling for the off-chain reserve valuation ledger: walks the
/// full reserve lifecycle against a setup config so deployments can be
/// sanity-checked before any capital moves.
#[derive(Parser, Debug)]
#[command(
    name = "coral",
    about = "CORAL collateral reserve ledger",
    version,
    propagate_version = true
)]
pub struct CoralCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the coral binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scripted reserve lifecycle against a setup config:
    /// create, bind weighted vaults, value, unbind, delete, rebind.
    Demo(DemoArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Path to the setup configuration file (JSON).
    #[arg(long, short = 'c', env = "CORAL_CONFIG", default_value = "setup.json")]
    pub config: PathBuf,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "CORAL_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        CoralCli::command().debug_assert();
    }
}
