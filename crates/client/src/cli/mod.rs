//! CLI command definitions.

pub mod reconcile;
pub mod users;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use profilesync_core::reconcile::ReconcileOutcome;

use crate::config::{API_URL_ENV, DEFAULT_API_URL};

/// Reconcile identity-provider sign-ins with backend user profiles.
#[derive(Debug, Parser)]
#[command(name = "profilesync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub base_url: String,

    /// Use an in-memory backend instead of the HTTP API.
    #[arg(long)]
    pub offline: bool,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Hide skipped and signed-out outcomes in pretty output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether an outcome should be printed. JSON output always includes it.
    pub fn shows(&self, outcome: &ReconcileOutcome) -> bool {
        match self.format {
            OutputFormat::Json => true,
            OutputFormat::Pretty => {
                !self.quiet
                    || !matches!(
                        outcome,
                        ReconcileOutcome::SignedOut | ReconcileOutcome::AlreadyProcessed { .. }
                    )
            }
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the profile an account file would produce. No network access.
    Extract {
        /// JSON file with one account object.
        file: PathBuf,
        /// Use a single-word display name as the first name.
        #[arg(long)]
        single_token_first_name: bool,
    },
    /// Feed account notifications through one reconciliation session.
    Reconcile(reconcile::ReconcileCommand),
    /// Call the user profile API directly.
    Users(users::UsersCommand),
}
