//! User CLI commands.

use clap::{Parser, Subcommand};
use profilesync_core::identity::ProfileDraft;

/// User profile commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// Check whether a profile exists for an email.
    Lookup {
        /// User email.
        #[arg(long)]
        email: String,
    },
    /// Create a profile. Missing names are filled in from the email.
    Create {
        /// User email.
        #[arg(long)]
        email: String,
        /// First name.
        #[arg(long)]
        first_name: Option<String>,
        /// Last name.
        #[arg(long)]
        last_name: Option<String>,
        /// Display name.
        #[arg(long)]
        display_name: Option<String>,
    },
}

/// Build a draft from `users create` arguments.
pub fn draft_from_args(
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    display_name: Option<String>,
) -> ProfileDraft {
    ProfileDraft {
        username: email.clone(),
        email,
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        display_name: display_name.unwrap_or_default(),
        ..ProfileDraft::default()
    }
}
