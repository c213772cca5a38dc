//! Reconcile CLI command.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use profilesync_core::identity::FallbackOptions;
use profilesync_core::reconcile::{AmbiguousExistence, ProvisioningPolicy, ReconcileOptions};

/// Run account notifications through a single controller.
///
/// Each file is one "accounts changed" notification. An empty array or
/// `null` signs the session out.
#[derive(Debug, Parser)]
pub struct ReconcileCommand {
    /// What to do once a profile is validated.
    #[arg(long, env = "PROFILESYNC_POLICY", default_value = "create")]
    pub policy: PolicyArg,

    /// How a failed existence check is treated under `ensure-exists`.
    #[arg(long, default_value = "treat-as-missing")]
    pub on_ambiguous: AmbiguousArg,

    /// Use a single-word display name as the first name.
    #[arg(long)]
    pub single_token_first_name: bool,

    /// Notification files, processed in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl ReconcileCommand {
    pub fn options(&self) -> ReconcileOptions {
        ReconcileOptions {
            policy: self.policy.into(),
            ambiguous_existence: self.on_ambiguous.into(),
            fallback: FallbackOptions {
                single_token_as_first_name: self.single_token_first_name,
            },
        }
    }
}

/// Provisioning policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Create the profile without looking it up first.
    Create,
    /// Only report whether a profile exists.
    CheckExisting,
    /// Look the profile up and create it when missing.
    EnsureExists,
}

impl From<PolicyArg> for ProvisioningPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Create => ProvisioningPolicy::Create,
            PolicyArg::CheckExisting => ProvisioningPolicy::CheckExisting,
            PolicyArg::EnsureExists => ProvisioningPolicy::EnsureExists,
        }
    }
}

/// Handling of a lookup that failed to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmbiguousArg {
    /// Proceed as if no profile exists.
    TreatAsMissing,
    /// Stop without creating.
    Abort,
}

impl From<AmbiguousArg> for AmbiguousExistence {
    fn from(arg: AmbiguousArg) -> Self {
        match arg {
            AmbiguousArg::TreatAsMissing => AmbiguousExistence::TreatAsMissing,
            AmbiguousArg::Abort => AmbiguousExistence::Abort,
        }
    }
}
