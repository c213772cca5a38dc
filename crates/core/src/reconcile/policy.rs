use serde::{Deserialize, Serialize};

use crate::identity::FallbackOptions;

/// What happens once a profile has been validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisioningPolicy {
    /// Send the profile straight to `create`.
    #[default]
    Create,
    /// Look the email up and report whether a record exists. Never creates.
    CheckExisting,
    /// Look the email up and create when no record exists.
    EnsureExists,
}

impl std::fmt::Display for ProvisioningPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::CheckExisting => write!(f, "check-existing"),
            Self::EnsureExists => write!(f, "ensure-exists"),
        }
    }
}

/// How a failed existence check is interpreted.
///
/// The lookup endpoint cannot tell "no such profile" from "could not answer",
/// so a failure is either folded into not-found or stops the attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguousExistence {
    #[default]
    TreatAsMissing,
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    pub policy: ProvisioningPolicy,
    pub ambiguous_existence: AmbiguousExistence,
    pub fallback: FallbackOptions,
}

impl ReconcileOptions {
    pub fn with_policy(policy: ProvisioningPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}
