use serde::Serialize;
use thiserror::Error;

use crate::identity::{IdentityError, IdentityKey, ValidatedProfile};
use crate::profile::{BackendError, ProfileRecord};

/// Result of handling one "accounts changed" notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ReconcileOutcome {
    /// The account list was empty; session state was cleared.
    SignedOut,
    /// An attempt for this identity already started this session.
    AlreadyProcessed { key: IdentityKey },
    /// A new profile was created.
    Created {
        key: IdentityKey,
        profile: ValidatedProfile,
        record: ProfileRecord,
    },
    /// A profile already exists; the caller may route to the signed-in area.
    AlreadyProvisioned {
        key: IdentityKey,
        profile: ValidatedProfile,
        record: ProfileRecord,
    },
    /// No profile exists yet and the policy does not create one.
    ///
    /// `ambiguous` is set when the lookup failed rather than answered.
    NoRecord {
        key: IdentityKey,
        profile: ValidatedProfile,
        ambiguous: bool,
    },
}

impl ReconcileOutcome {
    /// Whether the caller should send the user to the authenticated area.
    pub fn should_enter_app(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::AlreadyProvisioned { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("account has no email address")]
    MissingEmail { key: Option<IdentityKey> },

    #[error("profile creation failed: {0}")]
    Provisioning(#[source] BackendError),

    #[error("profile existence could not be determined: {0}")]
    ExistenceUnknown(#[source] BackendError),
}

impl ReconcileError {
    pub(crate) fn from_identity(error: IdentityError, key: Option<IdentityKey>) -> Self {
        match error {
            IdentityError::MissingEmail => Self::MissingEmail { key },
        }
    }
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
