use async_trait::async_trait;

use super::{Existence, ProfileRecord, Result};
use crate::identity::ValidatedProfile;

/// The two backend operations reconciliation depends on.
///
/// Implementations must not retry on their own; the caller decides.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// Ask whether a profile exists for `email`.
    async fn check_exists(&self, email: &str) -> Result<Existence>;

    /// Create a profile.
    async fn create(&self, profile: &ValidatedProfile) -> Result<ProfileRecord>;
}
