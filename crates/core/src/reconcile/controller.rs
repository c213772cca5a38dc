use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::identity::{
    extract, identity_key, resolve, synthesize, IdentityKey, ProcessedIdentityTracker, RawAccount,
    ValidatedProfile,
};
use crate::profile::{Existence, ProfileBackend};

use super::{
    AmbiguousExistence, ProvisioningPolicy, ReconcileError, ReconcileOptions, ReconcileOutcome,
    Result,
};

/// Turns sign-in notifications into at most one provisioning attempt per identity.
///
/// The processed set is updated synchronously before any backend call is
/// awaited, so a second notification for the same identity that arrives while
/// the first attempt is in flight is a no-op.
pub struct ReconciliationController {
    backend: Arc<dyn ProfileBackend>,
    tracker: Mutex<ProcessedIdentityTracker>,
    options: ReconcileOptions,
}

/// Result of the synchronous part of an attempt.
enum Attempt {
    Skipped(IdentityKey),
    Started(IdentityKey, ValidatedProfile),
}

impl ReconciliationController {
    pub fn new(backend: Arc<dyn ProfileBackend>, options: ReconcileOptions) -> Self {
        Self {
            backend,
            tracker: Mutex::new(ProcessedIdentityTracker::new()),
            options,
        }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Handle the current list of signed-in accounts.
    ///
    /// Only the first account is considered. An empty list signs the session
    /// out and forgets every processed identity.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::MissingEmail`] when the account carries no email;
    ///   the identity is not marked, so a later notification may retry.
    /// - [`ReconcileError::Provisioning`] when the create call fails.
    /// - [`ReconcileError::ExistenceUnknown`] when the lookup fails under
    ///   [`AmbiguousExistence::Abort`].
    pub async fn on_accounts_changed(&self, accounts: &[RawAccount]) -> Result<ReconcileOutcome> {
        let Some(account) = accounts.first() else {
            self.reset();
            tracing::debug!("account list empty, processed identities cleared");
            return Ok(ReconcileOutcome::SignedOut);
        };

        match self.begin(account)? {
            Attempt::Skipped(key) => {
                tracing::debug!(%key, "identity already processed this session");
                Ok(ReconcileOutcome::AlreadyProcessed { key })
            }
            Attempt::Started(key, profile) => self.provision(key, profile).await,
        }
    }

    /// Forget every processed identity.
    pub fn reset(&self) {
        self.tracker().clear();
    }

    pub fn is_processed(&self, key: &IdentityKey) -> bool {
        self.tracker().contains(key)
    }

    pub fn processed_count(&self) -> usize {
        self.tracker().len()
    }

    fn tracker(&self) -> MutexGuard<'_, ProcessedIdentityTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dedupe, build the profile and mark the identity, without awaiting.
    fn begin(&self, account: &RawAccount) -> Result<Attempt> {
        let Some(key) = identity_key(account) else {
            tracing::warn!("signed-in account has no identifier or email, skipping");
            return Err(ReconcileError::MissingEmail { key: None });
        };

        let mut tracker = self.tracker();
        if tracker.contains(&key) {
            return Ok(Attempt::Skipped(key));
        }

        let draft = resolve(extract(account), self.options.fallback);
        let profile = synthesize(draft).map_err(|e| {
            tracing::warn!(%key, "signed-in account has no email, skipping");
            ReconcileError::from_identity(e, Some(key.clone()))
        })?;

        tracker.mark(key.clone());
        Ok(Attempt::Started(key, profile))
    }

    async fn provision(
        &self,
        key: IdentityKey,
        profile: ValidatedProfile,
    ) -> Result<ReconcileOutcome> {
        tracing::info!(
            %key,
            email = profile.email(),
            policy = %self.options.policy,
            "reconciling profile"
        );

        match self.options.policy {
            ProvisioningPolicy::Create => self.create(key, profile).await,
            ProvisioningPolicy::CheckExisting => {
                match self.backend.check_exists(profile.email()).await {
                    Ok(Existence::Found(record)) => Ok(ReconcileOutcome::AlreadyProvisioned {
                        key,
                        profile,
                        record,
                    }),
                    Ok(Existence::NotFound) => Ok(ReconcileOutcome::NoRecord {
                        key,
                        profile,
                        ambiguous: false,
                    }),
                    Err(e) => {
                        tracing::warn!(
                            %key,
                            error = %e,
                            "existence check failed, treating as not found"
                        );
                        Ok(ReconcileOutcome::NoRecord {
                            key,
                            profile,
                            ambiguous: true,
                        })
                    }
                }
            }
            ProvisioningPolicy::EnsureExists => {
                match self.backend.check_exists(profile.email()).await {
                    Ok(Existence::Found(record)) => Ok(ReconcileOutcome::AlreadyProvisioned {
                        key,
                        profile,
                        record,
                    }),
                    Ok(Existence::NotFound) => self.create(key, profile).await,
                    Err(e) => match self.options.ambiguous_existence {
                        AmbiguousExistence::TreatAsMissing => {
                            tracing::warn!(
                                %key,
                                error = %e,
                                "existence check failed, creating anyway"
                            );
                            self.create(key, profile).await
                        }
                        AmbiguousExistence::Abort => {
                            tracing::warn!(
                                %key,
                                error = %e,
                                "existence check failed, not creating"
                            );
                            Err(ReconcileError::ExistenceUnknown(e))
                        }
                    },
                }
            }
        }
    }

    async fn create(
        &self,
        key: IdentityKey,
        profile: ValidatedProfile,
    ) -> Result<ReconcileOutcome> {
        let record = self
            .backend
            .create(&profile)
            .await
            .map_err(ReconcileError::Provisioning)?;

        tracing::info!(%key, id = ?record.id(), "profile created");
        Ok(ReconcileOutcome::Created {
            key,
            profile,
            record,
        })
    }
}
