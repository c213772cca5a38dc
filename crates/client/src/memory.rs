//! In-memory profile backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use profilesync_core::identity::ValidatedProfile;
use profilesync_core::profile::{
    BackendError, Existence, ProfileBackend, ProfileRecord, RejectedRequest, Result,
};
use tokio::sync::RwLock;

use crate::client::users::CreateUserRequest;

/// Profile backend kept in process memory, keyed by lowercased email.
///
/// Used for `--offline` runs and tests. Creating a profile for an email that
/// already exists is rejected with `409 Conflict`, like the real backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileBackend {
    users: Arc<RwLock<HashMap<String, ProfileRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryProfileBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileBackend for InMemoryProfileBackend {
    async fn check_exists(&self, email: &str) -> Result<Existence> {
        let users = self.users.read().await;
        Ok(users
            .get(&email.to_lowercase())
            .cloned()
            .map_or(Existence::NotFound, Existence::Found))
    }

    async fn create(&self, profile: &ValidatedProfile) -> Result<ProfileRecord> {
        let mut users = self.users.write().await;
        let key = profile.email().to_lowercase();
        if users.contains_key(&key) {
            let body = serde_json::json!({ "error": "email already registered" });
            let rejected = RejectedRequest {
                status: 409,
                status_text: "Conflict".to_string(),
                body: body.to_string(),
                parsed_body: Some(body),
                url: "memory:///api/users".to_string(),
                payload: serde_json::to_value(CreateUserRequest::from(profile)).unwrap_or_default(),
            };
            tracing::error!(
                status = rejected.status,
                status_text = %rejected.status_text,
                body = %rejected.body,
                url = %rejected.url,
                payload = %rejected.payload,
                "user creation rejected"
            );
            return Err(BackendError::Rejected(Box::new(rejected)));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut extra = serde_json::Map::new();
        extra.insert("id".to_string(), id.into());

        let record = ProfileRecord {
            email: Some(profile.email().to_string()),
            first_name: Some(profile.first_name().to_string()),
            last_name: Some(profile.last_name().to_string()),
            display_name: Some(profile.display_name().to_string()),
            extra,
        };
        users.insert(key, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilesync_core::identity::{synthesize, ProfileDraft};

    fn profile(email: &str) -> ValidatedProfile {
        synthesize(ProfileDraft {
            email: email.to_string(),
            ..ProfileDraft::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_lookup() {
        let backend = InMemoryProfileBackend::new();
        assert!(backend.is_empty().await);

        let record = backend.create(&profile("Ann@Example.com")).await.unwrap();
        assert_eq!(record.id().as_deref(), Some("1"));
        assert_eq!(record.first_name.as_deref(), Some("Ann"));

        let existence = backend.check_exists("ann@example.com").await.unwrap();
        assert_eq!(existence, Existence::Found(record));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn lookup_unknown_email_is_not_found() {
        let backend = InMemoryProfileBackend::new();
        let existence = backend.check_exists("nobody@example.com").await.unwrap();
        assert_eq!(existence, Existence::NotFound);
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let backend = InMemoryProfileBackend::new();
        backend.create(&profile("a@b.com")).await.unwrap();

        let error = backend.create(&profile("A@B.com")).await.unwrap_err();
        assert_eq!(error.status(), Some(409));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn conflict_payload_is_the_create_request_body() {
        let backend = InMemoryProfileBackend::new();
        backend.create(&profile("a@b.com")).await.unwrap();

        match backend.create(&profile("a@b.com")).await.unwrap_err() {
            BackendError::Rejected(rejected) => assert_eq!(
                rejected.payload,
                serde_json::json!({
                    "email": "a@b.com",
                    "firstName": "a",
                    "lastName": "User",
                    "displayName": "a User"
                })
            ),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
