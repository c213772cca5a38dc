//! [`ProfileBackend`] over HTTP.

use async_trait::async_trait;
use profilesync_core::identity::ValidatedProfile;
use profilesync_core::profile::{self, BackendError, Existence, ProfileBackend, ProfileRecord};

use super::ProfileClient;
use crate::error::ClientError;

impl From<ClientError> for BackendError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Rejected(rejected) => BackendError::Rejected(rejected),
            ClientError::InvalidResponse(message) => BackendError::InvalidResponse(message),
            ClientError::Json(e) => BackendError::InvalidResponse(e.to_string()),
            other => BackendError::Transport(other.to_string()),
        }
    }
}

#[async_trait]
impl ProfileBackend for ProfileClient {
    async fn check_exists(&self, email: &str) -> profile::Result<Existence> {
        Ok(self.find_user_by_email(email).await?)
    }

    async fn create(&self, profile: &ValidatedProfile) -> profile::Result<ProfileRecord> {
        Ok(self.create_user(profile).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use profilesync_core::reconcile::{
        ProvisioningPolicy, ReconcileOptions, ReconcileOutcome, ReconciliationController,
    };
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;

    fn controller(server_uri: &str, policy: ProvisioningPolicy) -> ReconciliationController {
        let client = ProfileClient::new(&ClientConfig::new(server_uri).unwrap());
        ReconciliationController::new(Arc::new(client), ReconcileOptions::with_policy(policy))
    }

    fn accounts() -> Vec<profilesync_core::identity::RawAccount> {
        serde_json::from_value(json!([{
            "homeAccountId": "home-sam",
            "username": "c@d.com",
            "idTokenClaims": { "name": "Sam Oak" }
        }]))
        .unwrap()
    }

    #[test]
    fn local_client_errors_map_to_transport() {
        let error = BackendError::from(ClientError::InvalidInput("bad".to_string()));
        assert!(matches!(error, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn connection_failures_map_to_transport() {
        let server = MockServer::start().await;
        let client = ProfileClient::new(&ClientConfig::new(&server.uri()).unwrap());
        drop(server);

        let error = client.check_exists("a@b.com").await.unwrap_err();
        assert!(matches!(error, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn repeated_notifications_post_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let controller = controller(&server.uri(), ProvisioningPolicy::Create);
        let accounts = accounts();

        let first = controller.on_accounts_changed(&accounts).await.unwrap();
        let second = controller.on_accounts_changed(&accounts).await.unwrap();

        assert!(matches!(first, ReconcileOutcome::Created { .. }));
        assert!(matches!(second, ReconcileOutcome::AlreadyProcessed { .. }));
    }

    #[tokio::test]
    async fn unreachable_lookup_is_folded_into_no_record() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let controller = controller(&uri, ProvisioningPolicy::CheckExisting);
        let outcome = controller.on_accounts_changed(&accounts()).await.unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::NoRecord {
                ambiguous: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn ensure_exists_skips_create_for_known_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/by-email"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 3, "email": "c@d.com" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 4 })))
            .expect(0)
            .mount(&server)
            .await;

        let controller = controller(&server.uri(), ProvisioningPolicy::EnsureExists);
        let outcome = controller.on_accounts_changed(&accounts()).await.unwrap();

        assert!(matches!(outcome, ReconcileOutcome::AlreadyProvisioned { .. }));
    }
}
