//! User profile API operations.

use profilesync_core::identity::ValidatedProfile;
use profilesync_core::profile::{Existence, ProfileRecord};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use super::ProfileClient;
use crate::error::{ClientError, Result};

const JSON: &str = "application/json";

/// Body of `POST /api/users`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub display_name: &'a str,
}

impl<'a> From<&'a ValidatedProfile> for CreateUserRequest<'a> {
    fn from(profile: &'a ValidatedProfile) -> Self {
        Self {
            email: profile.email(),
            first_name: profile.first_name(),
            last_name: profile.last_name(),
            display_name: profile.display_name(),
        }
    }
}

impl ProfileClient {
    /// Look up a user by email.
    ///
    /// A 404, an empty body, `null` or `{}` all mean no such user. Any other
    /// non-success status is returned as [`ClientError::Rejected`].
    pub async fn find_user_by_email(&self, email: &str) -> Result<Existence> {
        let response = self
            .client
            .get(self.url("/api/users/by-email"))
            .query(&[("email", email)])
            .header(ACCEPT, JSON)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Existence::NotFound);
        }
        if !status.is_success() {
            let rejected = Self::rejected(response, Value::Null).await;
            tracing::warn!(
                status = rejected.status,
                url = %rejected.url,
                body = %rejected.body,
                "user lookup rejected"
            );
            return Err(ClientError::Rejected(Box::new(rejected)));
        }

        let body = response.text().await?;
        parse_lookup_body(&body)
    }

    /// Create a user from a validated profile.
    ///
    /// Failures are logged with the request URL, payload and full response
    /// before being returned. Nothing is retried.
    pub async fn create_user(&self, profile: &ValidatedProfile) -> Result<ProfileRecord> {
        let url = self.url("/api/users");
        let request = CreateUserRequest::from(profile);
        let payload = serde_json::to_value(&request)?;

        let response = match self
            .client
            .post(&url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    url = %url,
                    payload = %payload,
                    error = %e,
                    "user creation request failed"
                );
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            let rejected = Self::rejected(response, payload).await;
            tracing::error!(
                status = rejected.status,
                status_text = %rejected.status_text,
                body = %rejected.body,
                parsed_body = ?rejected.parsed_body,
                url = %rejected.url,
                payload = %rejected.payload,
                "user creation rejected"
            );
            return Err(ClientError::Rejected(Box::new(rejected)));
        }

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    status = status.as_u16(),
                    url = %url,
                    payload = %payload,
                    error = %e,
                    "user creation response could not be read"
                );
                return Err(e.into());
            }
        };

        match serde_json::from_str(&body) {
            Ok(value) => Ok(ProfileRecord::from_value(value)),
            Err(e) => {
                tracing::error!(
                    status = status.as_u16(),
                    url = %url,
                    payload = %payload,
                    body = %body,
                    error = %e,
                    "user creation returned non-JSON body"
                );
                Err(ClientError::InvalidResponse(format!("expected JSON user record: {e}")))
            }
        }
    }
}

fn parse_lookup_body(body: &str) -> Result<Existence> {
    if body.trim().is_empty() {
        return Ok(Existence::NotFound);
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::InvalidResponse(format!("expected JSON user record: {e}")))?;
    match &value {
        Value::Null => return Ok(Existence::NotFound),
        Value::Object(fields) if fields.is_empty() => return Ok(Existence::NotFound),
        Value::Object(_) => {}
        other => {
            return Err(ClientError::InvalidResponse(format!(
                "expected JSON object, got {other}"
            )))
        }
    }

    Ok(Existence::Found(ProfileRecord::from_value(value)))
}
