use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account object handed back by the identity provider client.
///
/// Only the fields the reconciliation pipeline reads are modelled; anything
/// else the provider emits is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAccount {
    /// Primary stable identifier (tenant-qualified object id).
    pub home_account_id: Option<String>,
    /// Secondary identifier, local to the issuing tenant.
    pub local_account_id: Option<String>,
    /// Sign-in name. Providers put the email address here.
    pub username: Option<String>,
    /// Account-level display name.
    pub name: Option<String>,
    /// Account-level display name under its alternate spelling.
    pub display_name: Option<String>,
    /// Raw ID token claims. Shape varies per provider and configuration.
    pub id_token_claims: Option<Map<String, Value>>,
}

/// Stable key identifying one signed-in identity within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Trims surrounding whitespace. Returns `None` for blank input.
    pub fn new(key: impl AsRef<str>) -> Option<Self> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized profile extracted from an account. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

/// Profile whose email, first name, last name and display name are all non-empty.
///
/// Built only by [`synthesize`](super::synthesize); this is the only shape
/// that may be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedProfile {
    id: String,
    email: String,
    display_name: String,
    first_name: String,
    last_name: String,
    username: String,
}

impl ValidatedProfile {
    pub(crate) fn from_parts(draft: ProfileDraft) -> Self {
        Self {
            id: draft.id,
            email: draft.email,
            display_name: draft.display_name,
            first_name: draft.first_name,
            last_name: draft.last_name,
            username: draft.username,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_account_deserializes_camel_case_fields() {
        let account: RawAccount = serde_json::from_value(serde_json::json!({
            "homeAccountId": "home-1",
            "localAccountId": "local-1",
            "username": "a@b.com",
            "name": "Ann Lee",
            "environment": "login.example.com",
            "idTokenClaims": { "given_name": "Ann" }
        }))
        .unwrap();

        assert_eq!(account.home_account_id.as_deref(), Some("home-1"));
        assert_eq!(account.local_account_id.as_deref(), Some("local-1"));
        assert_eq!(account.username.as_deref(), Some("a@b.com"));
        assert_eq!(account.name.as_deref(), Some("Ann Lee"));
        assert!(account.display_name.is_none());
        assert_eq!(
            account.id_token_claims.unwrap()["given_name"],
            serde_json::json!("Ann")
        );
    }

    #[test]
    fn raw_account_tolerates_empty_object() {
        let account: RawAccount = serde_json::from_str("{}").unwrap();
        assert_eq!(account, RawAccount::default());
    }

    #[test]
    fn identity_key_rejects_blank() {
        assert!(IdentityKey::new("").is_none());
        assert!(IdentityKey::new("   ").is_none());
        assert_eq!(IdentityKey::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn identity_key_is_trimmed() {
        assert_eq!(IdentityKey::new("  abc\t").unwrap().as_str(), "abc");
        assert_eq!(IdentityKey::new(" abc "), IdentityKey::new("abc"));
    }

    #[test]
    fn validated_profile_serializes_camel_case() {
        let profile = ValidatedProfile::from_parts(ProfileDraft {
            id: "id-1".to_string(),
            email: "a@b.com".to_string(),
            display_name: "Ann Lee".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            username: "a@b.com".to_string(),
        });

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert_eq!(json["displayName"], "Ann Lee");
    }
}
