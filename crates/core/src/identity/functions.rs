use super::{IdentityError, IdentityKey, ProfileDraft, RawAccount, ValidatedProfile};

/// Placeholder used when no better name can be derived.
pub const DEFAULT_NAME: &str = "User";

/// Session key for an account: home id, then local id, then username.
pub fn identity_key(account: &RawAccount) -> Option<IdentityKey> {
    [
        account.home_account_id.as_deref(),
        account.local_account_id.as_deref(),
        account.username.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(IdentityKey::new)
}

/// Extract the local part of an email to use as a name.
pub fn email_to_name(email: &str) -> String {
    match email.split('@').next() {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => DEFAULT_NAME.to_string(),
    }
}

/// Complete a draft into a [`ValidatedProfile`].
///
/// Missing first name becomes the email's local part, missing last name the
/// placeholder, and a missing display name `"{first} {last}"`.
///
/// # Errors
///
/// Returns [`IdentityError::MissingEmail`] when the draft has no email; nothing
/// else can make synthesis fail.
pub fn synthesize(draft: ProfileDraft) -> Result<ValidatedProfile, IdentityError> {
    let email = draft.email.trim().to_string();
    if email.is_empty() {
        return Err(IdentityError::MissingEmail);
    }

    let first_name = match draft.first_name.trim() {
        "" => email_to_name(&email),
        name => name.to_string(),
    };
    let last_name = match draft.last_name.trim() {
        "" => DEFAULT_NAME.to_string(),
        name => name.to_string(),
    };
    let display_name = match draft.display_name.trim() {
        "" => format!("{first_name} {last_name}"),
        name => name.to_string(),
    };

    Ok(ValidatedProfile::from_parts(ProfileDraft {
        email,
        first_name,
        last_name,
        display_name,
        ..draft
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{extract, resolve, FallbackOptions};
    use proptest::prelude::*;
    use serde_json::json;

    fn pipeline(value: serde_json::Value) -> Result<ValidatedProfile, IdentityError> {
        let account: RawAccount = serde_json::from_value(value).unwrap();
        synthesize(resolve(extract(&account), FallbackOptions::default()))
    }

    #[test]
    fn identity_key_prefers_home_account_id() {
        let account = RawAccount {
            home_account_id: Some("home".to_string()),
            local_account_id: Some("local".to_string()),
            username: Some("a@b.com".to_string()),
            ..RawAccount::default()
        };
        assert_eq!(identity_key(&account).unwrap().as_str(), "home");
    }

    #[test]
    fn identity_key_falls_back_through_local_id_and_username() {
        let mut account = RawAccount {
            home_account_id: Some(String::new()),
            local_account_id: Some("local".to_string()),
            username: Some("a@b.com".to_string()),
            ..RawAccount::default()
        };
        assert_eq!(identity_key(&account).unwrap().as_str(), "local");

        account.local_account_id = None;
        assert_eq!(identity_key(&account).unwrap().as_str(), "a@b.com");

        account.username = None;
        assert!(identity_key(&account).is_none());
    }

    #[test]
    fn identity_key_ignores_surrounding_whitespace() {
        let padded = RawAccount {
            home_account_id: Some(" home-1 ".to_string()),
            ..RawAccount::default()
        };
        let plain = RawAccount {
            home_account_id: Some("home-1".to_string()),
            ..RawAccount::default()
        };
        assert_eq!(identity_key(&padded), identity_key(&plain));
        assert_eq!(identity_key(&padded).unwrap().as_str(), "home-1");
    }

    #[test]
    fn email_to_name_extracts_local_part() {
        assert_eq!(email_to_name("john.doe@example.com"), "john.doe");
        assert_eq!(email_to_name("e@f.com"), "e");
    }

    #[test]
    fn email_to_name_handles_degenerate_input() {
        assert_eq!(email_to_name("no-at-sign"), "no-at-sign");
        assert_eq!(email_to_name("@example.com"), "User");
        assert_eq!(email_to_name(""), "User");
    }

    #[test]
    fn synthesize_rejects_missing_email() {
        let draft = ProfileDraft {
            first_name: "Ann".to_string(),
            email: "  ".to_string(),
            ..ProfileDraft::default()
        };
        assert_eq!(synthesize(draft), Err(IdentityError::MissingEmail));
    }

    #[test]
    fn given_and_family_name_claims_synthesize_display_name() {
        let profile = pipeline(json!({
            "username": "a@b.com",
            "idTokenClaims": { "given_name": "Ann", "family_name": "Lee" }
        }))
        .unwrap();

        assert_eq!(profile.email(), "a@b.com");
        assert_eq!(profile.first_name(), "Ann");
        assert_eq!(profile.last_name(), "Lee");
        assert_eq!(profile.display_name(), "Ann Lee");
    }

    #[test]
    fn name_claim_splits_into_first_and_last() {
        let profile = pipeline(json!({
            "username": "c@d.com",
            "idTokenClaims": { "name": "Sam Oak" }
        }))
        .unwrap();

        assert_eq!(profile.first_name(), "Sam");
        assert_eq!(profile.last_name(), "Oak");
        assert_eq!(profile.display_name(), "Sam Oak");
    }

    #[test]
    fn empty_claims_synthesize_from_email() {
        let profile = pipeline(json!({
            "username": "e@f.com",
            "idTokenClaims": {}
        }))
        .unwrap();

        assert_eq!(profile.first_name(), "e");
        assert_eq!(profile.last_name(), "User");
        assert_eq!(profile.display_name(), "e User");
    }

    #[test]
    fn single_token_display_name_is_kept_as_display_name() {
        let profile = pipeline(json!({
            "username": "cher@music.com",
            "idTokenClaims": { "name": "Cher" }
        }))
        .unwrap();

        assert_eq!(profile.first_name(), "cher");
        assert_eq!(profile.last_name(), "User");
        assert_eq!(profile.display_name(), "Cher");
    }

    #[test]
    fn missing_username_fails_pipeline() {
        let result = pipeline(json!({
            "homeAccountId": "home-1",
            "idTokenClaims": { "given_name": "Ann", "family_name": "Lee" }
        }));
        assert_eq!(result, Err(IdentityError::MissingEmail));
    }

    proptest! {
        /// Every synthesized profile carries the four required fields.
        #[test]
        fn synthesized_profiles_are_complete(
            email in "[a-z0-9.@]{0,6}@[a-z]{1,6}\\.com",
            first in "( *|[A-Za-z]{1,8})",
            last in "( *|[A-Za-z]{1,8})",
            display in "( *|[A-Za-z]{1,8}|[A-Za-z]{1,8} [A-Za-z]{1,8})",
        ) {
            let draft = ProfileDraft {
                email,
                first_name: first,
                last_name: last,
                display_name: display,
                ..ProfileDraft::default()
            };
            let profile = synthesize(resolve(draft, FallbackOptions::default())).unwrap();
            prop_assert!(!profile.email().is_empty());
            prop_assert!(!profile.first_name().is_empty());
            prop_assert!(!profile.last_name().is_empty());
            prop_assert!(!profile.display_name().is_empty());
        }
    }
}
