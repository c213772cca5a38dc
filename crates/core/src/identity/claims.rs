use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{ProfileDraft, RawAccount};

/// Claim names recognized by the extractor. Every other claim is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimKey {
    GivenName,
    FirstName,
    GivenNameHyphenated,
    GivenNameCamel,
    FamilyName,
    LastName,
    FamilyNameHyphenated,
    FamilyNameCamel,
    Surname,
    Name,
    DisplayName,
    DisplayNameCamel,
}

impl ClaimKey {
    pub const ALL: [ClaimKey; 12] = [
        Self::GivenName,
        Self::FirstName,
        Self::GivenNameHyphenated,
        Self::GivenNameCamel,
        Self::FamilyName,
        Self::LastName,
        Self::FamilyNameHyphenated,
        Self::FamilyNameCamel,
        Self::Surname,
        Self::Name,
        Self::DisplayName,
        Self::DisplayNameCamel,
    ];

    /// Claim name as it appears in the token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GivenName => "given_name",
            Self::FirstName => "firstName",
            Self::GivenNameHyphenated => "given-name",
            Self::GivenNameCamel => "givenName",
            Self::FamilyName => "family_name",
            Self::LastName => "lastName",
            Self::FamilyNameHyphenated => "family-name",
            Self::FamilyNameCamel => "familyName",
            Self::Surname => "surname",
            Self::Name => "name",
            Self::DisplayName => "display_name",
            Self::DisplayNameCamel => "displayName",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl std::fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a profile field may be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimSource {
    Claim(ClaimKey),
    AccountName,
    AccountDisplayName,
}

pub const FIRST_NAME_SOURCES: &[ClaimSource] = &[
    ClaimSource::Claim(ClaimKey::GivenName),
    ClaimSource::Claim(ClaimKey::FirstName),
    ClaimSource::Claim(ClaimKey::GivenNameHyphenated),
    ClaimSource::Claim(ClaimKey::GivenNameCamel),
];

pub const LAST_NAME_SOURCES: &[ClaimSource] = &[
    ClaimSource::Claim(ClaimKey::FamilyName),
    ClaimSource::Claim(ClaimKey::LastName),
    ClaimSource::Claim(ClaimKey::FamilyNameHyphenated),
    ClaimSource::Claim(ClaimKey::FamilyNameCamel),
    ClaimSource::Claim(ClaimKey::Surname),
];

pub const DISPLAY_NAME_SOURCES: &[ClaimSource] = &[
    ClaimSource::Claim(ClaimKey::Name),
    ClaimSource::Claim(ClaimKey::DisplayName),
    ClaimSource::Claim(ClaimKey::DisplayNameCamel),
    ClaimSource::AccountName,
    ClaimSource::AccountDisplayName,
];

/// Recognized claims with non-blank string values, trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimBag(HashMap<ClaimKey, String>);

impl ClaimBag {
    pub fn from_claims(claims: &Map<String, Value>) -> Self {
        let values = claims
            .iter()
            .filter_map(|(name, value)| {
                let key = ClaimKey::parse(name)?;
                let value = non_blank(value.as_str())?;
                Some((key, value.to_string()))
            })
            .collect();
        Self(values)
    }

    pub fn get(&self, key: ClaimKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Map a provider account to a profile draft. Never fails; missing fields stay empty.
pub fn extract(account: &RawAccount) -> ProfileDraft {
    let bag = account
        .id_token_claims
        .as_ref()
        .map(ClaimBag::from_claims)
        .unwrap_or_default();

    let username = account.username.clone().unwrap_or_default();
    let id = non_blank(account.home_account_id.as_deref())
        .or_else(|| non_blank(account.local_account_id.as_deref()))
        .unwrap_or_default()
        .to_string();

    ProfileDraft {
        id,
        email: username.clone(),
        display_name: lookup(account, &bag, DISPLAY_NAME_SOURCES),
        first_name: lookup(account, &bag, FIRST_NAME_SOURCES),
        last_name: lookup(account, &bag, LAST_NAME_SOURCES),
        username,
    }
}

/// First non-empty value across `sources`, in order.
fn lookup(account: &RawAccount, bag: &ClaimBag, sources: &[ClaimSource]) -> String {
    sources
        .iter()
        .find_map(|source| match source {
            ClaimSource::Claim(key) => bag.get(*key),
            ClaimSource::AccountName => non_blank(account.name.as_deref()),
            ClaimSource::AccountDisplayName => non_blank(account.display_name.as_deref()),
        })
        .unwrap_or_default()
        .to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
