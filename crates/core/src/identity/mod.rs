mod claims;
mod error;
mod fallback;
mod functions;
mod tracker;
mod types;

pub use claims::{
    extract, ClaimBag, ClaimKey, ClaimSource, DISPLAY_NAME_SOURCES, FIRST_NAME_SOURCES,
    LAST_NAME_SOURCES,
};
pub use error::IdentityError;
pub use fallback::{resolve, FallbackOptions};
pub use functions::{email_to_name, identity_key, synthesize, DEFAULT_NAME};
pub use tracker::ProcessedIdentityTracker;
pub use types::{IdentityKey, ProfileDraft, RawAccount, ValidatedProfile};
