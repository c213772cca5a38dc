//! profilesync_core - functional core for identity-to-profile reconciliation.
//!
//! - [`identity`]: claim extraction, name fallback and profile synthesis
//! - [`profile`]: backend seam for existence checks and provisioning
//! - [`reconcile`]: the controller that drives both on every sign-in notification

pub mod identity;
pub mod profile;
pub mod reconcile;
