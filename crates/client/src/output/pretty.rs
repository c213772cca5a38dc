//! Pretty output formatting.

use profilesync_core::identity::{ProfileDraft, ValidatedProfile};
use profilesync_core::profile::{Existence, ProfileRecord};
use profilesync_core::reconcile::ReconcileOutcome;

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Format a draft for display. Empty fields show as `-`.
pub fn format_draft(draft: &ProfileDraft) -> String {
    format!(
        "DRAFT\n  ID: {}\n  Email: {}\n  First name: {}\n  Last name: {}\n  Display name: {}",
        or_dash(&draft.id),
        or_dash(&draft.email),
        or_dash(&draft.first_name),
        or_dash(&draft.last_name),
        or_dash(&draft.display_name),
    )
}

/// Format a validated profile for display.
pub fn format_profile(profile: &ValidatedProfile) -> String {
    format!(
        "{}\n  Email: {}\n  First name: {}\n  Last name: {}",
        profile.display_name(),
        profile.email(),
        profile.first_name(),
        profile.last_name(),
    )
}

/// Format a backend record for display.
pub fn format_record(record: &ProfileRecord) -> String {
    let mut output = record
        .display_name
        .clone()
        .or_else(|| record.email.clone())
        .unwrap_or_else(|| "(unnamed)".to_string());
    if let Some(id) = record.id() {
        output.push_str(&format!("\n  ID: {}", id));
    }
    if let Some(email) = &record.email {
        output.push_str(&format!("\n  Email: {}", email));
    }
    output
}

/// Format an existence lookup for display.
pub fn format_existence(email: &str, existence: &Existence) -> String {
    match existence {
        Existence::Found(record) => format!("Found:\n{}", format_record(record)),
        Existence::NotFound => format!("No profile for {}", email),
    }
}

/// Format a reconciliation outcome for display.
pub fn format_outcome(outcome: &ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::SignedOut => "Signed out; processed identities cleared.".to_string(),
        ReconcileOutcome::AlreadyProcessed { key } => {
            format!("Skipped {}: already processed this session.", key)
        }
        ReconcileOutcome::Created { key, record, .. } => {
            format!("Created [{}]:\n{}", key, format_record(record))
        }
        ReconcileOutcome::AlreadyProvisioned { key, record, .. } => {
            format!("Exists [{}]:\n{}", key, format_record(record))
        }
        ReconcileOutcome::NoRecord {
            key,
            profile,
            ambiguous,
        } => {
            let mut output = format!("No profile [{}] for {}", key, profile.email());
            if *ambiguous {
                output.push_str(" (lookup failed; treated as not found)");
            }
            output
        }
    }
}
