use serde::{Deserialize, Serialize};

use super::ProfileDraft;

/// Tunables for [`resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackOptions {
    /// Fill a missing first name from a single-token display name.
    ///
    /// Off by default: a lone token is left for synthesis to handle.
    pub single_token_as_first_name: bool,
}

/// Fill missing first/last names from the display name.
///
/// Only empty fields are written. A display name of two or more tokens yields
/// `first = tokens[0]` and `last = tokens[1..].join(" ")`.
pub fn resolve(mut draft: ProfileDraft, options: FallbackOptions) -> ProfileDraft {
    let first_missing = is_blank(&draft.first_name);
    let last_missing = is_blank(&draft.last_name);
    if !first_missing && !last_missing {
        return draft;
    }

    let tokens: Vec<&str> = draft.display_name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => {}
        [single] => {
            if options.single_token_as_first_name && first_missing {
                draft.first_name = (*single).to_string();
            }
        }
        [first, rest @ ..] => {
            if first_missing {
                draft.first_name = (*first).to_string();
            }
            if last_missing {
                draft.last_name = rest.join(" ");
            }
        }
    }

    draft
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
