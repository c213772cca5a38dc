use std::collections::HashSet;

use super::IdentityKey;

/// Identities for which a provisioning attempt has started this session.
///
/// Keys are never removed on failure; only [`clear`](Self::clear) (sign-out)
/// empties the set.
#[derive(Debug, Clone, Default)]
pub struct ProcessedIdentityTracker {
    keys: HashSet<IdentityKey>,
}

impl ProcessedIdentityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.keys.contains(key)
    }

    /// Record `key`. Returns `false` if it was already present.
    pub fn mark(&mut self, key: IdentityKey) -> bool {
        self.keys.insert(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
