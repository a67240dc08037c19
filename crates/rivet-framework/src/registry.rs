//! Keyed subscription stores.
//!
//! Two instantiations exist per [`SubscriptionHub`](crate::hub::SubscriptionHub):
//! one keyed by canonical emoji key holding [`ReactionAction`]s, one keyed by
//! subscription id holding [`MessageSubscription`]s. Both live for the hub's
//! lifetime and are never persisted.
//!
//! Mutation is expected only during a sequential startup phase, before event
//! traffic begins; the lock exists because Rust requires one for shared
//! access, not as a concurrency guarantee for live-traffic mutation.
//!
//! [`ReactionAction`]: crate::subscription::ReactionAction
//! [`MessageSubscription`]: crate::subscription::MessageSubscription

use indexmap::IndexMap;
use parking_lot::RwLock;

/// A keyed store of subscription entries preserving registration order.
///
/// - `insert` is a constant-time upsert; an existing key keeps its original
///   position.
/// - `snapshot` yields entries in registration order, the contract behind
///   deterministic message fan-out.
///
/// Entries are cheaply clonable (`Arc`-backed actions), so reads hand out
/// clones and never hold the lock across an await point.
pub struct SubscriptionRegistry<E> {
    entries: RwLock<IndexMap<String, E>>,
}

impl<E: Clone> SubscriptionRegistry<E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Inserts or replaces the entry for `key`.
    ///
    /// Replacing keeps the key's original registration position.
    pub fn insert(&self, key: impl Into<String>, entry: E) {
        self.entries.write().insert(key.into(), entry);
    }

    /// Removes the entry for `key`. Returns `true` if one existed.
    ///
    /// Remaining entries keep their relative order.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().shift_remove(key).is_some()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns a clone of the entry for `key`, if present.
    pub fn get(&self, key: &str) -> Option<E> {
        self.entries.read().get(key).cloned()
    }

    /// Returns all entries in registration order.
    pub fn snapshot(&self) -> Vec<(String, E)> {
        self.entries
            .read()
            .iter()
            .map(|(k, e)| (k.clone(), e.clone()))
            .collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<E: Clone> Default for SubscriptionRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for SubscriptionRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("len", &self.entries.read().len())
            .finish()
    }
}
