//! Bookkeeping of identities seen on the bus.

use tracing::{debug, instrument};

/// Remote identities offered to the user for peer selection.
///
/// Entries are kept in first-seen order and never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownPeers {
    ids: Vec<String>,
}

impl KnownPeers {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `origin` unless it is empty, local, or already listed.
    ///
    /// Returns true if the list grew.
    #[instrument(skip(self))]
    pub fn observe(&mut self, origin: &str, local_id: &str) -> bool {
        if origin.is_empty() || origin == local_id || self.contains(origin) {
            return false;
        }
        debug!(origin, "Discovered peer");
        self.ids.push(origin.to_string());
        true
    }

    /// Returns true if `id` is listed.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Listed identities in first-seen order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of listed identities.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no identity has been seen.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
