use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use postcord_core::ItemId;
use postcord_state::error::StateError;
use postcord_state::store::MarkerStore;

/// In-memory [`MarkerStore`] backed by a [`DashMap`].
///
/// Markers live for the lifetime of the process. The async trait methods
/// complete immediately.
#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    markers: DashMap<ItemId, ()>,
}

impl MemoryMarkerStore {
    /// Create a new, empty in-memory marker store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marked items.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[async_trait]
impl MarkerStore for MemoryMarkerStore {
    async fn is_sent(&self, item: ItemId) -> Result<bool, StateError> {
        Ok(self.markers.contains_key(&item))
    }

    async fn mark_sent(&self, item: ItemId) -> Result<bool, StateError> {
        // `entry` keeps the insert atomic for this store even though callers
        // cannot make check-then-mark atomic.
        let created = match self.markers.entry(item) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(());
                true
            }
        };
        Ok(created)
    }

    async fn sent_items(&self) -> Result<Vec<ItemId>, StateError> {
        let mut items: Vec<ItemId> = self.markers.iter().map(|entry| *entry.key()).collect();
        items.sort_unstable();
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use postcord_state::testing::run_store_conformance_tests;

    use super::*;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryMarkerStore::new();
        run_store_conformance_tests(&store).await.unwrap();
    }

    #[tokio::test]
    async fn len_tracks_markers() {
        let store = MemoryMarkerStore::new();
        assert!(store.is_empty());
        store.mark_sent(ItemId::new(1)).await.unwrap();
        store.mark_sent(ItemId::new(1)).await.unwrap();
        store.mark_sent(ItemId::new(2)).await.unwrap();
        assert_eq!(store.len(), 2);
    }
}
