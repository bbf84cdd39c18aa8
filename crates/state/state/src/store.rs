use async_trait::async_trait;

use postcord_core::ItemId;

use crate::error::StateError;

/// Persistence for sent markers: the one-bit "this item has already been
/// dispatched" fact attached to a content item id.
///
/// Markers are created on the first successful dispatch of an item and are
/// never cleared. Absence means "not yet sent".
///
/// Checking and then marking is not atomic across callers. Two concurrent
/// triggers for the same item may both observe "not sent" and both deliver.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Whether a marker exists for `item`.
    async fn is_sent(&self, item: ItemId) -> Result<bool, StateError>;

    /// Record a marker for `item`. Returns `true` if the marker was newly
    /// created, `false` if it already existed.
    async fn mark_sent(&self, item: ItemId) -> Result<bool, StateError>;

    /// All items carrying a marker, in ascending id order.
    async fn sent_items(&self) -> Result<Vec<ItemId>, StateError>;
}
