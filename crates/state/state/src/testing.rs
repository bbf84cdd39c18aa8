use postcord_core::ItemId;

use crate::error::StateError;
use crate::store::MarkerStore;

/// Run the marker store conformance test suite.
///
/// Call this from your backend's test module with a fresh, empty store.
///
/// # Errors
///
/// Returns an error if the backend fails an operation.
pub async fn run_store_conformance_tests(store: &dyn MarkerStore) -> Result<(), StateError> {
    test_missing_is_not_sent(store).await?;
    test_mark_then_check(store).await?;
    test_mark_twice(store).await?;
    test_markers_are_per_item(store).await?;
    test_sent_items_sorted(store).await?;
    Ok(())
}

async fn test_missing_is_not_sent(store: &dyn MarkerStore) -> Result<(), StateError> {
    assert!(
        !store.is_sent(ItemId::new(1000)).await?,
        "unmarked item should not be reported as sent"
    );
    Ok(())
}

async fn test_mark_then_check(store: &dyn MarkerStore) -> Result<(), StateError> {
    let item = ItemId::new(1001);
    let created = store.mark_sent(item).await?;
    assert!(created, "first mark should create the marker");
    assert!(store.is_sent(item).await?, "marked item should be sent");
    Ok(())
}

async fn test_mark_twice(store: &dyn MarkerStore) -> Result<(), StateError> {
    let item = ItemId::new(1002);
    store.mark_sent(item).await?;
    let created = store.mark_sent(item).await?;
    assert!(!created, "second mark should report an existing marker");
    assert!(store.is_sent(item).await?);
    Ok(())
}

async fn test_markers_are_per_item(store: &dyn MarkerStore) -> Result<(), StateError> {
    store.mark_sent(ItemId::new(1003)).await?;
    assert!(
        !store.is_sent(ItemId::new(1004)).await?,
        "marking one item must not mark another"
    );
    Ok(())
}

async fn test_sent_items_sorted(store: &dyn MarkerStore) -> Result<(), StateError> {
    store.mark_sent(ItemId::new(1010)).await?;
    store.mark_sent(ItemId::new(1005)).await?;
    let items = store.sent_items().await?;
    let mut sorted = items.clone();
    sorted.sort_unstable();
    assert_eq!(items, sorted, "sent_items should be in ascending order");
    assert!(items.contains(&ItemId::new(1005)));
    assert!(items.contains(&ItemId::new(1010)));
    Ok(())
}
