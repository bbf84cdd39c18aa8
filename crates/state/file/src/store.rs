use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use postcord_core::ItemId;
use postcord_state::error::StateError;
use postcord_state::store::MarkerStore;

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct MarkerFile {
    #[serde(default)]
    sent: BTreeSet<ItemId>,
}

/// [`MarkerStore`] persisted as a small JSON document.
///
/// The file is read lazily on first use and rewritten (write to a sibling
/// temp file, then rename) on every new marker. A missing file is an empty
/// store. Intended for a single process; concurrent writers from separate
/// processes may lose markers.
#[derive(Debug)]
pub struct FileMarkerStore {
    path: PathBuf,
    cache: Mutex<Option<BTreeSet<ItemId>>>,
}

impl FileMarkerStore {
    /// Create a store backed by the file at `path`. Nothing is read until
    /// the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeSet<ItemId>, StateError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeSet::new()),
            Ok(contents) => {
                let file: MarkerFile = serde_json::from_str(&contents)
                    .map_err(|e| StateError::Serialization(e.to_string()))?;
                debug!(path = %self.path.display(), markers = file.sent.len(), "loaded marker file");
                Ok(file.sent)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeSet::new()),
            Err(e) => Err(StateError::Io(e)),
        }
    }

    async fn persist(&self, sent: &BTreeSet<ItemId>) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = MarkerFile { sent: sent.clone() };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StateError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl MarkerStore for FileMarkerStore {
    async fn is_sent(&self, item: ItemId) -> Result<bool, StateError> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        Ok(cache.as_ref().is_some_and(|sent| sent.contains(&item)))
    }

    async fn mark_sent(&self, item: ItemId) -> Result<bool, StateError> {
        let mut cache = self.cache.lock().await;
        let mut sent = match cache.take() {
            Some(sent) => sent,
            None => self.load().await?,
        };

        let created = sent.insert(item);
        if created && let Err(e) = self.persist(&sent).await {
            // Keep memory in line with disk.
            sent.remove(&item);
            *cache = Some(sent);
            return Err(e);
        }

        *cache = Some(sent);
        Ok(created)
    }

    async fn sent_items(&self) -> Result<Vec<ItemId>, StateError> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        Ok(cache
            .as_ref()
            .map(|sent| sent.iter().copied().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use postcord_state::testing::run_store_conformance_tests;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("postcord_markers_{}_{name}", std::process::id()))
            .join("markers.json")
    }

    async fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }

    #[tokio::test]
    async fn conformance() {
        let path = temp_path("conformance");
        cleanup(&path).await;
        let store = FileMarkerStore::new(&path);
        run_store_conformance_tests(&store).await.unwrap();
        cleanup(&path).await;
    }

    #[tokio::test]
    async fn markers_survive_reopen() {
        let path = temp_path("reopen");
        cleanup(&path).await;

        let store = FileMarkerStore::new(&path);
        assert!(store.mark_sent(ItemId::new(42)).await.unwrap());
        drop(store);

        let reopened = FileMarkerStore::new(&path);
        assert!(reopened.is_sent(ItemId::new(42)).await.unwrap());
        assert!(!reopened.mark_sent(ItemId::new(42)).await.unwrap());
        assert_eq!(reopened.sent_items().await.unwrap(), [ItemId::new(42)]);

        cleanup(&path).await;
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let path = temp_path("missing");
        cleanup(&path).await;
        let store = FileMarkerStore::new(&path);
        assert!(store.sent_items().await.unwrap().is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_serialization_error() {
        let path = temp_path("corrupt");
        cleanup(&path).await;
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileMarkerStore::new(&path);
        let err = store.is_sent(ItemId::new(1)).await.unwrap_err();
        assert!(matches!(err, StateError::Serialization(_)));

        cleanup(&path).await;
    }
}
