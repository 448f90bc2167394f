//! Item store backed by one JSON document on disk.
//!
//! The whole document is rewritten on every change: serialized to a sibling
//! temp file, then renamed over the original. The in-memory copy is replaced
//! only after the rename succeeds, so a failed write leaves both the file
//! and the store exactly as they were.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ItemStore;
use crate::error::StoreError;
use crate::search::ItemQuery;
use crate::types::{GiftRecord, Item, ItemUpdate, NewItem};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Document {
    version: u32,
    items: Vec<Item>,
}

/// Persists items to a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    items: RwLock<Vec<Item>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match tokio::fs::read(&path).await {
            Ok(bytes) => Self::parse(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!("Opened item store {:?} with {} items", path, items.len());
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(bytes: &[u8]) -> Result<Vec<Item>, StoreError> {
        let document: Document = serde_json::from_slice(bytes)?;
        if document.version != FORMAT_VERSION {
            return Err(StoreError::Corrupt(format!(
                "unsupported store version {}",
                document.version
            )));
        }

        let mut ids = HashSet::new();
        if let Some(dup) = document.items.iter().find(|i| !ids.insert(i.id)) {
            return Err(StoreError::Corrupt(format!("duplicate item id {}", dup.id)));
        }
        Ok(document.items)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write the full item list atomically.
    async fn persist(&self, items: &[Item]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(io_error(parent))?;
        }

        let document = Document {
            version: FORMAT_VERSION,
            items: items.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await.map_err(io_error(&temp))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(io_error(&self.path))?;
        Ok(())
    }

    /// Run a mutation against a copy of the items and commit it once it is on
    /// disk. `None` from the mutation means nothing changed and nothing is written.
    async fn mutate<T, F>(&self, change: F) -> Result<Option<T>, StoreError>
    where
        T: Send,
        F: FnOnce(&mut Vec<Item>) -> Option<T> + Send,
    {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        let Some(outcome) = change(&mut next) else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *items = next;
        Ok(Some(outcome))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn create(&self, new: NewItem) -> Result<Item, StoreError> {
        let now = Utc::now();
        self.mutate(|items| Some(super::insert_new(items, new, now)))
            .await?
            .ok_or_else(|| StoreError::Corrupt("item was not created".to_string()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn list(&self, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().await;
        Ok(super::select(&items, query))
    }

    async fn update(&self, id: Uuid, update: &ItemUpdate) -> Result<Option<Item>, StoreError> {
        let now = Utc::now();
        self.mutate(|items| super::apply_update(items, id, update, now))
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .mutate(|items| super::remove(items, id))
            .await?
            .is_some())
    }

    async fn record_gift(&self, id: Uuid, gift: GiftRecord) -> Result<Option<Item>, StoreError> {
        self.mutate(|items| super::apply_gift(items, id, gift)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;
    use crate::types::Category;

    #[tokio::test]
    async fn test_json_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("items.json")).await.unwrap();
        testing::exercise_store(&store).await;
    }

    #[tokio::test]
    async fn test_items_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("items.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        let created = store
            .create(testing::new_item(Category::Books, &["novel"]))
            .await
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get(created.id).await.unwrap(), Some(created));
        assert!(!reopened.temp_path().exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("none.json")).await.unwrap();
        let all = ItemQuery::administrative(Default::default(), None);
        assert!(store.list(&all).await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let store = JsonFileStore::open(data_dir.join("items.json")).await.unwrap();
        let kept = store
            .create(testing::new_item(Category::Toys, &["lego"]))
            .await
            .unwrap();

        // Replace the data directory with a plain file so the next write fails
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, b"in the way").unwrap();

        let err = store
            .create(testing::new_item(Category::Kitchen, &["mug"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        let gifted = store
            .record_gift(
                kept.id,
                GiftRecord {
                    gifted_at: Utc::now(),
                    details: Default::default(),
                },
            )
            .await;
        assert!(gifted.is_err());

        let all = ItemQuery::administrative(Default::default(), None);
        let items = store.list(&all).await.unwrap();
        assert_eq!(items, vec![kept]);
    }

    #[tokio::test]
    async fn test_corrupt_documents_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path).await.err().unwrap(),
            StoreError::Json(_)
        ));

        std::fs::write(&path, r#"{"version": 7, "items": []}"#).unwrap();
        assert!(matches!(
            JsonFileStore::open(&path).await.err().unwrap(),
            StoreError::Corrupt(_)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let item = Item::from_new(testing::new_item(Category::Toys, &["kite"]), Utc::now());
        let document = Document {
            version: FORMAT_VERSION,
            items: vec![item.clone(), item],
        };
        std::fs::write(&path, serde_json::to_vec(&document).unwrap()).unwrap();

        let err = JsonFileStore::open(&path).await.err().unwrap();
        assert!(err.to_string().contains("duplicate item id"));
    }
}
