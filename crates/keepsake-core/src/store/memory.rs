//! In-process item store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ItemStore;
use crate::error::StoreError;
use crate::search::ItemQuery;
use crate::types::{GiftRecord, Item, ItemUpdate, NewItem};

/// Keeps items in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing items.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create(&self, new: NewItem) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        Ok(super::insert_new(&mut items, new, Utc::now()))
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
        let mut items = self.items.write().await;
        Ok(super::apply_update(&mut items, id, update, Utc::now()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        Ok(super::remove(&mut items, id).is_some())
    }

    async fn record_gift(&self, id: Uuid, gift: GiftRecord) -> Result<Option<Item>, StoreError> {
        let mut items = self.items.write().await;
        Ok(super::apply_gift(&mut items, id, gift))
    }
}
