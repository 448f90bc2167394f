//! Item persistence.
//!
//! The registry talks to storage only through [`ItemStore`]. Selection and
//! ordering for `list` is the shared [`RetrievalFilter`], so every backend
//! answers a query the same way.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::search::{ItemQuery, RetrievalFilter};
use crate::types::{Availability, GiftRecord, Item, ItemUpdate, NewItem};

/// Storage interface for items. Implementations are swappable.
///
/// Tags are written once by `create` and never touched again; `update` and
/// `record_gift` only change administrative fields.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Backend name for logging (e.g., "memory", "json").
    fn name(&self) -> &str;

    /// Persist a new item and return it with its id and timestamps.
    async fn create(&self, new: NewItem) -> Result<Item, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Item>, StoreError>;

    /// Items selected and ordered by the query.
    async fn list(&self, query: &ItemQuery) -> Result<Vec<Item>, StoreError>;

    /// Apply an update. `None` when the id is unknown.
    async fn update(&self, id: Uuid, update: &ItemUpdate) -> Result<Option<Item>, StoreError>;

    /// Remove an item. `false` when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Append a gift to the history and mark the item gifted, as one write.
    async fn record_gift(&self, id: Uuid, gift: GiftRecord) -> Result<Option<Item>, StoreError>;
}

// Mutations shared by the backends. Each returns `None` when nothing changed.

fn insert_new(items: &mut Vec<Item>, new: NewItem, now: DateTime<Utc>) -> Item {
    let item = Item::from_new(new, now);
    items.push(item.clone());
    item
}

fn apply_update(
    items: &mut [Item],
    id: Uuid,
    update: &ItemUpdate,
    now: DateTime<Utc>,
) -> Option<Item> {
    let item = items.iter_mut().find(|i| i.id == id)?;
    update.apply(item, now);
    Some(item.clone())
}

fn apply_gift(items: &mut [Item], id: Uuid, gift: GiftRecord) -> Option<Item> {
    let item = items.iter_mut().find(|i| i.id == id)?;
    item.updated_at = gift.gifted_at;
    item.availability = Availability::Gifted;
    item.gifting_history.push(gift);
    Some(item.clone())
}

fn remove(items: &mut Vec<Item>, id: Uuid) -> Option<()> {
    let index = items.iter().position(|i| i.id == id)?;
    items.remove(index);
    Some(())
}

fn select(items: &[Item], query: &ItemQuery) -> Vec<Item> {
    RetrievalFilter::new(query).apply(items)
}
