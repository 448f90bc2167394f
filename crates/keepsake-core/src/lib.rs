//! Keepsake Core - tagging and retrieval engine for a gift registry.
//!
//! Keepsake turns photos of physical items into structured tags (category,
//! age ranges, themes, keywords, colors) and answers natural-language
//! questions like "What can we gift a 6-year-old?" against the tagged items.
//!
//! # Architecture
//!
//! ```text
//! ingest:  photos → validate → analyze primary photo → TagSet → store
//! search:  text → QueryParser → SearchFilter → RetrievalFilter → items
//! ```
//!
//! The image-analysis provider and the item store are injected behind the
//! [`ImageAnalyzer`] and [`ItemStore`] traits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use keepsake_core::{Config, Registry};
//!
//! #[tokio::main]
//! async fn main() -> keepsake_core::Result<()> {
//!     let config = Config::load()?;
//!     let registry = Registry::from_config(&config).await?;
//!
//!     let outcome = registry.search("Educational items for teens").await?;
//!     println!("{} matches", outcome.count);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod photo;
pub mod provider;
pub mod search;
pub mod store;
pub mod tagging;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ProviderError, RegistryError, Result, StoreError};
pub use output::{OutputFormat, OutputWriter};
pub use provider::{AnalyzerFactory, ImageAnalyzer, ImageRef};
pub use search::{parse_query, ItemQuery, ListScope};
pub use store::{ItemStore, JsonFileStore, MemoryStore};
pub use tagging::{extract_tags, TagExtractor};
pub use types::{
    AgeRange, Availability, Category, Condition, GiftDetails, GiftRecord, IngestOutcome, Item,
    ItemUpdate, ListOutcome, NewItem, RawImageSignals, SearchFilter, SearchOutcome, TagSet, Theme,
};

use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use photo::PhotoValidator;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The registry: ingestion, conversational search and item administration.
pub struct Registry {
    extractor: TagExtractor,
    store: Arc<dyn ItemStore>,
    validator: PhotoValidator,
}

impl Registry {
    /// Create a registry over an explicit provider and store.
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>, store: Arc<dyn ItemStore>, config: &Config) -> Self {
        let timeout = Duration::from_millis(config.limits.provider_timeout_ms);
        tracing::debug!(
            "Initializing Keepsake v{} (provider: {}, store: {})",
            VERSION,
            analyzer.name(),
            store.name()
        );
        Self {
            extractor: TagExtractor::new(analyzer, timeout),
            store,
            validator: PhotoValidator::new(config.limits.clone()),
        }
    }

    /// Create a registry with the configured provider and the JSON store in `data_dir`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let analyzer: Arc<dyn ImageAnalyzer> = Arc::from(AnalyzerFactory::create(&config.provider)?);
        let store = JsonFileStore::open(config.store_path()).await?;
        Ok(Self::new(analyzer, Arc::new(store), config))
    }

    /// Register a new item from its photos.
    ///
    /// Every photo is validated before anything else happens. Only the first
    /// photo is analyzed. If analysis fails, nothing is stored.
    pub async fn ingest<P: AsRef<Path>>(&self, photos: &[P]) -> Result<IngestOutcome> {
        self.validator.validate_all(photos)?;
        let records = photo::photo_records(photos, Utc::now())?;

        let primary = ImageRef::new(photos[0].as_ref());
        let tags = self.extractor.tag(&primary).await?;

        let item = self
            .store
            .create(NewItem {
                tags,
                photos: records,
            })
            .await?;
        tracing::info!(
            "Registered item {} as {} ({} photos)",
            item.id,
            item.tags.category,
            item.photos.len()
        );

        Ok(IngestOutcome {
            tag_set: item.tags.clone(),
            item,
        })
    }

    /// Answer a natural-language question with available items.
    pub async fn search(&self, text: &str) -> Result<SearchOutcome> {
        self.search_refined(text, SearchFilter::default()).await
    }

    /// Like [`search`](Self::search), but fields set in `refine` replace what
    /// the parser detected.
    pub async fn search_refined(&self, text: &str, refine: SearchFilter) -> Result<SearchOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RegistryError::Validation("Query is required".to_string()));
        }

        let parsed = parse_query(text);
        let filters = SearchFilter {
            age_range: refine.age_range.or(parsed.age_range),
            category: refine.category.or(parsed.category),
            theme: refine.theme.or(parsed.theme),
            keyword: refine.keyword.or(parsed.keyword),
            free_text: parsed.free_text,
        };

        let items = self
            .store
            .list(&ItemQuery::conversational(filters.clone()))
            .await?;
        tracing::debug!("Search {:?} matched {} items", text, items.len());

        Ok(SearchOutcome {
            query: text.to_string(),
            filters,
            count: items.len(),
            items,
        })
    }

    /// Administrative listing, newest first. Every filter is optional.
    pub async fn list(
        &self,
        availability: Option<Availability>,
        category: Option<Category>,
        age_range: Option<AgeRange>,
    ) -> Result<ListOutcome> {
        let filter = SearchFilter {
            category,
            age_range,
            ..Default::default()
        };
        let items = self
            .store
            .list(&ItemQuery::administrative(filter, availability))
            .await?;
        Ok(items.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<Item> {
        self.store
            .get(id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    /// Change administrative fields. Tags are never recomputed.
    pub async fn update(&self, id: Uuid, update: &ItemUpdate) -> Result<Item> {
        if update.is_empty() {
            return Err(RegistryError::Validation("No fields to update".to_string()));
        }
        let item = self
            .store
            .update(id, update)
            .await?
            .ok_or(RegistryError::NotFound(id))?;
        tracing::debug!("Updated item {}", id);
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(RegistryError::NotFound(id));
        }
        tracing::info!("Deleted item {}", id);
        Ok(())
    }

    /// Record that an item was handed over; it becomes `gifted`.
    pub async fn record_gift(&self, id: Uuid, details: GiftDetails) -> Result<Item> {
        let gift = GiftRecord {
            gifted_at: Utc::now(),
            details,
        };
        let item = self
            .store
            .record_gift(id, gift)
            .await?
            .ok_or(RegistryError::NotFound(id))?;
        tracing::info!("Item {} gifted ({} in history)", id, item.gifting_history.len());
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotation;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0, 1];

    /// Returns fixed signals and counts calls.
    struct FakeAnalyzer {
        signals: RawImageSignals,
        calls: AtomicUsize,
    }

    impl FakeAnalyzer {
        fn new(labels: &[(&str, f32)]) -> Self {
            Self {
                signals: RawImageSignals {
                    labels: labels.iter().map(|(d, s)| Annotation::new(*d, *s)).collect(),
                    ..Default::default()
                },
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ImageAnalyzer for FakeAnalyzer {
        fn name(&self) -> &str {
            "fake"
        }

        async fn analyze(&self, _image: &ImageRef) -> std::result::Result<RawImageSignals, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.signals.clone())
        }
    }

    struct QuotaAnalyzer;

    #[async_trait]
    impl ImageAnalyzer for QuotaAnalyzer {
        fn name(&self) -> &str {
            "quota"
        }

        async fn analyze(&self, _image: &ImageRef) -> std::result::Result<RawImageSignals, ProviderError> {
            Err(ProviderError::Quota {
                provider: "quota".to_string(),
                message: "daily limit reached".to_string(),
            })
        }
    }

    fn registry(analyzer: Arc<dyn ImageAnalyzer>) -> Registry {
        Registry::new(analyzer, Arc::new(MemoryStore::new()), &Config::default())
    }

    fn write_photos(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                std::fs::write(&path, JPEG).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_then_search() {
        let dir = tempfile::tempdir().unwrap();
        let photos = write_photos(dir.path(), &["lego.jpg", "lego-back.jpg"]);
        let analyzer = Arc::new(FakeAnalyzer::new(&[("Lego", 0.95), ("Toy", 0.9)]));
        let registry = registry(analyzer.clone());

        let outcome = registry.ingest(&photos).await.unwrap();
        assert_eq!(outcome.tag_set.category, Category::Toys);
        assert_eq!(outcome.item.tags, outcome.tag_set);
        assert_eq!(outcome.item.photos.len(), 2);
        assert_eq!(
            outcome.item.primary_photo().map(|p| p.file_name.as_str()),
            Some("lego.jpg")
        );
        // Only the primary photo is analyzed
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);

        let found = registry.search("Any lego for kids?").await.unwrap();
        assert_eq!(found.filters.age_range, Some(AgeRange::OlderChild));
        assert_eq!(found.count, 1);
        assert_eq!(found.items[0].id, outcome.item.id);
    }

    #[tokio::test]
    async fn test_ingest_validates_before_analysis() {
        let analyzer = Arc::new(FakeAnalyzer::new(&[("Toy", 0.9)]));
        let registry = registry(analyzer.clone());

        let none: [&Path; 0] = [];
        let err = registry.ingest(&none).await.unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));

        let err = registry.ingest(&["/no/such/photo.jpg"]).await.unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));

        let dir = tempfile::tempdir().unwrap();
        let names: Vec<String> = (0..11).map(|i| format!("p{i}.jpg")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let err = registry
            .ingest(&write_photos(dir.path(), &names))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at most 10"));

        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let photos = write_photos(dir.path(), &["mug.jpg"]);
        let registry = registry(Arc::new(QuotaAnalyzer));

        let err = registry.ingest(&photos).await.unwrap_err();
        assert!(matches!(err, RegistryError::Provider(ProviderError::Quota { .. })));

        let all = registry.list(None, None, None).await.unwrap();
        assert_eq!(all.count, 0);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let registry = registry(Arc::new(QuotaAnalyzer));
        for text in ["", "   "] {
            let err = registry.search(text).await.unwrap_err();
            assert!(matches!(err, RegistryError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_search_refined_overrides_parsed_fields() {
        let dir = tempfile::tempdir().unwrap();
        let photos = write_photos(dir.path(), &["book.jpg"]);
        let registry = registry(Arc::new(FakeAnalyzer::new(&[("Book", 0.9)])));
        registry.ingest(&photos).await.unwrap();

        let refine = SearchFilter {
            category: Some(Category::Kitchen),
            ..Default::default()
        };
        let outcome = registry
            .search_refined("books for teens", refine)
            .await
            .unwrap();
        assert_eq!(outcome.filters.category, Some(Category::Kitchen));
        assert_eq!(outcome.count, 0);
    }

    #[tokio::test]
    async fn test_gifted_items_leave_conversational_search() {
        let dir = tempfile::tempdir().unwrap();
        let photos = write_photos(dir.path(), &["kite.jpg"]);
        let registry = registry(Arc::new(FakeAnalyzer::new(&[("Kite", 0.9)])));
        let item = registry.ingest(&photos).await.unwrap().item;

        assert_eq!(registry.search("kite").await.unwrap().count, 1);

        let details = GiftDetails {
            recipient_name: Some("Sam".to_string()),
            recipient_age: Some(9),
            occasion: Some("birthday".to_string()),
            notes: None,
        };
        let gifted = registry.record_gift(item.id, details.clone()).await.unwrap();
        assert_eq!(gifted.availability, Availability::Gifted);
        assert_eq!(gifted.gifting_history[0].details, details);

        assert_eq!(registry.search("kite").await.unwrap().count, 0);
        let listed = registry
            .list(Some(Availability::Gifted), None, None)
            .await
            .unwrap();
        assert_eq!(listed.count, 1);
    }

    #[tokio::test]
    async fn test_admin_operations() {
        let dir = tempfile::tempdir().unwrap();
        let photos = write_photos(dir.path(), &["mug.jpg"]);
        let registry = registry(Arc::new(FakeAnalyzer::new(&[("Mug", 0.9)])));
        let item = registry.ingest(&photos).await.unwrap().item;

        let err = registry
            .update(item.id, &ItemUpdate::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No fields to update"));

        let update = ItemUpdate {
            condition: Some(Condition::LikeNew),
            ..Default::default()
        };
        let updated = registry.update(item.id, &update).await.unwrap();
        assert_eq!(updated.condition, Some(Condition::LikeNew));
        assert_eq!(updated.tags, item.tags);
        assert!(updated.updated_at >= item.updated_at);

        let kitchen = registry
            .list(None, Some(Category::Kitchen), None)
            .await
            .unwrap();
        assert_eq!(kitchen.count, 1);
        let toys = registry.list(None, Some(Category::Toys), None).await.unwrap();
        assert_eq!(toys.count, 0);

        registry.delete(item.id).await.unwrap();
        assert!(matches!(
            registry.get(item.id).await.unwrap_err(),
            RegistryError::NotFound(id) if id == item.id
        ));
        assert!(matches!(
            registry.delete(item.id).await.unwrap_err(),
            RegistryError::NotFound(_)
        ));
        assert!(matches!(
            registry
                .record_gift(item.id, GiftDetails::default())
                .await
                .unwrap_err(),
            RegistryError::NotFound(_)
        ));
    }
}
