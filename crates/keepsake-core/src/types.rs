//! Core data types for the Keepsake registry.
//!
//! Three families live here: the raw provider signals for one photo, the
//! fixed vocabularies the rule engine classifies into, and the records the
//! item store persists (items, photos, gifting history, search filters).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ParseLabelError;

// === Provider signals ===

/// One label or localized object with the provider's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Human-readable label, e.g. "Toy" or "Coffee cup"
    pub description: String,

    /// Confidence score from 0.0 to 1.0
    pub score: f32,
}

impl Annotation {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// An RGB sample, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Everything the image-analysis provider reports for one photo.
///
/// Sequences keep the provider's own ranking; the extractor relies on it for
/// the description and for picking dominant colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawImageSignals {
    pub labels: Vec<Annotation>,
    pub objects: Vec<Annotation>,
    /// First entry is the full detected text block, the rest are fragments
    pub detected_text: Vec<String>,
    pub dominant_colors: Vec<Rgb>,
}

impl RawImageSignals {
    /// True when the provider returned no usable signal at all.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
            && self.objects.is_empty()
            && self.detected_text.is_empty()
            && self.dominant_colors.is_empty()
    }
}

// === Fixed vocabularies ===

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $slug:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $slug)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable slug used in storage, filters and CLI arguments.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| ParseLabelError::new($kind, s))
            }
        }
    };
}

vocabulary! {
    /// Item category. `Other` is the fallback and has no evidence terms.
    Category, "category" {
        Toys => "toys",
        GamesPuzzles => "games-puzzles",
        Books => "books",
        Kitchen => "kitchen",
        HomeDecor => "home-decor",
        Electronics => "electronics",
        ClothingAccessories => "clothing-accessories",
        StationeryCraft => "stationery-craft",
        SportsOutdoors => "sports-outdoors",
        Collectibles => "collectibles",
        WellnessBeauty => "wellness-beauty",
        Other => "other",
    }
}

vocabulary! {
    /// Recipient age bucket.
    AgeRange, "age range" {
        Baby => "baby",
        YoungChild => "young-child",
        OlderChild => "older-child",
        Teen => "teen",
        Adult => "adult",
        AnyAge => "any-age",
    }
}

vocabulary! {
    /// Thematic interest tag.
    Theme, "theme" {
        Educational => "educational",
        Creative => "creative",
        Outdoor => "outdoor",
        Indoor => "indoor",
        Tech => "tech",
        Cooking => "cooking",
        Reading => "reading",
        Animals => "animals",
        Vehicles => "vehicles",
    }
}

vocabulary! {
    /// Whether an item can still be given away.
    #[derive(Default)]
    Availability, "availability" {
        #[default]
        Available => "available",
        Reserved => "reserved",
        Gifted => "gifted",
    }
}

vocabulary! {
    /// Physical condition of an item.
    Condition, "condition" {
        New => "new",
        LikeNew => "like-new",
        Good => "good",
        Fair => "fair",
    }
}

impl AgeRange {
    /// Bucket an age in years.
    pub fn for_age(years: u32) -> Self {
        match years {
            0..=2 => Self::Baby,
            3..=6 => Self::YoungChild,
            7..=12 => Self::OlderChild,
            13..=17 => Self::Teen,
            _ => Self::Adult,
        }
    }
}

// === Derived tags ===

/// The structured classification of one item, computed once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    /// Exactly one category; `other` when nothing matched
    pub category: Category,

    /// Never empty; `[any-age]` when nothing matched
    pub age_ranges: Vec<AgeRange>,

    /// May be empty
    pub themes: Vec<Theme>,

    /// Lower-cased, deduplicated, in first-seen order
    pub keywords: Vec<String>,

    /// Top object and label names, comma separated
    pub description: String,

    /// Full text block detected in the photo, or empty
    pub detected_text: String,

    /// Names of up to three dominant colors
    pub dominant_colors: Vec<String>,

    /// Provider confidence for each annotation-derived keyword
    pub confidence_scores: BTreeMap<String, f32>,
}

// === Stored records ===

/// A photo attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub file_path: PathBuf,
    pub file_name: String,
    /// BLAKE3 hash of the file contents
    pub content_hash: String,
    /// The primary photo is the one that was analyzed
    pub is_primary: bool,
    pub added_at: DateTime<Utc>,
}

/// Caller-supplied details of a hand-over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One entry in an item's gifting history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftRecord {
    pub gifted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: GiftDetails,
}

/// What the registry hands a store to create.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub tags: TagSet,
    pub photos: Vec<Photo>,
}

/// A registered item: immutable tags plus mutable administrative fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,

    #[serde(flatten)]
    pub tags: TagSet,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub availability: Availability,

    pub photos: Vec<Photo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gifting_history: Vec<GiftRecord>,

    pub uploaded_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Materialize a new item with a fresh id. Stores call this inside `create`.
    pub fn from_new(new: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tags: new.tags,
            location: None,
            condition: None,
            notes: None,
            availability: Availability::default(),
            photos: new.photos,
            gifting_history: Vec::new(),
            uploaded_at: now,
            updated_at: now,
        }
    }

    /// The photo that was analyzed at ingestion.
    pub fn primary_photo(&self) -> Option<&Photo> {
        self.photos.iter().find(|p| p.is_primary)
    }
}

/// Changes to an item's administrative fields. Tags are not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUpdate {
    pub location: Option<String>,
    pub condition: Option<Condition>,
    pub notes: Option<String>,
    pub availability: Option<Availability>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.condition.is_none()
            && self.notes.is_none()
            && self.availability.is_none()
    }

    /// Apply the present fields and bump `updated_at`.
    pub fn apply(&self, item: &mut Item, now: DateTime<Utc>) {
        if let Some(location) = &self.location {
            item.location = Some(location.clone());
        }
        if let Some(condition) = self.condition {
            item.condition = Some(condition);
        }
        if let Some(notes) = &self.notes {
            item.notes = Some(notes.clone());
        }
        if let Some(availability) = self.availability {
            item.availability = availability;
        }
        item.updated_at = now;
    }
}

// === Queries ===

/// Structured constraints for retrieval. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

impl SearchFilter {
    /// True when no structured field is set (free text is not structured).
    pub fn has_no_structure(&self) -> bool {
        self.age_range.is_none()
            && self.category.is_none()
            && self.theme.is_none()
            && self.keyword.is_none()
    }
}

/// Result of the `search` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub filters: SearchFilter,
    pub items: Vec<Item>,
    pub count: usize,
}

/// Result of the administrative `list` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutcome {
    pub items: Vec<Item>,
    pub count: usize,
}

impl From<Vec<Item>> for ListOutcome {
    fn from(items: Vec<Item>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Result of the `ingest` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub tag_set: TagSet,
    pub item: Item,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tags() -> TagSet {
        TagSet {
            category: Category::Toys,
            age_ranges: vec![AgeRange::OlderChild],
            themes: vec![Theme::Creative],
            keywords: vec!["lego".to_string(), "red".to_string()],
            description: "Lego, Toy".to_string(),
            detected_text: String::new(),
            dominant_colors: vec!["red".to_string()],
            confidence_scores: BTreeMap::from([("lego".to_string(), 0.93)]),
        }
    }

    #[test]
    fn test_slugs_roundtrip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
        }
        assert_eq!("Young-Child".parse::<AgeRange>().unwrap(), AgeRange::YoungChild);
        assert!("gizmos".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&Category::HomeDecor).unwrap();
        assert_eq!(json, "\"home-decor\"");
        let parsed: AgeRange = serde_json::from_str("\"any-age\"").unwrap();
        assert_eq!(parsed, AgeRange::AnyAge);
    }

    #[test]
    fn test_age_buckets() {
        assert_eq!(AgeRange::for_age(0), AgeRange::Baby);
        assert_eq!(AgeRange::for_age(2), AgeRange::Baby);
        assert_eq!(AgeRange::for_age(3), AgeRange::YoungChild);
        assert_eq!(AgeRange::for_age(6), AgeRange::YoungChild);
        assert_eq!(AgeRange::for_age(12), AgeRange::OlderChild);
        assert_eq!(AgeRange::for_age(17), AgeRange::Teen);
        assert_eq!(AgeRange::for_age(18), AgeRange::Adult);
        assert_eq!(AgeRange::for_age(95), AgeRange::Adult);
    }

    #[test]
    fn test_item_flattens_tags() {
        let now = Utc::now();
        let item = Item::from_new(
            NewItem {
                tags: sample_tags(),
                photos: vec![],
            },
            now,
        );
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"category\":\"toys\""));
        assert!(json.contains("\"availability\":\"available\""));
        assert!(!json.contains("gifting_history"));

        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_item_update_apply() {
        let now = Utc::now();
        let mut item = Item::from_new(
            NewItem {
                tags: sample_tags(),
                photos: vec![],
            },
            now,
        );
        let update = ItemUpdate {
            notes: Some("from the attic".to_string()),
            availability: Some(Availability::Reserved),
            ..Default::default()
        };
        assert!(!update.is_empty());

        let later = now + chrono::Duration::seconds(5);
        update.apply(&mut item, later);
        assert_eq!(item.notes.as_deref(), Some("from the attic"));
        assert_eq!(item.availability, Availability::Reserved);
        assert_eq!(item.location, None);
        assert_eq!(item.updated_at, later);
        assert_eq!(item.tags, sample_tags());
    }

    #[test]
    fn test_availability_defaults_to_available() {
        assert_eq!(Availability::default(), Availability::Available);

        let item = Item::from_new(
            NewItem {
                tags: sample_tags(),
                photos: vec![],
            },
            Utc::now(),
        );
        assert_eq!(item.availability, Availability::Available);

        let mut json = serde_json::to_value(&item).unwrap();
        json.as_object_mut().unwrap().remove("availability");
        let restored: Item = serde_json::from_value(json).unwrap();
        assert_eq!(restored.availability, Availability::Available);
    }

    #[test]
    fn test_raw_signals_deserialize_with_missing_fields() {
        let signals: RawImageSignals =
            serde_json::from_str(r#"{"labels":[{"description":"Toy","score":0.9}],"dominant_colors":[[255,0,0]]}"#)
                .unwrap();
        assert_eq!(signals.labels.len(), 1);
        assert!(signals.objects.is_empty());
        assert_eq!(signals.dominant_colors, vec![Rgb(255, 0, 0)]);
    }

    #[test]
    fn test_search_filter_skips_empty_fields() {
        let filter = SearchFilter {
            age_range: Some(AgeRange::Teen),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&filter).unwrap(), r#"{"age_range":"teen"}"#);
        assert!(!filter.has_no_structure());
        assert!(SearchFilter::default().has_no_structure());
    }
}
