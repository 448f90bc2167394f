//! Rule-based tagging of item photos.
//!
//! Turns one photo's raw provider signals into a [`TagSet`](crate::types::TagSet):
//! keywords, a single category, age ranges, themes, color names and a short
//! description. Every classifier here is a pure function over keywords.

pub mod age;
pub mod category;
pub mod color;
pub mod extractor;
pub mod keywords;
pub mod rules;
pub mod theme;

pub use age::estimate_age_ranges;
pub use category::categorize;
pub use color::color_name;
pub use extractor::{extract_tags, TagExtractor};
pub use keywords::KeywordSet;
pub use rules::RuleTable;
pub use theme::detect_themes;
