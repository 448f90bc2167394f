//! Multi-label theme detection from keyword evidence.

use super::rules::{any_keyword_matches, RuleTable};
use crate::types::Theme;

pub const THEME_RULES: &[(Theme, &[&str])] = &[
    (
        Theme::Educational,
        &["educational", "learning", "school", "teach", "science", "math"],
    ),
    (
        Theme::Creative,
        &["art", "craft", "creative", "drawing", "painting", "music"],
    ),
    (
        Theme::Outdoor,
        &["outdoor", "nature", "camping", "hiking", "sports"],
    ),
    (
        Theme::Indoor,
        &["indoor", "board game", "puzzle", "reading"],
    ),
    (
        Theme::Tech,
        &["electronic", "tech", "digital", "computer", "gadget"],
    ),
    (Theme::Cooking, &["cooking", "kitchen", "baking", "food"]),
    (Theme::Reading, &["book", "novel", "reading", "magazine"]),
    (Theme::Animals, &["animal", "pet", "dog", "cat", "wildlife"]),
    (
        Theme::Vehicles,
        &["car", "truck", "vehicle", "train", "airplane"],
    ),
];

/// Every theme with evidence; empty when none has any.
pub fn detect_themes<S: AsRef<str>>(keywords: &[S]) -> Vec<Theme> {
    RuleTable::new(THEME_RULES).all_matches(|terms| any_keyword_matches(keywords, terms))
}
