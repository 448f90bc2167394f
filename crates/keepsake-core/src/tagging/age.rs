//! Multi-label age range estimation from keyword evidence.

use super::rules::{any_keyword_matches, RuleTable};
use crate::types::AgeRange;

/// Evidence for each age bucket. Every bucket is tested independently.
pub const AGE_RULES: &[(AgeRange, &[&str])] = &[
    (
        AgeRange::Baby,
        &["baby", "infant", "rattle", "pacifier", "bottle", "crib"],
    ),
    (
        AgeRange::YoungChild,
        &[
            "toddler",
            "preschool",
            "stuffed animal",
            "plush",
            "simple toy",
            "building blocks",
        ],
    ),
    (
        AgeRange::OlderChild,
        &["toy", "game", "puzzle", "lego", "action figure", "doll"],
    ),
    (
        AgeRange::Teen,
        &["electronics", "gadget", "sports", "fashion", "tech"],
    ),
    (
        AgeRange::Adult,
        &["wine", "coffee", "kitchen", "home decor", "book", "tool"],
    ),
];

/// Every age bucket with evidence, or `[AnyAge]` when none has any.
pub fn estimate_age_ranges<S: AsRef<str>>(keywords: &[S]) -> Vec<AgeRange> {
    let ranges =
        RuleTable::new(AGE_RULES).all_matches(|terms| any_keyword_matches(keywords, terms));

    if ranges.is_empty() {
        vec![AgeRange::AnyAge]
    } else {
        ranges
    }
}
