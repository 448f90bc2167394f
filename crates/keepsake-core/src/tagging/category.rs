//! Single-label item categorization from keyword evidence.

use super::rules::{any_keyword_matches, RuleTable};
use crate::types::Category;

/// Category evidence, highest priority first.
///
/// A keyword like "toy kitchen" would hit both `toys` and `kitchen`; the
/// earlier row wins, so reordering rows changes classification.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Toys,
        &[
            "toy",
            "doll",
            "action figure",
            "stuffed animal",
            "plush",
            "lego",
            "building blocks",
            "plaything",
        ],
    ),
    (
        Category::GamesPuzzles,
        &["game", "puzzle", "board game", "card game", "jigsaw"],
    ),
    (
        Category::Books,
        &["book", "novel", "magazine", "comic", "textbook"],
    ),
    (
        Category::Kitchen,
        &[
            "pot",
            "pan",
            "utensil",
            "kitchenware",
            "cookware",
            "bakeware",
            "knife",
            "spatula",
            "bowl",
            "plate",
            "cup",
            "mug",
        ],
    ),
    (
        Category::HomeDecor,
        &[
            "vase",
            "picture frame",
            "candle",
            "decoration",
            "ornament",
            "sculpture",
            "figurine",
            "lamp",
        ],
    ),
    (
        Category::Electronics,
        &[
            "electronic",
            "gadget",
            "device",
            "computer",
            "phone",
            "tablet",
            "speaker",
            "headphones",
        ],
    ),
    (
        Category::ClothingAccessories,
        &[
            "clothing", "shirt", "pants", "dress", "hat", "scarf", "jewelry", "watch", "bag",
            "purse",
        ],
    ),
    (
        Category::StationeryCraft,
        &[
            "pen",
            "pencil",
            "notebook",
            "paper",
            "craft",
            "art supply",
            "marker",
            "crayon",
        ],
    ),
    (
        Category::SportsOutdoors,
        &[
            "ball",
            "sports equipment",
            "bicycle",
            "outdoor",
            "camping",
            "hiking",
        ],
    ),
    (
        Category::Collectibles,
        &["collectible", "antique", "vintage", "memorabilia"],
    ),
    (
        Category::WellnessBeauty,
        &["cosmetic", "skincare", "beauty", "perfume", "wellness"],
    ),
];

/// The category rule table, in priority order.
pub fn category_table() -> RuleTable<'static, Category, &'static [&'static str]> {
    RuleTable::new(CATEGORY_RULES)
}

/// Classify keywords into exactly one category, `Other` when nothing matches.
pub fn categorize<S: AsRef<str>>(keywords: &[S]) -> Category {
    category_table()
        .first_match(|terms| any_keyword_matches(keywords, terms))
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lego_is_a_toy() {
        assert_eq!(categorize(&["lego", "red"]), Category::Toys);
    }

    #[test]
    fn test_no_evidence_is_other() {
        assert_eq!(categorize(&["sky", "cloud"]), Category::Other);
        assert_eq!(categorize::<&str>(&[]), Category::Other);
    }

    #[test]
    fn test_priority_is_positional() {
        // "mug" is kitchen evidence, "toy" is toys evidence; toys is declared first
        assert_eq!(categorize(&["mug", "toy"]), Category::Toys);
        // games-puzzles is declared before books
        assert_eq!(categorize(&["book", "board game"]), Category::GamesPuzzles);
    }

    #[test]
    fn test_keyword_inside_term_matches() {
        // "frame" is a substring of "picture frame"
        assert_eq!(categorize(&["frame"]), Category::HomeDecor);
    }

    #[test]
    fn test_term_inside_keyword_matches() {
        assert_eq!(categorize(&["coffee mug"]), Category::Kitchen);
        assert_eq!(categorize(&["wristwatch"]), Category::ClothingAccessories);
    }

    #[test]
    fn test_never_returns_other_when_any_rule_matches() {
        for (category, terms) in CATEGORY_RULES {
            let hit = categorize(&[terms[0]]);
            assert_ne!(hit, Category::Other, "{category} evidence fell through");
        }
    }

    #[test]
    fn test_table_covers_every_category_but_other() {
        assert_eq!(category_table().len(), Category::ALL.len() - 1);
        assert!(CATEGORY_RULES.iter().all(|(c, _)| *c != Category::Other));
    }
}
