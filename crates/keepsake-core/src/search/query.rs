//! Free-text query parsing.
//!
//! Turns a sentence like "Educational items for teens" into a
//! [`SearchFilter`] draft. Detection runs in three steps (age, category,
//! theme); each step keeps the first rule that matches and then stops.
//! Parsing never fails: a query with no recognizable words yields a filter
//! that only carries the free text.

use regex::Regex;
use std::sync::OnceLock;

use crate::tagging::category::category_table;
use crate::tagging::rules::RuleTable;
use crate::tagging::theme::THEME_RULES;
use crate::types::{AgeRange, Category, SearchFilter, Theme};

/// How an age pattern turns a match into an age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgeRule {
    Fixed(AgeRange),
    /// First capture group is an age in years
    Years,
}

/// Age patterns in priority order. Matched against the lower-cased query.
const AGE_PATTERNS: &[(AgeRule, &str)] = &[
    (
        AgeRule::Fixed(AgeRange::Baby),
        r"\b(?:baby|babies|infants?|newborns?)\b",
    ),
    (
        AgeRule::Fixed(AgeRange::YoungChild),
        r"\b(?:toddlers?|preschool|preschoolers?|young child|young children)\b",
    ),
    (AgeRule::Years, r"\b(\d+)[\s-]*(?:years?|yrs?)[\s-]*old\b"),
    (
        AgeRule::Fixed(AgeRange::OlderChild),
        r"\b(?:kid|kids|child|children)\b",
    ),
    (
        AgeRule::Fixed(AgeRange::Teen),
        r"\b(?:teens?|teenagers?|adolescents?)\b",
    ),
    (
        AgeRule::Fixed(AgeRange::Adult),
        r"\b(?:adults?|grown-ups?|grownups?)\b",
    ),
    (
        AgeRule::Fixed(AgeRange::Adult),
        r"\b(?:grandmother|grandfather|grandma|grandpa|grandparents?|seniors?|elderly)\b",
    ),
];

fn age_patterns() -> &'static [(AgeRule, Regex)] {
    static PATTERNS: OnceLock<Vec<(AgeRule, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        AGE_PATTERNS
            .iter()
            .map(|(rule, pattern)| (*rule, Regex::new(pattern).expect("Invalid age pattern")))
            .collect()
    })
}

/// First age pattern that matches, in priority order.
///
/// An explicit age ("6-year-old", "10 years old") is bucketed with
/// [`AgeRange::for_age`]. A number too large for `u32` counts as an adult.
pub fn detect_age_range(query: &str) -> Option<AgeRange> {
    let query = query.to_lowercase();
    RuleTable::new(age_patterns()).first_outcome(|rule, pattern| match rule {
        AgeRule::Fixed(range) => pattern.is_match(&query).then_some(range),
        AgeRule::Years => pattern
            .captures(&query)
            .and_then(|caps| caps.get(1))
            // Only digits are captured, so parsing fails only on overflow
            .map(|years| years.as_str().parse::<u32>().unwrap_or(u32::MAX))
            .map(AgeRange::for_age),
    })
}

/// First category whose slug, or the slug with hyphens as spaces, appears in the query.
pub fn detect_category(query: &str) -> Option<Category> {
    let query = query.to_lowercase();
    category_table().first_outcome(|category, _| {
        let slug = category.as_str();
        (query.contains(slug) || query.contains(&slug.replace('-', " "))).then_some(category)
    })
}

/// First theme whose name appears literally in the query.
pub fn detect_theme(query: &str) -> Option<Theme> {
    let query = query.to_lowercase();
    RuleTable::new(THEME_RULES)
        .first_outcome(|theme, _| query.contains(theme.as_str()).then_some(theme))
}

/// Parse one query into a filter draft. The original text is kept as free text.
pub fn parse_query(query: &str) -> SearchFilter {
    let filter = SearchFilter {
        age_range: detect_age_range(query),
        category: detect_category(query),
        theme: detect_theme(query),
        keyword: None,
        free_text: Some(query.to_string()),
    };
    tracing::debug!(
        "Parsed query {:?}: age={:?} category={:?} theme={:?}",
        query,
        filter.age_range,
        filter.category,
        filter.theme
    );
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_age_is_bucketed() {
        let filter = parse_query("What can we gift a 6-year-old?");
        assert_eq!(filter.age_range, Some(AgeRange::YoungChild));
        assert_eq!(filter.category, None);
        assert_eq!(filter.theme, None);
        assert_eq!(
            filter.free_text.as_deref(),
            Some("What can we gift a 6-year-old?")
        );
    }

    #[test]
    fn test_grandparent_is_adult() {
        let filter = parse_query("Gifts for grandmother");
        assert_eq!(filter.age_range, Some(AgeRange::Adult));
    }

    #[test]
    fn test_teens_with_theme() {
        let filter = parse_query("Educational items for teens");
        assert_eq!(filter.age_range, Some(AgeRange::Teen));
        assert_eq!(filter.theme, Some(Theme::Educational));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_age_number_variants() {
        assert_eq!(detect_age_range("for a 2 year old"), Some(AgeRange::Baby));
        assert_eq!(detect_age_range("10 years old"), Some(AgeRange::OlderChild));
        assert_eq!(detect_age_range("she is 15 yrs old"), Some(AgeRange::Teen));
        assert_eq!(detect_age_range("a 40-year-old"), Some(AgeRange::Adult));
        assert_eq!(detect_age_range("a 99999999999 year old"), Some(AgeRange::Adult));
        assert_eq!(
            detect_age_range("gift for a 99999999999 year old kid"),
            Some(AgeRange::Adult)
        );
    }

    #[test]
    fn test_age_patterns_are_ordered() {
        // Baby beats kid when both appear
        assert_eq!(
            detect_age_range("toys for kids and babies"),
            Some(AgeRange::Baby)
        );
        // An explicit age beats the generic "child"
        assert_eq!(
            detect_age_range("child who is 14 years old"),
            Some(AgeRange::Teen)
        );
    }

    #[test]
    fn test_age_words_need_word_boundaries() {
        assert_eq!(detect_age_range("kidney beans"), None);
        assert_eq!(detect_age_range("a babyish plush"), None);
    }

    #[test]
    fn test_category_slug_and_spaced_form() {
        assert_eq!(detect_category("any toys left?"), Some(Category::Toys));
        assert_eq!(detect_category("home decor ideas"), Some(Category::HomeDecor));
        assert_eq!(
            detect_category("GAMES-PUZZLES please"),
            Some(Category::GamesPuzzles)
        );
        assert_eq!(detect_category("something nice"), None);
    }

    #[test]
    fn test_category_first_match_wins() {
        assert_eq!(
            detect_category("books or kitchen things"),
            Some(Category::Books)
        );
    }

    #[test]
    fn test_theme_first_match_wins() {
        assert_eq!(
            detect_theme("creative and educational"),
            Some(Theme::Educational)
        );
        assert_eq!(detect_theme("nothing here"), None);
    }

    #[test]
    fn test_unmatched_query_is_free_text_only() {
        let filter = parse_query("something shiny");
        assert!(filter.has_no_structure());
        assert_eq!(filter.free_text.as_deref(), Some("something shiny"));
    }
}
