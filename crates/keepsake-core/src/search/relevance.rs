//! Weighted free-text relevance over an item's searchable projection.
//!
//! The projection has four fields, weighted category > keywords >
//! description > notes. A query term scores the weight of the heaviest
//! field that contains it; an item's score is the sum over query terms.
//! Terms combine with OR, so an item matches when any term scores.

use std::collections::HashSet;

use crate::types::{Item, SearchFilter};

/// Field weights, heaviest first.
pub const CATEGORY_WEIGHT: f32 = 1.0;
pub const KEYWORDS_WEIGHT: f32 = 0.4;
pub const DESCRIPTION_WEIGHT: f32 = 0.2;
pub const NOTES_WEIGHT: f32 = 0.1;

const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "any", "are", "as", "at", "be", "but", "by", "can", "could", "do",
    "does", "for", "from", "get", "give", "good", "have", "her", "him", "his", "how", "i", "in",
    "is", "it", "its", "like", "me", "my", "nice", "of", "on", "or", "our", "please", "she",
    "should", "some", "that", "the", "their", "them", "there", "they", "this", "to", "up", "us",
    "want", "was", "we", "what", "when", "where", "which", "who", "whom", "why", "with", "would",
    "you", "your",
];

/// Gifting filler that says nothing about the item itself.
const FILLER: &[&str] = &[
    "gift", "present", "idea", "item", "thing", "something", "stuff", "recommend", "suggest",
];

/// Recipient words. The parser already turns these into an age filter, so
/// they never count as item text.
const RECIPIENT_WORDS: &[&str] = &[
    "baby", "infant", "newborn", "toddler", "preschool", "preschooler", "young", "kid", "child",
    "children", "teen", "teenager", "adolescent", "adult", "grown", "grownup", "grandmother",
    "grandfather", "grandma", "grandpa", "grandparent", "senior", "elderly", "year", "yrs", "yr",
    "old", "age", "aged",
];

/// Light English stemming: "puzzles" → "puzzle", "batteries" → "battery".
fn stem(word: &str) -> String {
    if let Some(base) = word.strip_suffix("ies") {
        if base.len() >= 2 {
            return format!("{base}y");
        }
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Lower-cased alphanumeric words.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Lower-cased, stemmed alphanumeric tokens.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    words(text).map(|w| stem(&w))
}

fn is_noise(term: &str) -> bool {
    term.chars().all(|c| c.is_ascii_digit())
        || STOPWORDS.contains(&term)
        || FILLER.contains(&term)
        || RECIPIENT_WORDS.contains(&term)
}

/// Terms of a free-text query that say something about the item.
///
/// The name of the theme `filter` selects is dropped too, since the theme
/// predicate already covers it. Other theme names stay as ordinary terms.
/// Returns an empty list when the query is all filler ("gift ideas for a
/// 6-year-old"), which callers treat as no text constraint.
pub fn query_terms(text: &str, filter: &SearchFilter) -> Vec<String> {
    let selected_theme = filter.theme.as_ref().map(|t| t.as_str());
    let dropped = |term: &str| is_noise(term) || selected_theme == Some(term);

    let mut seen = HashSet::new();
    words(text)
        .filter(|w| !dropped(w))
        .map(|w| stem(&w))
        .filter(|t| !dropped(t) && seen.insert(t.clone()))
        .collect()
}

/// The weighted token sets an item is searched through.
struct Projection {
    category: HashSet<String>,
    keywords: HashSet<String>,
    description: HashSet<String>,
    notes: HashSet<String>,
}

impl Projection {
    fn of(item: &Item) -> Self {
        Self {
            category: tokens(item.tags.category.as_str()).collect(),
            keywords: item.tags.keywords.iter().flat_map(|k| tokens(k)).collect(),
            description: tokens(&item.tags.description).collect(),
            notes: item.notes.as_deref().map(|n| tokens(n).collect()).unwrap_or_default(),
        }
    }

    fn weight_of(&self, term: &str) -> f32 {
        if self.category.contains(term) {
            CATEGORY_WEIGHT
        } else if self.keywords.contains(term) {
            KEYWORDS_WEIGHT
        } else if self.description.contains(term) {
            DESCRIPTION_WEIGHT
        } else if self.notes.contains(term) {
            NOTES_WEIGHT
        } else {
            0.0
        }
    }
}

/// Relevance of an item to pre-computed query terms. Zero means no match.
pub fn score(item: &Item, terms: &[String]) -> f32 {
    let projection = Projection::of(item);
    terms.iter().map(|t| projection.weight_of(t)).sum()
}
