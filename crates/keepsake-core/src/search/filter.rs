//! Item selection and ordering for one query.

use std::cmp::Ordering;

use super::relevance;
use crate::types::{Availability, Item, SearchFilter};

/// Where a query comes from, which decides the implicit availability rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Recipient-facing search: only available items, always.
    Conversational,
    /// Registry-owner listing: availability only when asked for.
    Administrative { availability: Option<Availability> },
}

/// A filter plus the scope it runs in. This is what stores are asked to list.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuery {
    pub filter: SearchFilter,
    pub scope: ListScope,
}

impl ItemQuery {
    pub fn conversational(filter: SearchFilter) -> Self {
        Self {
            filter,
            scope: ListScope::Conversational,
        }
    }

    pub fn administrative(filter: SearchFilter, availability: Option<Availability>) -> Self {
        Self {
            filter,
            scope: ListScope::Administrative { availability },
        }
    }
}

/// Applies an [`ItemQuery`] to items: structured fields are AND-ed hard
/// predicates, free text adds a relevance requirement and ranking.
#[derive(Debug)]
pub struct RetrievalFilter<'q> {
    query: &'q ItemQuery,
    keyword: Option<String>,
    /// Empty when there is no usable free text
    terms: Vec<String>,
}

impl<'q> RetrievalFilter<'q> {
    pub fn new(query: &'q ItemQuery) -> Self {
        let terms = query
            .filter
            .free_text
            .as_deref()
            .map(|text| relevance::query_terms(text, &query.filter))
            .unwrap_or_default();
        Self {
            query,
            keyword: query.filter.keyword.as_ref().map(|k| k.trim().to_lowercase()),
            terms,
        }
    }

    /// True when the free text contributed at least one relevance term.
    pub fn is_ranked(&self) -> bool {
        !self.terms.is_empty()
    }

    fn required_availability(&self) -> Option<Availability> {
        match self.query.scope {
            ListScope::Conversational => Some(Availability::Available),
            ListScope::Administrative { availability } => availability,
        }
    }

    /// Whether the item passes every structured predicate.
    pub fn admits(&self, item: &Item) -> bool {
        let filter = &self.query.filter;
        let tags = &item.tags;

        self.required_availability()
            .map_or(true, |a| item.availability == a)
            && filter.age_range.map_or(true, |a| tags.age_ranges.contains(&a))
            && filter.category.map_or(true, |c| tags.category == c)
            && filter.theme.map_or(true, |t| tags.themes.contains(&t))
            && self
                .keyword
                .as_ref()
                .map_or(true, |k| tags.keywords.contains(k))
    }

    /// Relevance score when the item is selected, `None` when it is not.
    ///
    /// Without relevance terms every admitted item scores zero.
    pub fn evaluate(&self, item: &Item) -> Option<f32> {
        if !self.admits(item) {
            return None;
        }
        if !self.is_ranked() {
            return Some(0.0);
        }
        let score = relevance::score(item, &self.terms);
        (score > 0.0).then_some(score)
    }

    /// Select and order matching items.
    ///
    /// Ranked queries sort by score descending; ties, and unranked queries,
    /// sort by upload time, newest first.
    pub fn apply<'a>(&self, items: impl IntoIterator<Item = &'a Item>) -> Vec<Item> {
        let mut selected: Vec<(f32, &Item)> = items
            .into_iter()
            .filter_map(|item| self.evaluate(item).map(|score| (score, item)))
            .collect();

        selected.sort_by(|(sa, a), (sb, b)| {
            sb.partial_cmp(sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.uploaded_at.cmp(&a.uploaded_at))
        });

        selected.into_iter().map(|(_, item)| item.clone()).collect()
    }
}
