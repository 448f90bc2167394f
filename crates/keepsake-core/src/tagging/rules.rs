//! Ordered rule tables and keyword matching.
//!
//! Every classifier in this crate is an ordered list of `(label, evidence)`
//! pairs. Order is part of the contract: single-label classifiers take the
//! first rule whose evidence holds, multi-label classifiers take every rule
//! whose evidence holds, in declaration order.

/// An ordered table of `(label, evidence)` rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<'a, L, E> {
    rules: &'a [(L, E)],
}

impl<'a, L: Copy, E> RuleTable<'a, L, E> {
    pub const fn new(rules: &'a [(L, E)]) -> Self {
        Self { rules }
    }

    /// Evaluate rules in order and return the first non-`None` outcome.
    ///
    /// The evaluator sees the label too, so a rule can compute its result
    /// (e.g. bucket a captured number) instead of returning a fixed label.
    pub fn first_outcome<T>(&self, mut eval: impl FnMut(L, &E) -> Option<T>) -> Option<T> {
        self.rules.iter().find_map(|(label, evidence)| eval(*label, evidence))
    }

    /// Label of the first rule whose evidence holds.
    pub fn first_match(&self, mut holds: impl FnMut(&E) -> bool) -> Option<L> {
        self.first_outcome(|label, evidence| holds(evidence).then_some(label))
    }

    /// Labels of every rule whose evidence holds, in declaration order.
    pub fn all_matches(&self, mut holds: impl FnMut(&E) -> bool) -> Vec<L> {
        self.rules
            .iter()
            .filter(|(_, evidence)| holds(evidence))
            .map(|(label, _)| *label)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Two strings match when either contains the other.
///
/// Known weakness: short keywords hit unrelated terms (`"art"` is inside
/// `"cart"`, `"cup"` is inside `"cupboard"`). Classification outcomes depend
/// on this exact behavior, so it is kept as is.
pub fn bidirectional_match(keyword: &str, term: &str) -> bool {
    keyword.contains(term) || term.contains(keyword)
}

/// True when any keyword bidirectionally matches any of the terms.
pub fn any_keyword_matches<S: AsRef<str>>(keywords: &[S], terms: &[&str]) -> bool {
    keywords.iter().any(|keyword| {
        let keyword = keyword.as_ref();
        terms.iter().any(|term| bidirectional_match(keyword, term))
    })
}
