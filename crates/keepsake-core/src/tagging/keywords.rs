//! Ordered, case-insensitive keyword accumulation.

use std::collections::HashSet;

/// Keywords in first-seen order, lower-cased, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and add a keyword. Returns the stored form when the keyword
    /// is non-blank, whether or not it was already present.
    pub fn insert(&mut self, raw: &str) -> Option<String> {
        let keyword = normalize(raw)?;
        if self.seen.insert(keyword.clone()) {
            self.ordered.push(keyword.clone());
        }
        Some(keyword)
    }

    pub fn contains(&self, raw: &str) -> bool {
        normalize(raw).is_some_and(|k| self.seen.contains(&k))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
