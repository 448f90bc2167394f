//! Builds an item's tag set from one photo's provider signals.
//!
//! Extraction itself ([`extract_tags`]) is a pure function of the signals.
//! [`TagExtractor`] wraps it with the single provider call that produces
//! those signals: one attempt, bounded by a timeout, never retried.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::age::estimate_age_ranges;
use super::category::categorize;
use super::color::color_name;
use super::keywords::KeywordSet;
use super::theme::detect_themes;
use crate::error::ProviderError;
use crate::provider::{ImageAnalyzer, ImageRef};
use crate::types::{Annotation, RawImageSignals, TagSet};

/// Annotations must score strictly above this to become keywords.
pub const KEYWORD_MIN_SCORE: f32 = 0.6;

/// Dominant colors considered, in provider order.
pub const MAX_DOMINANT_COLORS: usize = 3;

/// Top-ranked object names that open the description.
pub const DESCRIPTION_OBJECTS: usize = 2;

/// Top-ranked label descriptions that follow them.
pub const DESCRIPTION_LABELS: usize = 3;

/// Derive a complete tag set from raw signals.
pub fn extract_tags(signals: &RawImageSignals) -> TagSet {
    let mut keywords = KeywordSet::new();
    let mut confidence_scores = BTreeMap::new();

    // Labels first, then objects; a repeated keyword keeps the later score
    for annotation in signals.labels.iter().chain(&signals.objects) {
        if annotation.score > KEYWORD_MIN_SCORE {
            if let Some(keyword) = keywords.insert(&annotation.description) {
                confidence_scores.insert(keyword, annotation.score);
            }
        }
    }

    let dominant_colors: Vec<String> = signals
        .dominant_colors
        .iter()
        .take(MAX_DOMINANT_COLORS)
        .map(|rgb| color_name(*rgb).to_string())
        .collect();
    for name in &dominant_colors {
        keywords.insert(name);
    }

    let category = categorize(keywords.as_slice());
    let age_ranges = estimate_age_ranges(keywords.as_slice());
    let themes = detect_themes(keywords.as_slice());

    TagSet {
        category,
        age_ranges,
        themes,
        keywords: keywords.into_vec(),
        description: describe(&signals.objects, &signals.labels),
        detected_text: signals.detected_text.first().cloned().unwrap_or_default(),
        dominant_colors,
        confidence_scores,
    }
}

/// Top objects then top labels, exact duplicates dropped, comma separated.
///
/// Uses the provider ranking regardless of score.
fn describe(objects: &[Annotation], labels: &[Annotation]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let candidates = objects
        .iter()
        .take(DESCRIPTION_OBJECTS)
        .chain(labels.iter().take(DESCRIPTION_LABELS));

    for annotation in candidates {
        let name = annotation.description.as_str();
        if !parts.contains(&name) {
            parts.push(name);
        }
    }

    parts.join(", ")
}

/// Runs the image-analysis provider on one photo and tags the result.
#[derive(Clone)]
pub struct TagExtractor {
    analyzer: Arc<dyn ImageAnalyzer>,
    timeout: Duration,
}

impl TagExtractor {
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>, timeout: Duration) -> Self {
        Self { analyzer, timeout }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Analyze one photo and extract its tag set.
    ///
    /// The provider call is dropped (and so cancelled) when the timeout
    /// elapses. No partial tag set is ever returned.
    pub async fn tag(&self, image: &ImageRef) -> Result<TagSet, ProviderError> {
        let start = Instant::now();
        tracing::debug!("Analyzing {:?} with {}", image.path, self.analyzer.name());

        let signals = match tokio::time::timeout(self.timeout, self.analyzer.analyze(image)).await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(ProviderError::Timeout {
                    provider: self.analyzer.name().to_string(),
                    path: image.path.clone(),
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
        };
        tracing::trace!("  Provider: {:?}", start.elapsed());

        if signals.is_empty() {
            tracing::warn!(
                "{} returned no signals for {:?}; item will be tagged 'other'",
                self.analyzer.name(),
                image.path
            );
        }

        let tags = extract_tags(&signals);
        tracing::debug!(
            "Tagged {:?} as {} ({} keywords) in {:?}",
            image.path,
            tags.category,
            tags.keywords.len(),
            start.elapsed()
        );
        Ok(tags)
    }
}
