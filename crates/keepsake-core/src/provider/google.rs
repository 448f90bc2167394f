//! Google Cloud Vision provider.
//!
//! Sends one `images:annotate` request per photo with label detection,
//! object localization, text detection and image properties enabled, and
//! maps the response onto [`RawImageSignals`].

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

use super::classify;
use super::{ImageAnalyzer, ImageRef};
use crate::error::ProviderError;
use crate::types::{Annotation, RawImageSignals, Rgb};

pub(crate) const PROVIDER_NAME: &str = "google-vision";

/// Google Cloud Vision REST client.
pub struct GoogleVisionAnalyzer {
    endpoint: String,
    api_key: String,
    max_results: u32,
    client: reqwest::Client,
}

impl GoogleVisionAnalyzer {
    pub fn new(endpoint: &str, api_key: &str, max_results: u32) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            max_results,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, image_bytes: &[u8]) -> AnnotateRequest {
        let feature = |kind: &'static str| Feature {
            kind,
            max_results: self.max_results,
        };
        AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(image_bytes),
                },
                features: vec![
                    feature("LABEL_DETECTION"),
                    feature("OBJECT_LOCALIZATION"),
                    feature("TEXT_DETECTION"),
                    feature("IMAGE_PROPERTIES"),
                ],
            }],
        }
    }
}

/// `images:annotate` request body.
#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

/// `images:annotate` response body.
#[derive(Deserialize, Default)]
#[serde(default)]
struct AnnotateResponse {
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ImageResponse {
    label_annotations: Vec<EntityAnnotation>,
    localized_object_annotations: Vec<LocalizedObject>,
    text_annotations: Vec<EntityAnnotation>,
    image_properties_annotation: Option<ImageProperties>,
    error: Option<Status>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EntityAnnotation {
    description: String,
    score: f32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LocalizedObject {
    name: String,
    score: f32,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ImageProperties {
    dominant_colors: DominantColors,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DominantColors {
    colors: Vec<ColorInfo>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ColorInfo {
    color: Color,
}

/// Channels are floats in 0..=255 and omitted when zero.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Color {
    red: f32,
    green: f32,
    blue: f32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Status {
    code: i32,
    message: String,
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Map one per-image response onto raw signals.
fn into_signals(response: ImageResponse, path: &Path) -> Result<RawImageSignals, ProviderError> {
    if let Some(status) = response.error {
        return Err(ProviderError::MalformedImage {
            provider: PROVIDER_NAME.to_string(),
            path: path.to_path_buf(),
            message: format!("code {}: {}", status.code, status.message),
        });
    }

    let labels = response
        .label_annotations
        .into_iter()
        .map(|a| Annotation::new(a.description, a.score))
        .collect();
    let objects = response
        .localized_object_annotations
        .into_iter()
        .map(|o| Annotation::new(o.name, o.score))
        .collect();
    let detected_text = response
        .text_annotations
        .into_iter()
        .map(|t| t.description)
        .collect();
    let dominant_colors = response
        .image_properties_annotation
        .map(|p| {
            p.dominant_colors
                .colors
                .into_iter()
                .map(|c| Rgb(channel(c.color.red), channel(c.color.green), channel(c.color.blue)))
                .collect()
        })
        .unwrap_or_default();

    Ok(RawImageSignals {
        labels,
        objects,
        detected_text,
        dominant_colors,
    })
}

#[async_trait]
impl ImageAnalyzer for GoogleVisionAnalyzer {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn analyze(&self, image: &ImageRef) -> Result<RawImageSignals, ProviderError> {
        let bytes = image.read(PROVIDER_NAME).await?;
        let url = format!("{}/images:annotate", self.endpoint);
        let start = Instant::now();

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.build_request(&bytes))
            .send()
            .await
            .map_err(|e| classify::from_transport(PROVIDER_NAME, &image.path, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(classify::from_status(
                PROVIDER_NAME,
                &image.path,
                status.as_u16(),
                &text,
            ));
        }

        let body: AnnotateResponse = resp.json().await.map_err(|e| ProviderError::Response {
            provider: PROVIDER_NAME.to_string(),
            message: format!("Failed to parse annotate response: {e}"),
        })?;
        tracing::debug!(
            "{} answered for {:?} in {}ms",
            PROVIDER_NAME,
            image.path,
            start.elapsed().as_millis()
        );

        let response = body
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Response {
                provider: PROVIDER_NAME.to_string(),
                message: "annotate response contained no results".to_string(),
            })?;

        into_signals(response, &image.path)
    }
}
