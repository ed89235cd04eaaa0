//! Google Cloud Vision implementation of [`VisionClient`]: REST `images:annotate`
//! with a single LABEL_DETECTION feature, authenticated by API key.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{ImageLabel, VisionClient};

const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com";
const MAX_LABELS: u32 = 10;

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize, Default)]
struct AnnotateImageResponse {
    #[serde(rename = "labelAnnotations", default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
struct LabelAnnotation {
    description: String,
    #[serde(default)]
    score: f32,
}

#[derive(Deserialize)]
struct ApiStatus {
    code: i32,
    message: String,
}

/// Vision client backed by the Google Cloud Vision REST API.
#[derive(Clone)]
pub struct GoogleVisionClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleVisionClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Uses a custom endpoint (also used by tests with a mock server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self, image))]
    async fn annotate(&self, image: &[u8]) -> Result<Vec<ImageLabel>> {
        let url = format!("{}/v1/images:annotate?key={}", self.base_url, self.api_key);
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: BASE64.encode(image),
                },
                features: vec![Feature {
                    feature_type: "LABEL_DETECTION".to_string(),
                    max_results: MAX_LABELS,
                }],
            }],
        };

        info!(image_bytes = image.len(), "Submitting label detection request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Vision request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Vision API returned HTTP {}", status);
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .context("Invalid Vision API response body")?;

        let image_response = parsed.responses.into_iter().next().unwrap_or_default();
        if let Some(err) = image_response.error {
            anyhow::bail!("Vision API error {}: {}", err.code, err.message);
        }

        let labels: Vec<ImageLabel> = image_response
            .label_annotations
            .into_iter()
            .map(|a| ImageLabel {
                description: a.description,
                score: a.score,
            })
            .collect();

        info!(label_count = labels.len(), "Label detection returned");
        Ok(labels)
    }
}

#[async_trait]
impl VisionClient for GoogleVisionClient {
    async fn label_image(&self, image: &[u8]) -> Result<Vec<ImageLabel>> {
        self.annotate(image).await
    }
}
