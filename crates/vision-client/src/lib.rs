//! # Vision client abstraction
//!
//! Defines the [`VisionClient`] trait and a Google Cloud Vision implementation.
//! The conversation engine sends meal photo bytes here and gets back descriptive labels.

use anyhow::Result;
use async_trait::async_trait;

mod google;

pub use google::GoogleVisionClient;

/// A single descriptive label returned for an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLabel {
    pub description: String,
    pub score: f32,
}

/// Image labeling interface: given raw image bytes, return descriptive labels.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn label_image(&self, image: &[u8]) -> Result<Vec<ImageLabel>>;
}
