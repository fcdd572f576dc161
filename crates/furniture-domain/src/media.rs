//! Image references stored in JSON sidecar columns.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single image with alt text: avatars, category images, featured images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ImageRef {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// A product gallery image. Galleries render in ascending `display_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductImage {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub display_order: i32,
}

/// An inline image inside a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostImage {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}
