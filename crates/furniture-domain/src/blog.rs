//! Blog post domain types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::seo::SeoMetadata;

wire_enum! {
    /// Post publication status. Stored as its wire name in `posts.status`.
    #[derive(Default)]
    pub enum PostStatus("post status") {
        #[default]
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

wire_enum! {
    /// Fixed set of blog sections. Kebab-case on the wire.
    pub enum PostCategory("post category") {
        DesignTips => "design-tips",
        InteriorTrends => "interior-trends",
        Maintenance => "maintenance",
        Decoration => "decoration",
        SpacePlanning => "space-planning",
    }
}

/// Engagement counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostStats {
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
}

/// SEO metadata plus an estimated reading time in minutes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostMetadata {
    #[serde(flatten)]
    #[validate(nested)]
    pub seo: SeoMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
}
