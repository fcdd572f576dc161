//! Paging parameters for list endpoints.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 25;
pub const MAX_PER_PAGE: u32 = 100;

/// Page window shared by every list endpoint.
///
/// - `per_page`: 1–100, default 25
/// - `page`: 1-based, default 1
///
/// A list request with neither parameter is unpaged and returns every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_page() -> u32 {
    1
}

impl PageRequest {
    /// Build from optional query values, clamping out-of-range input instead
    /// of rejecting it. `None` when neither value is given.
    pub fn from_query(per_page: Option<i64>, page: Option<i64>) -> Option<Self> {
        if per_page.is_none() && page.is_none() {
            return None;
        }
        let per_page = per_page.map_or(DEFAULT_PER_PAGE, |n| {
            n.clamp(1, i64::from(MAX_PER_PAGE)) as u32
        });
        let page = page.map_or(1, |n| n.clamp(1, i64::from(u32::MAX)) as u32);
        Some(Self { per_page, page })
    }

    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            page: self.page.max(1),
        }
    }

    /// Rows to skip. Assumes a clamped request.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}
