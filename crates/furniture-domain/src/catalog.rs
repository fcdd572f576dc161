//! Product catalog domain types.

use serde::{Deserialize, Serialize};
use validator::Validate;

wire_enum! {
    /// Product lifecycle status. Stored as its wire name in `products.status`.
    #[derive(Default)]
    pub enum ProductStatus("product status") {
        #[default]
        Draft => "draft",
        Published => "published",
        OutOfStock => "out_of_stock",
    }
}

/// Physical dimensions in centimetres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Dimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub height: Option<f64>,
}

/// Free-form product specifications shown on the product page and used by
/// the storefront material filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Specifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
}
