//! Postal address sidecar used by users and order customers.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Postal address. Every line is optional on input and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Address {
    #[validate(length(max = 255))]
    pub street: String,
    #[validate(length(max = 100))]
    pub city: String,
    #[validate(length(max = 100))]
    pub province: String,
    #[validate(length(max = 20))]
    pub postal_code: String,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.province.is_empty()
            && self.postal_code.is_empty()
    }
}
