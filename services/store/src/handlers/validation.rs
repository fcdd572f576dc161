//! `validator` custom rules shared by the request DTOs.

use rust_decimal::Decimal;
use validator::ValidationError;

use furniture_domain::slug::is_valid_slug;
use furniture_domain::user::is_valid_phone_number;

pub fn slug(value: &str) -> Result<(), ValidationError> {
    if is_valid_slug(value) {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}

pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone_number(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number"))
    }
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        Err(ValidationError::new("non_negative"))
    } else {
        Ok(())
    }
}
