//! Test utilities for furniture store services.
//!
//! Provides the contract fixture loader and response body helpers.
//! Use from `[dev-dependencies]` only.

pub mod body;
pub mod fixture;
