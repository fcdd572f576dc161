//! Domain types shared across the furniture store workspace.
//!
//! Pure value types: no web framework, no database. The JSON sidecar values
//! stored next to relational rows (images, addresses, SEO metadata, order
//! history) live here, as do the enums whose wire names double as column
//! values.

#[macro_use]
mod wire;

pub mod address;
pub mod blog;
pub mod catalog;
pub mod media;
pub mod order;
pub mod pagination;
pub mod seo;
pub mod slug;
pub mod user;

pub use wire::UnknownVariant;
