//! sea-orm entities for the furniture store database.

pub mod categories;
pub mod order_items;
pub mod orders;
pub mod posts;
pub mod products;
pub mod users;
