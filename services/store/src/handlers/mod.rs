pub mod category;
pub mod order;
pub mod post;
pub mod product;
pub mod upload;
pub mod user;
pub mod validation;
