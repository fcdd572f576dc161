pub mod category;
pub mod order;
pub mod password;
pub mod post;
pub mod product;
pub mod upload;
pub mod user;
