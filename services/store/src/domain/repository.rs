#![allow(async_fn_in_trait)]

use bytes::Bytes;

use furniture_domain::pagination::PageRequest;

use crate::domain::types::{
    Category, CategoryFilter, NewCategory, NewOrder, NewOrderItem, NewPost, NewProduct, NewUser,
    Order, OrderFilter, Post, PostDetail, PostFilter, Product, ProductDetail, ProductFilter, User,
    UserFilter,
};
use crate::error::StoreServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreServiceError>;
    async fn list(
        &self,
        filter: &UserFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<User>, StoreServiceError>;
    async fn create(&self, user: &NewUser) -> Result<User, StoreServiceError>;
    /// Overwrite every mutable column of `user.id`.
    async fn update(&self, user: &User) -> Result<User, StoreServiceError>;
    /// Delete a user. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Repository for the category tree.
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, StoreServiceError>;
    /// Whether a category other than `exclude_id` holds `name` or `slug`.
    async fn exists_by_name_or_slug(
        &self,
        name: &str,
        slug: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, StoreServiceError>;
    async fn list(
        &self,
        filter: &CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>, StoreServiceError>;
    async fn list_all(&self) -> Result<Vec<Category>, StoreServiceError>;
    /// Direct children of `parent_id`, ordered by `order`.
    async fn list_children(&self, parent_id: i32) -> Result<Vec<Category>, StoreServiceError>;
    async fn create(&self, category: &NewCategory) -> Result<Category, StoreServiceError>;
    async fn update(&self, category: &Category) -> Result<Category, StoreServiceError>;
    /// Delete a category. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Repository for catalog products. Reads resolve the category summary.
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductDetail>, StoreServiceError>;
    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreServiceError>;
    async fn list(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductDetail>, StoreServiceError>;
    async fn create(&self, product: &NewProduct) -> Result<ProductDetail, StoreServiceError>;
    async fn update(&self, product: &Product) -> Result<ProductDetail, StoreServiceError>;
    /// Delete a product. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Repository for blog posts. Reads resolve the author summary.
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<PostDetail>, StoreServiceError>;
    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreServiceError>;
    async fn list(
        &self,
        filter: &PostFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<PostDetail>, StoreServiceError>;
    async fn create(&self, post: &NewPost) -> Result<PostDetail, StoreServiceError>;
    async fn update(&self, post: &Post) -> Result<PostDetail, StoreServiceError>;
    /// Delete a post. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Repository for orders and their line items.
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, StoreServiceError>;
    async fn list(
        &self,
        filter: &OrderFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Order>, StoreServiceError>;
    /// Insert the order and its items atomically.
    async fn create(&self, order: &NewOrder) -> Result<Order, StoreServiceError>;
    /// Overwrite the order row and, when `items` is given, replace its item
    /// set, atomically.
    async fn update(
        &self,
        order: &Order,
        items: Option<&[NewOrderItem]>,
    ) -> Result<Order, StoreServiceError>;
    /// Delete an order and its items. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Blob storage for uploaded product images.
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under a fresh name with `extension` and return the
    /// public path it is served from.
    async fn save(&self, extension: &str, bytes: Bytes) -> Result<String, StoreServiceError>;
}
