use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use furniture_domain::address::Address;
use furniture_domain::blog::{PostCategory, PostMetadata, PostStats, PostStatus};
use furniture_domain::catalog::{ProductStatus, Specifications};
use furniture_domain::media::{ImageRef, PostImage, ProductImage};
use furniture_domain::order::{
    ConsultationDetails, Customer, OrderStatus, OrderType, PaymentMethod, PaymentStatus,
    StatusHistoryEntry,
};
use furniture_domain::seo::SeoMetadata;
use furniture_domain::user::UserRole;

// ── User ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// argon2id PHC string. Never leaves the service.
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub avatar: Option<ImageRef>,
    pub address: Option<Address>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub avatar: Option<ImageRef>,
    pub address: Option<Address>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Case-insensitive substring of email, first or last name.
    pub q: Option<String>,
}

// ── Category ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub parent_id: Option<i32>,
    pub level: i32,
    pub order: i32,
    pub is_active: bool,
    pub metadata: Option<SeoMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub parent_id: Option<i32>,
    pub level: i32,
    pub order: i32,
    pub is_active: bool,
    pub metadata: Option<SeoMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// A category with its immediate neighbours in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    pub category: Category,
    pub parent: Option<CategorySummary>,
    pub children: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub parent_id: Option<i32>,
    pub is_active: Option<bool>,
}

// ── Product ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<ProductImage>,
    pub category_id: Option<i32>,
    pub specifications: Option<Specifications>,
    pub stock: i32,
    pub featured: bool,
    pub status: ProductStatus,
    pub metadata: Option<SeoMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<ProductImage>,
    pub category_id: Option<i32>,
    pub specifications: Option<Specifications>,
    pub stock: i32,
    pub featured: bool,
    pub status: ProductStatus,
    pub metadata: Option<SeoMetadata>,
}

/// A product with its category summary resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<i32>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive match on `specifications.material`.
    pub material: Option<String>,
    /// Case-insensitive substring of the name.
    pub q: Option<String>,
}

// ── Post ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<ImageRef>,
    pub images: Vec<PostImage>,
    pub author_id: Option<i32>,
    pub categories: Vec<PostCategory>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: Option<PostMetadata>,
    pub stats: PostStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<ImageRef>,
    pub images: Vec<PostImage>,
    pub author_id: Option<i32>,
    pub categories: Vec<PostCategory>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: Option<PostMetadata>,
    pub stats: PostStats,
}

/// Name card of a user embedded in other records (post author, assigned staff).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// A post with its author summary resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    pub post: Post,
    pub author: Option<UserSummary>,
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category: Option<PostCategory>,
    pub tag: Option<String>,
    pub author_id: Option<i32>,
}

// ── Order ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub order_type: OrderType,
    pub customer: Customer,
    pub consultation_details: Option<ConsultationDetails>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    pub assigned_staff_id: Option<i32>,
    pub assigned_staff: Option<UserSummary>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub product_id: i32,
    pub product: Option<ProductSummary>,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

impl NewOrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_type: OrderType,
    pub customer: Customer,
    pub consultation_details: Option<ConsultationDetails>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    pub assigned_staff_id: Option<i32>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub items: Vec<NewOrderItem>,
}

/// Sum of `quantity * price` over the items.
pub fn items_total(items: &[NewOrderItem]) -> Decimal {
    items.iter().map(NewOrderItem::line_total).sum()
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub order_type: Option<OrderType>,
    pub assigned_staff_id: Option<i32>,
}

// ── Upload ───────────────────────────────────────────────────────────────────

/// One file part received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: bytes::Bytes,
}
