use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use furniture_core::extract::{IdPath, QueryParams, ValidatedJson};
use furniture_domain::catalog::{ProductStatus, Specifications};
use furniture_domain::media::ProductImage;
use furniture_domain::pagination::PageRequest;
use furniture_domain::seo::SeoMetadata;

use crate::domain::types::{ProductDetail, ProductFilter};
use crate::error::StoreServiceError;
use crate::handlers::category::CategorySummaryResponse;
use crate::handlers::validation;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, UpdateProductInput, UpdateProductUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom(function = "validation::slug"))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validation::non_negative"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<ProductImage>,
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[validate(nested)]
    pub specifications: Option<Specifications>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub featured: Option<bool>,
    pub status: Option<ProductStatus>,
    #[validate(nested)]
    pub metadata: Option<SeoMetadata>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(custom(function = "validation::slug"))]
    pub slug: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validation::non_negative"))]
    pub price: Option<Decimal>,
    #[validate(nested)]
    pub images: Option<Vec<ProductImage>>,
    /// Absent leaves the category alone; `null` uncategorizes the product.
    #[serde(default, deserialize_with = "furniture_core::serde::deserialize_some")]
    pub category_id: Option<Option<i32>>,
    #[validate(nested)]
    pub specifications: Option<Specifications>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub featured: Option<bool>,
    pub status: Option<ProductStatus>,
    #[validate(nested)]
    pub metadata: Option<SeoMetadata>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<ProductImage>,
    pub category_id: Option<i32>,
    pub category: Option<CategorySummaryResponse>,
    pub specifications: Option<Specifications>,
    pub stock: i32,
    pub featured: bool,
    pub status: ProductStatus,
    pub metadata: Option<SeoMetadata>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ProductDetail> for ProductResponse {
    fn from(ProductDetail { product, category }: ProductDetail) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            images: product.images,
            category_id: product.category_id,
            category: category.map(Into::into),
            specifications: product.specifications,
            stock: product.stock,
            featured: product.featured,
            status: product.status,
            metadata: product.metadata,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProductListQuery {
    pub per_page: Option<i64>,
    pub page: Option<i64>,
    pub category_id: Option<i32>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub material: Option<String>,
    pub q: Option<String>,
}

// ── GET /products ────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProductListQuery>,
) -> Result<Json<Vec<ProductResponse>>, StoreServiceError> {
    let uc = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let filter = ProductFilter {
        category_id: query.category_id,
        status: query.status,
        featured: query.featured,
        min_price: query.min_price,
        max_price: query.max_price,
        material: query.material,
        q: query.q,
    };
    let products = uc
        .execute(filter, PageRequest::from_query(query.per_page, query.page))
        .await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ProductResponse>, StoreServiceError> {
    let uc = GetProductUseCase {
        repo: state.product_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /products ───────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), StoreServiceError> {
    let uc = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = uc
        .execute(CreateProductInput {
            name: body.name,
            slug: body.slug,
            description: body.description,
            price: body.price,
            images: body.images,
            category_id: body.category_id,
            specifications: body.specifications,
            stock: body.stock,
            featured: body.featured,
            status: body.status,
            metadata: body.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── PATCH /products/{id} ─────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, StoreServiceError> {
    let uc = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = uc
        .execute(
            id,
            UpdateProductInput {
                name: body.name,
                slug: body.slug,
                description: body.description,
                price: body.price,
                images: body.images,
                category_id: body.category_id,
                specifications: body.specifications,
                stock: body.stock,
                featured: body.featured,
                status: body.status,
                metadata: body.metadata,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, StoreServiceError> {
    let uc = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
