use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use furniture_core::extract::{IdPath, QueryParams, ValidatedJson};
use furniture_domain::media::ImageRef;
use furniture_domain::pagination::PageRequest;
use furniture_domain::seo::SeoMetadata;

use crate::domain::types::{
    Category, CategoryDetail, CategoryFilter, CategoryNode, CategorySummary,
};
use crate::error::StoreServiceError;
use crate::handlers::validation;
use crate::state::AppState;
use crate::usecase::category::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryTreeUseCase,
    GetCategoryUseCase, ListCategoriesUseCase, UpdateCategoryInput, UpdateCategoryUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = "validation::slug"))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[validate(nested)]
    pub image: Option<ImageRef>,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
    #[validate(range(min = 0))]
    pub level: Option<i32>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    #[validate(nested)]
    pub metadata: Option<SeoMetadata>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validation::slug"))]
    pub slug: Option<String>,
    pub description: Option<String>,
    #[validate(nested)]
    pub image: Option<ImageRef>,
    /// Absent leaves the parent alone; `null` detaches the category.
    #[serde(default, deserialize_with = "furniture_core::serde::deserialize_some")]
    pub parent_id: Option<Option<i32>>,
    #[validate(range(min = 0))]
    pub level: Option<i32>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    #[validate(nested)]
    pub metadata: Option<SeoMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummaryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<CategorySummary> for CategorySummaryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            slug: summary.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
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
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            image: category.image,
            parent_id: category.parent_id,
            level: category.level,
            order: category.order,
            is_active: category.is_active,
            metadata: category.metadata,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub parent: Option<CategorySummaryResponse>,
    pub children: Vec<CategorySummaryResponse>,
}

impl From<CategoryDetail> for CategoryDetailResponse {
    fn from(detail: CategoryDetail) -> Self {
        Self {
            category: detail.category.into(),
            parent: detail.parent.map(Into::into),
            children: detail.children.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryNodeResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub children: Vec<CategoryNodeResponse>,
}

impl From<CategoryNode> for CategoryNodeResponse {
    fn from(node: CategoryNode) -> Self {
        Self {
            category: node.category.into(),
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryListQuery {
    pub per_page: Option<i64>,
    pub page: Option<i64>,
    pub parent_id: Option<i32>,
    pub is_active: Option<bool>,
}

// ── GET /categories ──────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CategoryListQuery>,
) -> Result<Json<Vec<CategoryResponse>>, StoreServiceError> {
    let uc = ListCategoriesUseCase {
        repo: state.category_repo(),
    };
    let filter = CategoryFilter {
        parent_id: query.parent_id,
        is_active: query.is_active,
    };
    let categories = uc
        .execute(filter, PageRequest::from_query(query.per_page, query.page))
        .await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

// ── GET /categories/tree ─────────────────────────────────────────────────────

pub async fn get_category_tree(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryNodeResponse>>, StoreServiceError> {
    let uc = GetCategoryTreeUseCase {
        repo: state.category_repo(),
    };
    let forest = uc.execute().await?;
    Ok(Json(
        forest.into_iter().map(CategoryNodeResponse::from).collect(),
    ))
}

// ── GET /categories/{id} ─────────────────────────────────────────────────────

pub async fn get_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CategoryDetailResponse>, StoreServiceError> {
    let uc = GetCategoryUseCase {
        repo: state.category_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /categories ─────────────────────────────────────────────────────────

pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), StoreServiceError> {
    let uc = CreateCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = uc
        .execute(CreateCategoryInput {
            name: body.name,
            slug: body.slug,
            description: body.description,
            image: body.image,
            parent_id: body.parent_id,
            level: body.level,
            order: body.order,
            is_active: body.is_active,
            metadata: body.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

// ── PATCH /categories/{id} ───────────────────────────────────────────────────

pub async fn update_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, StoreServiceError> {
    let uc = UpdateCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = uc
        .execute(
            id,
            UpdateCategoryInput {
                name: body.name,
                slug: body.slug,
                description: body.description,
                image: body.image,
                parent_id: body.parent_id,
                level: body.level,
                order: body.order,
                is_active: body.is_active,
                metadata: body.metadata,
            },
        )
        .await?;
    Ok(Json(category.into()))
}

// ── DELETE /categories/{id} ──────────────────────────────────────────────────

pub async fn delete_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, StoreServiceError> {
    let uc = DeleteCategoryUseCase {
        repo: state.category_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
