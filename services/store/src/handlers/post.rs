use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use furniture_core::extract::{IdPath, QueryParams, ValidatedJson};
use furniture_domain::blog::{PostCategory, PostMetadata, PostStats, PostStatus};
use furniture_domain::media::{ImageRef, PostImage};
use furniture_domain::pagination::PageRequest;

use crate::domain::types::{PostDetail, PostFilter, UserSummary};
use crate::error::StoreServiceError;
use crate::handlers::validation;
use crate::state::AppState;
use crate::usecase::post::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListPostsUseCase,
    UpdatePostInput, UpdatePostUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(custom(function = "validation::slug"))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub excerpt: String,
    #[validate(nested)]
    pub featured_image: Option<ImageRef>,
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<PostImage>,
    #[validate(range(min = 1))]
    pub author_id: Option<i32>,
    #[validate(length(min = 1))]
    pub categories: Vec<PostCategory>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub metadata: Option<PostMetadata>,
    pub stats: Option<PostStats>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(custom(function = "validation::slug"))]
    pub slug: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(nested)]
    pub featured_image: Option<ImageRef>,
    #[validate(nested)]
    pub images: Option<Vec<PostImage>>,
    #[validate(range(min = 1))]
    pub author_id: Option<i32>,
    #[validate(length(min = 1))]
    pub categories: Option<Vec<PostCategory>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub metadata: Option<PostMetadata>,
    pub stats: Option<PostStats>,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserSummary> for AuthorResponse {
    fn from(author: UserSummary) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<ImageRef>,
    pub images: Vec<PostImage>,
    pub author_id: Option<i32>,
    pub author: Option<AuthorResponse>,
    pub categories: Vec<PostCategory>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms_opt")]
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: Option<PostMetadata>,
    pub stats: PostStats,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<PostDetail> for PostResponse {
    fn from(PostDetail { post, author }: PostDetail) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            images: post.images,
            author_id: post.author_id,
            author: author.map(Into::into),
            categories: post.categories,
            tags: post.tags,
            status: post.status,
            published_at: post.published_at,
            metadata: post.metadata,
            stats: post.stats,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PostListQuery {
    pub per_page: Option<i64>,
    pub page: Option<i64>,
    pub status: Option<PostStatus>,
    pub category: Option<PostCategory>,
    pub tag: Option<String>,
    pub author_id: Option<i32>,
}

// ── GET /posts ───────────────────────────────────────────────────────────────

pub async fn list_posts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostListQuery>,
) -> Result<Json<Vec<PostResponse>>, StoreServiceError> {
    let uc = ListPostsUseCase {
        repo: state.post_repo(),
    };
    let filter = PostFilter {
        status: query.status,
        category: query.category,
        tag: query.tag,
        author_id: query.author_id,
    };
    let posts = uc
        .execute(filter, PageRequest::from_query(query.per_page, query.page))
        .await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

// ── GET /posts/{id} ──────────────────────────────────────────────────────────

pub async fn get_post(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<PostResponse>, StoreServiceError> {
    let uc = GetPostUseCase {
        repo: state.post_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /posts ──────────────────────────────────────────────────────────────

pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), StoreServiceError> {
    let uc = CreatePostUseCase {
        repo: state.post_repo(),
    };
    let post = uc
        .execute(CreatePostInput {
            title: body.title,
            slug: body.slug,
            content: body.content,
            excerpt: body.excerpt,
            featured_image: body.featured_image,
            images: body.images,
            author_id: body.author_id,
            categories: body.categories,
            tags: body.tags,
            status: body.status,
            published_at: body.published_at,
            metadata: body.metadata,
            stats: body.stats,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

// ── PATCH /posts/{id} ────────────────────────────────────────────────────────

pub async fn update_post(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, StoreServiceError> {
    let uc = UpdatePostUseCase {
        repo: state.post_repo(),
    };
    let post = uc
        .execute(
            id,
            UpdatePostInput {
                title: body.title,
                slug: body.slug,
                content: body.content,
                excerpt: body.excerpt,
                featured_image: body.featured_image,
                images: body.images,
                author_id: body.author_id,
                categories: body.categories,
                tags: body.tags,
                status: body.status,
                published_at: body.published_at,
                metadata: body.metadata,
                stats: body.stats,
            },
        )
        .await?;
    Ok(Json(post.into()))
}

// ── DELETE /posts/{id} ───────────────────────────────────────────────────────

pub async fn delete_post(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, StoreServiceError> {
    let uc = DeletePostUseCase {
        repo: state.post_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use furniture_testing::fixture::Fixture;

    use super::*;

    #[test]
    fn should_require_at_least_one_category() {
        let body: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "Caring for oak",
            "slug": "caring-for-oak",
            "content": "Oil it twice a year.",
            "categories": []
        }))
        .unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("categories"));
    }

    #[test]
    fn should_reject_unknown_category() {
        let result = serde_json::from_value::<CreatePostRequest>(serde_json::json!({
            "title": "Caring for oak",
            "slug": "caring-for-oak",
            "content": "Oil it twice a year.",
            "categories": ["gardening"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_long_excerpt() {
        let body = UpdatePostRequest {
            excerpt: Some("x".repeat(501)),
            ..Default::default()
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn should_accept_contract_post_fixture() {
        let body: CreatePostRequest =
            Fixture::load_as("contracts/http/posts/create_post.json");
        assert!(body.validate().is_ok());
    }
}
