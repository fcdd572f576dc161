use chrono::{DateTime, Utc};
use tracing::info;

use furniture_domain::blog::{PostCategory, PostMetadata, PostStats, PostStatus};
use furniture_domain::media::{ImageRef, PostImage};
use furniture_domain::pagination::PageRequest;

use crate::domain::repository::PostRepository;
use crate::domain::types::{NewPost, PostDetail, PostFilter};
use crate::error::StoreServiceError;

// ── GetPost ──────────────────────────────────────────────────────────────────

pub struct GetPostUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> GetPostUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<PostDetail, StoreServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::PostNotFound)
    }
}

// ── ListPosts ────────────────────────────────────────────────────────────────

pub struct ListPostsUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> ListPostsUseCase<R> {
    pub async fn execute(
        &self,
        filter: PostFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<PostDetail>, StoreServiceError> {
        self.repo.list(&filter, page.map(PageRequest::clamped)).await
    }
}

// ── CreatePost ───────────────────────────────────────────────────────────────

pub struct CreatePostInput {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<ImageRef>,
    pub images: Vec<PostImage>,
    pub author_id: Option<i32>,
    pub categories: Vec<PostCategory>,
    pub tags: Vec<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: Option<PostMetadata>,
    pub stats: Option<PostStats>,
}

pub struct CreatePostUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> CreatePostUseCase<R> {
    pub async fn execute(&self, input: CreatePostInput) -> Result<PostDetail, StoreServiceError> {
        if self.repo.exists_by_slug(&input.slug).await? {
            return Err(StoreServiceError::PostSlugAlreadyExists);
        }
        let post = NewPost {
            title: input.title,
            slug: input.slug,
            content: input.content,
            excerpt: input.excerpt,
            featured_image: input.featured_image,
            images: input.images,
            author_id: input.author_id,
            categories: input.categories,
            tags: input.tags,
            status: input.status.unwrap_or_default(),
            published_at: input.published_at,
            metadata: input.metadata,
            stats: input.stats.unwrap_or_default(),
        };
        let created = self.repo.create(&post).await?;
        info!(post_id = created.post.id, "post created");
        Ok(created)
    }
}

// ── UpdatePost ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<ImageRef>,
    pub images: Option<Vec<PostImage>>,
    pub author_id: Option<i32>,
    pub categories: Option<Vec<PostCategory>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub metadata: Option<PostMetadata>,
    pub stats: Option<PostStats>,
}

pub struct UpdatePostUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> UpdatePostUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdatePostInput,
    ) -> Result<PostDetail, StoreServiceError> {
        let PostDetail { mut post, .. } = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::PostNotFound)?;

        if let Some(slug) = input.slug {
            if slug != post.slug {
                if self.repo.exists_by_slug(&slug).await? {
                    return Err(StoreServiceError::PostSlugAlreadyExists);
                }
                post.slug = slug;
            }
        }
        if let Some(title) = input.title {
            post.title = title;
        }
        if let Some(content) = input.content {
            post.content = content;
        }
        if let Some(excerpt) = input.excerpt {
            post.excerpt = excerpt;
        }
        if input.featured_image.is_some() {
            post.featured_image = input.featured_image;
        }
        if let Some(images) = input.images {
            post.images = images;
        }
        if input.author_id.is_some() {
            post.author_id = input.author_id;
        }
        if let Some(categories) = input.categories {
            post.categories = categories;
        }
        if let Some(tags) = input.tags {
            post.tags = tags;
        }
        if let Some(status) = input.status {
            post.status = status;
        }
        if input.published_at.is_some() {
            post.published_at = input.published_at;
        }
        if input.metadata.is_some() {
            post.metadata = input.metadata;
        }
        if let Some(stats) = input.stats {
            post.stats = stats;
        }

        let updated = self.repo.update(&post).await?;
        info!(post_id = id, "post updated");
        Ok(updated)
    }
}

// ── DeletePost ───────────────────────────────────────────────────────────────

pub struct DeletePostUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> DeletePostUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), StoreServiceError> {
        if !self.repo.delete(id).await? {
            return Err(StoreServiceError::PostNotFound);
        }
        info!(post_id = id, "post deleted");
        Ok(())
    }
}
