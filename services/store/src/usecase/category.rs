use tracing::info;

use furniture_domain::media::ImageRef;
use furniture_domain::pagination::PageRequest;
use furniture_domain::seo::SeoMetadata;

use crate::domain::repository::CategoryRepository;
use crate::domain::tree::build_tree;
use crate::domain::types::{Category, CategoryDetail, CategoryFilter, CategoryNode, NewCategory};
use crate::error::StoreServiceError;

// ── GetCategory ──────────────────────────────────────────────────────────────

pub struct GetCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> GetCategoryUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<CategoryDetail, StoreServiceError> {
        let category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::CategoryNotFound)?;
        let parent = match category.parent_id {
            Some(parent_id) => self.repo.find_by_id(parent_id).await?.map(|p| p.summary()),
            None => None,
        };
        let children = self
            .repo
            .list_children(id)
            .await?
            .iter()
            .map(Category::summary)
            .collect();
        Ok(CategoryDetail {
            category,
            parent,
            children,
        })
    }
}

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(
        &self,
        filter: CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>, StoreServiceError> {
        self.repo.list(&filter, page.map(PageRequest::clamped)).await
    }
}

// ── GetCategoryTree ──────────────────────────────────────────────────────────

pub struct GetCategoryTreeUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> GetCategoryTreeUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<CategoryNode>, StoreServiceError> {
        Ok(build_tree(self.repo.list_all().await?))
    }
}

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CreateCategoryInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub parent_id: Option<i32>,
    pub level: Option<i32>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub metadata: Option<SeoMetadata>,
}

pub struct CreateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> CreateCategoryUseCase<R> {
    pub async fn execute(&self, input: CreateCategoryInput) -> Result<Category, StoreServiceError> {
        if self
            .repo
            .exists_by_name_or_slug(&input.name, &input.slug, None)
            .await?
        {
            return Err(StoreServiceError::CategoryAlreadyExists);
        }
        let level = match input.parent_id {
            Some(parent_id) => {
                let parent = self
                    .repo
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(StoreServiceError::InvalidReference)?;
                input.level.unwrap_or(parent.level + 1)
            }
            None => input.level.unwrap_or(0),
        };
        let category = NewCategory {
            name: input.name,
            slug: input.slug,
            description: input.description,
            image: input.image,
            parent_id: input.parent_id,
            level,
            order: input.order.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
            metadata: input.metadata,
        };
        let created = self.repo.create(&category).await?;
        info!(category_id = created.id, "category created");
        Ok(created)
    }
}

// ── UpdateCategory ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
    /// `Some(None)` detaches the category from its parent.
    pub parent_id: Option<Option<i32>>,
    pub level: Option<i32>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub metadata: Option<SeoMetadata>,
}

pub struct UpdateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> UpdateCategoryUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdateCategoryInput,
    ) -> Result<Category, StoreServiceError> {
        if input.parent_id == Some(Some(id)) {
            return Err(StoreServiceError::InvalidParent);
        }
        let mut category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::CategoryNotFound)?;

        let name = input.name.unwrap_or_else(|| category.name.clone());
        let slug = input.slug.unwrap_or_else(|| category.slug.clone());
        if (name != category.name || slug != category.slug)
            && self
                .repo
                .exists_by_name_or_slug(&name, &slug, Some(id))
                .await?
        {
            return Err(StoreServiceError::CategoryAlreadyExists);
        }
        category.name = name;
        category.slug = slug;

        match input.parent_id {
            Some(Some(parent_id)) => {
                let parent = self
                    .repo
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(StoreServiceError::InvalidReference)?;
                if category.parent_id != Some(parent_id) && input.level.is_none() {
                    category.level = parent.level + 1;
                }
                category.parent_id = Some(parent_id);
            }
            Some(None) => category.parent_id = None,
            None => {}
        }
        if let Some(level) = input.level {
            category.level = level;
        }
        if let Some(description) = input.description {
            category.description = description;
        }
        if input.image.is_some() {
            category.image = input.image;
        }
        if let Some(order) = input.order {
            category.order = order;
        }
        if let Some(is_active) = input.is_active {
            category.is_active = is_active;
        }
        if input.metadata.is_some() {
            category.metadata = input.metadata;
        }

        let updated = self.repo.update(&category).await?;
        info!(category_id = id, "category updated");
        Ok(updated)
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> DeleteCategoryUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), StoreServiceError> {
        if !self.repo.delete(id).await? {
            return Err(StoreServiceError::CategoryNotFound);
        }
        info!(category_id = id, "category deleted");
        Ok(())
    }
}
