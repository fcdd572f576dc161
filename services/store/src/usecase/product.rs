use rust_decimal::Decimal;
use tracing::info;

use furniture_domain::catalog::{ProductStatus, Specifications};
use furniture_domain::media::ProductImage;
use furniture_domain::pagination::PageRequest;
use furniture_domain::seo::SeoMetadata;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{NewProduct, ProductDetail, ProductFilter};
use crate::error::StoreServiceError;

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<ProductDetail, StoreServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::ProductNotFound)
    }
}

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    pub async fn execute(
        &self,
        filter: ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductDetail>, StoreServiceError> {
        self.repo.list(&filter, page.map(PageRequest::clamped)).await
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<ProductImage>,
    pub category_id: Option<i32>,
    pub specifications: Option<Specifications>,
    pub stock: Option<i32>,
    pub featured: Option<bool>,
    pub status: Option<ProductStatus>,
    pub metadata: Option<SeoMetadata>,
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateProductInput,
    ) -> Result<ProductDetail, StoreServiceError> {
        if self.repo.exists_by_slug(&input.slug).await? {
            return Err(StoreServiceError::ProductSlugAlreadyExists);
        }
        let product = NewProduct {
            name: input.name,
            slug: input.slug,
            description: input.description,
            price: input.price,
            images: input.images,
            category_id: input.category_id,
            specifications: input.specifications,
            stock: input.stock.unwrap_or(0),
            featured: input.featured.unwrap_or(false),
            status: input.status.unwrap_or_default(),
            metadata: input.metadata,
        };
        let created = self.repo.create(&product).await?;
        info!(product_id = created.product.id, "product created");
        Ok(created)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<ProductImage>>,
    /// `Some(None)` removes the product from its category.
    pub category_id: Option<Option<i32>>,
    pub specifications: Option<Specifications>,
    pub stock: Option<i32>,
    pub featured: Option<bool>,
    pub status: Option<ProductStatus>,
    pub metadata: Option<SeoMetadata>,
}

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdateProductInput,
    ) -> Result<ProductDetail, StoreServiceError> {
        let ProductDetail { mut product, .. } = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::ProductNotFound)?;

        if let Some(slug) = input.slug {
            if slug != product.slug {
                if self.repo.exists_by_slug(&slug).await? {
                    return Err(StoreServiceError::ProductSlugAlreadyExists);
                }
                product.slug = slug;
            }
        }
        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(description) = input.description {
            product.description = description;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(images) = input.images {
            product.images = images;
        }
        if let Some(category_id) = input.category_id {
            product.category_id = category_id;
        }
        if input.specifications.is_some() {
            product.specifications = input.specifications;
        }
        if let Some(stock) = input.stock {
            product.stock = stock;
        }
        if let Some(featured) = input.featured {
            product.featured = featured;
        }
        if let Some(status) = input.status {
            product.status = status;
        }
        if input.metadata.is_some() {
            product.metadata = input.metadata;
        }

        let updated = self.repo.update(&product).await?;
        info!(product_id = id, "product updated");
        Ok(updated)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), StoreServiceError> {
        if !self.repo.delete(id).await? {
            return Err(StoreServiceError::ProductNotFound);
        }
        info!(product_id = id, "product deleted");
        Ok(())
    }
}
