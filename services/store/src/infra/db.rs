use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::{PgBinOper, PgExpr};
use sea_orm::sea_query::{Condition, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, SelectTwo, SqlErr,
    TransactionTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use furniture_core::sea_ext::SelectExt;
use furniture_domain::UnknownVariant;
use furniture_domain::pagination::PageRequest;
use furniture_store_schema::{categories, order_items, orders, posts, products, users};

use crate::domain::repository::{
    CategoryRepository, OrderRepository, PostRepository, ProductRepository, UserRepository,
};
use crate::domain::types::{
    Category, CategoryFilter, CategorySummary, NewCategory, NewOrder, NewOrderItem, NewPost,
    NewProduct, NewUser, Order, OrderFilter, OrderItem, Post, PostDetail, PostFilter, Product,
    ProductDetail, ProductFilter, ProductSummary, User, UserFilter, UserSummary,
};
use crate::error::StoreServiceError;

// ── Column codecs ────────────────────────────────────────────────────────────

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, StoreServiceError> {
    Ok(serde_json::to_value(value).context("encode json column")?)
}

fn from_json<T: DeserializeOwned>(
    value: serde_json::Value,
    column: &'static str,
) -> Result<T, StoreServiceError> {
    Ok(serde_json::from_value(value).with_context(|| format!("decode {column}"))?)
}

fn from_json_opt<T: DeserializeOwned>(
    value: Option<serde_json::Value>,
    column: &'static str,
) -> Result<Option<T>, StoreServiceError> {
    value.map(|v| from_json(v, column)).transpose()
}

fn parse_wire<T>(raw: &str, column: &'static str) -> Result<T, StoreServiceError>
where
    T: FromStr<Err = UnknownVariant>,
{
    Ok(raw.parse().with_context(|| format!("decode {column}"))?)
}

/// Map a failed write onto the domain: unique violations become `conflict`
/// (when the table has one), foreign-key violations become
/// `InvalidReference`.
fn write_error(
    err: DbErr,
    conflict: Option<StoreServiceError>,
    context: &'static str,
) -> StoreServiceError {
    match (err.sql_err(), conflict) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(conflict)) => conflict,
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), _) => StoreServiceError::InvalidReference,
        _ => anyhow::Error::new(err).context(context).into(),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<User>, StoreServiceError> {
        let models = user_list_query(filter, page)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &NewUser) -> Result<User, StoreServiceError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            phone_number: Set(user.phone_number.clone()),
            avatar: Set(user.avatar.as_ref().map(to_json).transpose()?),
            address: Set(user.address.as_ref().map(to_json).transpose()?),
            is_active: Set(user.is_active),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, Some(StoreServiceError::EmailAlreadyExists), "create user"))?;
        user_from_model(model)
    }

    async fn update(&self, user: &User) -> Result<User, StoreServiceError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            phone_number: Set(user.phone_number.clone()),
            avatar: Set(user.avatar.as_ref().map(to_json).transpose()?),
            address: Set(user.address.as_ref().map(to_json).transpose()?),
            is_active: Set(user.is_active),
            last_login: Set(user.last_login),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreServiceError::UserNotFound,
            e => write_error(e, Some(StoreServiceError::EmailAlreadyExists), "update user"),
        })?;
        user_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_list_query(filter: &UserFilter, page: Option<PageRequest>) -> Select<users::Entity> {
    let mut query = users::Entity::find();
    if let Some(role) = filter.role {
        query = query.filter(users::Column::Role.eq(role.as_str()));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(users::Column::IsActive.eq(is_active));
    }
    if let Some(q) = &filter.q {
        query = query.search_any(
            &[
                users::Column::Email,
                users::Column::FirstName,
                users::Column::LastName,
            ],
            q,
        );
    }
    query.order_by_asc(users::Column::Id).paginate_by(page)
}

fn user_from_model(model: users::Model) -> Result<User, StoreServiceError> {
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role: parse_wire(&model.role, "users.role")?,
        first_name: model.first_name,
        last_name: model.last_name,
        phone_number: model.phone_number,
        avatar: from_json_opt(model.avatar, "users.avatar")?,
        address: from_json_opt(model.address, "users.address")?,
        is_active: model.is_active,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, StoreServiceError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        model.map(category_from_model).transpose()
    }

    async fn exists_by_name_or_slug(
        &self,
        name: &str,
        slug: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, StoreServiceError> {
        let mut query = categories::Entity::find().filter(
            Condition::any()
                .add(categories::Column::Name.eq(name))
                .add(categories::Column::Slug.eq(slug)),
        );
        if let Some(id) = exclude_id {
            query = query.filter(categories::Column::Id.ne(id));
        }
        let count = query
            .count(&self.db)
            .await
            .context("count categories by name or slug")?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>, StoreServiceError> {
        let models = category_list_query(filter, page)
            .all(&self.db)
            .await
            .context("list categories")?;
        models.into_iter().map(category_from_model).collect()
    }

    async fn list_all(&self) -> Result<Vec<Category>, StoreServiceError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
            .context("list all categories")?;
        models.into_iter().map(category_from_model).collect()
    }

    async fn list_children(&self, parent_id: i32) -> Result<Vec<Category>, StoreServiceError> {
        let models = categories::Entity::find()
            .filter(categories::Column::ParentId.eq(parent_id))
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
            .context("list category children")?;
        models.into_iter().map(category_from_model).collect()
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, StoreServiceError> {
        let now = Utc::now();
        let model = categories::ActiveModel {
            name: Set(category.name.clone()),
            slug: Set(category.slug.clone()),
            description: Set(category.description.clone()),
            image: Set(category.image.as_ref().map(to_json).transpose()?),
            parent_id: Set(category.parent_id),
            level: Set(category.level),
            sort_order: Set(category.order),
            is_active: Set(category.is_active),
            metadata: Set(category.metadata.as_ref().map(to_json).transpose()?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            write_error(
                e,
                Some(StoreServiceError::CategoryAlreadyExists),
                "create category",
            )
        })?;
        category_from_model(model)
    }

    async fn update(&self, category: &Category) -> Result<Category, StoreServiceError> {
        let model = categories::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            slug: Set(category.slug.clone()),
            description: Set(category.description.clone()),
            image: Set(category.image.as_ref().map(to_json).transpose()?),
            parent_id: Set(category.parent_id),
            level: Set(category.level),
            sort_order: Set(category.order),
            is_active: Set(category.is_active),
            metadata: Set(category.metadata.as_ref().map(to_json).transpose()?),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreServiceError::CategoryNotFound,
            e => write_error(
                e,
                Some(StoreServiceError::CategoryAlreadyExists),
                "update category",
            ),
        })?;
        category_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete category")?;
        Ok(result.rows_affected > 0)
    }
}

fn category_list_query(
    filter: &CategoryFilter,
    page: Option<PageRequest>,
) -> Select<categories::Entity> {
    let mut query = categories::Entity::find();
    if let Some(parent_id) = filter.parent_id {
        query = query.filter(categories::Column::ParentId.eq(parent_id));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(categories::Column::IsActive.eq(is_active));
    }
    query
        .order_by_asc(categories::Column::SortOrder)
        .order_by_asc(categories::Column::Id)
        .paginate_by(page)
}

fn category_from_model(model: categories::Model) -> Result<Category, StoreServiceError> {
    Ok(Category {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        image: from_json_opt(model.image, "categories.image")?,
        parent_id: model.parent_id,
        level: model.level,
        order: model.sort_order,
        is_active: model.is_active,
        metadata: from_json_opt(model.metadata, "categories.metadata")?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn category_summary(model: categories::Model) -> CategorySummary {
    CategorySummary {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl DbProductRepository {
    async fn with_category(
        &self,
        model: products::Model,
    ) -> Result<ProductDetail, StoreServiceError> {
        let category = match model.category_id {
            Some(id) => categories::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .context("find product category")?
                .map(category_summary),
            None => None,
        };
        Ok(ProductDetail {
            product: product_from_model(model)?,
            category,
        })
    }
}

impl ProductRepository for DbProductRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductDetail>, StoreServiceError> {
        let row = products::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .context("find product by id")?;
        row.map(product_detail_from_row).transpose()
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreServiceError> {
        let count = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .context("count products by slug")?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductDetail>, StoreServiceError> {
        let rows = product_list_query(filter, page)
            .all(&self.db)
            .await
            .context("list products")?;
        rows.into_iter().map(product_detail_from_row).collect()
    }

    async fn create(&self, product: &NewProduct) -> Result<ProductDetail, StoreServiceError> {
        let now = Utc::now();
        let model = products::ActiveModel {
            name: Set(product.name.clone()),
            slug: Set(product.slug.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            images: Set(to_json(&product.images)?),
            category_id: Set(product.category_id),
            specifications: Set(product.specifications.as_ref().map(to_json).transpose()?),
            stock: Set(product.stock),
            featured: Set(product.featured),
            status: Set(product.status.as_str().to_owned()),
            metadata: Set(product.metadata.as_ref().map(to_json).transpose()?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            write_error(
                e,
                Some(StoreServiceError::ProductSlugAlreadyExists),
                "create product",
            )
        })?;
        self.with_category(model).await
    }

    async fn update(&self, product: &Product) -> Result<ProductDetail, StoreServiceError> {
        let model = products::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            slug: Set(product.slug.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            images: Set(to_json(&product.images)?),
            category_id: Set(product.category_id),
            specifications: Set(product.specifications.as_ref().map(to_json).transpose()?),
            stock: Set(product.stock),
            featured: Set(product.featured),
            status: Set(product.status.as_str().to_owned()),
            metadata: Set(product.metadata.as_ref().map(to_json).transpose()?),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreServiceError::ProductNotFound,
            e => write_error(
                e,
                Some(StoreServiceError::ProductSlugAlreadyExists),
                "update product",
            ),
        })?;
        self.with_category(model).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreServiceError::ProductInUse,
                _ => anyhow::Error::new(e).context("delete product").into(),
            })?;
        Ok(result.rows_affected > 0)
    }
}

fn product_list_query(
    filter: &ProductFilter,
    page: Option<PageRequest>,
) -> SelectTwo<products::Entity, categories::Entity> {
    let mut query = products::Entity::find();
    if let Some(category_id) = filter.category_id {
        query = query.filter(products::Column::CategoryId.eq(category_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(products::Column::Status.eq(status.as_str()));
    }
    if let Some(featured) = filter.featured {
        query = query.filter(products::Column::Featured.eq(featured));
    }
    if let Some(min_price) = filter.min_price {
        query = query.filter(products::Column::Price.gte(min_price));
    }
    if let Some(max_price) = filter.max_price {
        query = query.filter(products::Column::Price.lte(max_price));
    }
    if let Some(material) = &filter.material {
        let stored = Expr::col((products::Entity, products::Column::Specifications))
            .cast_json_field("material");
        query = query.filter(
            Expr::expr(Func::lower(stored)).eq(Func::lower(Expr::val(material.clone()))),
        );
    }
    if let Some(q) = &filter.q {
        query = query.search_any(&[products::Column::Name], q);
    }
    query
        .order_by_desc(products::Column::CreatedAt)
        .order_by_desc(products::Column::Id)
        .paginate_by(page)
        .find_also_related(categories::Entity)
}

fn product_from_model(model: products::Model) -> Result<Product, StoreServiceError> {
    Ok(Product {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        price: model.price,
        images: from_json(model.images, "products.images")?,
        category_id: model.category_id,
        specifications: from_json_opt(model.specifications, "products.specifications")?,
        stock: model.stock,
        featured: model.featured,
        status: parse_wire(&model.status, "products.status")?,
        metadata: from_json_opt(model.metadata, "products.metadata")?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn product_detail_from_row(
    (model, category): (products::Model, Option<categories::Model>),
) -> Result<ProductDetail, StoreServiceError> {
    Ok(ProductDetail {
        product: product_from_model(model)?,
        category: category.map(category_summary),
    })
}

// ── Post repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPostRepository {
    pub db: DatabaseConnection,
}

impl DbPostRepository {
    async fn with_author(&self, model: posts::Model) -> Result<PostDetail, StoreServiceError> {
        let author = match model.author_id {
            Some(id) => users::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .context("find post author")?
                .map(user_summary),
            None => None,
        };
        Ok(PostDetail {
            post: post_from_model(model)?,
            author,
        })
    }
}

impl PostRepository for DbPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<PostDetail>, StoreServiceError> {
        let row = posts::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find post by id")?;
        row.map(post_detail_from_row).transpose()
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreServiceError> {
        let count = posts::Entity::find()
            .filter(posts::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .context("count posts by slug")?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<PostDetail>, StoreServiceError> {
        let rows = post_list_query(filter, page)
            .all(&self.db)
            .await
            .context("list posts")?;
        rows.into_iter().map(post_detail_from_row).collect()
    }

    async fn create(&self, post: &NewPost) -> Result<PostDetail, StoreServiceError> {
        let now = Utc::now();
        let model = posts::ActiveModel {
            title: Set(post.title.clone()),
            slug: Set(post.slug.clone()),
            content: Set(post.content.clone()),
            excerpt: Set(post.excerpt.clone()),
            featured_image: Set(post.featured_image.as_ref().map(to_json).transpose()?),
            images: Set(to_json(&post.images)?),
            author_id: Set(post.author_id),
            categories: Set(to_json(&post.categories)?),
            tags: Set(to_json(&post.tags)?),
            status: Set(post.status.as_str().to_owned()),
            published_at: Set(post.published_at),
            metadata: Set(post.metadata.as_ref().map(to_json).transpose()?),
            stats: Set(to_json(&post.stats)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            write_error(
                e,
                Some(StoreServiceError::PostSlugAlreadyExists),
                "create post",
            )
        })?;
        self.with_author(model).await
    }

    async fn update(&self, post: &Post) -> Result<PostDetail, StoreServiceError> {
        let model = posts::ActiveModel {
            id: Set(post.id),
            title: Set(post.title.clone()),
            slug: Set(post.slug.clone()),
            content: Set(post.content.clone()),
            excerpt: Set(post.excerpt.clone()),
            featured_image: Set(post.featured_image.as_ref().map(to_json).transpose()?),
            images: Set(to_json(&post.images)?),
            author_id: Set(post.author_id),
            categories: Set(to_json(&post.categories)?),
            tags: Set(to_json(&post.tags)?),
            status: Set(post.status.as_str().to_owned()),
            published_at: Set(post.published_at),
            metadata: Set(post.metadata.as_ref().map(to_json).transpose()?),
            stats: Set(to_json(&post.stats)?),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreServiceError::PostNotFound,
            e => write_error(
                e,
                Some(StoreServiceError::PostSlugAlreadyExists),
                "update post",
            ),
        })?;
        self.with_author(model).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let result = posts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete post")?;
        Ok(result.rows_affected > 0)
    }
}

fn post_list_query(
    filter: &PostFilter,
    page: Option<PageRequest>,
) -> SelectTwo<posts::Entity, users::Entity> {
    let mut query = posts::Entity::find();
    if let Some(status) = filter.status {
        query = query.filter(posts::Column::Status.eq(status.as_str()));
    }
    if let Some(category) = filter.category {
        query = query.filter(jsonb_contains(
            posts::Column::Categories,
            serde_json::json!([category.as_str()]),
        ));
    }
    if let Some(tag) = &filter.tag {
        query = query.filter(jsonb_contains(posts::Column::Tags, serde_json::json!([tag])));
    }
    if let Some(author_id) = filter.author_id {
        query = query.filter(posts::Column::AuthorId.eq(author_id));
    }
    query
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_desc(posts::Column::Id)
        .paginate_by(page)
        .find_also_related(users::Entity)
}

/// `posts.<column> @> <needle>` on a jsonb array column.
fn jsonb_contains(column: posts::Column, needle: serde_json::Value) -> SimpleExpr {
    Expr::col((posts::Entity, column)).binary(PgBinOper::Contains, Expr::val(needle))
}

fn post_from_model(model: posts::Model) -> Result<Post, StoreServiceError> {
    Ok(Post {
        id: model.id,
        title: model.title,
        slug: model.slug,
        content: model.content,
        excerpt: model.excerpt,
        featured_image: from_json_opt(model.featured_image, "posts.featured_image")?,
        images: from_json(model.images, "posts.images")?,
        author_id: model.author_id,
        categories: from_json(model.categories, "posts.categories")?,
        tags: from_json(model.tags, "posts.tags")?,
        status: parse_wire(&model.status, "posts.status")?,
        published_at: model.published_at,
        metadata: from_json_opt(model.metadata, "posts.metadata")?,
        stats: from_json(model.stats, "posts.stats")?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn user_summary(model: users::Model) -> UserSummary {
    UserSummary {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
    }
}

fn post_detail_from_row(
    (model, author): (posts::Model, Option<users::Model>),
) -> Result<PostDetail, StoreServiceError> {
    Ok(PostDetail {
        post: post_from_model(model)?,
        author: author.map(user_summary),
    })
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, StoreServiceError> {
        let models = orders::Entity::find_by_id(id)
            .all(&self.db)
            .await
            .context("find order by id")?;
        Ok(self.embed(models).await?.pop())
    }

    async fn list(
        &self,
        filter: &OrderFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        let models = order_list_query(filter, page)
            .all(&self.db)
            .await
            .context("list orders")?;
        self.embed(models).await
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, StoreServiceError> {
        let txn = self
            .db
            .begin()
            .await
            .context("begin create order transaction")?;
        let now = Utc::now();
        let model = orders::ActiveModel {
            order_type: Set(order.order_type.as_str().to_owned()),
            customer: Set(to_json(&order.customer)?),
            consultation_details: Set(order
                .consultation_details
                .as_ref()
                .map(to_json)
                .transpose()?),
            total_amount: Set(order.total_amount),
            status: Set(order.status.as_str().to_owned()),
            payment_status: Set(order.payment_status.as_str().to_owned()),
            payment_method: Set(order.payment_method.as_str().to_owned()),
            notes: Set(order.notes.clone()),
            staff_notes: Set(order.staff_notes.clone()),
            assigned_staff_id: Set(order.assigned_staff_id),
            status_history: Set(to_json(&order.status_history)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| write_error(e, None, "create order"))?;
        insert_items(&txn, model.id, &order.items).await?;
        txn.commit()
            .await
            .context("commit create order transaction")?;
        self.find_by_id(model.id)
            .await?
            .ok_or(StoreServiceError::OrderNotFound)
    }

    async fn update(
        &self,
        order: &Order,
        items: Option<&[NewOrderItem]>,
    ) -> Result<Order, StoreServiceError> {
        let txn = self
            .db
            .begin()
            .await
            .context("begin update order transaction")?;
        let model = orders::ActiveModel {
            id: Set(order.id),
            order_type: Set(order.order_type.as_str().to_owned()),
            customer: Set(to_json(&order.customer)?),
            consultation_details: Set(order
                .consultation_details
                .as_ref()
                .map(to_json)
                .transpose()?),
            total_amount: Set(order.total_amount),
            status: Set(order.status.as_str().to_owned()),
            payment_status: Set(order.payment_status.as_str().to_owned()),
            payment_method: Set(order.payment_method.as_str().to_owned()),
            notes: Set(order.notes.clone()),
            staff_notes: Set(order.staff_notes.clone()),
            assigned_staff_id: Set(order.assigned_staff_id),
            status_history: Set(to_json(&order.status_history)?),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreServiceError::OrderNotFound,
            e => write_error(e, None, "update order"),
        })?;
        if let Some(replacement) = items {
            order_items::Entity::delete_many()
                .filter(order_items::Column::OrderId.eq(model.id))
                .exec(&txn)
                .await
                .context("delete replaced order items")?;
            insert_items(&txn, model.id, replacement).await?;
        }
        txn.commit()
            .await
            .context("commit update order transaction")?;
        self.find_by_id(model.id)
            .await?
            .ok_or(StoreServiceError::OrderNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let result = orders::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete order")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbOrderRepository {
    /// Resolve items (each with its product summary) and the assigned staff
    /// member for a batch of orders, preserving their order.
    async fn embed(&self, models: Vec<orders::Model>) -> Result<Vec<Order>, StoreServiceError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let order_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let item_rows = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_items::Column::Id)
            .find_also_related(products::Entity)
            .all(&self.db)
            .await
            .context("load order items")?;
        let mut items: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for (item, product) in item_rows {
            items
                .entry(item.order_id)
                .or_default()
                .push(order_item_from_row(item, product));
        }

        let staff_ids: Vec<i32> = models.iter().filter_map(|m| m.assigned_staff_id).collect();
        let staff: HashMap<i32, UserSummary> = if staff_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(staff_ids))
                .all(&self.db)
                .await
                .context("load assigned staff")?
                .into_iter()
                .map(|u| (u.id, user_summary(u)))
                .collect()
        };

        models
            .into_iter()
            .map(|model| {
                let order_items = items.remove(&model.id).unwrap_or_default();
                let assigned_staff = model
                    .assigned_staff_id
                    .and_then(|id| staff.get(&id).cloned());
                order_from_model(model, order_items, assigned_staff)
            })
            .collect()
    }
}

fn order_list_query(filter: &OrderFilter, page: Option<PageRequest>) -> Select<orders::Entity> {
    let mut query = orders::Entity::find();
    if let Some(status) = filter.status {
        query = query.filter(orders::Column::Status.eq(status.as_str()));
    }
    if let Some(payment_status) = filter.payment_status {
        query = query.filter(orders::Column::PaymentStatus.eq(payment_status.as_str()));
    }
    if let Some(order_type) = filter.order_type {
        query = query.filter(orders::Column::OrderType.eq(order_type.as_str()));
    }
    if let Some(staff_id) = filter.assigned_staff_id {
        query = query.filter(orders::Column::AssignedStaffId.eq(staff_id));
    }
    query
        .order_by_desc(orders::Column::CreatedAt)
        .order_by_desc(orders::Column::Id)
        .paginate_by(page)
}

async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    items: &[NewOrderItem],
) -> Result<Vec<order_items::Model>, StoreServiceError> {
    let mut inserted = Vec::with_capacity(items.len());
    for item in items {
        let model = order_items::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            price: Set(item.price),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| write_error(e, None, "insert order item"))?;
        inserted.push(model);
    }
    Ok(inserted)
}

fn order_from_model(
    model: orders::Model,
    items: Vec<OrderItem>,
    assigned_staff: Option<UserSummary>,
) -> Result<Order, StoreServiceError> {
    Ok(Order {
        id: model.id,
        order_type: parse_wire(&model.order_type, "orders.order_type")?,
        customer: from_json(model.customer, "orders.customer")?,
        consultation_details: from_json_opt(
            model.consultation_details,
            "orders.consultation_details",
        )?,
        total_amount: model.total_amount,
        status: parse_wire(&model.status, "orders.status")?,
        payment_status: parse_wire(&model.payment_status, "orders.payment_status")?,
        payment_method: parse_wire(&model.payment_method, "orders.payment_method")?,
        notes: model.notes,
        staff_notes: model.staff_notes,
        assigned_staff_id: model.assigned_staff_id,
        assigned_staff,
        status_history: from_json(model.status_history, "orders.status_history")?,
        items,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn order_item_from_row(model: order_items::Model, product: Option<products::Model>) -> OrderItem {
    OrderItem {
        id: model.id,
        product_id: model.product_id,
        product: product.map(|p| ProductSummary {
            id: p.id,
            name: p.name,
            slug: p.slug,
        }),
        quantity: model.quantity,
        price: model.price,
    }
}
