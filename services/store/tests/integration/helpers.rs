use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use furniture_domain::blog::{PostCategory, PostStatus};
use furniture_domain::catalog::ProductStatus;
use furniture_domain::order::{Customer, OrderType, PaymentMethod, PaymentStatus};
use furniture_domain::pagination::PageRequest;
use furniture_store::domain::repository::{
    CategoryRepository, OrderRepository, PostRepository, ProductRepository,
};
use furniture_store::domain::types::{
    Category, CategoryFilter, NewCategory, NewOrder, NewOrderItem, NewPost, NewProduct, Order,
    OrderFilter, OrderItem, Post, PostDetail, PostFilter, Product, ProductDetail, ProductFilter,
    UserSummary,
};
use furniture_store::error::StoreServiceError;

pub fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn page_of<T: Clone>(items: &[T], page: Option<PageRequest>) -> Vec<T> {
    let Some(page) = page else {
        return items.to_vec();
    };
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

// ── MockCategoryRepo ─────────────────────────────────────────────────────────

pub fn category(id: i32, name: &str, parent_id: Option<i32>, level: i32) -> Category {
    Category {
        id,
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: String::new(),
        image: None,
        parent_id,
        level,
        order: 0,
        is_active: true,
        metadata: None,
        created_at: at(),
        updated_at: at(),
    }
}

pub struct MockCategoryRepo {
    pub categories: Arc<Mutex<Vec<Category>>>,
}

impl MockCategoryRepo {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(Mutex::new(categories)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the stored categories for post-execution inspection.
    pub fn categories_handle(&self) -> Arc<Mutex<Vec<Category>>> {
        Arc::clone(&self.categories)
    }
}

impl CategoryRepository for MockCategoryRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, StoreServiceError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn exists_by_name_or_slug(
        &self,
        name: &str,
        slug: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, StoreServiceError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| Some(c.id) != exclude_id)
            .any(|c| c.name == name || c.slug == slug))
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>, StoreServiceError> {
        let matching: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter.parent_id.is_none_or(|p| c.parent_id == Some(p)))
            .filter(|c| filter.is_active.is_none_or(|a| c.is_active == a))
            .cloned()
            .collect();
        Ok(page_of(&matching, page))
    }

    async fn list_all(&self) -> Result<Vec<Category>, StoreServiceError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn list_children(&self, parent_id: i32) -> Result<Vec<Category>, StoreServiceError> {
        let mut children: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by_key(|c| (c.order, c.id));
        Ok(children)
    }

    async fn create(&self, new: &NewCategory) -> Result<Category, StoreServiceError> {
        let mut categories = self.categories.lock().unwrap();
        let id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Category {
            id,
            name: new.name.clone(),
            slug: new.slug.clone(),
            description: new.description.clone(),
            image: new.image.clone(),
            parent_id: new.parent_id,
            level: new.level,
            order: new.order,
            is_active: new.is_active,
            metadata: new.metadata.clone(),
            created_at: at(),
            updated_at: at(),
        };
        categories.push(created.clone());
        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<Category, StoreServiceError> {
        let mut categories = self.categories.lock().unwrap();
        let slot = categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(StoreServiceError::CategoryNotFound)?;
        *slot = category.clone();
        Ok(slot.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() < before)
    }
}

// ── MockProductRepo ──────────────────────────────────────────────────────────

pub fn product(id: i32, slug: &str) -> Product {
    Product {
        id,
        name: slug.replace('-', " "),
        slug: slug.to_owned(),
        description: String::new(),
        price: Decimal::new(19900, 2),
        images: vec![],
        category_id: None,
        specifications: None,
        stock: 3,
        featured: false,
        status: ProductStatus::Published,
        metadata: None,
        created_at: at(),
        updated_at: at(),
    }
}

pub struct MockProductRepo {
    pub products: Arc<Mutex<Vec<Product>>>,
}

impl MockProductRepo {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn products_handle(&self) -> Arc<Mutex<Vec<Product>>> {
        Arc::clone(&self.products)
    }
}

fn product_detail(product: Product) -> ProductDetail {
    ProductDetail {
        product,
        category: None,
    }
}

impl ProductRepository for MockProductRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductDetail>, StoreServiceError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .map(product_detail))
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreServiceError> {
        Ok(self.products.lock().unwrap().iter().any(|p| p.slug == slug))
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<ProductDetail>, StoreServiceError> {
        let matching: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .filter(|p| filter.featured.is_none_or(|f| p.featured == f))
            .filter(|p| filter.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| filter.max_price.is_none_or(|max| p.price <= max))
            .cloned()
            .collect();
        Ok(page_of(&matching, page)
            .into_iter()
            .map(product_detail)
            .collect())
    }

    async fn create(&self, new: &NewProduct) -> Result<ProductDetail, StoreServiceError> {
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created = Product {
            id,
            name: new.name.clone(),
            slug: new.slug.clone(),
            description: new.description.clone(),
            price: new.price,
            images: new.images.clone(),
            category_id: new.category_id,
            specifications: new.specifications.clone(),
            stock: new.stock,
            featured: new.featured,
            status: new.status,
            metadata: new.metadata.clone(),
            created_at: at(),
            updated_at: at(),
        };
        products.push(created.clone());
        Ok(product_detail(created))
    }

    async fn update(&self, product: &Product) -> Result<ProductDetail, StoreServiceError> {
        let mut products = self.products.lock().unwrap();
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(StoreServiceError::ProductNotFound)?;
        *slot = product.clone();
        Ok(product_detail(slot.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

// ── MockPostRepo ─────────────────────────────────────────────────────────────

pub fn post(id: i32, slug: &str, author_id: Option<i32>) -> Post {
    Post {
        id,
        title: slug.replace('-', " "),
        slug: slug.to_owned(),
        content: "Body".to_owned(),
        excerpt: String::new(),
        featured_image: None,
        images: vec![],
        author_id,
        categories: vec![PostCategory::DesignTips],
        tags: vec![],
        status: PostStatus::Draft,
        published_at: None,
        metadata: None,
        stats: Default::default(),
        created_at: at(),
        updated_at: at(),
    }
}

pub struct MockPostRepo {
    pub posts: Arc<Mutex<Vec<Post>>>,
    pub authors: Vec<UserSummary>,
}

impl MockPostRepo {
    pub fn new(posts: Vec<Post>, authors: Vec<UserSummary>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
            authors,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    fn detail(&self, post: Post) -> PostDetail {
        let author = post
            .author_id
            .and_then(|id| self.authors.iter().find(|a| a.id == id).cloned());
        PostDetail { post, author }
    }
}

impl PostRepository for MockPostRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<PostDetail>, StoreServiceError> {
        let found = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned();
        Ok(found.map(|p| self.detail(p)))
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreServiceError> {
        Ok(self.posts.lock().unwrap().iter().any(|p| p.slug == slug))
    }

    async fn list(
        &self,
        filter: &PostFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<PostDetail>, StoreServiceError> {
        let matching: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .filter(|p| filter.category.is_none_or(|c| p.categories.contains(&c)))
            .filter(|p| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|t| p.tags.iter().any(|tag| tag == t))
            })
            .filter(|p| filter.author_id.is_none_or(|a| p.author_id == Some(a)))
            .cloned()
            .collect();
        Ok(page_of(&matching, page)
            .into_iter()
            .map(|p| self.detail(p))
            .collect())
    }

    async fn create(&self, new: &NewPost) -> Result<PostDetail, StoreServiceError> {
        let created = {
            let mut posts = self.posts.lock().unwrap();
            let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let created = Post {
                id,
                title: new.title.clone(),
                slug: new.slug.clone(),
                content: new.content.clone(),
                excerpt: new.excerpt.clone(),
                featured_image: new.featured_image.clone(),
                images: new.images.clone(),
                author_id: new.author_id,
                categories: new.categories.clone(),
                tags: new.tags.clone(),
                status: new.status,
                published_at: new.published_at,
                metadata: new.metadata.clone(),
                stats: new.stats,
                created_at: at(),
                updated_at: at(),
            };
            posts.push(created.clone());
            created
        };
        Ok(self.detail(created))
    }

    async fn update(&self, post: &Post) -> Result<PostDetail, StoreServiceError> {
        {
            let mut posts = self.posts.lock().unwrap();
            let slot = posts
                .iter_mut()
                .find(|p| p.id == post.id)
                .ok_or(StoreServiceError::PostNotFound)?;
            *slot = post.clone();
        }
        Ok(self.detail(post.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

pub fn customer(user_id: Option<i32>) -> Customer {
    Customer {
        name: "Ana Nguyen".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "0901234567".to_owned(),
        address: Default::default(),
        user_id,
    }
}

pub fn item(product_id: i32, quantity: i32, cents: i64) -> NewOrderItem {
    NewOrderItem {
        product_id,
        quantity,
        price: Decimal::new(cents, 2),
    }
}

pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
}

impl MockOrderRepo {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn orders_handle(&self) -> Arc<Mutex<Vec<Order>>> {
        Arc::clone(&self.orders)
    }
}

fn stored_items(order_id: i32, items: &[NewOrderItem]) -> Vec<OrderItem> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| OrderItem {
            id: order_id * 100 + i as i32 + 1,
            product_id: item.product_id,
            product: None,
            quantity: item.quantity,
            price: item.price,
        })
        .collect()
}

impl OrderRepository for MockOrderRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, StoreServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &OrderFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        let matching: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| filter.payment_status.is_none_or(|s| o.payment_status == s))
            .filter(|o| filter.order_type.is_none_or(|t| o.order_type == t))
            .cloned()
            .collect();
        Ok(page_of(&matching, page))
    }

    async fn create(&self, new: &NewOrder) -> Result<Order, StoreServiceError> {
        let mut orders = self.orders.lock().unwrap();
        let id = orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let created = Order {
            id,
            order_type: new.order_type,
            customer: new.customer.clone(),
            consultation_details: new.consultation_details.clone(),
            total_amount: new.total_amount,
            status: new.status,
            payment_status: new.payment_status,
            payment_method: new.payment_method,
            notes: new.notes.clone(),
            staff_notes: new.staff_notes.clone(),
            assigned_staff_id: new.assigned_staff_id,
            assigned_staff: None,
            status_history: new.status_history.clone(),
            items: stored_items(id, &new.items),
            created_at: at(),
            updated_at: at(),
        };
        orders.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        order: &Order,
        items: Option<&[NewOrderItem]>,
    ) -> Result<Order, StoreServiceError> {
        let mut orders = self.orders.lock().unwrap();
        let slot = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or(StoreServiceError::OrderNotFound)?;
        let previous_items = std::mem::take(&mut slot.items);
        *slot = order.clone();
        slot.items = match items {
            Some(items) => stored_items(order.id, items),
            None => previous_items,
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.id != id);
        Ok(orders.len() < before)
    }
}

/// A stored purchase order in `pending` with two items.
pub fn pending_order(id: i32) -> Order {
    let items = vec![item(1, 2, 1000), item(2, 1, 500)];
    Order {
        id,
        order_type: OrderType::Purchase,
        customer: customer(Some(7)),
        consultation_details: None,
        total_amount: Decimal::new(2500, 2),
        status: Default::default(),
        payment_status: PaymentStatus::Unpaid,
        payment_method: PaymentMethod::Cod,
        notes: None,
        staff_notes: None,
        assigned_staff_id: None,
        assigned_staff: None,
        status_history: furniture_domain::order::initial_history(
            Default::default(),
            "7".to_owned(),
            at(),
        ),
        items: stored_items(id, &items),
        created_at: at(),
        updated_at: at(),
    }
}
