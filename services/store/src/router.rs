use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use furniture_core::error::route_not_found;
use furniture_core::health::{healthz, readyz};
use furniture_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    category::{
        create_category, delete_category, get_category, get_category_tree, list_categories,
        update_category,
    },
    order::{create_order, delete_order, get_order, list_orders, update_order},
    post::{create_post, delete_post, get_post, list_posts, update_post},
    product::{create_product, delete_product, get_product, list_products, update_product},
    upload::upload_product_images,
    user::{create_user, delete_user, get_user, list_users, update_user},
};
use crate::infra::storage::PUBLIC_PREFIX;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state
        .upload_max_files
        .saturating_mul(state.upload_max_file_bytes)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let public_dir = ServeDir::new(&state.public_dir);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/tree", get(get_category_tree))
        .route(
            "/categories/{id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        // Products
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/upload",
            post(upload_product_images).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        // Posts
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        // Orders
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
        // Uploaded files
        .nest_service(PUBLIC_PREFIX, public_dir)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
