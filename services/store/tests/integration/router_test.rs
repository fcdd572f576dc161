use std::path::PathBuf;

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use furniture_store::router::build_router;
use furniture_store::state::AppState;
use furniture_testing::fixture::Fixture;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("furniture-store-{}", uuid::Uuid::new_v4()))
}

/// A server whose database is unreachable: only paths that reject before
/// touching storage succeed.
fn server_with(public_dir: PathBuf, upload_max_files: usize) -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        public_dir,
        upload_max_files,
        upload_max_file_bytes: 1024,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(scratch_dir(), 10)
}

fn image(name: &str, size: usize) -> Part {
    Part::bytes(vec![0xAB; size])
        .file_name(name)
        .mime_type("image/jpeg")
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live_but_not_ready_without_database() {
    let server = server();

    server.get("/healthz").await.assert_status_ok();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ── Request rejections ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_malformed_json_body() {
    let resp = server()
        .post("/users")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"email\":"))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "BAD_REQUEST");
}

#[tokio::test]
async fn should_return_field_errors_for_invalid_user() {
    let resp = server()
        .post("/users")
        .json(&json!({
            "email": "not-an-email",
            "password": "short",
            "first_name": "Ana",
            "last_name": "Nguyen"
        }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"].get("email").is_some());
    assert!(body["fields"].get("password").is_some());
}

#[tokio::test]
async fn should_reject_fixture_product_with_negative_price() {
    let mut product = Fixture::load("contracts/http/products/create_product.json");
    product["price"] = json!(-10);

    let resp = server().post("/products").json(&product).await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert!(resp.json::<Value>()["fields"].get("price").is_some());
}

#[tokio::test]
async fn should_reject_non_numeric_id() {
    let resp = server().get("/products/oak-table").await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "BAD_REQUEST");
}

#[tokio::test]
async fn should_reject_unknown_enum_in_query() {
    let resp = server().get("/orders?status=shipped").await;

    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_json_404_for_unknown_route() {
    let resp = server().get("/wishlists").await;

    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "NOT_FOUND");
}

// ── POST /products/upload ────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_upload_without_images() {
    let form = MultipartForm::new().add_text("note", "no files here");

    let resp = server().post("/products/upload").multipart(form).await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "EMPTY_UPLOAD");
}

#[tokio::test]
async fn should_reject_too_many_files() {
    let form = MultipartForm::new()
        .add_part("images", image("a.jpg", 10))
        .add_part("images", image("b.jpg", 10));

    let resp = server_with(scratch_dir(), 1)
        .post("/products/upload")
        .multipart(form)
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "TOO_MANY_FILES");
}

#[tokio::test]
async fn should_reject_oversized_file() {
    let form = MultipartForm::new().add_part("images", image("big.jpg", 2048));

    let resp = server().post("/products/upload").multipart(form).await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "FILE_TOO_LARGE");
}

#[tokio::test]
async fn should_store_images_and_serve_them_from_public() {
    let public_dir = scratch_dir();
    let server = server_with(public_dir.clone(), 10);
    let form = MultipartForm::new()
        .add_part("images", image("front.JPG", 16))
        .add_part("images", image("side.png", 8));

    let resp = server.post("/products/upload").multipart(form).await;

    resp.assert_status(StatusCode::CREATED);
    let body = resp.json::<Value>();
    let paths: Vec<String> = serde_json::from_value(body["paths"].clone()).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].starts_with("/public/uploads/products/"));
    assert!(paths[0].ends_with(".jpg"));
    assert!(paths[1].ends_with(".png"));

    let served = server.get(&paths[0]).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().len(), 16);

    let _ = std::fs::remove_dir_all(public_dir);
}
