//! Helpers for reading axum response bodies in tests.

use axum::body::to_bytes;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::Value;

/// Collect a response body into bytes.
pub async fn read_bytes(resp: Response) -> Bytes {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("response body")
}

/// Collect a response body and parse it as JSON.
pub async fn read_json(resp: Response) -> Value {
    let bytes = read_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Render anything `IntoResponse` and return its status with the JSON body.
pub async fn render_json(value: impl IntoResponse) -> (axum::http::StatusCode, Value) {
    let resp = value.into_response();
    let status = resp.status();
    (status, read_json(resp).await)
}
