use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::{Json, http::StatusCode};
use serde::Serialize;

use crate::domain::types::UploadedFile;
use crate::error::StoreServiceError;
use crate::state::AppState;
use crate::usecase::upload::UploadProductImagesUseCase;

/// Multipart field name carrying the image files.
pub const IMAGES_FIELD: &str = "images";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub paths: Vec<String>,
}

fn multipart_error(state: &AppState, err: MultipartError) -> StoreServiceError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return StoreServiceError::FileTooLarge {
            max: state.upload_max_file_bytes,
        };
    }
    StoreServiceError::InvalidUpload(err.body_text())
}

// ── POST /products/upload ────────────────────────────────────────────────────

pub async fn upload_product_images(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), StoreServiceError> {
    let mut multipart = multipart.map_err(|e| StoreServiceError::InvalidUpload(e.body_text()))?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        if files.len() == state.upload_max_files {
            return Err(StoreServiceError::TooManyFiles {
                max: state.upload_max_files,
            });
        }
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await.map_err(|e| multipart_error(&state, e))?;
        files.push(UploadedFile { file_name, bytes });
    }

    let uc = UploadProductImagesUseCase {
        store: state.image_store(),
        max_files: state.upload_max_files,
        max_file_bytes: state.upload_max_file_bytes,
    };
    let paths = uc.execute(files).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { paths })))
}
