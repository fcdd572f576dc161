use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Store service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum StoreServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("post not found")]
    PostNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("email already exists")]
    EmailAlreadyExists,
    #[error("category name or slug already exists")]
    CategoryAlreadyExists,
    #[error("product slug already exists")]
    ProductSlugAlreadyExists,
    #[error("post slug already exists")]
    PostSlugAlreadyExists,
    #[error("product is referenced by an order")]
    ProductInUse,
    #[error("referenced record does not exist")]
    InvalidReference,
    #[error("category cannot be its own parent")]
    InvalidParent,
    #[error("too many files, at most {max} per request")]
    TooManyFiles { max: usize },
    #[error("file too large, at most {max} bytes")]
    FileTooLarge { max: usize },
    #[error("no files uploaded")]
    EmptyUpload,
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StoreServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::CategoryAlreadyExists => "CATEGORY_ALREADY_EXISTS",
            Self::ProductSlugAlreadyExists => "PRODUCT_SLUG_ALREADY_EXISTS",
            Self::PostSlugAlreadyExists => "POST_SLUG_ALREADY_EXISTS",
            Self::ProductInUse => "PRODUCT_IN_USE",
            Self::InvalidReference => "INVALID_REFERENCE",
            Self::InvalidParent => "INVALID_PARENT",
            Self::TooManyFiles { .. } => "TOO_MANY_FILES",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::EmptyUpload => "EMPTY_UPLOAD",
            Self::InvalidUpload(_) => "INVALID_UPLOAD",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for StoreServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::CategoryNotFound
            | Self::ProductNotFound
            | Self::PostNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyExists
            | Self::CategoryAlreadyExists
            | Self::ProductSlugAlreadyExists
            | Self::PostSlugAlreadyExists
            | Self::ProductInUse => StatusCode::CONFLICT,
            Self::InvalidReference
            | Self::InvalidParent
            | Self::TooManyFiles { .. }
            | Self::FileTooLarge { .. }
            | Self::EmptyUpload
            | Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
