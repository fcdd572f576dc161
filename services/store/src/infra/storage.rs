use std::path::PathBuf;

use anyhow::Context as _;
use bytes::Bytes;
use uuid::Uuid;

use crate::domain::repository::ImageStore;
use crate::error::StoreServiceError;

/// Mount point of the public directory in the HTTP router.
pub const PUBLIC_PREFIX: &str = "/public";

const PRODUCT_UPLOADS: &str = "uploads/products";

/// Writes product images under `{public_dir}/uploads/products/`.
#[derive(Clone)]
pub struct FsImageStore {
    pub public_dir: PathBuf,
}

impl ImageStore for FsImageStore {
    async fn save(&self, extension: &str, bytes: Bytes) -> Result<String, StoreServiceError> {
        let dir = self.public_dir.join(PRODUCT_UPLOADS);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create upload dir {}", dir.display()))?;

        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;

        Ok(format!("{PUBLIC_PREFIX}/{PRODUCT_UPLOADS}/{file_name}"))
    }
}
