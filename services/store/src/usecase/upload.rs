use std::path::Path;

use tracing::info;

use crate::domain::repository::ImageStore;
use crate::domain::types::UploadedFile;
use crate::error::StoreServiceError;

const FALLBACK_EXTENSION: &str = "bin";
const MAX_EXTENSION_LEN: usize = 8;

/// Lower-cased extension of a client file name, or `bin` when it is missing
/// or not plain alphanumerics.
pub fn file_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map_or_else(|| FALLBACK_EXTENSION.to_owned(), str::to_ascii_lowercase)
}

pub struct UploadProductImagesUseCase<S: ImageStore> {
    pub store: S,
    pub max_files: usize,
    pub max_file_bytes: usize,
}

impl<S: ImageStore> UploadProductImagesUseCase<S> {
    /// Store every file and return their public paths in upload order.
    /// Limits are checked before anything is written.
    pub async fn execute(&self, files: Vec<UploadedFile>) -> Result<Vec<String>, StoreServiceError> {
        if files.is_empty() {
            return Err(StoreServiceError::EmptyUpload);
        }
        if files.len() > self.max_files {
            return Err(StoreServiceError::TooManyFiles {
                max: self.max_files,
            });
        }
        if files.iter().any(|f| f.bytes.len() > self.max_file_bytes) {
            return Err(StoreServiceError::FileTooLarge {
                max: self.max_file_bytes,
            });
        }

        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            let extension = file_extension(file.file_name.as_deref());
            paths.push(self.store.save(&extension, file.bytes).await?);
        }
        info!(count = paths.len(), "product images uploaded");
        Ok(paths)
    }
}
