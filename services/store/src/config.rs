use std::path::PathBuf;

use furniture_core::config::{env_or, require_env};

/// Store service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3001). Env var: `STORE_PORT`.
    pub store_port: u16,
    /// Directory served under `/public` (default `public`). Env var: `PUBLIC_DIR`.
    pub public_dir: PathBuf,
    /// Max files per upload request (default 10). Env var: `UPLOAD_MAX_FILES`.
    pub upload_max_files: usize,
    /// Max bytes per uploaded file (default 5 MiB). Env var: `UPLOAD_MAX_FILE_BYTES`.
    pub upload_max_file_bytes: usize,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: require_env("DATABASE_URL"),
            store_port: env_or("STORE_PORT", 3001),
            public_dir: env_or("PUBLIC_DIR", PathBuf::from("public")),
            upload_max_files: env_or("UPLOAD_MAX_FILES", 10),
            upload_max_file_bytes: env_or("UPLOAD_MAX_FILE_BYTES", 5 * 1024 * 1024),
            run_migrations: env_or("RUN_MIGRATIONS", false),
        }
    }
}
