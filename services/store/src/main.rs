use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use furniture_core::tracing::init_tracing;
use furniture_store::config::StoreConfig;
use furniture_store::router::build_router;
use furniture_store::state::AppState;
use furniture_store_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = StoreConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let state = AppState {
        db,
        public_dir: config.public_dir,
        upload_max_files: config.upload_max_files,
        upload_max_file_bytes: config.upload_max_file_bytes,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.store_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("store service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
