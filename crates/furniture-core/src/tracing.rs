use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Fallback directives when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn,tower_http=info";

/// Initialize structured JSON tracing on stdout. Call once at startup.
///
/// Filter comes from `RUST_LOG`, else [`DEFAULT_DIRECTIVES`]. Repeat calls
/// are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
