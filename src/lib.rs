pub mod ai; // AI text/vision service boundary
pub mod api; // Access gate + HTTP endpoints
pub mod config;
pub mod db; // Document store + aggregation/projection queries
pub mod models;
pub mod storage; // Object storage boundary

use tracing_subscriber::EnvFilter;

/// Initialize tracing from RUST_LOG, falling back to the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
