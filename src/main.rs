use std::sync::Arc;

use carebridge::ai::GeminiClient;
use carebridge::api::{start_server, ApiContext};
use carebridge::storage::HttpObjectStore;
use carebridge::{config, db, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::Config::from_env();

    let conn = match db::open_database(&config.database_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open database");
            std::process::exit(1);
        }
    };

    let ai = Arc::new(GeminiClient::new(
        &config.ai_base_url,
        &config.ai_api_key,
        &config.ai_model,
        config.ai_timeout_secs,
    ));
    let store = Arc::new(HttpObjectStore::new(
        &config.storage_base_url,
        config.storage_timeout_secs,
    ));

    let ctx = ApiContext::new(conn, ai, store);

    let mut server = match start_server(ctx, config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start server");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.session.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    server.shutdown();
}
