use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CareBridge";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "info,carebridge=debug"
}

/// Runtime configuration, read from the environment with local-dev
/// defaults. The AI key has no default — the boundary stays unreachable
/// until one is provided.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub ai_base_url: String,
    pub ai_api_key: String,
    pub ai_model: String,
    pub ai_timeout_secs: u64,
    pub storage_base_url: String,
    pub storage_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("CAREBRIDGE_BIND", "127.0.0.1:8080")
                .parse()
                .expect("CAREBRIDGE_BIND must be host:port"),
            database_path: PathBuf::from(env_or("CAREBRIDGE_DB", "carebridge.db")),
            ai_base_url: env_or("CAREBRIDGE_AI_URL", "https://generativelanguage.googleapis.com"),
            ai_api_key: std::env::var("CAREBRIDGE_AI_KEY").unwrap_or_default(),
            ai_model: env_or("CAREBRIDGE_AI_MODEL", "gemini-2.5-flash"),
            ai_timeout_secs: env_or("CAREBRIDGE_AI_TIMEOUT", "120")
                .parse()
                .expect("CAREBRIDGE_AI_TIMEOUT must be seconds"),
            storage_base_url: env_or("CAREBRIDGE_STORAGE_URL", "http://localhost:9000"),
            storage_timeout_secs: env_or("CAREBRIDGE_STORAGE_TIMEOUT", "60")
                .parse()
                .expect("CAREBRIDGE_STORAGE_TIMEOUT must be seconds"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
