use std::env;

pub mod cors;
pub mod security;
pub mod theme;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Placeholder content id used until the upload step fills in a real one.
pub const DEFAULT_MEDIA_REF: &str = "QmWaT";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub rpc_url: String,
    pub contract_address: Option<String>,
    pub allowed_origins: String,
    pub default_media_ref: String,
    pub session_idle_secs: u64,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            contract_address: env::var("CONTRACT_ADDRESS").ok(),
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            default_media_ref: env::var("DEFAULT_MEDIA_REF")
                .unwrap_or_else(|_| DEFAULT_MEDIA_REF.to_string()),
            session_idle_secs: env::var("SESSION_IDLE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_IDLE_SECS),
            production: env::var("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            default_media_ref: DEFAULT_MEDIA_REF.to_string(),
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
            production: false,
        }
    }
}
