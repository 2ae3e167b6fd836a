//! Configuration model loaded from external sources.

use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signing key material for the flash message cookies.
    #[validate(length(min = 64))]
    pub secret: String,
    /// Root of the loyalty REST API, without a trailing path.
    #[serde(default = "default_api_base_url")]
    #[validate(url)]
    pub api_base_url: String,
    /// Per-request timeout for API calls; unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}
