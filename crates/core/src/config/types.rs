use serde::{Deserialize, Serialize};

/// Number of games requested per "load more" step.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest `limit` the games endpoint honors.
pub const DEFAULT_MAX_LIMIT: u32 = 100;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Catalog API client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API (e.g., "http://localhost:5100")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5100".to_string()
}

fn default_timeout() -> u32 {
    10
}

/// Listing pagination configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upper bound for a single request, which also caps how deep a shared
    /// URL can restore in one fetch.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_limit() -> u32 {
    DEFAULT_MAX_LIMIT
}
