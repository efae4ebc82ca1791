//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | BACKOFFICE_API_URL | http://localhost:3000/api | REST base URL |
//! | BACKOFFICE_API_TOKEN | (unset) | Bearer token |
//! | BACKOFFICE_TIMEOUT_SECS | 30 | HTTP timeout |
//! | BACKOFFICE_PAGE_SIZE | 20 | Rows per page |
//! | BACKOFFICE_DEBOUNCE_MS | 300 | Text filter debounce window |
//! | BACKOFFICE_MAX_PAGE_BUTTONS | 7 | Paginator width |

use std::time::Duration;

use shared::query::DEFAULT_PAGE_SIZE;

/// Default debounce window for text filters
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default number of paginator buttons
pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 7;

/// Client configuration for connecting to the back-office API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Rows per page requested by list views
    pub page_size: u32,

    /// Quiet period before a text filter edit is propagated
    pub debounce_ms: u64,

    /// Number of paginator tokens (pages + ellipses)
    pub max_page_buttons: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_page_buttons: DEFAULT_MAX_PAGE_BUTTONS,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("BACKOFFICE_API_URL").unwrap_or(defaults.base_url),
            token: std::env::var("BACKOFFICE_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout: env_or("BACKOFFICE_TIMEOUT_SECS", defaults.timeout),
            page_size: env_or("BACKOFFICE_PAGE_SIZE", defaults.page_size),
            debounce_ms: env_or("BACKOFFICE_DEBOUNCE_MS", defaults.debounce_ms),
            max_page_buttons: env_or("BACKOFFICE_MAX_PAGE_BUTTONS", defaults.max_page_buttons),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce_ms(mut self, millis: u64) -> Self {
        self.debounce_ms = millis;
        self
    }

    pub fn with_max_page_buttons(mut self, buttons: usize) -> Self {
        self.max_page_buttons = buttons;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000/api")
    }
}
