//! Application configuration constants
//!
//! Central location for API configuration, the note color palette,
//! and the validation boundaries enforced before a request is serialized.

use std::env;

// ===== Remote API =====

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "KEEPNOTE_API_URL";

/// Default API base URL for local development
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Request timeout for all API calls, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// User-Agent header sent with every request
pub const USER_AGENT: &str = concat!("keepnote/", env!("CARGO_PKG_VERSION"));

/// Remote API endpoint configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from the environment, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        Self::new(env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

// ===== Session Storage Keys =====

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record
pub const USER_KEY: &str = "user";

// ===== Note Limits =====

/// Maximum note title length in characters
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum note content length in characters
pub const MAX_CONTENT_LEN: usize = 10_000;

/// Maximum search query length in characters
pub const MAX_QUERY_LEN: usize = 100;

/// Maximum search page size
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Default search page size
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

// ===== Label Limits =====

/// Maximum label name length in characters (after trimming)
pub const MAX_LABEL_NAME_LEN: usize = 50;

// ===== Auth Limits =====

/// Minimum password length for registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum display name length for registration
pub const MIN_NAME_LEN: usize = 2;

/// Maximum display name length for registration
pub const MAX_NAME_LEN: usize = 100;

// ===== Note Colors =====

/// Color applied to notes created without an explicit color
pub const DEFAULT_NOTE_COLOR: &str = "#ffffff";

/// Predefined palette tokens accepted alongside hex literals
pub const NOTE_COLORS: &[&str] = &[
    "white", "red", "orange", "yellow", "green", "teal", "blue", "purple", "pink", "brown", "gray",
    "grey",
];

/// Check whether a color is a palette token or a `#rgb`/`#rrggbb` hex
/// literal. Manual parsing instead of regex to avoid adding the `regex`
/// crate dependency.
pub fn is_valid_color(color: &str) -> bool {
    if is_hex_color(color) {
        return true;
    }

    let lower = color.to_lowercase();
    NOTE_COLORS.contains(&lower.as_str())
}

fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };

    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
