//! API utilities for frontend-backend communication
//!
//! Provides the API configuration and helpers for constructing URLs.

/// Fixed timeout applied to every backend request
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Port the LabPilot backend listens on, next to the page host
pub const BACKEND_PORT: u16 = 3000;

/// Where the backend lives and how long to wait for it
///
/// Provided to the whole app via context in `App`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u32,
}

impl ApiConfig {
    /// Derived from the current window location (same host, backend port)
    pub fn from_window() -> Self {
        Self::with_base_url(api_base())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, ms: u32) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    /// Build a full API URL from a path
    ///
    /// # Example
    /// ```rust,ignore
    /// let url = config.url("/api/referrers");
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_window()
    }
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Percent-encode a record id for use as a path segment
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
