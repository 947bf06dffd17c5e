//! Client configuration

/// Default backend base URL when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Client configuration for connecting to the POS backend
///
/// Injected into [`HttpClient`](crate::HttpClient) at construction;
/// nothing reads ambient settings at call time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including the version prefix
    /// (e.g. "http://localhost:8080/api/v1")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("https://pos.example.com/api/v1").with_timeout(5);
        assert_eq!(config.timeout, 5);
    }
}
