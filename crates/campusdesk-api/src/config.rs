pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, request_timeout_secs: u64) -> Self {
        let base_url = base_url.into().trim().to_owned();
        let base_url = if base_url.is_empty() {
            DEFAULT_BACKEND_URL.to_owned()
        } else {
            base_url
        };
        Self {
            base_url,
            request_timeout_secs: request_timeout_secs.max(1),
        }
    }
}
