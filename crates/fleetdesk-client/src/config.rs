/// API root used when no deployment override is present.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the API root.
pub const API_URL_ENV: &str = "FLEETDESK_API_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolves the API root. Natively the variable is read at runtime; in
    /// the browser bundle it is baked in at compile time.
    pub fn from_env() -> Self {
        #[cfg(target_arch = "wasm32")]
        let configured = option_env!("FLEETDESK_API_URL").map(str::to_string);
        #[cfg(not(target_arch = "wasm32"))]
        let configured = std::env::var(API_URL_ENV).ok();

        match configured.filter(|url| !url.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
