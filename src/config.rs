//! Application Configuration
//!
//! Values baked in at build time, provided to components via context.

/// Backend used when `QUALCODE_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Codebook generation is the only request with a client-side timeout
pub const DEFAULT_GENERATE_TIMEOUT_MS: u32 = 60_000;

pub const DEFAULT_ENTRIES_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub generate_timeout_ms: u32,
    pub entries_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            generate_timeout_ms: DEFAULT_GENERATE_TIMEOUT_MS,
            entries_page_size: DEFAULT_ENTRIES_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("QUALCODE_API_URL"))
    }

    fn with_base_url(base: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = base.map(str::trim).filter(|b| !b.is_empty()) {
            config.api_base_url = base.to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_fallback() {
        assert_eq!(AppConfig::with_base_url(None).api_base_url, DEFAULT_API_URL);
        assert_eq!(AppConfig::with_base_url(Some("  ")).api_base_url, DEFAULT_API_URL);
        assert_eq!(
            AppConfig::with_base_url(Some("https://api.example.org")).api_base_url,
            "https://api.example.org"
        );
        assert_eq!(AppConfig::default().generate_timeout_ms, 60_000);
    }
}
