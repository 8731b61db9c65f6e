// =========================================================
// Client configuration
// =========================================================

/// Defaults used when the build environment does not override them
const DEFAULT_API_BASE_URL: &str = "https://localhost:7084/api";
const DEFAULT_TOKEN_KEY: &str = "authToken";
const DEFAULT_USER_KEY: &str = "user";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_LISTINGS_PAGE_SIZE: u32 = 20;

/// Runtime configuration of the client.
///
/// A CSR bundle has no process environment, so overrides are baked in at
/// compile time through `BUILDER360_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API root, without a trailing slash
    pub api_base_url: String,
    /// Storage key holding the bearer token
    pub token_key: String,
    /// Storage key holding the serialized user record
    pub user_key: String,
    /// Where the client sends the browser when the backend answers 401
    pub login_path: String,
    pub listings_page_size: u32,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(&api_base_url.into()),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            listings_page_size: DEFAULT_LISTINGS_PAGE_SIZE,
        }
    }

    /// Build from `BUILDER360_API_URL`, `BUILDER360_TOKEN_KEY` and
    /// `BUILDER360_USER_KEY` captured at compile time.
    pub fn from_build_env() -> Self {
        let mut config = Self::new(option_env!("BUILDER360_API_URL").unwrap_or(DEFAULT_API_BASE_URL));
        if let Some(key) = option_env!("BUILDER360_TOKEN_KEY") {
            config.token_key = key.to_string();
        }
        if let Some(key) = option_env!("BUILDER360_USER_KEY") {
            config.user_key = key.to_string();
        }
        config
    }

    /// Join a request path onto the base URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("https://api.example.com/api//");
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.url("/listings"), "https://api.example.com/api/listings");
        assert_eq!(config.url("categories"), "https://api.example.com/api/categories");
    }

    #[test]
    fn defaults_match_storage_layout() {
        let config = ClientConfig::new(DEFAULT_API_BASE_URL);
        assert_eq!(config.token_key, "authToken");
        assert_eq!(config.user_key, "user");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.listings_page_size, 20);
    }
}
