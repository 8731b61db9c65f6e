use builder360_shared::HttpMethod;
use serde::de::DeserializeOwned;
use std::fmt;

// =========================================================
// HTTP Interface Abstraction
// =========================================================

/// Generic HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Generic HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Failure below the HTTP layer: the request never produced a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request could not be built
    RequestBuildFailed(String),
    /// Network failure
    NetworkError(String),
    /// Response body could not be read
    ResponseReadFailed(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            TransportError::NetworkError(msg) => write!(f, "network error: {}", msg),
            TransportError::ResponseReadFailed(msg) => write!(f, "response read failed: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// HTTP client trait.
///
/// `?Send` because browser fetch futures hold `JsValue`s.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new("https://x/api", HttpMethod::Get)
            .with_header("Authorization", "Bearer t");
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("Content-Type"), None);
    }

    #[test]
    fn status_classes() {
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(401, "").ok());
        assert!(!HttpResponse::new(500, "").ok());
    }
}
