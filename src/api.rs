//! Backend API client
//!
//! Every call goes through [`ApiClient::send`], which owns the cross-cutting
//! concerns: URL building, bearer token injection, envelope decoding and the
//! global 401 handling (clear stored session, force the login view).

use crate::config::ClientConfig;
use crate::navigator::Navigator;
use crate::request::{HttpClient, HttpRequest, HttpResponse, TransportError};
use crate::storage::KeyValueStore;
use builder360_shared::{
    ApiEnvelope, ApiRequest, AuthPayload, CONTENT_TYPE_JSON, Category, ChangePasswordRequest,
    CheckEmailRequest, CreateListingRequest, GetCategoryRequest, GetListingRequest,
    HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HttpMethod, ListCategoriesRequest, Listing,
    ListingQuery, LoginRequest, MyListingsRequest, Paged, ProfileRequest, RegisterRequest,
    UpdateProfileRequest, User,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use std::rc::Rc;

#[cfg(test)]
pub(crate) mod tests;

/// Number of listings and categories shown on the home page
pub const HOME_LISTINGS: u32 = 6;

// =========================================================
// Errors
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received
    Transport(TransportError),
    /// 401. The stored session has already been cleared.
    Unauthorized { message: Option<String> },
    /// Any other non-2xx status
    Status { status: u16, message: Option<String> },
    /// 2xx envelope with `success: false`
    Rejected(String),
    /// Request body could not be serialized
    Encode(String),
    /// Response body did not match the expected shape
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Message to show the user: the backend's own wording when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::Status {
                message: Some(msg), ..
            }
            | ApiError::Unauthorized { message: Some(msg) } => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "{}", e),
            ApiError::Unauthorized { message } => {
                write!(f, "unauthorized")?;
                if let Some(msg) = message {
                    write!(f, ": {}", msg)?;
                }
                Ok(())
            }
            ApiError::Status { status, message } => {
                write!(f, "request failed with status {}", status)?;
                if let Some(msg) = message {
                    write!(f, ": {}", msg)?;
                }
                Ok(())
            }
            ApiError::Rejected(msg) => write!(f, "rejected: {}", msg),
            ApiError::Encode(msg) => write!(f, "encode error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Transport(e)
    }
}

// =========================================================
// Client
// =========================================================

/// Listings and categories for the landing page
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    pub listings: Vec<Listing>,
    pub categories: Vec<Category>,
}

/// Thin wrapper around the REST API.
///
/// Generic over the transport, the storage holding the token, and the
/// navigator used on session expiry.
#[derive(Clone)]
pub struct ApiClient<C, S, N> {
    config: Rc<ClientConfig>,
    http: C,
    store: S,
    navigator: N,
}

impl<C, S, N> ApiClient<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(config: ClientConfig, http: C, store: S, navigator: N) -> Self {
        Self {
            config: Rc::new(config),
            http,
            store,
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Bearer token currently in storage
    pub fn token(&self) -> Option<String> {
        self.store
            .get(&self.config.token_key)
            .filter(|t| !t.is_empty())
    }

    /// Dispatch a request and unwrap the response envelope.
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let http_req = self.build_request(req)?;
        let resp = self.http.send(http_req).await?;

        if resp.status == 401 {
            let message = error_message(&resp);
            self.expire_session();
            return Err(ApiError::Unauthorized { message });
        }

        decode_envelope(&resp)
    }

    fn build_request<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let mut url = self.config.url(&req.path());

        let pairs: Vec<_> = req
            .query()
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        if !pairs.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in &pairs {
                serializer.append_pair(key, value);
            }
            url.push('?');
            url.push_str(&serializer.finish());
        }

        let mut http_req = HttpRequest::new(&url, R::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(token) = self.token() {
            http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            http_req = http_req.with_body(body);
        }

        Ok(http_req)
    }

    /// Drop the stored session and send the user to the login view.
    fn expire_session(&self) {
        crate::log_warn!("[Api] 401 received, clearing stored session");
        self.store.delete(&self.config.token_key);
        self.store.delete(&self.config.user_key);
        self.navigator.redirect(&self.config.login_path);
    }

    // ---------------------------------------------------------
    // Auth
    // ---------------------------------------------------------

    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthPayload> {
        self.send(credentials).await
    }

    pub async fn register(&self, user_data: &RegisterRequest) -> ApiResult<AuthPayload> {
        self.send(user_data).await
    }

    pub async fn profile(&self) -> ApiResult<User> {
        self.send(&ProfileRequest).await
    }

    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> ApiResult<User> {
        self.send(data).await
    }

    pub async fn change_password(&self, data: &ChangePasswordRequest) -> ApiResult<()> {
        let _: IgnoredAny = self.send(data).await?;
        Ok(())
    }

    pub async fn check_email_available(&self, email: &str) -> ApiResult<bool> {
        self.send(&CheckEmailRequest {
            email: email.to_string(),
        })
        .await
    }

    // ---------------------------------------------------------
    // Listings
    // ---------------------------------------------------------

    pub async fn listings(&self, query: &ListingQuery) -> ApiResult<Paged<Listing>> {
        self.send(query).await
    }

    pub async fn listing(&self, id: i64) -> ApiResult<Listing> {
        self.send(&GetListingRequest { id }).await
    }

    pub async fn create_listing(&self, data: &CreateListingRequest) -> ApiResult<Listing> {
        self.send(data).await
    }

    pub async fn my_listings(&self) -> ApiResult<Vec<Listing>> {
        self.send(&MyListingsRequest).await
    }

    // ---------------------------------------------------------
    // Categories
    // ---------------------------------------------------------

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.send(&ListCategoriesRequest).await
    }

    pub async fn category(&self, id: i64) -> ApiResult<Category> {
        self.send(&GetCategoryRequest { id }).await
    }

    /// Latest listings and the first categories, fetched concurrently.
    /// Fails as a whole if either call fails.
    pub async fn home_feed(&self) -> ApiResult<HomeFeed> {
        let query = ListingQuery {
            page_size: Some(HOME_LISTINGS),
            ..Default::default()
        };
        let (listings, mut categories) =
            futures::try_join!(self.listings(&query), self.categories())?;
        categories.truncate(HOME_LISTINGS as usize);
        Ok(HomeFeed {
            listings: listings.data,
            categories,
        })
    }
}

// =========================================================
// Envelope decoding
// =========================================================

/// Best-effort extraction of the envelope `message` from an error response
fn error_message(resp: &HttpResponse) -> Option<String> {
    resp.json::<ApiEnvelope<IgnoredAny>>()
        .ok()
        .and_then(|env| env.message)
        .filter(|m| !m.trim().is_empty())
}

fn decode_envelope<T: DeserializeOwned>(resp: &HttpResponse) -> ApiResult<T> {
    if !resp.ok() {
        return Err(ApiError::Status {
            status: resp.status,
            message: error_message(resp),
        });
    }

    let envelope: ApiEnvelope<T> = resp
        .json()
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ApiError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "Request failed".to_string()),
        ));
    }

    match envelope.data {
        Some(data) => Ok(data),
        // Unit-like payloads (`()`, `IgnoredAny`) accept a missing `data`
        None => serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| ApiError::Decode("response envelope has no data".to_string())),
    }
}
