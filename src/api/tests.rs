use super::*;
use crate::navigator::testing::RecordingNavigator;
use crate::storage::MemoryStore;
use async_trait::async_trait;
use builder360_shared::{SortOrder, UserType};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;

// =========================================================
// Shared Mock Components
// =========================================================

/// Transport double: answers from a queue and records every request
#[derive(Clone, Default)]
pub(crate) struct MockHttp {
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
}

impl MockHttp {
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, msg: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::NetworkError(msg.to_string())));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttp {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(req);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NetworkError("no response queued".into())))
    }
}

pub(crate) type TestClient = ApiClient<MockHttp, MemoryStore, RecordingNavigator>;

pub(crate) fn setup_client() -> (TestClient, MockHttp, MemoryStore, RecordingNavigator) {
    let http = MockHttp::default();
    let store = MemoryStore::new();
    let nav = RecordingNavigator::default();
    let client = ApiClient::new(
        ClientConfig::new("https://api.test/api/"),
        http.clone(),
        store.clone(),
        nav.clone(),
    );
    (client, http, store, nav)
}

pub(crate) fn user_json(first_name: &str) -> serde_json::Value {
    json!({
        "id": 11,
        "email": "sam@example.com",
        "firstName": first_name,
        "lastName": "Builder",
        "phone": "+1 555 0100",
        "userType": 1,
        "createdAt": "2023-04-01T12:00:00Z"
    })
}

pub(crate) fn ok(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "message": null, "data": data })
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let (client, http, store, _) = setup_client();
    store.set("authToken", "tok-123");
    http.respond(200, ok(json!([])));

    client.categories().await.unwrap();

    let req = http.last_request().unwrap();
    assert_eq!(req.url, "https://api.test/api/categories");
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.header("Authorization"), Some("Bearer tok-123"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert!(req.body.is_none());
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let (client, http, _, _) = setup_client();
    http.respond(200, ok(json!({ "categoryId": 4, "name": "Roofing" })));

    let category = client.category(4).await.unwrap();

    assert_eq!(category.name, "Roofing");
    assert_eq!(http.last_request().unwrap().header("Authorization"), None);
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects() {
    let (client, http, store, nav) = setup_client();
    store.set("authToken", "expired");
    store.set("user", &user_json("Sam").to_string());
    http.respond(401, json!({ "success": false, "message": "Token expired" }));

    // The caller ignores the error entirely; the client still acts.
    let _ = client.my_listings().await;

    assert!(!store.contains("authToken"));
    assert!(!store.contains("user"));
    assert_eq!(nav.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn unauthorized_keeps_backend_message() {
    let (client, http, _, _) = setup_client();
    http.respond(401, json!({ "success": false, "message": "Invalid credentials" }));

    let err = client
        .login(&LoginRequest {
            email: "a@b.co".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[tokio::test]
async fn other_statuses_pass_through() {
    let (client, http, store, nav) = setup_client();
    store.set("authToken", "tok");
    http.respond(404, json!({ "success": false, "message": "Listing not found" }));

    let err = client.listing(99).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: Some("Listing not found".into())
        }
    );
    assert!(store.contains("authToken"));
    assert!(nav.visits().is_empty());
}

#[tokio::test]
async fn non_json_error_body_has_no_message() {
    let (client, http, _, _) = setup_client();
    http.respond_raw(500, "<html>oops</html>");

    let err = client.categories().await.unwrap_err();

    assert_eq!(err.user_message("Failed to load categories"), "Failed to load categories");
}

#[tokio::test]
async fn rejected_envelope_surfaces_message() {
    let (client, http, _, _) = setup_client();
    http.respond(200, json!({ "success": false, "message": "Email already registered" }));

    let err = client
        .register(&RegisterRequest {
            email: "taken@example.com".into(),
            password: "secret1".into(),
            first_name: "T".into(),
            last_name: "K".into(),
            phone: None,
            user_type: UserType::Customer,
        })
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Rejected("Email already registered".into()));
}

#[tokio::test]
async fn transport_failure_uses_fallback_message() {
    let (client, http, _, nav) = setup_client();
    http.fail("connection refused");

    let err = client.profile().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message("Login failed"), "Login failed");
    assert!(nav.visits().is_empty());
}

#[tokio::test]
async fn listing_query_is_url_encoded() {
    let (client, http, _, _) = setup_client();
    http.respond(200, ok(json!({ "data": [], "totalCount": 0 })));

    let query = ListingQuery {
        keyword: Some("tile & grout".into()),
        city: Some("".into()),
        sort_by: SortOrder::Rating,
        page_size: Some(20),
        ..Default::default()
    };
    let page = client.listings(&query).await.unwrap();

    assert!(page.data.is_empty());
    assert_eq!(
        http.last_request().unwrap().url,
        "https://api.test/api/listings?keyword=tile+%26+grout&sortBy=rating&pageSize=20"
    );
}

#[tokio::test]
async fn post_sends_json_body() {
    let (client, http, _, _) = setup_client();
    http.respond(200, ok(json!({ "token": "t", "user": user_json("Sam") })));

    let payload = client
        .login(&LoginRequest {
            email: "sam@example.com".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

    assert_eq!(payload.token, "t");
    let req = http.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "sam@example.com", "password": "hunter22" }));
}

#[tokio::test]
async fn change_password_accepts_missing_data() {
    let (client, http, _, _) = setup_client();
    http.respond(200, json!({ "success": true, "message": "Password changed" }));

    client
        .change_password(&ChangePasswordRequest {
            current_password: "old-pass".into(),
            new_password: "new-pass".into(),
        })
        .await
        .unwrap();

    assert_eq!(
        http.last_request().unwrap().url,
        "https://api.test/api/auth/change-password"
    );
}

#[tokio::test]
async fn missing_data_is_a_decode_error_for_records() {
    let (client, http, _, _) = setup_client();
    http.respond(200, json!({ "success": true }));

    let err = client.listing(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn home_feed_truncates_categories() {
    let (client, http, _, _) = setup_client();
    let categories: Vec<_> = (1..=9)
        .map(|i| json!({ "categoryId": i, "name": format!("Cat {}", i) }))
        .collect();
    // try_join polls the listings future first, so it consumes the first response
    http.respond(200, ok(json!({ "data": [] })));
    http.respond(200, ok(json!(categories)));

    let feed = client.home_feed().await.unwrap();

    assert_eq!(feed.categories.len(), HOME_LISTINGS as usize);
    assert_eq!(http.request_count(), 2);
    assert!(
        http.requests.borrow()[0]
            .url
            .ends_with("/listings?sortBy=newest&pageSize=6")
    );
}

#[tokio::test]
async fn check_email_encodes_address_in_path() {
    let (client, http, _, _) = setup_client();
    http.respond(200, ok(json!(false)));

    let available = client.check_email_available("a+b@c.io").await.unwrap();

    assert!(!available);
    assert_eq!(
        http.last_request().unwrap().url,
        "https://api.test/api/auth/check-email/a%2Bb%40c.io"
    );
}

#[tokio::test]
async fn my_listings_accepts_id_alias() {
    let (client, http, store, _) = setup_client();
    store.set("authToken", "tok-9");
    http.respond(
        200,
        ok(json!([
            { "id": 3, "categoryId": 1, "title": "Decks", "isActive": false },
            { "listingId": 4, "categoryId": 1, "title": "Fences" }
        ])),
    );

    let listings = client.my_listings().await.unwrap();

    assert_eq!(listings.iter().map(|l| l.id).collect::<Vec<_>>(), vec![3, 4]);
    assert!(!listings[0].is_active);
    assert!(listings[1].is_active);
    assert!(
        http.last_request()
            .unwrap()
            .url
            .ends_with("/listings/my-listings")
    );
}
