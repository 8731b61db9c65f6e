use super::*;
use crate::api::tests::{MockHttp, ok, setup_client, user_json};
use crate::navigator::testing::RecordingNavigator;
use crate::storage::MemoryStore;
use serde_json::json;

type TestSession = SessionManager<MockHttp, MemoryStore, RecordingNavigator>;

fn setup_session() -> (Rc<TestSession>, MockHttp, MemoryStore, RecordingNavigator) {
    let (client, http, store, nav) = setup_client();
    (Rc::new(SessionManager::new(client)), http, store, nav)
}

/// Records every published snapshot
fn record(session: &TestSession) -> Rc<RefCell<Vec<SessionState>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    session.subscribe(move |s| sink.borrow_mut().push(s.clone()));
    seen
}

fn seed_session(store: &MemoryStore) {
    store.set("authToken", "tok-1");
    store.set("user", &user_json("Sam").to_string());
}

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "sam@example.com".into(),
        password: "hunter22".into(),
    }
}

// =========================================================
// Hydration
// =========================================================

#[tokio::test]
async fn restore_is_optimistic_before_confirmation() {
    let (session, http, store, _) = setup_session();
    seed_session(&store);
    assert!(session.state().is_loading);

    assert!(session.restore());

    let state = session.state();
    assert!(state.is_authenticated);
    assert!(state.is_loading);
    assert_eq!(state.user.unwrap().first_name, "Sam");
    assert_eq!(http.request_count(), 0);

    http.respond(200, ok(user_json("Samuel")));
    session.confirm().await;

    let state = session.state();
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.user.unwrap().first_name, "Samuel");
    assert!(store.get("user").unwrap().contains("Samuel"));
    assert_eq!(
        http.last_request().unwrap().header("Authorization"),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn hydrate_reverts_when_confirmation_fails() {
    let (session, http, store, nav) = setup_session();
    seed_session(&store);
    let seen = record(&session);
    http.fail("offline");

    session.hydrate().await;

    let seen = seen.borrow();
    assert!(seen[0].is_authenticated && seen[0].is_loading);
    let last = seen.last().unwrap();
    assert!(!last.is_authenticated);
    assert!(!last.is_loading);
    assert!(last.user.is_none());
    assert!(store.is_empty());
    // Transport failures do not trigger the expiry redirect
    assert!(nav.visits().is_empty());
}

#[tokio::test]
async fn hydrate_reverts_when_profile_is_rejected() {
    let (session, http, store, nav) = setup_session();
    seed_session(&store);
    http.respond(200, json!({ "success": false, "message": "User not found" }));

    session.hydrate().await;

    assert!(!session.is_authenticated());
    assert!(!session.state().is_loading);
    assert!(store.is_empty());
    assert!(nav.visits().is_empty());
}

#[tokio::test]
async fn hydrate_with_expired_token_redirects_to_login() {
    let (session, http, store, nav) = setup_session();
    seed_session(&store);
    http.respond(401, json!({ "success": false, "message": "Token expired" }));

    session.hydrate().await;

    assert!(!session.is_authenticated());
    assert!(store.is_empty());
    assert_eq!(nav.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn hydrate_without_stored_session_skips_network() {
    let (session, http, _, _) = setup_session();

    session.hydrate().await;

    let state = session.state();
    assert!(!state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn unreadable_cached_user_is_discarded() {
    let (session, http, store, _) = setup_session();
    store.set("authToken", "tok-1");
    store.set("user", "{not json");

    session.hydrate().await;

    assert!(!session.is_authenticated());
    assert!(!session.state().is_loading);
    assert!(store.is_empty());
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn token_without_user_is_discarded() {
    let (session, _, store, _) = setup_session();
    store.set("authToken", "tok-1");

    assert!(!session.restore());
    assert!(!store.contains("authToken"));
}

// =========================================================
// Login / Register
// =========================================================

#[tokio::test]
async fn login_success_persists_before_publishing() {
    let (session, http, store, _) = setup_session();
    let observed_store = store.clone();
    let storage_at_publish = Rc::new(RefCell::new(Vec::new()));
    let sink = storage_at_publish.clone();
    session.subscribe(move |s| {
        if s.is_authenticated {
            sink.borrow_mut().push(observed_store.get("authToken"));
        }
    });
    http.respond(200, ok(json!({ "token": "fresh", "user": user_json("Sam") })));

    let user = session.login(&credentials()).await.unwrap();

    assert_eq!(user.email, "sam@example.com");
    assert!(session.is_authenticated());
    assert_eq!(store.get("authToken").as_deref(), Some("fresh"));
    assert!(store.get("user").unwrap().contains("sam@example.com"));
    assert_eq!(*storage_at_publish.borrow(), vec![Some("fresh".to_string())]);
}

#[tokio::test]
async fn login_rejection_leaves_session_untouched() {
    let (session, http, store, _) = setup_session();
    let seen = record(&session);
    http.respond(200, json!({ "success": false, "message": "Invalid email or password" }));

    let err = session.login(&credentials()).await.unwrap_err();

    assert_eq!(err, "Invalid email or password");
    assert!(!session.is_authenticated());
    assert!(store.is_empty());
    assert!(seen.borrow().is_empty());
}

#[tokio::test]
async fn login_network_failure_uses_generic_message() {
    let (session, http, store, _) = setup_session();
    http.fail("dns");

    let err = session.login(&credentials()).await.unwrap_err();

    assert_eq!(err, "Login failed");
    assert!(store.is_empty());
}

#[tokio::test]
async fn register_signs_in_immediately() {
    let (session, http, store, _) = setup_session();
    http.respond(200, ok(json!({ "token": "new-tok", "user": user_json("Nia") })));

    let user = session
        .register(&RegisterRequest {
            email: "nia@example.com".into(),
            password: "secret1".into(),
            first_name: "Nia".into(),
            last_name: "Builder".into(),
            phone: None,
            user_type: builder360_shared::UserType::Provider,
        })
        .await
        .unwrap();

    assert_eq!(user.first_name, "Nia");
    assert!(session.state().is_provider());
    assert_eq!(store.get("authToken").as_deref(), Some("new-tok"));
    assert!(http.last_request().unwrap().url.ends_with("/auth/register"));
}

// =========================================================
// Logout
// =========================================================

#[tokio::test]
async fn logout_clears_everything_from_any_state() {
    let (session, http, store, _) = setup_session();

    // Already logged out
    session.logout();
    assert!(!session.is_authenticated());
    assert!(store.is_empty());

    http.respond(200, ok(json!({ "token": "t", "user": user_json("Sam") })));
    session.login(&credentials()).await.unwrap();
    assert!(session.is_authenticated());

    session.logout();

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(!store.contains("authToken"));
    assert!(!store.contains("user"));
    // Purely local
    assert_eq!(http.request_count(), 1);
}

// =========================================================
// Profile
// =========================================================

#[tokio::test]
async fn update_profile_replaces_cached_user() {
    let (session, http, store, _) = setup_session();
    seed_session(&store);
    session.restore();
    http.respond(200, ok(user_json("Samantha")));

    let user = session
        .update_profile(&UpdateProfileRequest {
            first_name: "Samantha".into(),
            last_name: "Builder".into(),
            phone: String::new(),
            profile_image_url: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(user.first_name, "Samantha");
    assert_eq!(session.user().unwrap().first_name, "Samantha");
    assert!(store.get("user").unwrap().contains("Samantha"));
    assert_eq!(
        http.last_request().unwrap().method,
        builder360_shared::HttpMethod::Put
    );
}

#[tokio::test]
async fn update_profile_rejection_keeps_user() {
    let (session, http, store, _) = setup_session();
    seed_session(&store);
    session.restore();
    http.respond(400, json!({ "success": false, "message": "Phone is invalid" }));

    let err = session
        .update_profile(&UpdateProfileRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err, "Phone is invalid");
    assert_eq!(session.user().unwrap().first_name, "Sam");
    assert!(store.get("user").unwrap().contains("Sam"));
}

#[tokio::test]
async fn refresh_profile_updates_user() {
    let (session, http, store, _) = setup_session();
    seed_session(&store);
    session.restore();
    http.respond(200, ok(user_json("Sammy")));

    session.refresh_profile().await.unwrap();

    assert_eq!(session.user().unwrap().first_name, "Sammy");
}

#[tokio::test]
async fn change_password_does_not_touch_session() {
    let (session, http, store, _) = setup_session();
    seed_session(&store);
    session.restore();
    http.respond(200, json!({ "success": false, "message": "Current password is incorrect" }));

    let err = session
        .change_password(&ChangePasswordRequest {
            current_password: "nope".into(),
            new_password: "secret2".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, "Current password is incorrect");
    assert!(session.is_authenticated());
    assert!(store.contains("authToken"));
}
