//! Session management
//!
//! Owns the client-side session lifecycle: persisting the token and user to
//! storage, hydrating them on start-up, and tearing them down on logout or
//! when the backend stops accepting the token.
//!
//! The manager is the single writer. Views observe it through
//! [`SessionManager::subscribe`]; the front-end mirrors every published
//! state into a reactive signal.

use crate::api::{ApiClient, ApiError};
use crate::navigator::Navigator;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use builder360_shared::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
};
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(test)]
mod tests;

/// Snapshot of the session as seen by views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Cached user record (present only when authenticated)
    pub user: Option<User>,
    /// Whether a session is present
    pub is_authenticated: bool,
    /// Whether start-up hydration is still running
    pub is_loading: bool,
}

impl SessionState {
    /// State of a freshly started application, before hydration
    pub fn initial() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn is_provider(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_provider)
    }
}

type Listener = Rc<dyn Fn(&SessionState)>;

pub struct SessionManager<C, S, N> {
    api: ApiClient<C, S, N>,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<Listener>>,
}

impl<C, S, N> SessionManager<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(api: ApiClient<C, S, N>) -> Self {
        Self {
            api,
            state: RefCell::new(SessionState::initial()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &ApiClient<C, S, N> {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// Register an observer. It is called after every state change.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Apply a change and publish the new snapshot.
    ///
    /// No borrow is held while listeners run, so they may read the manager.
    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    // =========================================================
    // Hydration
    // =========================================================

    /// Full start-up sequence: [`restore`](Self::restore) then
    /// [`confirm`](Self::confirm).
    pub async fn hydrate(&self) {
        if self.restore() {
            self.confirm().await;
        }
    }

    /// Synchronous half of hydration.
    ///
    /// With both a token and a readable cached user in storage, the session
    /// is marked authenticated right away and `true` is returned; loading
    /// stays on until [`confirm`](Self::confirm) finishes. Otherwise loading
    /// ends unauthenticated.
    pub fn restore(&self) -> bool {
        let config = self.api.config();
        let store = self.api.store();
        let token = store.get(&config.token_key).filter(|t| !t.is_empty());
        let cached = store.get(&config.user_key);

        match (token, cached) {
            (Some(_), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    crate::log_info!("[Session] Restored session for {}", user.email);
                    self.update(|s| {
                        s.user = Some(user);
                        s.is_authenticated = true;
                        s.is_loading = true;
                    });
                    true
                }
                Err(e) => {
                    crate::log_error!("[Session] Cached user is unreadable: {}", e);
                    self.clear_session(|s| s.is_loading = false);
                    false
                }
            },
            (None, None) => {
                self.update(|s| s.is_loading = false);
                false
            }
            _ => {
                // Half a session is no session
                self.clear_session(|s| s.is_loading = false);
                false
            }
        }
    }

    /// Asynchronous half of hydration: verify the restored token against
    /// the backend. Any failure tears the session down, including a 2xx
    /// envelope with `success: false`.
    pub async fn confirm(&self) {
        if !self.is_authenticated() {
            self.update(|s| s.is_loading = false);
            return;
        }

        match self.api.profile().await {
            Ok(user) => {
                self.persist_user(&user);
                self.update(|s| {
                    s.user = Some(user);
                    s.is_loading = false;
                });
            }
            Err(e) => {
                crate::log_warn!("[Session] Token verification failed: {}", e);
                self.clear_session(|s| s.is_loading = false);
            }
        }
    }

    // =========================================================
    // Operations
    // =========================================================

    /// On failure the session is left untouched and the backend message
    /// (or a generic one) is returned.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, String> {
        match self.api.login(credentials).await {
            Ok(payload) => Ok(self.establish(payload.token, payload.user)),
            Err(e) => Err(failure(&e, "Login failed")),
        }
    }

    /// Same contract as [`login`](Self::login). A successful registration
    /// signs the new user in immediately.
    pub async fn register(&self, user_data: &RegisterRequest) -> Result<User, String> {
        match self.api.register(user_data).await {
            Ok(payload) => Ok(self.establish(payload.token, payload.user)),
            Err(e) => Err(failure(&e, "Registration failed")),
        }
    }

    /// Local only. No backend call.
    pub fn logout(&self) {
        self.clear_session(|_| {});
    }

    /// Re-fetch the profile and replace the cached user.
    pub async fn refresh_profile(&self) -> Result<User, String> {
        match self.api.profile().await {
            Ok(user) => Ok(self.replace_user(user)),
            Err(e) => Err(failure(&e, "Failed to load profile")),
        }
    }

    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> Result<User, String> {
        match self.api.update_profile(data).await {
            Ok(user) => Ok(self.replace_user(user)),
            Err(e) => Err(failure(&e, "Profile update failed")),
        }
    }

    /// Leaves the session as is; the token stays valid on the backend.
    pub async fn change_password(&self, data: &ChangePasswordRequest) -> Result<(), String> {
        self.api
            .change_password(data)
            .await
            .map_err(|e| failure(&e, "Failed to change password"))
    }

    // =========================================================
    // Internals
    // =========================================================

    /// Storage first, then publish.
    fn establish(&self, token: String, user: User) -> User {
        let config = self.api.config();
        self.api.store().set(&config.token_key, &token);
        self.persist_user(&user);
        crate::log_info!("[Session] Signed in as {}", user.email);
        self.update(|s| {
            s.user = Some(user.clone());
            s.is_authenticated = true;
        });
        user
    }

    fn replace_user(&self, user: User) -> User {
        self.persist_user(&user);
        self.update(|s| s.user = Some(user.clone()));
        user
    }

    fn persist_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                self.api.store().set(&self.api.config().user_key, &raw);
            }
            Err(e) => crate::log_error!("[Session] Could not serialize user: {}", e),
        }
    }

    fn clear_session(&self, extra: impl FnOnce(&mut SessionState)) {
        let config = self.api.config();
        self.api.store().delete(&config.token_key);
        self.api.store().delete(&config.user_key);
        crate::log_info!("[Session] Session cleared");
        self.update(|s| {
            s.user = None;
            s.is_authenticated = false;
            extra(s);
        });
    }
}

fn failure(e: &ApiError, fallback: &str) -> String {
    crate::log_warn!("[Session] {}", e);
    e.user_message(fallback)
}
