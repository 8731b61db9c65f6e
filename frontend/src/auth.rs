//! Auth context
//!
//! Bridges the core `SessionManager` into Leptos: every state the manager
//! publishes is mirrored into a signal, and views reach the manager through
//! `use_auth`. The router only sees the injected `is_authenticated` signal.

use crate::web::{AppStore, BrowserNavigator, FetchClient};
use builder360::shared::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
};
use builder360::{ApiClient, ClientConfig, SessionManager, SessionState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

pub type AppApi = ApiClient<FetchClient, AppStore, BrowserNavigator>;
pub type AppSession = SessionManager<FetchClient, AppStore, BrowserNavigator>;

/// Shared through context. Copy, so closures can capture it freely.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<SessionState>,
    session: StoredValue<Rc<AppSession>, LocalStorage>,
}

impl AuthContext {
    /// Build the client stack and hook the manager up to a signal.
    pub fn new() -> Self {
        let api = ApiClient::new(
            ClientConfig::from_build_env(),
            FetchClient,
            AppStore::detect(),
            BrowserNavigator,
        );
        let session = Rc::new(SessionManager::new(api));

        let (state, set_state) = signal(session.state());
        session.subscribe(move |s| set_state.set(s.clone()));

        Self {
            state,
            session: StoredValue::new_local(session),
        }
    }

    pub fn session(&self) -> Rc<AppSession> {
        self.session.get_value()
    }

    pub fn api(&self) -> AppApi {
        self.session().api().clone()
    }

    /// Injected into the router
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.get().user)
    }

    pub fn is_provider(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_provider())
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Restore the stored session right away, then confirm it with the backend
/// in the background. The restore is synchronous so the router's first
/// guard check already sees the cached session.
pub fn init_auth(ctx: &AuthContext) {
    let session = ctx.session();
    if session.restore() {
        spawn_local(async move {
            session.confirm().await;
        });
    }
}

pub async fn login(ctx: &AuthContext, credentials: LoginRequest) -> Result<User, String> {
    ctx.session().login(&credentials).await
}

pub async fn register(ctx: &AuthContext, user_data: RegisterRequest) -> Result<User, String> {
    ctx.session().register(&user_data).await
}

/// Local only. The router moves the user off protected pages.
pub fn logout(ctx: &AuthContext) {
    ctx.session().logout();
}

pub async fn update_profile(ctx: &AuthContext, data: UpdateProfileRequest) -> Result<User, String> {
    ctx.session().update_profile(&data).await
}

pub async fn change_password(ctx: &AuthContext, data: ChangePasswordRequest) -> Result<(), String> {
    ctx.session().change_password(&data).await
}
