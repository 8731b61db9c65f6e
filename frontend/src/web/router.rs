//! Router service
//!
//! Wraps the History API: every `window.history` call lives here. Each
//! navigation runs request, guard, history update, then view swap. The
//! guard decisions themselves come from `builder360::route`.

use builder360::Navigator;
use builder360::route::{AppRoute, Resolved, RouteGuard};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// Current path plus query string, e.g. `/listings?keyword=roof`
fn current_location() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

fn query_of(location: &str) -> String {
    location
        .split_once('?')
        .map(|(_, q)| q.to_string())
        .unwrap_or_default()
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Forced navigation used by the API client when the backend answers 401.
///
/// Performs a full page load so every view and the session start over from
/// the now-empty storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        if location.pathname().is_ok_and(|p| p == path) {
            return;
        }
        if let Err(e) = location.set_href(path) {
            builder360::log_error!("[Router] Redirect to {} failed: {:?}", path, e);
        }
    }
}

/// Router service
///
/// Signals drive the view swap. The session flag is injected so routing
/// stays decoupled from the auth module.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Query string of the current location, without `?`
    query: RwSignal<String>,
    guard: StoredValue<RouteGuard>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::Home);
        let router = Self {
            current_route,
            set_route,
            query: RwSignal::new(String::new()),
            guard: StoredValue::new(RouteGuard::new()),
            is_authenticated,
        };
        // The initial location goes through the guard too
        router.go(&current_location(), false);
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn query(&self) -> RwSignal<String> {
        self.query
    }

    /// Navigate to `path` (may carry a query string) through the guard.
    pub fn navigate(&self, path: &str) {
        self.go(path, true);
    }

    /// Rewrite the query string of the current entry without navigating
    pub fn replace_query(&self, path: &str) {
        replace_history_state(path);
        self.query.set(query_of(path));
    }

    fn go(&self, path: &str, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let Some(resolved) = self.guard.try_update_value(|g| g.resolve(path, is_auth)) else {
            return;
        };
        self.apply(resolved, use_push);
    }

    fn apply(&self, resolved: Resolved, use_push: bool) {
        let Resolved { route, path, .. } = resolved;
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.query.set(query_of(&path));
        self.set_route.set(route);
        scroll_to_top();
    }

    /// Back/forward buttons run the same guard
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            router.go(&current_location(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Lives as long as the page
        closure.forget();
    }

    /// Re-check the current route whenever the session flag flips
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |prev: Option<bool>| {
            let is_auth = router.is_authenticated.get();
            if prev.is_some_and(|p| p != is_auth) {
                let route = router.current_route.get_untracked();
                if let Some(resolved) = router
                    .guard
                    .try_update_value(|g| g.on_auth_change(&route, is_auth))
                    .flatten()
                {
                    router.apply(resolved, true);
                }
            }
            is_auth
        });
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI components
// ============================================================================

/// Provides the router context. Place at the root of the app.
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Renders the view matching the current route
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link. Plain clicks go through the router; modified clicks
/// (new tab, new window) fall through to the browser.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
