//! Route table and navigation guard
//!
//! Pure routing logic with no DOM access. The front-end router feeds it the
//! browser path and the session flag, then applies whatever it decides.

use std::fmt::Display;

/// Application routes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Listings,
    ListingDetail(i64),
    /// Provider only, requires a session
    CreateListing,
    /// Provider only, requires a session
    MyListings,
    /// Requires a session
    Profile,
    Login,
    Register,
    NotFound,
}

impl AppRoute {
    /// Parse a browser path. Query string and fragment are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Self::Home,
            "/listings" => Self::Listings,
            "/create-listing" => Self::CreateListing,
            "/my-listings" => Self::MyListings,
            "/profile" => Self::Profile,
            "/login" => Self::Login,
            "/register" => Self::Register,
            other => match other.strip_prefix("/listings/").map(str::parse::<i64>) {
                Some(Ok(id)) => Self::ListingDetail(id),
                _ => Self::NotFound,
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Listings => "/listings".to_string(),
            Self::ListingDetail(id) => format!("/listings/{}", id),
            Self::CreateListing => "/create-listing".to_string(),
            Self::MyListings => "/my-listings".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::CreateListing | Self::MyListings | Self::Profile)
    }

    /// Views that only make sense for service providers
    pub fn requires_provider(&self) -> bool {
        matches!(self, Self::CreateListing | Self::MyListings)
    }

    /// Authenticated users are moved away from these
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// Guard
// =========================================================

/// Outcome of a guarded navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub route: AppRoute,
    /// Path to show in the address bar
    pub path: String,
    /// Whether the guard replaced the requested route
    pub redirected: bool,
}

impl Resolved {
    fn allow(route: AppRoute, path: &str) -> Self {
        Self {
            route,
            path: path.to_string(),
            redirected: false,
        }
    }

    fn redirect(route: AppRoute, path: String) -> Self {
        Self {
            route,
            path,
            redirected: true,
        }
    }
}

/// Session-aware navigation guard.
///
/// Remembers the protected path an anonymous user was turned away from so
/// the login flow can return there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGuard {
    return_to: Option<String>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn return_to(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    /// Decide where a request for `path` actually lands.
    pub fn resolve(&mut self, path: &str, is_authenticated: bool) -> Resolved {
        let route = AppRoute::from_path(path);

        if route.requires_auth() && !is_authenticated {
            crate::log_info!("[Router] {} requires a session, redirecting to login", route);
            self.return_to = Some(path.to_string());
            let target = AppRoute::auth_failure_redirect();
            let target_path = target.to_path();
            return Resolved::redirect(target, target_path);
        }

        if route.should_redirect_when_authenticated() && is_authenticated {
            return self.leave_auth_page();
        }

        Resolved::allow(route, path)
    }

    /// Re-run the guard after the session flag changed.
    ///
    /// Returns `None` when the current route may stay.
    pub fn on_auth_change(&mut self, current: &AppRoute, is_authenticated: bool) -> Option<Resolved> {
        if is_authenticated && current.should_redirect_when_authenticated() {
            crate::log_info!("[Router] Signed in, leaving {}", current);
            return Some(self.leave_auth_page());
        }
        if !is_authenticated && current.requires_auth() {
            crate::log_info!("[Router] Signed out, leaving {}", current);
            let target = AppRoute::auth_failure_redirect();
            let target_path = target.to_path();
            return Some(Resolved::redirect(target, target_path));
        }
        None
    }

    /// Send an authenticated user to the remembered page, or home.
    fn leave_auth_page(&mut self) -> Resolved {
        match self.return_to.take() {
            Some(path) => Resolved::redirect(AppRoute::from_path(&path), path),
            None => {
                let target = AppRoute::auth_success_redirect();
                let target_path = target.to_path();
                Resolved::redirect(target, target_path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/listings?keyword=roof"), AppRoute::Listings);
        assert_eq!(AppRoute::from_path("/listings/42"), AppRoute::ListingDetail(42));
        assert_eq!(AppRoute::from_path("/listings/42/"), AppRoute::ListingDetail(42));
        assert_eq!(AppRoute::from_path("/listings/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/my-listings"), AppRoute::MyListings);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Listings,
            AppRoute::ListingDetail(7),
            AppRoute::CreateListing,
            AppRoute::MyListings,
            AppRoute::Profile,
            AppRoute::Login,
            AppRoute::Register,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn protected_routes_redirect_anonymous_users() {
        let mut guard = RouteGuard::new();

        let resolved = guard.resolve("/create-listing", false);

        assert_eq!(resolved.route, AppRoute::Login);
        assert_eq!(resolved.path, "/login");
        assert!(resolved.redirected);
        assert_eq!(guard.return_to(), Some("/create-listing"));
    }

    #[test]
    fn public_routes_pass_through() {
        let mut guard = RouteGuard::new();
        let resolved = guard.resolve("/listings?categoryId=3", false);
        assert_eq!(resolved.route, AppRoute::Listings);
        assert_eq!(resolved.path, "/listings?categoryId=3");
        assert!(!resolved.redirected);

        assert!(!guard.resolve("/profile", true).redirected);
    }

    #[test]
    fn auth_pages_redirect_authenticated_users_home() {
        let mut guard = RouteGuard::new();
        for path in ["/login", "/register"] {
            let resolved = guard.resolve(path, true);
            assert_eq!(resolved.route, AppRoute::Home);
            assert!(resolved.redirected);
        }
    }

    #[test]
    fn sign_in_returns_to_remembered_route() {
        let mut guard = RouteGuard::new();
        guard.resolve("/profile", false);

        let resolved = guard.on_auth_change(&AppRoute::Login, true).unwrap();

        assert_eq!(resolved.route, AppRoute::Profile);
        assert_eq!(resolved.path, "/profile");
        // Only once
        assert_eq!(guard.return_to(), None);
        let next = guard.on_auth_change(&AppRoute::Login, true).unwrap();
        assert_eq!(next.route, AppRoute::Home);
    }

    #[test]
    fn sign_out_leaves_protected_routes_only() {
        let mut guard = RouteGuard::new();
        let resolved = guard.on_auth_change(&AppRoute::MyListings, false).unwrap();
        assert_eq!(resolved.route, AppRoute::Login);

        assert_eq!(guard.on_auth_change(&AppRoute::Listings, false), None);
        assert_eq!(guard.on_auth_change(&AppRoute::Profile, true), None);
    }

    #[test]
    fn provider_only_routes() {
        assert!(AppRoute::CreateListing.requires_provider());
        assert!(AppRoute::MyListings.requires_provider());
        assert!(!AppRoute::Profile.requires_provider());
    }
}
