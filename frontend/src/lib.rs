//! Builder360 front-end
//!
//! Context-driven layout:
//! - `web::router`: router service over the History API
//! - `web::{http, storage}`: browser implementations of the core traits
//! - `auth`: session context bridging `builder360::SessionManager` into signals
//! - `components`: route views

mod auth;
mod components {
    pub mod create_listing;
    pub mod footer;
    pub mod header;
    pub mod home;
    mod icons;
    pub mod listing_card;
    pub mod listing_detail;
    pub mod listings;
    pub mod login;
    pub mod my_listings;
    pub mod profile;
    pub mod register;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::create_listing::CreateListingPage;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::home::HomePage;
use crate::components::listing_detail::ListingDetailPage;
use crate::components::listings::ListingsPage;
use crate::components::login::LoginPage;
use crate::components::my_listings::MyListingsPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;

use leptos::prelude::*;

// Browser-backed implementations of the core crate's traits
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use router::BrowserNavigator;
    pub use storage::AppStore;
}

use builder360::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// Map each route to its view
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Listings => view! { <ListingsPage /> }.into_any(),
        AppRoute::ListingDetail(id) => view! { <ListingDetailPage id=id /> }.into_any(),
        AppRoute::CreateListing => view! { <CreateListingPage /> }.into_any(),
        AppRoute::MyListings => view! { <MyListingsPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[70vh]">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to="/" class="btn btn-primary">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session context
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. Restore the stored session before the router reads the flag
    init_auth(&auth_ctx);

    // 3. The router only sees this signal
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <Header />
                <main>
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
        </Router>
    }
}
