use crate::auth::{logout, use_auth};
use crate::components::icons::{HardHat, LogOut, Plus};
use crate::web::router::{Link, use_navigate};
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let user = auth.user();
    let is_provider = auth.is_provider();
    let is_authenticated = auth.is_authenticated_signal();

    let on_logout = move |_| {
        logout(&auth);
        navigate("/");
    };

    let initials = move || user.get().map(|u| u.initials()).unwrap_or_default();
    let avatar = move || user.get().and_then(|u| u.profile_image_url).filter(|u| !u.is_empty());
    let display_name = move || user.get().map(|u| u.display_name()).unwrap_or_default();

    view! {
        <header class="navbar bg-base-100 shadow-sm sticky top-0 z-40 px-4">
            <div class="flex-1 gap-2">
                <Link to="/" class="btn btn-ghost text-xl gap-2">
                    <HardHat attr:class="h-6 w-6 text-primary" />
                    "Builder360"
                </Link>
                <Link to="/listings" class="btn btn-ghost btn-sm hidden md:inline-flex">
                    "Find Services"
                </Link>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <Link to="/login" class="btn btn-ghost btn-sm">"Sign In"</Link>
                        <Link to="/register" class="btn btn-primary btn-sm">"Sign Up"</Link>
                    }
                >
                    <Show when=move || is_provider.get()>
                        <Link to="/create-listing" class="btn btn-primary btn-sm gap-1">
                            <Plus attr:class="h-4 w-4" />
                            "Post"
                        </Link>
                    </Show>
                    <div class="dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost btn-circle avatar placeholder">
                            {move || match avatar() {
                                Some(src) => view! {
                                    <div class="w-10 rounded-full">
                                        <img src=src alt="avatar" />
                                    </div>
                                }.into_any(),
                                None => view! {
                                    <div class="bg-neutral text-neutral-content w-10 rounded-full">
                                        <span>{initials}</span>
                                    </div>
                                }.into_any(),
                            }}
                        </div>
                        <ul tabindex="0" class="menu menu-sm dropdown-content bg-base-100 rounded-box z-50 mt-3 w-52 p-2 shadow">
                            <li class="menu-title">{display_name}</li>
                            <li><Link to="/profile">"Profile"</Link></li>
                            <Show when=move || is_provider.get()>
                                <li><Link to="/my-listings">"My Listings"</Link></li>
                            </Show>
                            <li>
                                <a on:click=on_logout.clone()>
                                    <LogOut attr:class="h-4 w-4" />
                                    "Sign Out"
                                </a>
                            </li>
                        </ul>
                    </div>
                </Show>
            </div>
        </header>
    }
}
