use crate::auth::use_auth;
use crate::components::icons::Search;
use crate::components::listing_card::{ErrorAlert, ListingCard, ListingSkeleton};
use crate::web::router::{Link, use_navigate};
use builder360::api::HomeFeed;
use builder360::search::ListingFilters;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Featured listings shown on the landing page
const FEATURED_COUNT: usize = 4;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let is_provider = auth.is_provider();

    let (feed, set_feed) = signal(Option::<HomeFeed>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (keyword, set_keyword) = signal(String::new());

    let api = auth.api();
    spawn_local(async move {
        match api.home_feed().await {
            Ok(data) => set_feed.set(Some(data)),
            Err(e) => {
                builder360::log_error!("[Home] Failed to load home feed: {}", e);
                set_error_msg.set(Some(e.user_message("Failed to load listings")));
            }
        }
        set_loading.set(false);
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let filters = ListingFilters {
            keyword: keyword.get_untracked(),
            ..Default::default()
        };
        navigate(&filters.to_location());
    };

    let categories = move || feed.with(|f| f.as_ref().map(|f| f.categories.clone()).unwrap_or_default());
    let featured = move || {
        feed.with(|f| {
            f.as_ref()
                .map(|f| f.listings.iter().take(FEATURED_COUNT).cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="space-y-12">
            <section class="hero bg-primary text-primary-content py-16">
                <div class="hero-content text-center flex-col max-w-2xl">
                    <h1 class="text-4xl md:text-5xl font-bold">"Find trusted local contractors"</h1>
                    <p class="opacity-80">"Compare ratings, see past work and get in touch directly."</p>
                    <form class="join w-full mt-4" on:submit=on_search>
                        <input
                            type="text"
                            class="input input-bordered join-item w-full text-base-content"
                            placeholder="What service do you need?"
                            prop:value=keyword
                            on:input=move |ev| set_keyword.set(event_target_value(&ev))
                        />
                        <button class="btn btn-secondary join-item gap-1">
                            <Search attr:class="h-4 w-4" />
                            "Search"
                        </button>
                    </form>
                </div>
            </section>

            <div class="max-w-6xl mx-auto px-4 space-y-12">
                <ErrorAlert message=error_msg />

                <section>
                    <h2 class="text-2xl font-bold mb-4">"Browse by category"</h2>
                    <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-4">
                        <Show
                            when=move || !loading.get()
                            fallback=|| (0..6).map(|_| view! { <div class="skeleton h-20"></div> }).collect_view()
                        >
                            <For
                                each=categories
                                key=|c| c.id
                                children=move |c| {
                                    let href = ListingFilters {
                                        category_id: Some(c.id),
                                        ..Default::default()
                                    }
                                    .to_location();
                                    view! {
                                        <Link to=href class="card bg-base-100 shadow hover:shadow-md h-20 items-center justify-center">
                                            <span class="font-medium">{c.name}</span>
                                        </Link>
                                    }
                                }
                            />
                        </Show>
                    </div>
                </section>

                <section>
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-2xl font-bold">"Featured services"</h2>
                        <Link to="/listings" class="link link-primary">"View all"</Link>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                        <Show
                            when=move || !loading.get()
                            fallback=|| (0..FEATURED_COUNT).map(|_| view! { <ListingSkeleton /> }).collect_view()
                        >
                            <For
                                each=featured
                                key=|l| l.id
                                children=|listing| view! { <ListingCard listing=listing /> }
                            />
                        </Show>
                    </div>
                </section>

                <section class="grid md:grid-cols-2 gap-6 pb-12">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title">"Looking for help?"</h3>
                            <p>"Search the directory by trade, city or rating."</p>
                            <div class="card-actions justify-end">
                                <Link to="/listings" class="btn btn-primary">"Find Services"</Link>
                            </div>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title">"Are you a contractor?"</h3>
                            <p>"List your business and reach new customers."</p>
                            <div class="card-actions justify-end">
                                {move || if is_provider.get() {
                                    view! { <Link to="/create-listing" class="btn btn-secondary">"Post a Listing"</Link> }.into_any()
                                } else {
                                    view! { <Link to="/register" class="btn btn-secondary">"Join as a Provider"</Link> }.into_any()
                                }}
                            </div>
                        </div>
                    </div>
                </section>
            </div>
        </div>
    }
}
