use crate::auth::use_auth;
use crate::components::icons::{LayoutGrid, List, Search};
use crate::components::listing_card::{ErrorAlert, ListingCard, ListingSkeleton};
use crate::web::router::use_router;
use builder360::search::{ListingFilters, ViewMode};
use builder360::shared::{Category, Listing, SortOrder};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ListingsPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let page_size = auth.session().api().config().listings_page_size;

    let filters = RwSignal::new(ListingFilters::from_query_string(&router.query().get_untracked()));
    let (view_mode, set_view_mode) = signal(ViewMode::Grid);
    let (listings, set_listings) = signal(Vec::<Listing>::new());
    let (total, set_total) = signal(0u32);
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let api = auth.api();
    spawn_local(async move {
        match api.categories().await {
            Ok(list) => set_categories.set(list),
            Err(e) => builder360::log_warn!("[Listings] Failed to load categories: {}", e),
        }
    });

    let search = move || {
        let query = filters.get_untracked().to_listing_query(page_size);
        let api = auth.api();
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api.listings(&query).await {
                Ok(page) => {
                    set_total.set(page.total_count.max(page.data.len() as u32));
                    set_listings.set(page.data);
                }
                Err(e) => {
                    builder360::log_error!("[Listings] Search failed: {}", e);
                    set_listings.set(Vec::new());
                    set_error_msg.set(Some(e.user_message("Failed to load listings")));
                }
            }
            set_loading.set(false);
        });
    };

    // Re-read the address bar whenever it changes underneath us (header
    // search, category links, back/forward) and run the search
    Effect::new(move |_| {
        let query = router.query().get();
        let from_url = ListingFilters::from_query_string(&query);
        filters.update(|f| {
            f.keyword = from_url.keyword;
            f.category_id = from_url.category_id;
        });
        search();
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let location = filters.with_untracked(ListingFilters::to_location);
        if query_changed(&router.query().get_untracked(), &location) {
            // The effect above runs the search
            router.replace_query(&location);
        } else {
            search();
        }
    };

    let on_clear = move |_| {
        filters.update(ListingFilters::clear);
        if router.query().get_untracked().is_empty() {
            search();
        } else {
            router.replace_query("/listings");
        }
    };

    let category_value = move || {
        filters
            .with(|f| f.category_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    };
    let rating_value = move || {
        filters
            .with(|f| f.min_rating)
            .map(|r| r.to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8 grid lg:grid-cols-4 gap-8">
            <aside class="lg:col-span-1">
                <form class="card bg-base-100 shadow" on:submit=on_submit>
                    <div class="card-body gap-3">
                        <h2 class="card-title text-lg">"Filters"</h2>

                        <label class="form-control">
                            <span class="label-text">"Keyword"</span>
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                placeholder="e.g. roofing"
                                prop:value=move || filters.with(|f| f.keyword.clone())
                                on:input=move |ev| filters.update(|f| f.keyword = event_target_value(&ev))
                            />
                        </label>

                        <label class="form-control">
                            <span class="label-text">"Category"</span>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=category_value
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    filters.update(|f| f.category_id = value.parse().ok());
                                }
                            >
                                <option value="">"All categories"</option>
                                <For
                                    each=move || categories.get()
                                    key=|c| c.id
                                    children=move |c| {
                                        let id = c.id.to_string();
                                        let selected = id.clone();
                                        view! {
                                            <option value=id selected=move || category_value() == selected>
                                                {c.name}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </label>

                        <label class="form-control">
                            <span class="label-text">"City"</span>
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                prop:value=move || filters.with(|f| f.city.clone())
                                on:input=move |ev| filters.update(|f| f.city = event_target_value(&ev))
                            />
                        </label>

                        <label class="form-control">
                            <span class="label-text">"State"</span>
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                prop:value=move || filters.with(|f| f.state.clone())
                                on:input=move |ev| filters.update(|f| f.state = event_target_value(&ev))
                            />
                        </label>

                        <label class="form-control">
                            <span class="label-text">"Minimum rating"</span>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=rating_value
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    filters.update(|f| f.min_rating = value.parse().ok());
                                }
                            >
                                <option value="">"Any rating"</option>
                                {(1..=4u8).rev().map(|r| view! {
                                    <option value=r.to_string()>{format!("{}+ stars", r)}</option>
                                }).collect_view()}
                            </select>
                        </label>

                        <div class="card-actions mt-2">
                            <button type="submit" class="btn btn-primary btn-sm flex-1 gap-1">
                                <Search attr:class="h-4 w-4" />
                                "Search"
                            </button>
                            <button type="button" class="btn btn-ghost btn-sm" on:click=on_clear>
                                "Clear All"
                            </button>
                        </div>
                    </div>
                </form>
            </aside>

            <section class="lg:col-span-3 space-y-4">
                <div class="flex flex-wrap items-center justify-between gap-2">
                    <p class="text-base-content/70">
                        {move || if loading.get() {
                            "Searching...".to_string()
                        } else {
                            format!("{} services found", total.get())
                        }}
                    </p>
                    <div class="flex items-center gap-2">
                        <select
                            class="select select-bordered select-sm"
                            prop:value=move || filters.with(|f| f.sort_by.as_str())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.sort_by = SortOrder::parse(&value));
                                search();
                            }
                        >
                            {SortOrder::ALL.into_iter().map(|s| view! {
                                <option value=s.as_str()>{s.label()}</option>
                            }).collect_view()}
                        </select>
                        <div class="join">
                            <button
                                class=move || toggle_class(view_mode.get() == ViewMode::Grid)
                                on:click=move |_| set_view_mode.set(ViewMode::Grid)
                                aria-label="Grid view"
                            >
                                <LayoutGrid attr:class="h-4 w-4" />
                            </button>
                            <button
                                class=move || toggle_class(view_mode.get() == ViewMode::List)
                                on:click=move |_| set_view_mode.set(ViewMode::List)
                                aria-label="List view"
                            >
                                <List attr:class="h-4 w-4" />
                            </button>
                        </div>
                    </div>
                </div>

                <ErrorAlert message=error_msg />

                <div class=move || match view_mode.get() {
                    ViewMode::Grid => "grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-6",
                    ViewMode::List => "flex flex-col gap-4",
                }>
                    <Show
                        when=move || !loading.get()
                        fallback=|| (0..6).map(|_| view! { <ListingSkeleton /> }).collect_view()
                    >
                        <Show
                            when=move || listings.with(|l| !l.is_empty()) || error_msg.with(Option::is_some)
                            fallback=|| view! {
                                <div class="col-span-full text-center py-16 text-base-content/60">
                                    "No services match your filters."
                                </div>
                            }
                        >
                            {move || {
                                let mode = view_mode.get();
                                listings
                                    .get()
                                    .into_iter()
                                    .map(|listing| view! { <ListingCard listing=listing mode=mode /> })
                                    .collect_view()
                            }}
                        </Show>
                    </Show>
                </div>
            </section>
        </div>
    }
}

fn toggle_class(active: bool) -> &'static str {
    if active {
        "btn btn-sm join-item btn-active"
    } else {
        "btn btn-sm join-item"
    }
}

/// Whether `location` carries different synchronised params than `current`
fn query_changed(current: &str, location: &str) -> bool {
    let next = location.split_once('?').map(|(_, q)| q).unwrap_or_default();
    ListingFilters::from_query_string(current).to_query_string()
        != ListingFilters::from_query_string(next).to_query_string()
}
