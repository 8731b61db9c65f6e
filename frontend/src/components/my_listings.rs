use crate::auth::use_auth;
use crate::components::create_listing::ProvidersOnly;
use crate::components::icons::{Eye, Plus, Star};
use crate::components::listing_card::{ErrorAlert, ListingSkeleton};
use crate::web::router::Link;
use builder360::shared::Listing;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn MyListingsPage() -> impl IntoView {
    let auth = use_auth();
    let is_provider = auth.is_provider();

    view! {
        <div class="max-w-5xl mx-auto px-4 py-8">
            <Show when=move || is_provider.get() fallback=|| view! { <ProvidersOnly /> }>
                <MyListingsList />
            </Show>
        </div>
    }
}

#[component]
fn MyListingsList() -> impl IntoView {
    let auth = use_auth();

    let (listings, set_listings) = signal(Vec::<Listing>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let api = auth.api();
    spawn_local(async move {
        match api.my_listings().await {
            Ok(data) => set_listings.set(data),
            Err(e) => {
                builder360::log_error!("[MyListings] Failed to load listings: {}", e);
                set_error_msg.set(Some(e.user_message("Failed to load your listings")));
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"My Listings"</h1>
                    <p class="text-base-content/70">
                        {move || format!("{} listings", listings.with(Vec::len))}
                    </p>
                </div>
                <Link to="/create-listing" class="btn btn-primary gap-1">
                    <Plus attr:class="h-4 w-4" />
                    "New Listing"
                </Link>
            </div>

            <ErrorAlert message=error_msg />

            <Show
                when=move || !loading.get()
                fallback=|| (0..3).map(|_| view! { <ListingSkeleton /> }).collect_view()
            >
                <Show
                    when=move || listings.with(|l| !l.is_empty()) || error_msg.with(Option::is_some)
                    fallback=|| view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <h2 class="card-title">"No listings yet"</h2>
                                <p>"Create your first listing to start getting leads."</p>
                                <Link to="/create-listing" class="btn btn-primary mt-2">"Post a Listing"</Link>
                            </div>
                        </div>
                    }
                >
                    <div class="flex flex-col gap-4">
                        <For
                            each=move || listings.get()
                            key=|l| l.id
                            children=|listing| view! { <MyListingRow listing=listing /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn MyListingRow(listing: Listing) -> impl IntoView {
    let href = format!("/listings/{}", listing.id);
    let image = listing.primary_image().map(str::to_string);
    let title = listing.title.clone();

    view! {
        <div class="card card-side bg-base-100 shadow">
            <figure class="bg-base-300 w-40 shrink-0">
                {image.map(|src| view! { <img src=src class="object-cover w-full h-full" /> })}
            </figure>
            <div class="card-body p-4 gap-2">
                <div class="flex flex-wrap items-center gap-2">
                    <Link to=href class="card-title text-lg link-hover">{title}</Link>
                    {listing.is_featured.then(|| view! { <span class="badge badge-secondary">"Featured"</span> })}
                    {listing.is_verified.then(|| view! { <span class="badge badge-success">"Verified"</span> })}
                    {(!listing.is_active).then(|| view! { <span class="badge badge-ghost">"Inactive"</span> })}
                </div>
                <p class="text-sm text-base-content/70">{listing.excerpt()}</p>
                <div class="flex gap-4 text-sm text-base-content/60">
                    <span class="flex items-center gap-1">
                        <Star attr:class="h-4 w-4 text-warning" />
                        {listing.rating_label()}
                        " (" {listing.review_count} ")"
                    </span>
                    <span class="flex items-center gap-1">
                        <Eye attr:class="h-4 w-4" />
                        {listing.view_count} " views"
                    </span>
                </div>
            </div>
        </div>
    }
}
