use crate::components::icons::{MapPin, Star};
use crate::web::router::Link;
use builder360::search::ViewMode;
use builder360::shared::Listing;
use leptos::prelude::*;

/// Card used by the home page and the search results
#[component]
pub fn ListingCard(
    listing: Listing,
    #[prop(optional)] mode: ViewMode,
) -> impl IntoView {
    let href = format!("/listings/{}", listing.id);
    let image = listing.primary_image().map(str::to_string);
    let rating = listing.rating_label();
    let location = listing.location();
    let excerpt = listing.excerpt();
    let category = listing.category_name.clone().unwrap_or_default();
    let price = listing.price_range.clone().filter(|p| !p.is_empty());
    let verified = listing.is_verified;
    let review_count = listing.review_count;
    let title = listing.title;

    let card_class = match mode {
        ViewMode::Grid => "card bg-base-100 shadow hover:shadow-lg transition-shadow h-full",
        ViewMode::List => "card card-side bg-base-100 shadow hover:shadow-lg transition-shadow",
    };

    view! {
        <Link to=href class="block">
            <div class=card_class>
                <figure class="bg-base-300 h-44 min-w-44">
                    {match image {
                        Some(src) => view! {
                            <img src=src alt=title.clone() class="object-cover w-full h-full" />
                        }.into_any(),
                        None => view! {
                            <span class="text-base-content/40 text-sm">"No image"</span>
                        }.into_any(),
                    }}
                </figure>
                <div class="card-body p-4 gap-2">
                    <div class="flex items-start justify-between gap-2">
                        <h3 class="card-title text-base">{title.clone()}</h3>
                        <Show when=move || verified>
                            <span class="badge badge-success badge-sm">"Verified"</span>
                        </Show>
                    </div>
                    <span class="text-xs uppercase tracking-wide text-primary">{category}</span>
                    <p class="text-sm text-base-content/70">{excerpt}</p>
                    <div class="flex items-center justify-between text-sm mt-auto">
                        <span class="flex items-center gap-1">
                            <Star attr:class="h-4 w-4 text-warning" />
                            {rating}
                            <span class="text-base-content/50">
                                "(" {review_count} ")"
                            </span>
                        </span>
                        <span class="flex items-center gap-1 text-base-content/60">
                            <MapPin attr:class="h-4 w-4" />
                            {location}
                        </span>
                    </div>
                    {price.map(|p| view! { <span class="badge badge-outline">{p}</span> })}
                </div>
            </div>
        </Link>
    }
}

/// Placeholder shown while listings load
#[component]
pub fn ListingSkeleton() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="skeleton h-44 w-full rounded-b-none"></div>
            <div class="card-body p-4 gap-3">
                <div class="skeleton h-5 w-3/4"></div>
                <div class="skeleton h-3 w-1/3"></div>
                <div class="skeleton h-3 w-full"></div>
                <div class="skeleton h-3 w-5/6"></div>
            </div>
        </div>
    }
}

/// Inline error box
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
