use crate::auth::use_auth;
use crate::components::icons::{BadgeCheck, Clock, Eye, Globe, Mail, MapPin, Phone, Star};
use crate::web::router::Link;
use builder360::ApiError;
use builder360::shared::{Listing, date};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn load_error(e: &ApiError) -> String {
    match e {
        ApiError::Status { status: 404, .. } => "Listing not found".to_string(),
        _ => "Failed to load listing".to_string(),
    }
}

#[component]
pub fn ListingDetailPage(id: i64) -> impl IntoView {
    let auth = use_auth();

    let (listing, set_listing) = signal(Option::<Listing>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (selected_image, set_selected_image) = signal(0usize);

    let api = auth.api();
    spawn_local(async move {
        match api.listing(id).await {
            Ok(data) => set_listing.set(Some(data)),
            Err(e) => {
                builder360::log_error!("[Listing] Failed to load listing {}: {}", id, e);
                set_error_msg.set(Some(load_error(&e)));
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            {move || {
                if loading.get() {
                    return view! {
                        <div class="flex justify-center py-24">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any();
                }
                match (listing.get(), error_msg.get()) {
                    (Some(l), _) => view! {
                        <ListingContent listing=l selected=selected_image set_selected=set_selected_image />
                    }
                    .into_any(),
                    (None, msg) => view! {
                        <div class="text-center py-24 space-y-4">
                            <h1 class="text-2xl font-bold">
                                {msg.unwrap_or_else(|| "Listing not found".to_string())}
                            </h1>
                            <Link to="/listings" class="btn btn-primary">"Back to listings"</Link>
                        </div>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn ListingContent(
    listing: Listing,
    selected: ReadSignal<usize>,
    set_selected: WriteSignal<usize>,
) -> impl IntoView {
    let images: Vec<String> = listing.images.iter().map(|i| i.image_url.clone()).collect();
    let image_count = images.len();
    let main_images = images.clone();
    let main_image = move || main_images.get(selected.get().min(image_count.saturating_sub(1))).cloned();

    let posted = date::format_date(&listing.created_at);
    let location = listing.location();
    let address = listing.address.clone().filter(|a| !a.is_empty());
    let contact_phone = listing.contact_phone.clone().filter(|p| !p.is_empty());
    let contact_email = listing.contact_email.clone().filter(|e| !e.is_empty());
    let website = listing.website.clone().filter(|w| !w.is_empty());
    let hours = listing.business_hours.clone().filter(|h| !h.is_empty());
    let price = listing.price_range.clone().filter(|p| !p.is_empty());

    view! {
        <div class="grid lg:grid-cols-3 gap-8">
            <div class="lg:col-span-2 space-y-6">
                <div class="space-y-2">
                    <div class="flex items-center gap-2 text-sm text-primary uppercase tracking-wide">
                        {listing.category_name.clone().unwrap_or_default()}
                        {listing.is_verified.then(|| view! {
                            <span class="badge badge-success gap-1">
                                <BadgeCheck attr:class="h-3 w-3" />
                                "Verified"
                            </span>
                        })}
                    </div>
                    <h1 class="text-3xl font-bold">{listing.title.clone()}</h1>
                    <div class="flex flex-wrap items-center gap-4 text-sm text-base-content/70">
                        <span class="flex items-center gap-1">
                            <Star attr:class="h-4 w-4 text-warning" />
                            {listing.rating_label()}
                            " (" {listing.review_count} " reviews)"
                        </span>
                        <span class="flex items-center gap-1">
                            <MapPin attr:class="h-4 w-4" />
                            {location}
                        </span>
                        <span class="flex items-center gap-1">
                            <Eye attr:class="h-4 w-4" />
                            {listing.view_count} " views"
                        </span>
                    </div>
                </div>

                <div class="space-y-3">
                    <figure class="bg-base-300 rounded-box h-80 flex items-center justify-center overflow-hidden">
                        {move || match main_image() {
                            Some(src) => view! { <img src=src class="object-cover w-full h-full" /> }.into_any(),
                            None => view! { <span class="text-base-content/40">"No images yet"</span> }.into_any(),
                        }}
                    </figure>
                    <Show when=move || { image_count > 1 }>
                        <div class="flex gap-2 overflow-x-auto">
                            {images
                                .iter()
                                .cloned()
                                .enumerate()
                                .map(|(idx, src)| view! {
                                    <button
                                        class=move || if selected.get() == idx {
                                            "rounded-box overflow-hidden ring-2 ring-primary"
                                        } else {
                                            "rounded-box overflow-hidden opacity-70 hover:opacity-100"
                                        }
                                        on:click=move |_| set_selected.set(idx)
                                    >
                                        <img src=src class="h-16 w-24 object-cover" />
                                    </button>
                                })
                                .collect_view()}
                        </div>
                    </Show>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"About this service"</h2>
                        <p class="whitespace-pre-line">{listing.description.clone()}</p>
                        <div class="flex flex-wrap gap-2 mt-2">
                            {price.map(|p| view! { <span class="badge badge-outline">{p}</span> })}
                            {listing.years_experience.map(|y| view! {
                                <span class="badge badge-outline">{format!("{} years experience", y)}</span>
                            })}
                        </div>
                        {posted.map(|d| view! {
                            <p class="text-xs text-base-content/50 mt-4">"Listed " {d}</p>
                        })}
                    </div>
                </div>
            </div>

            <aside class="space-y-4">
                <div class="card bg-base-100 shadow sticky top-20">
                    <div class="card-body gap-3">
                        <h2 class="card-title">"Contact"</h2>
                        {listing.provider_name.clone().map(|n| view! { <p class="font-medium">{n}</p> })}
                        {contact_phone.map(|p| {
                            let href = format!("tel:{}", p);
                            view! {
                                <a href=href class="btn btn-primary gap-2">
                                    <Phone attr:class="h-4 w-4" />
                                    {p}
                                </a>
                            }
                        })}
                        {contact_email.map(|e| {
                            let href = format!("mailto:{}", e);
                            view! {
                                <a href=href class="btn btn-outline gap-2">
                                    <Mail attr:class="h-4 w-4" />
                                    {e}
                                </a>
                            }
                        })}
                        {website.map(|w| view! {
                            <a href=w.clone() target="_blank" rel="noopener noreferrer" class="link flex items-center gap-2">
                                <Globe attr:class="h-4 w-4" />
                                {w.clone()}
                            </a>
                        })}
                        {hours.map(|h| view! {
                            <p class="flex items-center gap-2 text-sm">
                                <Clock attr:class="h-4 w-4" />
                                {h}
                            </p>
                        })}
                        {address.map(|a| view! {
                            <p class="flex items-center gap-2 text-sm">
                                <MapPin attr:class="h-4 w-4" />
                                {a}
                            </p>
                        })}
                    </div>
                </div>
            </aside>
        </div>
    }
}
