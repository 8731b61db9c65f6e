//! Three-step listing wizard
//!
//! All step and validation state lives in `builder360::validation::ListingWizard`;
//! this module only renders it.

use crate::auth::use_auth;
use crate::components::listing_card::ErrorAlert;
use crate::web::router::{Link, use_navigate};
use builder360::shared::Category;
use builder360::validation::{ListingDraft, ListingStep, ListingWizard};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CreateListingPage() -> impl IntoView {
    let auth = use_auth();
    let is_provider = auth.is_provider();

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8">
            <Show when=move || is_provider.get() fallback=|| view! { <ProvidersOnly /> }>
                <ListingWizardForm />
            </Show>
        </div>
    }
}

#[component]
pub fn ProvidersOnly() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body items-center text-center">
                <h2 class="card-title">"Service providers only"</h2>
                <p>"Only service provider accounts can manage listings."</p>
                <Link to="/" class="btn btn-primary mt-2">"Back to home"</Link>
            </div>
        </div>
    }
}

#[component]
fn ListingWizardForm() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let wizard = RwSignal::new(ListingWizard::new(ListingDraft::for_user(
        auth.state.get_untracked().user.as_ref(),
    )));
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (submit_error, set_submit_error) = signal(Option::<String>::None);

    let api = auth.api();
    spawn_local(async move {
        match api.categories().await {
            Ok(list) => set_categories.set(list),
            Err(e) => builder360::log_warn!("[CreateListing] Failed to load categories: {}", e),
        }
    });

    let step = move || wizard.with(|w| w.step);

    let on_next = move |_| {
        wizard.update(|w| {
            w.advance();
        });
    };
    let on_back = move |_| {
        wizard.update(|w| {
            w.back();
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !wizard.with_untracked(|w| w.step.is_last()) {
            wizard.update(|w| {
                w.advance();
            });
            return;
        }

        let Some(Ok(req)) = wizard.try_update(|w| w.submit()) else {
            return;
        };

        set_is_submitting.set(true);
        set_submit_error.set(None);
        let api = auth.api();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.create_listing(&req).await {
                Ok(listing) => {
                    builder360::log_info!("[CreateListing] Created listing {}", listing.id);
                    navigate("/my-listings");
                }
                Err(e) => {
                    set_submit_error.set(Some(e.user_message("Failed to create listing")));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Post a Listing"</h1>
                <p class="text-base-content/70">"Tell customers what you do and where you work."</p>
            </div>

            <ul class="steps w-full">
                {ListingStep::ALL.into_iter().map(|s| view! {
                    <li class={move || if step() >= s { "step step-primary" } else { "step" }}>
                        {s.title()}
                    </li>
                }).collect_view()}
            </ul>

            <form class="card bg-base-100 shadow" on:submit=on_submit>
                <div class="card-body gap-4">
                    <ErrorAlert message=submit_error />

                    {move || match step() {
                        ListingStep::BasicInfo => view! {
                            <div class="form-control">
                                <label class="label" for="categoryId">
                                    <span class="label-text">"Category *"</span>
                                </label>
                                <select
                                    id="categoryId"
                                    class=move || input_class("select select-bordered", wizard, "categoryId")
                                    prop:value=move || wizard.with(|w| w.draft.category_id.clone())
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        wizard.update(|w| w.edit("categoryId", |d| d.category_id = value));
                                    }
                                >
                                    <option value="">"Select a category"</option>
                                    <For
                                        each=move || categories.get()
                                        key=|c| c.id
                                        children=|c| view! { <option value=c.id.to_string()>{c.name}</option> }
                                    />
                                </select>
                                <FieldError wizard=wizard field="categoryId" />
                            </div>
                            <TextField wizard=wizard field="title" label="Title *" placeholder="e.g. Kitchen & bath remodeling"
                                get=|d| d.title.clone() set=|d, v| d.title = v />
                            <TextField wizard=wizard field="description" label="Description *" multiline=true
                                get=|d| d.description.clone() set=|d, v| d.description = v />
                            <TextField wizard=wizard field="priceRange" label="Price range" placeholder="e.g. $50-100/hr"
                                get=|d| d.price_range.clone() set=|d, v| d.price_range = v />
                        }.into_any(),
                        ListingStep::Location => view! {
                            <TextField wizard=wizard field="address" label="Address *"
                                get=|d| d.address.clone() set=|d, v| d.address = v />
                            <div class="grid md:grid-cols-3 gap-4">
                                <TextField wizard=wizard field="city" label="City *"
                                    get=|d| d.city.clone() set=|d, v| d.city = v />
                                <TextField wizard=wizard field="state" label="State *"
                                    get=|d| d.state.clone() set=|d, v| d.state = v />
                                <TextField wizard=wizard field="postalCode" label="Postal code"
                                    get=|d| d.postal_code.clone() set=|d, v| d.postal_code = v />
                            </div>
                        }.into_any(),
                        ListingStep::Contact => view! {
                            <div class="grid md:grid-cols-2 gap-4">
                                <TextField wizard=wizard field="contactPhone" label="Contact phone"
                                    get=|d| d.contact_phone.clone() set=|d, v| d.contact_phone = v />
                                <TextField wizard=wizard field="contactEmail" label="Contact email"
                                    get=|d| d.contact_email.clone() set=|d, v| d.contact_email = v />
                            </div>
                            <TextField wizard=wizard field="website" label="Website" placeholder="https://"
                                get=|d| d.website.clone() set=|d, v| d.website = v />
                            <TextField wizard=wizard field="businessHours" label="Business hours" placeholder="Mon-Fri 8am-5pm"
                                get=|d| d.business_hours.clone() set=|d, v| d.business_hours = v />
                            <TextField wizard=wizard field="yearsExperience" label="Years of experience"
                                get=|d| d.years_experience.clone() set=|d, v| d.years_experience = v />
                        }.into_any(),
                    }}

                    <div class="card-actions justify-between mt-4">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            disabled=move || step() == ListingStep::BasicInfo
                            on:click=on_back
                        >
                            "Back"
                        </button>
                        {move || if step().is_last() {
                            view! {
                                <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Publishing..." }.into_any()
                                    } else {
                                        "Publish Listing".into_any()
                                    }}
                                </button>
                            }.into_any()
                        } else {
                            view! {
                                <button type="button" class="btn btn-primary" on:click=on_next>"Next"</button>
                            }.into_any()
                        }}
                    </div>
                </div>
            </form>
        </div>
    }
}

fn input_class(base: &str, wizard: RwSignal<ListingWizard>, field: &str) -> String {
    if wizard.with(|w| w.errors.contains(field)) {
        format!("{} {}-error", base, base.split(' ').next().unwrap_or_default())
    } else {
        base.to_string()
    }
}

#[component]
fn FieldError(wizard: RwSignal<ListingWizard>, field: &'static str) -> impl IntoView {
    move || {
        wizard.with(|w| {
            w.errors.get(field).map(|msg| {
                let msg = msg.to_string();
                view! { <span class="text-error text-sm mt-1">{msg}</span> }
            })
        })
    }
}

#[component]
fn TextField(
    wizard: RwSignal<ListingWizard>,
    field: &'static str,
    label: &'static str,
    get: fn(&ListingDraft) -> String,
    set: fn(&mut ListingDraft, String),
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let value = move || wizard.with(|w| get(&w.draft));
    let on_input = move |ev: leptos::ev::Event| {
        let v = event_target_value(&ev);
        wizard.update(|w| w.edit(field, |d| set(d, v)));
    };

    view! {
        <div class="form-control">
            <label class="label" for=field>
                <span class="label-text">{label}</span>
            </label>
            {if multiline {
                view! {
                    <textarea
                        id=field
                        rows="5"
                        class=move || input_class("textarea textarea-bordered", wizard, field)
                        placeholder=placeholder
                        prop:value=value
                        on:input=on_input
                    ></textarea>
                }.into_any()
            } else {
                view! {
                    <input
                        id=field
                        type="text"
                        class=move || input_class("input input-bordered", wizard, field)
                        placeholder=placeholder
                        prop:value=value
                        on:input=on_input
                    />
                }.into_any()
            }}
            <FieldError wizard=wizard field=field />
        </div>
    }
}
