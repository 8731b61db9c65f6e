use crate::auth::{change_password, update_profile, use_auth};
use crate::components::listing_card::ErrorAlert;
use builder360::validation::{FieldErrors, PasswordChangeForm, ProfileForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();

    let initial = move || user.get_untracked().as_ref().map(ProfileForm::from).unwrap_or_default();

    let form = RwSignal::new(initial());
    let errors = RwSignal::new(FieldErrors::new());
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // message, is_error

    // The cached user can be replaced by the background confirmation
    Effect::new(move |_| {
        let fresh = user.get();
        if !editing.get_untracked() {
            form.set(fresh.as_ref().map(ProfileForm::from).unwrap_or_default());
        }
    });

    let on_cancel = move |_| {
        form.set(initial());
        errors.set(FieldErrors::new());
        set_editing.set(false);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = match form.with_untracked(ProfileForm::validate) {
            Ok(req) => req,
            Err(errs) => {
                errors.set(errs);
                return;
            }
        };
        errors.set(FieldErrors::new());
        set_saving.set(true);
        spawn_local(async move {
            match update_profile(&auth, req).await {
                Ok(_) => {
                    set_editing.set(false);
                    set_notification.set(Some(("Profile updated".to_string(), false)));
                }
                Err(msg) => set_notification.set(Some((msg, true))),
            }
            set_saving.set(false);
        });
    };

    // Clear the notification after 3 seconds
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(move || set_notification.set(None), Duration::from_secs(3));
        }
    });

    let member_since = move || user.get().and_then(|u| u.member_since());
    let account_type = move || user.get().map(|u| u.user_type.label()).unwrap_or_default();

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8 space-y-6">
            <Show when=move || notification.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div class=move || match notification.get() {
                        Some((_, true)) => "alert alert-error shadow-lg",
                        _ => "alert alert-success shadow-lg",
                    }>
                        <span>{move || notification.get().map(|(m, _)| m).unwrap_or_default()}</span>
                    </div>
                </div>
            </Show>

            <div>
                <h1 class="text-3xl font-bold">"My Profile"</h1>
                <p class="text-base-content/70">
                    {account_type}
                    {move || member_since().map(|y| format!(" · Member since {}", y))}
                </p>
            </div>

            <form class="card bg-base-100 shadow" on:submit=on_save>
                <div class="card-body gap-4">
                    <div class="flex items-center justify-between">
                        <h2 class="card-title">"Personal information"</h2>
                        <Show when=move || !editing.get()>
                            <button type="button" class="btn btn-outline btn-sm" on:click=move |_| set_editing.set(true)>
                                "Edit"
                            </button>
                        </Show>
                    </div>

                    <div class="grid md:grid-cols-2 gap-4">
                        <ProfileInput form=form errors=errors editing=editing field="firstName" label="First name"
                            get=|f| f.first_name.clone() set=|f, v| f.first_name = v />
                        <ProfileInput form=form errors=errors editing=editing field="lastName" label="Last name"
                            get=|f| f.last_name.clone() set=|f, v| f.last_name = v />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Email"</span></label>
                        <input
                            type="email"
                            class="input input-bordered"
                            disabled=true
                            prop:value=move || user.get().map(|u| u.email).unwrap_or_default()
                        />
                    </div>
                    <ProfileInput form=form errors=errors editing=editing field="phone" label="Phone"
                        get=|f| f.phone.clone() set=|f, v| f.phone = v />
                    <ProfileInput form=form errors=errors editing=editing field="profileImageUrl" label="Profile image URL"
                        get=|f| f.profile_image_url.clone() set=|f, v| f.profile_image_url = v />

                    <Show when=move || editing.get()>
                        <div class="card-actions justify-end">
                            <button type="button" class="btn btn-ghost" on:click=on_cancel>"Cancel"</button>
                            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                            </button>
                        </div>
                    </Show>
                </div>
            </form>

            <ChangePasswordCard />
        </div>
    }
}

#[component]
fn ProfileInput(
    form: RwSignal<ProfileForm>,
    errors: RwSignal<FieldErrors>,
    editing: ReadSignal<bool>,
    field: &'static str,
    label: &'static str,
    get: fn(&ProfileForm) -> String,
    set: fn(&mut ProfileForm, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=field><span class="label-text">{label}</span></label>
            <input
                id=field
                type="text"
                class=move || if errors.with(|e| e.contains(field)) { "input input-bordered input-error" } else { "input input-bordered" }
                disabled=move || !editing.get()
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    form.update(|f| set(f, v));
                    errors.update(|e| e.clear_field(field));
                }
            />
            {move || errors.with(|e| e.get(field).map(|m| {
                let m = m.to_string();
                view! { <span class="text-error text-sm mt-1">{m}</span> }
            }))}
        </div>
    }
}

#[component]
fn ChangePasswordCard() -> impl IntoView {
    let auth = use_auth();

    let form = RwSignal::new(PasswordChangeForm::default());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success, set_success) = signal(false);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_success.set(false);
        let req = match form.with_untracked(PasswordChangeForm::validate) {
            Ok(req) => req,
            Err(errs) => {
                let first = errs
                    .fields()
                    .find_map(|f| errs.get(f).map(str::to_string));
                set_error_msg.set(first);
                return;
            }
        };
        set_error_msg.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match change_password(&auth, req).await {
                Ok(()) => {
                    form.set(PasswordChangeForm::default());
                    set_success.set(true);
                }
                Err(msg) => set_error_msg.set(Some(msg)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card bg-base-100 shadow" on:submit=on_submit>
            <div class="card-body gap-4">
                <h2 class="card-title">"Change password"</h2>
                <ErrorAlert message=error_msg />
                <Show when=move || success.get()>
                    <div role="status" class="alert alert-success text-sm py-2">
                        <span>"Password changed"</span>
                    </div>
                </Show>
                <input
                    type="password"
                    class="input input-bordered"
                    placeholder="Current password"
                    prop:value=move || form.with(|f| f.current_password.clone())
                    on:input=move |ev| form.update(|f| f.current_password = event_target_value(&ev))
                />
                <input
                    type="password"
                    class="input input-bordered"
                    placeholder="New password"
                    prop:value=move || form.with(|f| f.new_password.clone())
                    on:input=move |ev| form.update(|f| f.new_password = event_target_value(&ev))
                />
                <input
                    type="password"
                    class="input input-bordered"
                    placeholder="Confirm new password"
                    prop:value=move || form.with(|f| f.confirm_password.clone())
                    on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                />
                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        "Update Password"
                    </button>
                </div>
            </div>
        </form>
    }
}
