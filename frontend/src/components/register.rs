use crate::auth::{register, use_auth};
use crate::components::icons::HardHat;
use crate::components::listing_card::ErrorAlert;
use crate::web::router::Link;
use builder360::shared::UserType;
use builder360::validation::{FieldErrors, RegistrationForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();

    let form = RwSignal::new(RegistrationForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let user_data = match form.with_untracked(RegistrationForm::validate) {
            Ok(req) => req,
            Err(errs) => {
                errors.set(errs);
                return;
            }
        };

        errors.set(FieldErrors::new());
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            if let Err(msg) = register(&auth, user_data).await {
                set_error_msg.set(Some(msg));
            }
            set_is_submitting.set(false);
        });
    };

    let user_type = move || form.with(|f| f.user_type);

    view! {
        <div class="hero min-h-[80vh] bg-base-200 py-8">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <HardHat attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create your account"</h1>
                        <p class="text-base-content/70">"Find contractors or list your own services"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body gap-3" on:submit=on_submit novalidate=true>
                        <ErrorAlert message=error_msg />

                        <div class="join w-full">
                            {[UserType::Customer, UserType::Provider].into_iter().map(|kind| view! {
                                <button
                                    type="button"
                                    class=move || if user_type() == kind {
                                        "btn join-item flex-1 btn-primary"
                                    } else {
                                        "btn join-item flex-1"
                                    }
                                    on:click=move |_| form.update(|f| f.user_type = kind)
                                >
                                    {kind.label()}
                                </button>
                            }).collect_view()}
                        </div>

                        <div class="grid grid-cols-2 gap-3">
                            <RegisterInput form=form errors=errors field="firstName" label="First name" input_type="text"
                                get=|f| f.first_name.clone() set=|f, v| f.first_name = v />
                            <RegisterInput form=form errors=errors field="lastName" label="Last name" input_type="text"
                                get=|f| f.last_name.clone() set=|f, v| f.last_name = v />
                        </div>
                        <RegisterInput form=form errors=errors field="email" label="Email" input_type="email"
                            get=|f| f.email.clone() set=|f, v| f.email = v />
                        <RegisterInput form=form errors=errors field="phone" label="Phone (optional)" input_type="tel"
                            get=|f| f.phone.clone() set=|f, v| f.phone = v />
                        <RegisterInput form=form errors=errors field="password" label="Password" input_type="password"
                            get=|f| f.password.clone() set=|f, v| f.password = v />
                        <RegisterInput form=form errors=errors field="confirmPassword" label="Confirm password" input_type="password"
                            get=|f| f.confirm_password.clone() set=|f, v| f.confirm_password = v />

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already registered? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
fn RegisterInput(
    form: RwSignal<RegistrationForm>,
    errors: RwSignal<FieldErrors>,
    field: &'static str,
    label: &'static str,
    input_type: &'static str,
    get: fn(&RegistrationForm) -> String,
    set: fn(&mut RegistrationForm, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=field><span class="label-text">{label}</span></label>
            <input
                id=field
                type=input_type
                class=move || if errors.with(|e| e.contains(field)) { "input input-bordered input-error" } else { "input input-bordered" }
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
