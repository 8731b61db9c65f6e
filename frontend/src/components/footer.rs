use crate::components::icons::Heart;
use builder360::shared::date;
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = date::current_year();

    view! {
        <footer class="footer footer-center bg-base-100 border-t border-base-300 mt-8 p-6 text-sm text-base-content/60">
            <p class="flex items-center gap-1">
                "Made with"
                <Heart attr:class="h-4 w-4 text-error animate-pulse" />
                {format!("by Builder360 Team © {}", year)}
            </p>
        </footer>
    }
}
