//! Navbar Component
//!
//! Brand, sidebar toggle, API key entry and logout.

use leptos::prelude::*;

use crate::api;
use crate::context::{use_api, use_app_context};
use crate::routes::Route;

#[component]
pub fn Navbar() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();

    let (key_input, set_key_input) = signal(api.session().api_key().unwrap_or_default());
    let (key_status, set_key_status) = signal::<Option<&'static str>>(None);

    let save_key = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let key = key_input.get_untracked();
            api.session().set_api_key(&key);
            let saved = !key.trim().is_empty();
            tracing::info!("[NAV] api key {}", if saved { "saved" } else { "cleared" });
            set_key_status.set(Some(if saved { "API key saved" } else { "API key cleared" }));
        }
    };

    let toggle_sidebar = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| ctx.toggle_sidebar(api.session())
    };

    let logout = move |_: web_sys::MouseEvent| {
        api::logout(&api);
        tracing::info!("[AUTH] logged out");
        ctx.notify_auth_changed();
        ctx.navigate(Route::Landing);
    };

    view! {
        <nav class="navbar">
            <div class="navbar-container">
                <button class="sidebar-toggle" aria-label="Toggle sidebar" on:click=toggle_sidebar>"☰"</button>
                <div class="navbar-brand">"Qualitative Coding Tool"</div>
                <form class="api-key-form" on:submit=save_key>
                    <input
                        type="password"
                        placeholder="API key"
                        prop:value=move || key_input.get()
                        on:input=move |ev| {
                            set_key_status.set(None);
                            set_key_input.set(event_target_value(&ev));
                        }
                    />
                    <button type="submit">"Save key"</button>
                    {move || key_status.get().map(|s| view! { <span class="api-key-status">{s}</span> })}
                </form>
                <button class="logout-btn" on:click=logout>"Logout"</button>
            </div>
        </nav>
    }
}
