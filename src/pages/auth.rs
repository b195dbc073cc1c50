//! Login / Register Pages

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::context::{use_api, use_app_context, AppContext};
use crate::routes::Route;

/// Pause on the success message before entering the app
const POST_AUTH_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AuthMessage {
    Success(String),
    Error(String),
}

impl AuthMessage {
    fn class(&self) -> &'static str {
        match self {
            AuthMessage::Success(_) => "success-message",
            AuthMessage::Error(_) => "error-message",
        }
    }

    fn text(&self) -> &str {
        match self {
            AuthMessage::Success(t) | AuthMessage::Error(t) => t,
        }
    }
}

fn finish(
    ctx: AppContext,
    result: Result<api::AuthReply, ApiError>,
    success: &str,
    set_message: WriteSignal<Option<AuthMessage>>,
) -> bool {
    match result {
        Ok(_) => {
            tracing::info!("[AUTH] {}", success);
            set_message.set(Some(AuthMessage::Success(success.to_string())));
            ctx.notify_auth_changed();
            Timeout::new(POST_AUTH_DELAY_MS, move || ctx.navigate(Route::Home)).forget();
            true
        }
        Err(e) => {
            tracing::warn!("[AUTH] {}", e);
            set_message.set(Some(AuthMessage::Error(e.to_string())));
            false
        }
    }
}

#[component]
fn TextInput(id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type=kind
                id=id
                required=true
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn MessageLine(message: ReadSignal<Option<AuthMessage>>) -> impl IntoView {
    move || message.get().map(|m| view! { <p class=m.class()>{m.text().to_string()}</p> })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);
    let (message, set_message) = signal::<Option<AuthMessage>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (e, p) = (email.get_untracked(), password.get_untracked());
        if let Err(err) = api::validate_login(&e, &p) {
            set_message.set(Some(AuthMessage::Error(err.to_string())));
            return;
        }
        let api = api.clone();
        set_busy.set(true);
        spawn_local(async move {
            let result = api::login(&api, &e, &p).await;
            finish(ctx, result, "Login successful!", set_message);
            set_busy.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <h1 class="auth-title">"Qualitative Coding Tool"</h1>
            <div class="auth-card">
                <h2>"Login"</h2>
                <form on:submit=on_submit>
                    <TextInput id="email" label="Email" kind="email" value=email />
                    <TextInput id="password" label="Password" kind="password" value=password />
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>"Login"</button>
                </form>
                <MessageLine message=message />
                <p>
                    "Don't have an account? "
                    <a href="#" on:click=move |ev| { ev.prevent_default(); ctx.navigate(Route::Register); }>"Register here"</a>
                </p>
                <p>
                    <a href="#" on:click=move |ev| { ev.prevent_default(); ctx.navigate(Route::Landing); }>"Back"</a>
                </p>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);
    let (message, set_message) = signal::<Option<AuthMessage>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (e, p, c) = (email.get_untracked(), password.get_untracked(), confirm.get_untracked());
        if let Err(err) = api::validate_register(&e, &p, &c) {
            set_message.set(Some(AuthMessage::Error(err.to_string())));
            return;
        }
        let api = api.clone();
        set_busy.set(true);
        spawn_local(async move {
            let result = api::register(&api, &e, &p, &c).await;
            if finish(ctx, result, "Registration successful!", set_message) {
                password.set(String::new());
                confirm.set(String::new());
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <h1 class="auth-title">"Qualitative Coding Tool"</h1>
            <div class="auth-card">
                <h2>"Register"</h2>
                <form on:submit=on_submit>
                    <TextInput id="email" label="Email" kind="email" value=email />
                    <TextInput id="password" label="Password" kind="password" value=password />
                    <TextInput id="confirm-password" label="Confirm Password" kind="password" value=confirm />
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>"Register"</button>
                </form>
                <MessageLine message=message />
                <p>
                    "Already have an account? "
                    <a href="#" on:click=move |ev| { ev.prevent_default(); ctx.navigate(Route::Login); }>"Login here"</a>
                </p>
            </div>
        </div>
    }
}
