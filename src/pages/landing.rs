//! Landing Page

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::routes::Route;

#[component]
pub fn LandingPage() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="landing-container">
            <main class="landing-main">
                <h1 class="landing-title">"Qualitative Coding Tool"</h1>
                <p class="landing-description">
                    "Import Reddit dumps, generate codebooks with an LLM, apply them to your data and compare the results."
                </p>
                <section class="cta">
                    <button class="btn btn-primary" on:click=move |_| ctx.navigate(Route::Login)>"Login"</button>
                    <button class="btn btn-secondary" on:click=move |_| ctx.navigate(Route::Register)>"Register"</button>
                </section>
            </main>
        </div>
    }
}
