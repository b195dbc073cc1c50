use leptos::prelude::*;

use crate::context::use_app_context;
use crate::routes::Route;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="home-container">
            <h1>"Page not found"</h1>
            <button class="main-button" on:click=move |_| ctx.navigate(Route::Landing)>"Back to start"</button>
        </div>
    }
}
