//! Import Page

use leptos::prelude::*;

use crate::components::{DatabaseManager, FileUpload};
use crate::context::use_app_context;
use crate::routes::Route;

#[component]
pub fn ImportPage() -> impl IntoView {
    let ctx = use_app_context();
    let (refresh, set_refresh) = signal(0u32);

    view! {
        <div class="home-container">
            <div class="form-wrapper">
                <h1>"Import Reddit Data"</h1>
                <FileUpload on_uploaded=move |_| set_refresh.update(|n| *n += 1) />
                <DatabaseManager
                    refresh=refresh
                    on_view=move |database: String| ctx.navigate(Route::Data { database: Some(database) })
                />
                <button class="main-button" on:click=move |_| ctx.navigate(Route::Data { database: None })>
                    "View Imported Data"
                </button>
            </div>
        </div>
    }
}
