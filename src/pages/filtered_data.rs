//! Filtered Data Page
//!
//! Browse the filtered datasets the user owns. Same table as the data
//! page, with the title/selftext column layout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{EntriesTable, ErrorDisplay, ListItem, SelectionList};
use crate::context::{use_api, use_app_context};
use crate::models::DatabaseItem;
use crate::routes::Route;

pub const FILTERED_DATA_PROJECT_TYPE: &str = "filtered_data";

#[component]
pub fn FilteredDataPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let (datasets, set_datasets) = signal::<Vec<DatabaseItem>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);

    spawn_local(async move {
        match api::my_projects(&api, FILTERED_DATA_PROJECT_TYPE).await {
            Ok(projects) => {
                tracing::debug!("[DATA] loaded {} filtered datasets", projects.len());
                set_datasets.try_set(projects.into_iter().map(DatabaseItem::from).collect());
            }
            Err(e) => {
                tracing::warn!("[DATA] filtered list failed: {}", e);
                set_error.try_set(Some(format!("Failed to fetch filtered data: {}", e)));
            }
        }
    });

    let selected = Memo::new(move |_| match ctx.route.get() {
        Route::FilteredData { database } => database,
        _ => None,
    });
    let items = Signal::derive(move || datasets.with(|d| d.iter().map(ListItem::from).collect::<Vec<_>>()));

    view! {
        <div class="data-container">
            <div class="data-header">
                <button class="back-btn" on:click=move |_| ctx.navigate(Route::Home)>"← Back"</button>
                <h1>"View Filtered Data"</h1>
            </div>
            <ErrorDisplay message=error on_dismiss=move |_| set_error.set(None) />
            <div class="data-layout">
                <SelectionList
                    items=items
                    selected=selected
                    on_select=move |database: String| ctx.replace(Route::FilteredData { database: Some(database) })
                    empty_message="No filtered data yet."
                />
                <EntriesTable database=selected filtered=true />
            </div>
        </div>
    }
}
