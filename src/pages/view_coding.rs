//! View Coding Page
//!
//! Coding reports produced by applying a codebook.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{initial_selection, ContentViewer, ErrorDisplay, ListItem, SelectionList};
use crate::content::ContentSource;
use crate::context::{use_api, use_app_context};
use crate::routes::Route;

/// `my-projects` type for coding reports
const CODING_PROJECT_TYPE: &str = "coding";

#[component]
pub fn ViewCodingPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let (reports, set_reports) = signal::<Vec<ListItem>>(Vec::new());
    let (selected, set_selected) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let wanted = ctx.route.with_untracked(|r| match r {
        Route::ViewCoding { selected } => selected.clone(),
        _ => None,
    });
    spawn_local(async move {
        match api::my_projects(&api, CODING_PROJECT_TYPE).await {
            Ok(projects) => {
                let items: Vec<ListItem> = projects.iter().map(ListItem::from).collect();
                tracing::debug!("[VIEWER] {} coding reports", items.len());
                set_selected.set(initial_selection(&items, wanted.as_deref()));
                set_reports.set(items);
            }
            Err(e) => set_error.set(Some(format!("Failed to fetch coding reports: {}", e))),
        }
    });

    view! {
        <div class="data-container">
            <div class="data-header">
                <button class="back-btn" on:click=move |_| ctx.navigate(Route::ApplyCodebook)>"← Back"</button>
                <h1>"View Coding"</h1>
            </div>
            <SelectionList
                items=reports
                selected=selected
                on_select=move |id: String| {
                    set_selected.set(Some(id.clone()));
                    ctx.replace(Route::ViewCoding { selected: Some(id) });
                }
                empty_message="No coding reports yet. Apply a codebook first."
            />
            <ErrorDisplay message=error on_dismiss=move |_| set_error.set(None) />
            <div class="content-panel">
                <ContentViewer selected=selected source=ContentSource::coding_reports() empty_label="View Coding" />
            </div>
        </div>
    }
}
