//! Data Page
//!
//! Pick an imported database and browse its posts and comments.

use leptos::prelude::*;

use crate::components::{reload_databases, EntriesTable, ErrorDisplay, ListItem, SelectionList};
use crate::context::{use_api, use_app_context};
use crate::routes::Route;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DataPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let store = use_app_store();
    let (error, set_error) = signal::<Option<String>>(None);

    reload_databases(api, store, set_error);

    let selected = Memo::new(move |_| match ctx.route.get() {
        Route::Data { database } => database,
        _ => None,
    });
    let items = Signal::derive(move || store.databases().with(|dbs| dbs.iter().map(ListItem::from).collect::<Vec<_>>()));

    view! {
        <div class="data-container">
            <div class="data-header">
                <button class="back-btn" on:click=move |_| ctx.navigate(Route::Import)>"← Back"</button>
                <h1>"Imported Data"</h1>
            </div>
            <ErrorDisplay message=error on_dismiss=move |_| set_error.set(None) />
            <div class="data-layout">
                <SelectionList
                    items=items
                    selected=selected
                    on_select=move |database: String| ctx.replace(Route::Data { database: Some(database) })
                    empty_message="No databases imported yet."
                />
                <EntriesTable database=selected />
            </div>
        </div>
    }
}
