//! View Codebook Page
//!
//! Codebook list, markdown viewer/editor for the selected one and its
//! parsed family tree.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::components::{initial_selection, CodebookTree, ContentViewer, ErrorDisplay, ListItem, SavedContent, SelectionList};
use crate::content::ContentSource;
use crate::context::{use_api, use_app_context};
use crate::routes::Route;
use crate::store::{store_set_codebooks, use_app_store, AppStateStoreFields, AppStore};

/// Reload the list, then select `wanted` if it is still there
fn load_codebooks(
    api: ApiClient,
    store: AppStore,
    wanted: Option<String>,
    set_selected: WriteSignal<Option<String>>,
    set_error: WriteSignal<Option<String>>,
) {
    spawn_local(async move {
        match api::list_codebooks(&api).await {
            Ok(list) => {
                let items: Vec<ListItem> = list.iter().map(ListItem::from).collect();
                set_selected.set(initial_selection(&items, wanted.as_deref()));
                store_set_codebooks(&store, list);
            }
            Err(e) => {
                tracing::warn!("[CODEBOOKS] list failed: {}", e);
                set_error.set(Some("Failed to fetch codebooks list".to_string()));
            }
        }
    });
}

#[component]
pub fn ViewCodebookPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let store = use_app_store();
    let (selected, set_selected) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let wanted = ctx.route.with_untracked(|r| match r {
        Route::ViewCodebook { selected } => selected.clone(),
        _ => None,
    });
    load_codebooks(api.clone(), store, wanted, set_selected, set_error);

    let select = move |id: String| {
        set_selected.set(Some(id.clone()));
        ctx.replace(Route::ViewCodebook { selected: Some(id) });
    };

    let on_saved = move |saved: SavedContent| {
        if selected.get_untracked().as_deref() != Some(saved.id.as_str()) {
            ctx.replace(Route::ViewCodebook { selected: Some(saved.id.clone()) });
            load_codebooks(api.clone(), store, Some(saved.id), set_selected, set_error);
        }
    };

    let items = Signal::derive(move || store.codebooks().with(|cbs| cbs.iter().map(ListItem::from).collect::<Vec<_>>()));

    view! {
        <div class="data-container">
            <SelectionList
                items=items
                selected=selected
                on_select=select
                empty_message="No codebooks available"
            />
            <ErrorDisplay message=error on_dismiss=move |_| set_error.set(None) />
            <div class="content-panel">
                <ContentViewer
                    selected=selected
                    source=ContentSource::codebooks()
                    on_saved=on_saved
                    empty_label="View Codebook"
                />
                <Show when=move || selected.with(|s| s.is_none())>
                    <p>"No codebook selected or found. Generate a codebook first."</p>
                </Show>
            </div>
            <CodebookTree codebook_id=selected />
        </div>
    }
}
