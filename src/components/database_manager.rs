//! Database Manager Component
//!
//! Imported raw-data projects: row counts, rename (display name and
//! description), confirmed delete, view.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::components::DeleteConfirmButton;
use crate::context::use_api;
use crate::format::{iso_date_text, thousands};
use crate::models::DatabaseItem;
use crate::store::{store_remove_database, store_set_databases, use_app_store, AppStateStoreFields, AppStore};

/// `my-projects` type for imported Reddit dumps
pub const RAW_DATA_PROJECT_TYPE: &str = "raw_data";

/// Refresh the store; a failure leaves an empty list and an error line
pub fn reload_databases(api: ApiClient, store: AppStore, set_error: WriteSignal<Option<String>>) {
    spawn_local(async move {
        match api::my_projects(&api, RAW_DATA_PROJECT_TYPE).await {
            Ok(projects) => {
                let items: Vec<DatabaseItem> = projects.into_iter().map(DatabaseItem::from).collect();
                tracing::debug!("[IMPORT] loaded {} databases", items.len());
                store_set_databases(&store, items);
            }
            Err(e) => {
                tracing::warn!("[IMPORT] database list failed: {}", e);
                store_set_databases(&store, Vec::new());
                set_error.set(Some(format!("Failed to fetch databases: {}", e)));
            }
        }
    });
}

#[derive(Debug, Clone, Default, PartialEq)]
struct RenameDraft {
    schema: String,
    display_name: String,
    description: String,
}

#[component]
pub fn DatabaseManager(
    #[prop(into)] on_view: Callback<String>,
    #[prop(optional, into)] refresh: MaybeProp<u32>,
) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let (error, set_error) = signal::<Option<String>>(None);
    let draft = RwSignal::new(None::<RenameDraft>);

    let list_api = api.clone();
    Effect::new(move |_| {
        let _ = refresh.get();
        reload_databases(list_api.clone(), store, set_error);
    });

    let save_rename = {
        let api = api.clone();
        move || {
            let Some(d) = draft.get_untracked() else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api::rename_project(&api, &d.schema, &d.display_name, &d.description).await {
                    Ok(()) => {
                        tracing::info!("[IMPORT] renamed {}", d.schema);
                        draft.set(None);
                        set_error.set(None);
                        reload_databases(api, store, set_error);
                    }
                    Err(api::ApiError::Validation(msg)) => set_error.set(Some(msg)),
                    Err(e) => set_error.set(Some(format!("Error renaming database: {}", e))),
                }
            });
        }
    };

    let delete = move |schema: String| {
        let api = api.clone();
        spawn_local(async move {
            match api::delete_database(&api, &schema).await {
                Ok(()) => {
                    tracing::info!("[IMPORT] deleted {}", schema);
                    store_remove_database(&store, &schema);
                }
                Err(e) => set_error.set(Some(format!("Error deleting database: {}", e))),
            }
        });
    };

    let row = move |db: DatabaseItem| {
        let schema = db.name.clone();
        let is_renaming = {
            let schema = schema.clone();
            move || draft.with(|d| d.as_ref().map_or(false, |d| d.schema == schema))
        };
        let save_rename = save_rename.clone();
        let delete = delete.clone();
        view! {
            <div class="database-item">
                {move || {
                    if is_renaming() {
                        let save_on_key = save_rename.clone();
                        let save_on_click = save_rename.clone();
                        view! {
                            <div class="rename-controls">
                                <input
                                    type="text"
                                    placeholder="Display name"
                                    prop:value=move || draft.with(|d| d.as_ref().map(|d| d.display_name.clone()).unwrap_or_default())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        draft.update(|d| if let Some(d) = d { d.display_name = v });
                                    }
                                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                        "Enter" => save_on_key(),
                                        "Escape" => draft.set(None),
                                        _ => {}
                                    }
                                />
                                <textarea
                                    placeholder="Description"
                                    prop:value=move || draft.with(|d| d.as_ref().map(|d| d.description.clone()).unwrap_or_default())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        draft.update(|d| if let Some(d) = d { d.description = v });
                                    }
                                ></textarea>
                                <button on:click=move |_| save_on_click()>"Save"</button>
                                <button on:click=move |_| draft.set(None)>"Cancel"</button>
                            </div>
                        }
                        .into_any()
                    } else {
                        let start = RenameDraft {
                            schema: db.name.clone(),
                            display_name: db.display_name.clone(),
                            description: db.description.clone().unwrap_or_default(),
                        };
                        let view_schema = db.name.clone();
                        let delete_schema = db.name.clone();
                        let delete = delete.clone();
                        let meta = &db.metadata;
                        view! {
                            <div class="database-info">
                                <strong>{db.display_name.clone()}</strong>
                                {db.description.clone().map(|d| view! { <div class="database-description">{d}</div> })}
                                <div class="database-metadata">
                                    <div class="metadata-row">
                                        {format!("{} posts", thousands(meta.total_submissions))}
                                        " · "
                                        {format!("{} comments", thousands(meta.total_comments))}
                                    </div>
                                    <div class="metadata-row">{iso_date_text(meta.created_at.as_deref())}</div>
                                </div>
                            </div>
                            <div class="database-actions">
                                <button on:click=move |_| on_view.run(view_schema.clone())>"View"</button>
                                <button on:click=move |_| draft.set(Some(start.clone()))>"Rename"</button>
                                <DeleteConfirmButton
                                    item_name=db.display_name.clone()
                                    on_confirm=move |_| delete(delete_schema.clone())
                                />
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        }
    };

    view! {
        <div class="database-section">
            {move || error.get().map(|msg| view! { <p class="error">{msg}</p> })}
            <div class="database-selection">
                <h2>"Manage Databases"</h2>
                <Show
                    when=move || !store.databases().with(|d| d.is_empty())
                    fallback=|| view! { <p class="selector-empty">"No databases imported yet."</p> }
                >
                    <div class="database-list">
                        <For
                            each=move || store.databases().get()
                            key=|db| (db.name.clone(), db.display_name.clone(), db.description.clone())
                            children=row.clone()
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}
