//! Codebook Manager Component
//!
//! Saved codebooks with metadata, inline rename and confirmed delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::components::DeleteConfirmButton;
use crate::context::use_api;
use crate::format::{char_count_text, unix_date_text};
use crate::models::Codebook;
use crate::store::{store_remove_codebook, store_set_codebooks, use_app_store, AppStateStoreFields, AppStore};

/// Refresh the codebook list in the store
pub fn reload_codebooks(api: ApiClient, store: AppStore, set_error: WriteSignal<Option<String>>) {
    spawn_local(async move {
        match api::list_codebooks(&api).await {
            Ok(list) => {
                tracing::debug!("[CODEBOOKS] loaded {}", list.len());
                store_set_codebooks(&store, list);
            }
            Err(e) => {
                tracing::warn!("[CODEBOOKS] list failed: {}", e);
                set_error.set(Some("Failed to load codebooks".to_string()));
            }
        }
    });
}

#[component]
pub fn CodebookManager(
    #[prop(into)] on_view: Callback<String>,
    /// Bump to force a re-fetch
    #[prop(optional, into)] refresh: MaybeProp<u32>,
) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let (error, set_error) = signal::<Option<String>>(None);
    let renaming = RwSignal::new(None::<String>);
    let new_name = RwSignal::new(String::new());

    let list_api = api.clone();
    Effect::new(move |_| {
        let _ = refresh.get();
        reload_codebooks(list_api.clone(), store, set_error);
    });

    let rename = {
        let api = api.clone();
        move |old_id: String| {
            let api = api.clone();
            let name = new_name.get_untracked();
            spawn_local(async move {
                match api::rename_codebook(&api, &old_id, &name).await {
                    Ok(()) => {
                        tracing::info!("[CODEBOOKS] renamed {} -> {}", old_id, name.trim());
                        renaming.set(None);
                        new_name.set(String::new());
                        set_error.set(None);
                        reload_codebooks(api, store, set_error);
                    }
                    Err(api::ApiError::Validation(msg)) => set_error.set(Some(msg)),
                    Err(e) => set_error.set(Some(format!("Error renaming codebook: {}", e))),
                }
            });
        }
    };

    let delete = move |id: String| {
        let api = api.clone();
        spawn_local(async move {
            match api::delete_codebook(&api, &id).await {
                Ok(()) => {
                    tracing::info!("[CODEBOOKS] deleted {}", id);
                    store_remove_codebook(&store, &id);
                }
                Err(e) => set_error.set(Some(format!("Error deleting codebook: {}", e))),
            }
        });
    };

    let row = move |cb: Codebook| {
        let id = cb.id.clone();
        let is_renaming = {
            let id = id.clone();
            move || renaming.with(|r| r.as_deref() == Some(id.as_str()))
        };
        let rename = rename.clone();
        let delete = delete.clone();
        view! {
            <div class="database-item">
                {move || {
                    if is_renaming() {
                        let save_id = id.clone();
                        let key_id = id.clone();
                        let rename_on_key = rename.clone();
                        let rename_on_click = rename.clone();
                        view! {
                            <div class="rename-controls">
                                <input
                                    type="text"
                                    placeholder="New name"
                                    prop:value=move || new_name.get()
                                    on:input=move |ev| new_name.set(event_target_value(&ev))
                                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                        "Enter" => rename_on_key(key_id.clone()),
                                        "Escape" => renaming.set(None),
                                        _ => {}
                                    }
                                />
                                <button on:click=move |_| rename_on_click(save_id.clone())>"Save"</button>
                                <button on:click=move |_| renaming.set(None)>"Cancel"</button>
                            </div>
                        }
                        .into_any()
                    } else {
                        let view_id = id.clone();
                        let rename_id = id.clone();
                        let delete_id = id.clone();
                        let delete = delete.clone();
                        view! {
                            <div class="database-info">
                                <strong>{cb.label().to_string()}</strong>
                                <div class="database-metadata">
                                    <div class="metadata-row">{char_count_text(&cb)}</div>
                                    <div class="metadata-row">{unix_date_text(cb.metadata.date_created)}</div>
                                </div>
                            </div>
                            <div class="database-actions">
                                <button on:click=move |_| on_view.run(view_id.clone())>"View"</button>
                                <button on:click=move |_| {
                                    new_name.set(rename_id.clone());
                                    renaming.set(Some(rename_id.clone()));
                                }>"Rename"</button>
                                <DeleteConfirmButton
                                    item_name=cb.label().to_string()
                                    on_confirm=move |_| delete(delete_id.clone())
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
            <Show when=move || !store.codebooks().with(|c| c.is_empty())>
                <div class="database-selection">
                    <h2>"Manage Codebooks"</h2>
                    <div class="database-list">
                        <For
                            each=move || store.codebooks().get()
                            key=|cb| (cb.id.clone(), cb.name.clone())
                            children=row.clone()
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}
