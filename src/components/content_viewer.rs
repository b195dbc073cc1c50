//! Content Viewer Component
//!
//! Fetches the selected text blob, renders it as markdown and lets the
//! user edit and save it under a (possibly new) name.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::content::{ContentEditor, ContentSource, ViewMode};
use crate::context::use_api;
use crate::markdown::render_markdown;

/// Passed to `on_saved` after a successful save
#[derive(Debug, Clone, PartialEq)]
pub struct SavedContent {
    /// Name the content was saved under
    pub id: String,
    pub response: serde_json::Value,
}

#[component]
pub fn ContentViewer(
    #[prop(into)] selected: Signal<Option<String>>,
    /// Defaults to codebooks
    #[prop(optional)] source: Option<ContentSource>,
    #[prop(optional, into)] on_saved: Option<Callback<SavedContent>>,
    #[prop(optional, into)] empty_label: Option<String>,
) -> impl IntoView {
    let api = use_api();
    let source = StoredValue::new(source.unwrap_or_else(ContentSource::codebooks));
    let empty_label = empty_label.unwrap_or_else(|| "Select an item to view its content.".to_string());

    let editor = RwSignal::new(ContentEditor::default());
    let mode = Memo::new(move |_| editor.with(|e| e.mode()));
    let has_selection = Memo::new(move |_| editor.with(|e| e.selected().is_some()));

    // Refetch whenever the selection changes
    let fetch_api = api.clone();
    Effect::new(move |_| {
        let id = selected.get();
        let mut should_fetch = false;
        editor.update(|e| should_fetch = e.select(id.clone()));
        let Some(id) = id.filter(|_| should_fetch) else {
            return;
        };
        let api = fetch_api.clone();
        let url = source.with_value(|s| s.content_url(&id));
        spawn_local(async move {
            match api::fetch_content(&api, &url).await {
                Ok(text) => editor.update(|e| e.fetch_succeeded(&id, text)),
                Err(err) => {
                    tracing::warn!("[VIEWER] fetch {} failed: {}", id, err);
                    editor.update(|e| e.fetch_failed(&id, &err));
                }
            }
        });
    });

    let save = move |_: web_sys::MouseEvent| {
        let Some(Ok(draft)) = editor.try_update(|e| e.prepare_save()) else {
            return;
        };
        let api = api.clone();
        let (save_url, id_field) = source.with_value(|s| (s.save_url.clone(), s.save_id_field.clone()));
        spawn_local(async move {
            match api::save_content(&api, &save_url, &id_field, &draft.name, &draft.content).await {
                Ok(response) => {
                    tracing::info!("[VIEWER] saved {}", draft.name);
                    editor.update(|e| e.save_succeeded(&draft, on_saved.is_some()));
                    if let Some(cb) = on_saved {
                        cb.run(SavedContent { id: draft.name.clone(), response });
                    }
                }
                Err(err) => editor.update(|e| e.save_failed(&err)),
            }
        });
    };

    let body = move || {
        if !has_selection.get() {
            return view! { <p class="content-empty">{empty_label.clone()}</p> }.into_any();
        }
        match mode.get() {
            ViewMode::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
            ViewMode::Viewing => view! {
                <div class="content-toolbar">
                    <button class="edit-btn" on:click=move |_| editor.update(|e| e.begin_edit())>"Edit"</button>
                </div>
                <div
                    class="markdown-body"
                    inner_html=move || editor.with(|e| render_markdown(e.content()))
                ></div>
            }
            .into_any(),
            ViewMode::Editing => view! {
                <div class="content-editor">
                    <label class="content-name">
                        "Name"
                        <input
                            type="text"
                            prop:value=move || editor.with(|e| e.name().to_string())
                            on:input=move |ev| editor.update(|e| e.set_name(event_target_value(&ev)))
                        />
                    </label>
                    <textarea
                        class="content-textarea"
                        rows=20
                        prop:value=move || editor.with(|e| e.edited().to_string())
                        on:input=move |ev| editor.update(|e| e.set_edited(event_target_value(&ev)))
                    ></textarea>
                    <div class="content-toolbar">
                        <button
                            class="save-btn"
                            disabled=move || editor.with(|e| e.is_saving())
                            on:click=save.clone()
                        >
                            {move || if editor.with(|e| e.is_saving()) { "Saving..." } else { "Save" }}
                        </button>
                        <button class="cancel-btn" on:click=move |_| editor.update(|e| e.cancel())>"Cancel"</button>
                    </div>
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <div class="content-viewer">
            {move || editor.with(|e| e.error().map(|msg| view! { <p class="error">{msg.to_string()}</p> }))}
            {body}
        </div>
    }
}
