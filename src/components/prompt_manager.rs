//! Prompt Manager Component
//!
//! Saved generation prompts: list, save, edit in place, delete and load
//! into the caller. Changes bump the prompts version so every view
//! re-fetches.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::{use_api, use_app_context};
use crate::format::iso_date_text;
use crate::models::Prompt;
use crate::store::{store_remove_prompt, store_set_prompts, store_upsert_prompt, use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Success(String),
    Error(String),
}

/// Prompt being edited: its id plus the draft name and text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EditDraft {
    id: String,
    original_name: String,
    name: String,
    prompt: String,
}

impl EditDraft {
    fn start(prompt: &Prompt) -> Self {
        Self {
            id: prompt.id.clone(),
            original_name: prompt.name.clone(),
            name: prompt.name.clone(),
            prompt: prompt.prompt.clone(),
        }
    }
}

const PREVIEW_CHARS: usize = 100;

/// First 100 characters, with an ellipsis when cut
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[component]
pub fn PromptManager(#[prop(optional, into)] on_load: Option<Callback<String>>) -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let store = use_app_store();
    let (content, set_content) = signal(String::new());
    let (saving, set_saving) = signal(false);
    let (notice, set_notice) = signal::<Option<Notice>>(None);

    let list_api = api.clone();
    Effect::new(move |_| {
        let _ = ctx.prompts_version.get();
        let api = list_api.clone();
        spawn_local(async move {
            match api::list_prompts(&api, api::CODEBOOK_PROMPT_TYPE).await {
                Ok(prompts) => store_set_prompts(&store, prompts),
                Err(e) => {
                    tracing::warn!("[PROMPTS] list failed: {}", e);
                    set_notice.set(Some(Notice::Error(e.to_string())));
                }
            }
        });
    });

    let save_api = api.clone();
    let save = move |_: web_sys::MouseEvent| {
        let name = api::default_prompt_name(store.prompts().with(|p| p.len()));
        let text = content.get_untracked();
        let api = save_api.clone();
        set_saving.set(true);
        spawn_local(async move {
            match api::save_prompt(&api, &name, &text, api::CODEBOOK_PROMPT_TYPE).await {
                Ok(prompt) => {
                    tracing::info!("[PROMPTS] saved {}", prompt.name);
                    store_upsert_prompt(&store, prompt);
                    set_content.set(String::new());
                    set_notice.set(Some(Notice::Success("Prompt saved successfully!".to_string())));
                    ctx.notify_prompts_changed();
                }
                Err(e) => set_notice.set(Some(Notice::Error(e.to_string()))),
            }
            set_saving.set(false);
        });
    };

    let draft = RwSignal::new(None::<EditDraft>);

    let edit_api = api.clone();
    let save_edit = move |_: web_sys::MouseEvent| {
        let Some(d) = draft.get_untracked() else {
            return;
        };
        let api = edit_api.clone();
        spawn_local(async move {
            let result =
                api::update_prompt(&api, &d.id, &d.name, &d.original_name, &d.prompt, api::CODEBOOK_PROMPT_TYPE).await;
            match result {
                Ok(()) => {
                    tracing::info!("[PROMPTS] updated {}", d.id);
                    draft.set(None);
                    set_notice.set(Some(Notice::Success("Prompt updated successfully!".to_string())));
                    ctx.notify_prompts_changed();
                }
                Err(e) => set_notice.set(Some(Notice::Error(e.to_string()))),
            }
        });
    };

    let delete = move |id: String| {
        let api = api.clone();
        spawn_local(async move {
            match api::delete_prompt(&api, &id).await {
                Ok(()) => {
                    store_remove_prompt(&store, &id);
                    set_notice.set(Some(Notice::Success("Prompt deleted successfully!".to_string())));
                    ctx.notify_prompts_changed();
                }
                Err(e) => set_notice.set(Some(Notice::Error(format!("Error deleting prompt: {}", e)))),
            }
        });
    };

    let editor = move || {
        view! {
            <div class="prompt-edit">
                <div class="form-group">
                    <label>"Edit name"</label>
                    <input
                        type="text"
                        class="form-input"
                        prop:value=move || draft.with(|d| d.as_ref().map(|d| d.name.clone()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| if let Some(d) = d { d.name = value });
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Edit prompt"</label>
                    <textarea
                        class="form-input"
                        rows=4
                        prop:value=move || draft.with(|d| d.as_ref().map(|d| d.prompt.clone()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| if let Some(d) = d { d.prompt = value });
                        }
                    ></textarea>
                </div>
                <div class="prompt-actions">
                    <button type="button" class="save-prompt-btn" on:click=save_edit.clone()>"Save"</button>
                    <button type="button" class="delete-prompt-btn" on:click=move |_| draft.set(None)>"Cancel"</button>
                </div>
            </div>
        }
    };

    let row = move |prompt: Prompt| {
        let id = prompt.id.clone();
        let is_editing = move || draft.with(|d| d.as_ref().is_some_and(|d| d.id == id));
        let editor = editor.clone();
        let delete = delete.clone();
        let summary = move || {
            let load_text = prompt.prompt.clone();
            let delete_id = prompt.id.clone();
            let edit_from = prompt.clone();
            let delete = delete.clone();
            view! {
                <div class="prompt-info">
                    <h4>{prompt.name.clone()}</h4>
                    <p class="prompt-preview">{preview(&prompt.prompt)}</p>
                    <small class="prompt-date">{format!("Saved: {}", iso_date_text(prompt.created_at.as_deref()))}</small>
                </div>
                <div class="prompt-actions">
                    {on_load.map(|cb| view! {
                        <button type="button" class="load-prompt-btn" on:click=move |_| cb.run(load_text.clone())>
                            "Load"
                        </button>
                    })}
                    <button
                        type="button"
                        class="load-prompt-btn"
                        on:click=move |_| {
                            draft.set(Some(EditDraft::start(&edit_from)));
                            set_notice.set(None);
                        }
                    >
                        "Edit"
                    </button>
                    <DeleteConfirmButton
                        item_name=prompt.name.clone()
                        on_confirm=move |_| delete(delete_id.clone())
                    />
                </div>
            }
        };
        view! {
            <div class="prompt-item">
                <Show when=is_editing.clone() fallback=summary.clone()>
                    {editor.clone()}
                </Show>
            </div>
        }
    };

    view! {
        <div class="prompt-manager">
            <h2>"Saved Prompts"</h2>
            <div class="save-prompt-section">
                <h3>"Save New Prompt"</h3>
                <textarea
                    class="form-input"
                    rows=4
                    placeholder="Enter your prompt content here..."
                    prop:value=move || content.get()
                    on:input=move |ev| set_content.set(event_target_value(&ev))
                ></textarea>
                <button
                    type="button"
                    class="save-prompt-btn"
                    disabled=move || saving.get() || content.with(|c| c.trim().is_empty())
                    on:click=save
                >
                    "Save Prompt"
                </button>
            </div>
            {move || notice.get().map(|n| {
                let (class, text) = match n {
                    Notice::Success(t) => ("prompt-message success", t),
                    Notice::Error(t) => ("prompt-message error", t),
                };
                view! {
                    <div class=class>
                        <span>{text}</span>
                        <button class="message-close-btn" aria-label="Close message" on:click=move |_| set_notice.set(None)>
                            "×"
                        </button>
                    </div>
                }
            })}
            <Show
                when=move || !store.prompts().with(|p| p.is_empty())
                fallback=|| view! { <p class="no-prompts">"No saved prompts yet."</p> }
            >
                <div class="prompts-list">
                    <For each=move || store.prompts().get() key=|p| p.id.clone() children=row.clone() />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_cuts_long_prompts() {
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(120);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 103);
        assert_eq!(preview(&"a".repeat(100)), "a".repeat(100));
    }

    #[test]
    fn test_edit_draft_starts_from_prompt() {
        let prompt = Prompt {
            id: "4".into(),
            name: "Prompt 4".into(),
            prompt: "Look for trust".into(),
            prompt_type: Some("codebook".into()),
            created_at: None,
        };
        let draft = EditDraft::start(&prompt);
        assert_eq!(draft.id, "4");
        assert_eq!(draft.original_name, "Prompt 4");
        assert_eq!(draft.name, "Prompt 4");
        assert_eq!(draft.prompt, "Look for trust");
    }
}
