//! File Upload Component
//!
//! `.zst` Reddit dump upload with subreddit filter tags, data type and
//! database name.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, add_subreddit, DataType, UploadRequest};
use crate::context::use_api;

#[component]
pub fn FileUpload(
    /// Called after the server accepted an upload
    #[prop(into)] on_uploaded: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let file_input = NodeRef::<html::Input>::new();

    // File handles are not Send
    let (file, set_file) = signal_local::<Option<web_sys::File>>(None);
    let (loading, set_loading) = signal(false);
    let (message, set_message) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (subreddit_input, set_subreddit_input) = signal(String::new());
    let subreddits = RwSignal::new(Vec::<String>::new());
    let (data_type, set_data_type) = signal(DataType::Submissions);
    let (name, set_name) = signal(String::new());

    let on_file_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let picked = input.files().and_then(|files| files.get(0));
        match api::validate_upload_file(picked.as_ref().map(|f| f.name()).as_deref()) {
            Ok(()) => {
                set_error.set(None);
                set_file.set(picked);
            }
            Err(e) => {
                set_error.set(Some(e.to_string()));
                set_file.set(None);
            }
        }
    };

    let add_tag = move || {
        let raw = subreddit_input.get_untracked();
        let mut added = false;
        subreddits.update(|tags| added = add_subreddit(tags, &raw));
        if added {
            set_subreddit_input.set(String::new());
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let picked = file.get_untracked();
        if let Err(e) = api::validate_upload_file(picked.as_ref().map(|f| f.name()).as_deref()) {
            set_error.set(Some(e.to_string()));
            return;
        }
        if let Err(e) = api::validate_database_name(&name.get_untracked()) {
            set_error.set(Some(e.to_string()));
            return;
        }
        let Some(picked) = picked else {
            return;
        };
        let request = UploadRequest {
            file: picked,
            subreddits: subreddits.get_untracked(),
            data_type: data_type.get_untracked(),
            name: name.get_untracked(),
        };

        set_loading.set(true);
        set_message.set(None);
        set_error.set(None);
        let api = api.clone();
        spawn_local(async move {
            tracing::info!("[IMPORT] uploading {} as {}", request.file.name(), request.name.trim());
            match api::upload_zst(&api, request).await {
                Ok(reply) => {
                    set_message.set(Some(reply.display_message()));
                    set_file.set(None);
                    subreddits.set(Vec::new());
                    set_subreddit_input.set(String::new());
                    set_data_type.set(DataType::Submissions);
                    set_name.set(String::new());
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    on_uploaded.run(());
                }
                Err(e) => {
                    tracing::warn!("[IMPORT] upload failed: {}", e);
                    set_error.set(Some(format!("Error: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    let data_type_option = move |kind: DataType| {
        view! {
            <label class="radio-label">
                <input
                    type="radio"
                    name="data-type"
                    value=kind.as_str()
                    prop:checked=move || data_type.get() == kind
                    disabled=move || loading.get()
                    on:change=move |_| set_data_type.set(kind)
                />
                {kind.label()}
            </label>
        }
    };

    view! {
        <div class="file-upload">
            <h2>"Upload Data"</h2>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="zst-file">"Upload .zst File"</label>
                    <input
                        id="zst-file"
                        type="file"
                        accept=".zst"
                        node_ref=file_input
                        disabled=move || loading.get()
                        on:change=on_file_change
                    />
                    {move || file.with(|f| f.as_ref().map(|f| format!("Selected: {}", f.name())))
                        .map(|text| view! { <p class="file-name">{text}</p> })}
                </div>

                <div class="form-group">
                    <label for="subreddits">"Filter by Subreddits"</label>
                    <div class="subreddit-input-group">
                        <input
                            id="subreddits"
                            type="text"
                            placeholder="Enter subreddit name..."
                            prop:value=move || subreddit_input.get()
                            disabled=move || loading.get()
                            on:input=move |ev| set_subreddit_input.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                let key = ev.key();
                                if key == "Enter" || key == "," {
                                    ev.prevent_default();
                                    add_tag();
                                }
                            }
                        />
                        <button
                            type="button"
                            class="add-btn"
                            disabled=move || loading.get() || subreddit_input.with(|s| s.trim().is_empty())
                            on:click=move |_| add_tag()
                        >
                            "Add"
                        </button>
                    </div>
                    <div class="subreddit-tags">
                        {move || {
                            subreddits
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, tag)| view! {
                                    <div class="tag">
                                        <span>{tag}</span>
                                        <button
                                            type="button"
                                            class="tag-remove"
                                            disabled=move || loading.get()
                                            on:click=move |_| subreddits.update(|tags| {
                                                if index < tags.len() {
                                                    tags.remove(index);
                                                }
                                            })
                                        >
                                            "×"
                                        </button>
                                    </div>
                                })
                                .collect_view()
                        }}
                    </div>
                </div>

                <div class="form-group">
                    <label>"Data Type"</label>
                    <div class="radio-group">
                        {data_type_option(DataType::Submissions)}
                        {data_type_option(DataType::Comments)}
                    </div>
                </div>

                <div class="form-group">
                    <label for="db-name">"Database Name"</label>
                    <input
                        id="db-name"
                        type="text"
                        placeholder="Name for this database"
                        prop:value=move || name.get()
                        disabled=move || loading.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>

                <button type="submit" class="main-button" disabled=move || loading.get()>
                    {move || if loading.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
            {move || message.get().map(|m| view! { <p class="success-message">{m}</p> })}
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
        </div>
    }
}
