//! Generate Codebook Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CodebookManager, DynamicForm, PromptManager, SubmitButton};
use crate::context::{use_api, use_app_context, use_config};
use crate::form::{data_source_options, FieldDescriptor, FormDescriptor, FormResult, FormValues};
use crate::routes::Route;

/// A loaded prompt seeds the instructions field
fn generate_fields(prompt: &str) -> FormDescriptor {
    FormDescriptor::or_empty(vec![
        FieldDescriptor::select("database", "Database", data_source_options()).with_value("original"),
        FieldDescriptor::textarea("custom_prompt", "Additional instructions (optional)", 4)
            .with_placeholder("Load a saved prompt or type instructions...")
            .with_value(prompt),
    ])
}

#[component]
pub fn GenerateCodebookPage() -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let ctx = use_app_context();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (result, set_result) = signal::<Option<FormResult>>(None);
    let (refresh, set_refresh) = signal(0u32);
    let (loaded_prompt, set_loaded_prompt) = signal(String::new());

    let on_submit = move |values: FormValues| {
        let api_key = match api::require_api_key(api.session()) {
            Ok(key) => key,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let api = api.clone();
        let database = values.get("database").to_string();
        let custom_prompt = values.get("custom_prompt").to_string();
        let timeout_ms = config.generate_timeout_ms;
        set_loading.set(true);
        set_error.set(None);
        set_result.set(None);
        spawn_local(async move {
            match api::generate_codebook(&api, &database, &api_key, &custom_prompt, timeout_ms).await {
                Ok(codebook) => {
                    tracing::info!("[CODEBOOKS] generated from {} ({} chars)", database, codebook.len());
                    set_result.set(Some(FormResult::Text(codebook)));
                    set_refresh.update(|n| *n += 1);
                }
                Err(e) => {
                    tracing::warn!("[CODEBOOKS] generate failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let view_codebook = move |selected: Option<String>| ctx.navigate(Route::ViewCodebook { selected });

    view! {
        <div class="home-container">
            <div class="form-panel">
                <h1>"Generate Codebook"</h1>
                <div class="view-link">
                    <button class="view-button" on:click=move |_| view_codebook(None)>"View Codebook"</button>
                </div>
                <DynamicForm
                    fields=Signal::derive(move || loaded_prompt.with(|p| generate_fields(p)))
                    submit=SubmitButton::new("Generate Codebook", "Generating...")
                    disabled=loading
                    on_submit=on_submit
                    error=error
                    result=result
                    result_title="Generated Codebook"
                />
            </div>
            <CodebookManager refresh=refresh on_view=move |id: String| view_codebook(Some(id)) />
            <PromptManager on_load=move |prompt: String| set_loaded_prompt.set(prompt) />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    #[test]
    fn test_loaded_prompt_fills_instructions() {
        let state = FormState::from_descriptor(&generate_fields("Focus on trust"));
        assert_eq!(state.value("database"), "original");
        assert_eq!(state.value("custom_prompt"), "Focus on trust");
        assert_eq!(FormState::from_descriptor(&generate_fields("")).value("custom_prompt"), "");
    }
}
