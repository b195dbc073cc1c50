//! Apply Codebook Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApplyRequest};
use crate::components::{reload_codebooks, DynamicForm, SubmitButton};
use crate::context::{use_api, use_app_context};
use crate::form::{data_source_options, FieldDescriptor, FormDescriptor, FormResult, FormValues, SelectOption};
use crate::models::Codebook;
use crate::routes::Route;
use crate::store::{use_app_store, AppStateStoreFields};

fn apply_fields(codebooks: &[Codebook]) -> FormDescriptor {
    let options: Vec<SelectOption> = codebooks.iter().map(|c| SelectOption::new(c.id.clone(), c.label())).collect();
    let first = options.first().map(|o| o.value.clone()).unwrap_or_default();
    FormDescriptor::or_empty(vec![
        FieldDescriptor::select("database", "Data Source", data_source_options()).with_value("original"),
        FieldDescriptor::select("codebook", "Codebook", options).with_value(first),
        FieldDescriptor::text("report_name", "Report Name").with_placeholder("Name for the coding report"),
        FieldDescriptor::textarea("methodology", "Methodology", 4)
            .with_placeholder("Describe how the codebook should be applied..."),
    ])
}

fn apply_request(values: &FormValues) -> ApplyRequest {
    ApplyRequest {
        database: values.get("database").to_string(),
        codebook: values.get("codebook").to_string(),
        report_name: values.get("report_name").trim().to_string(),
        methodology: values.get("methodology").to_string(),
    }
}

#[component]
pub fn ApplyCodebookPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let store = use_app_store();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (result, set_result) = signal::<Option<FormResult>>(None);

    reload_codebooks(api.clone(), store, set_error);
    let fields = Signal::derive(move || store.codebooks().with(|cbs| apply_fields(cbs)));

    let on_submit = move |values: FormValues| {
        let api_key = match api::require_api_key(api.session()) {
            Ok(key) => key,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let request = apply_request(&values);
        let api = api.clone();
        set_loading.set(true);
        set_error.set(None);
        set_result.set(None);
        spawn_local(async move {
            match api::apply_codebook(&api, &request, &api_key).await {
                Ok(report) => {
                    tracing::info!("[CODEBOOKS] applied {} to {}", request.codebook, request.database);
                    set_result.set(FormResult::from_value(report));
                }
                Err(e) => {
                    tracing::warn!("[CODEBOOKS] apply failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="home-container">
            <div class="form-panel">
                <h1>"Apply Codebook"</h1>
                <div class="view-link">
                    <button class="view-button" on:click=move |_| ctx.navigate(Route::ViewCoding { selected: None })>
                        "View Coding"
                    </button>
                </div>
                <DynamicForm
                    fields=fields
                    submit=SubmitButton::new("Apply Codebook", "Applying...")
                    disabled=loading
                    on_submit=on_submit
                    error=error
                    result=result
                    result_title="Classification Report"
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    #[test]
    fn test_apply_fields_default_to_first_codebook() {
        let codebooks = vec![
            Codebook { id: "cb_a".into(), name: "Trust".into(), metadata: Default::default() },
            Codebook { id: "cb_b".into(), name: String::new(), metadata: Default::default() },
        ];
        let descriptor = apply_fields(&codebooks);
        let mut state = FormState::from_descriptor(&descriptor);
        assert_eq!(state.value("database"), "original");
        assert_eq!(state.value("codebook"), "cb_a");

        state.set("report_name", "  wave 1 ");
        state.set("methodology", "Code each post once");
        let request = apply_request(&state.snapshot());
        assert_eq!(request.report_name, "wave 1");
        assert_eq!(request.codebook, "cb_a");
        assert_eq!(request.methodology, "Code each post once");
    }

    #[test]
    fn test_apply_fields_without_codebooks() {
        let descriptor = apply_fields(&[]);
        assert_eq!(FormState::from_descriptor(&descriptor).value("codebook"), "");
    }
}
