//! Compare Codebooks Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::reload_codebooks;
use crate::context::{use_api, use_app_context};
use crate::form::SelectOption;
use crate::routes::Route;
use crate::store::{use_app_store, AppStateStoreFields};

const MODEL_OPTIONS: [(&str, &str); 4] = [("", "Default"), ("MODEL_1", "MODEL_1"), ("MODEL_2", "MODEL_2"), ("MODEL_3", "MODEL_3")];

/// Starting pair: a preset A gets the first other codebook as B,
/// otherwise the first two in the list.
fn initial_pair(ids: &[String], preset_a: Option<&str>) -> (String, String) {
    match preset_a.filter(|a| !a.is_empty()) {
        Some(a) => {
            let b = ids.iter().find(|id| id.as_str() != a).cloned().unwrap_or_default();
            (a.to_string(), b)
        }
        None => (
            ids.first().cloned().unwrap_or_default(),
            ids.get(1).cloned().unwrap_or_default(),
        ),
    }
}

fn copy_to_clipboard(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    spawn_local(async move {
        if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
            tracing::debug!("[CODEBOOKS] clipboard write failed: {}", api::js_error_message(&e));
        }
    });
}

#[component]
fn CodebookSelect(title: &'static str, options: Signal<Vec<SelectOption>>, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="compare-card">
            <div class="compare-toolbar">{title}</div>
            <select class="select-compact" on:change=move |ev| value.set(event_target_value(&ev))>
                <option value="" prop:selected=move || value.with(|v| v.is_empty())>"-- select --"</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|opt| {
                            let selected = {
                                let v = opt.value.clone();
                                move || value.with(|cur| *cur == v)
                            };
                            view! { <option value=opt.value prop:selected=selected>{opt.label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

#[component]
pub fn CompareCodebooksPage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let store = use_app_store();
    let a = RwSignal::new(String::new());
    let b = RwSignal::new(String::new());
    let model = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let (comparison, set_comparison) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let preset_a = ctx.route.with_untracked(|r| match r {
        Route::CompareCodebooks { codebook_a } => codebook_a.clone(),
        _ => None,
    });
    reload_codebooks(api.clone(), store, set_error);

    // Pick the starting pair once the list arrives
    Effect::new(move |initialised: Option<bool>| {
        if initialised == Some(true) {
            return true;
        }
        let ids: Vec<String> = store.codebooks().with(|cbs| cbs.iter().map(|c| c.id.clone()).collect());
        if ids.is_empty() {
            return false;
        }
        let (first, second) = initial_pair(&ids, preset_a.as_deref());
        a.set(first);
        b.set(second);
        true
    });

    let options = Signal::derive(move || {
        store
            .codebooks()
            .with(|cbs| cbs.iter().map(|c| SelectOption::new(c.id.clone(), c.label())).collect::<Vec<_>>())
    });

    let swap = move |_: web_sys::MouseEvent| {
        let (first, second) = (a.get_untracked(), b.get_untracked());
        a.set(second);
        b.set(first);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_comparison.set(String::new());
        set_error.set(None);
        let (first, second) = (a.get_untracked(), b.get_untracked());
        let checked = api::validate_compare_selection(&first, &second).and_then(|_| api::require_api_key(api.session()));
        let api_key = match checked {
            Ok(key) => key,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let api = api.clone();
        let model = Some(model.get_untracked());
        set_loading.set(true);
        spawn_local(async move {
            match api::compare_codebooks(&api, &first, &second, &api_key, model).await {
                Ok(text) => {
                    tracing::info!("[CODEBOOKS] compared {} with {}", first, second);
                    set_comparison.set(text);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="home-container">
            <h1>"Compare Codebook"</h1>
            <form on:submit=on_submit>
                <div class="compare-wrap">
                    <div class="compare-grid">
                        <CodebookSelect title="Codebook A" options=options value=a />
                        <button type="button" class="swap-btn" title="Swap selections" on:click=swap>"⇆"</button>
                        <CodebookSelect title="Codebook B" options=options value=b />
                    </div>
                    <div class="compare-panel">
                        <div class="panel-title">"Compare Options"</div>
                        <label>"Model"</label>
                        <select class="model-select" on:change=move |ev| model.set(event_target_value(&ev))>
                            {MODEL_OPTIONS.into_iter().map(|(value, label)| view! {
                                <option value=value prop:selected=move || model.with(|m| m.as_str() == value)>{label}</option>
                            }).collect_view()}
                        </select>
                        <button class="project-tab" type="submit" disabled=move || loading.get()>
                            {move || if loading.get() { "Comparing..." } else { "Compare" }}
                        </button>
                        <button
                            class="project-tab"
                            type="button"
                            on:click=move |_| {
                                set_comparison.set(String::new());
                                set_error.set(None);
                            }
                        >
                            "Clear"
                        </button>
                    </div>
                </div>
            </form>
            {move || error.get().map(|e| view! { <p class="error-message">{e}</p> })}
            <Show when=move || !comparison.with(|c| c.is_empty())>
                <div class="comparison-result">
                    <button class="project-tab" on:click=move |_| copy_to_clipboard(comparison.get_untracked())>"Copy"</button>
                    <pre class="comparison-text">{move || comparison.get()}</pre>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial_pair_with_preset() {
        let list = ids(&["cb_1", "cb_2", "cb_3"]);
        assert_eq!(initial_pair(&list, Some("cb_1")), ("cb_1".into(), "cb_2".into()));
        assert_eq!(initial_pair(&list, Some("cb_2")), ("cb_2".into(), "cb_1".into()));
        assert_eq!(initial_pair(&ids(&["cb_1"]), Some("cb_1")), ("cb_1".into(), String::new()));
    }

    #[test]
    fn test_initial_pair_without_preset() {
        assert_eq!(initial_pair(&ids(&["x", "y", "z"]), None), ("x".into(), "y".into()));
        assert_eq!(initial_pair(&ids(&["x"]), Some("")), ("x".into(), String::new()));
        assert_eq!(initial_pair(&[], None), (String::new(), String::new()));
    }
}
