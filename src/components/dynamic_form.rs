//! Dynamic Form Component
//!
//! Renders a `FormDescriptor` as widgets, keeps one value per field id and
//! hands a snapshot to the caller on submit.

use leptos::prelude::*;

use crate::form::{FieldDescriptor, FieldKind, FormDescriptor, FormResult, FormState, FormValues};

/// Submit button text, idle and while the caller reports busy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub text: String,
    pub loading_text: String,
}

impl SubmitButton {
    pub fn new(text: &str, loading_text: &str) -> Self {
        Self { text: text.to_string(), loading_text: loading_text.to_string() }
    }
}

#[component]
pub fn DynamicForm(
    #[prop(into)] fields: Signal<FormDescriptor>,
    submit: SubmitButton,
    /// Owned by the caller, true while its request is in flight
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_submit: Callback<FormValues>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] result: MaybeProp<FormResult>,
    #[prop(optional, into)] result_title: Option<String>,
) -> impl IntoView {
    let state = RwSignal::new(FormState::from_descriptor(&fields.get_untracked()));

    // New descriptors discard edits
    Effect::new(move |_| {
        let descriptor = fields.get();
        state.set(FormState::from_descriptor(&descriptor));
    });

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if disabled.get_untracked() {
            return;
        }
        on_submit.run(state.with_untracked(|s| s.snapshot()));
    };

    let SubmitButton { text, loading_text } = submit;

    view! {
        <form class="action-form" on:submit=handle_submit>
            {move || {
                fields
                    .get()
                    .fields()
                    .iter()
                    .cloned()
                    .map(|field| view! { <FormField field=field state=state /> })
                    .collect_view()
            }}
            <button type="submit" class="main-button" disabled=move || disabled.get()>
                {move || if disabled.get() { loading_text.clone() } else { text.clone() }}
            </button>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            {move || {
                result.get().map(|r| {
                    view! {
                        <div class="form-result">
                            {result_title.clone().map(|t| view! { <h3>{t}</h3> })}
                            <pre>{r.render()}</pre>
                        </div>
                    }
                })
            }}
        </form>
    }
}

#[component]
fn FormField(field: FieldDescriptor, state: RwSignal<FormState>) -> impl IntoView {
    let FieldDescriptor { id, label, kind, placeholder, .. } = field;
    let value = {
        let id = id.clone();
        move || state.with(|s| s.value(&id).to_string())
    };
    let on_value = {
        let id = id.clone();
        move |v: String| {
            state.update(|s| {
                s.set(&id, v);
            });
        }
    };
    let placeholder = placeholder.unwrap_or_default();

    let widget = match kind {
        FieldKind::Select { options } => {
            view! {
                <select id=id.clone() on:change=move |ev| on_value(event_target_value(&ev))>
                    {options
                        .into_iter()
                        .map(|opt| {
                            let selected = {
                                let value = value.clone();
                                let option_value = opt.value.clone();
                                move || value() == option_value
                            };
                            view! { <option value=opt.value prop:selected=selected>{opt.label}</option> }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FieldKind::Radio { options } => {
            let name = id.clone();
            view! {
                <div class="radio-group" id=id.clone()>
                    {options
                        .into_iter()
                        .map(|opt| {
                            let checked = {
                                let value = value.clone();
                                let option_value = opt.value.clone();
                                move || value() == option_value
                            };
                            let on_value = on_value.clone();
                            let option_value = opt.value.clone();
                            view! {
                                <label class="radio-option">
                                    <input
                                        type="radio"
                                        name=name.clone()
                                        value=opt.value
                                        prop:checked=checked
                                        on:change=move |_| on_value(option_value.clone())
                                    />
                                    {opt.label}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }
        FieldKind::Textarea { rows } => view! {
            <textarea
                id=id.clone()
                rows=rows
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| on_value(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Password => view! {
            <input
                type="password"
                id=id.clone()
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| on_value(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input
                type="text"
                id=id.clone()
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| on_value(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-field">
            <label for=id>{label}</label>
            {widget}
        </div>
    }
}
