//! Codebook Tree Component
//!
//! Parsed codebook as collapsible families of codes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_api;
use crate::models::Family;
use crate::tree::{code_definition, code_label, family_label, ExpandState, TreePanel, EMPTY_TREE_MESSAGE};

#[component]
pub fn CodebookTree(#[prop(into)] codebook_id: Signal<Option<String>>) -> impl IntoView {
    let api = use_api();
    let (families, set_families) = signal(Vec::<Family>::new());
    let expand = RwSignal::new(ExpandState::default());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let id = codebook_id.get();
        let api = api.clone();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::parse_codebook(&api, id.as_deref()).await {
                Ok(parsed) => {
                    expand.set(ExpandState::for_families(parsed.len()));
                    set_families.set(parsed);
                }
                Err(e) => {
                    tracing::warn!("[TREE] parse failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let family_views = move || {
        families
            .get()
            .into_iter()
            .enumerate()
            .map(|(index, family)| {
                let title = family_label(index, &family);
                let codes = family.codes;
                view! {
                    <li class="tree-family">
                        <button class="tree-family-toggle" on:click=move |_| expand.update(|s| s.toggle(index))>
                            {move || if expand.with(|s| s.is_expanded(index)) { "▼" } else { "▶" }}
                            " "
                            {title}
                        </button>
                        {move || {
                            expand.with(|s| s.is_expanded(index)).then(|| {
                                view! {
                                    <ul class="tree-codes">
                                        {codes
                                            .iter()
                                            .enumerate()
                                            .map(|(i, code)| view! {
                                                <li class="tree-code">
                                                    <strong>{code_label(i, code)}</strong>
                                                    ": "
                                                    <span class="tree-code-definition">{code_definition(code)}</span>
                                                </li>
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                            })
                        }}
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="codebook-tree">
            {move || {
                let panel = families.with(|f| TreePanel::from_state(loading.get(), error.get(), f));
                match panel {
                    TreePanel::Loading => view! { <p class="loading">"Loading codebook..."</p> }.into_any(),
                    TreePanel::Error(msg) => view! { <p class="error">{msg}</p> }.into_any(),
                    TreePanel::Empty => view! { <p class="tree-empty">{EMPTY_TREE_MESSAGE}</p> }.into_any(),
                    TreePanel::Families => view! {
                        <div class="tree-toolbar">
                            <button on:click=move |_| expand.update(|s| s.expand_all())>"Expand All"</button>
                            <button on:click=move |_| expand.update(|s| s.collapse_all())>"Collapse All"</button>
                        </div>
                        <ul class="tree-families">{family_views}</ul>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
