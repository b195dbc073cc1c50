//! Selection List Component
//!
//! One button per item, the selected one marked active.

use leptos::prelude::*;

use crate::models::{Codebook, DatabaseItem, Project};

/// Row shown by `SelectionList`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub name: Option<String>,
}

impl ListItem {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self { id: id.into(), name }
    }

    /// Name, falling back to id
    pub fn label(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.id)
    }
}

impl From<&Codebook> for ListItem {
    fn from(cb: &Codebook) -> Self {
        Self::new(cb.id.clone(), Some(cb.name.clone()))
    }
}

impl From<&DatabaseItem> for ListItem {
    fn from(db: &DatabaseItem) -> Self {
        Self::new(db.name.clone(), Some(db.display_name.clone()))
    }
}

impl From<&Project> for ListItem {
    fn from(p: &Project) -> Self {
        Self::new(p.schema_name.clone(), p.display_name.clone())
    }
}

/// The wanted id when present in `items`, else the last item
pub fn initial_selection(items: &[ListItem], wanted: Option<&str>) -> Option<String> {
    wanted
        .filter(|w| items.iter().any(|i| i.id == *w))
        .map(str::to_string)
        .or_else(|| items.last().map(|i| i.id.clone()))
}

#[component]
pub fn SelectionList(
    #[prop(into)] items: Signal<Vec<ListItem>>,
    #[prop(into)] selected: Signal<Option<String>>,
    #[prop(into)] on_select: Callback<String>,
    #[prop(optional, into)] empty_message: Option<String>,
) -> impl IntoView {
    let empty_message = empty_message.unwrap_or_else(|| "No items available".to_string());

    view! {
        <div class="selector-list">
            <Show
                when=move || !items.with(|i| i.is_empty())
                fallback=move || view! { <p class="selector-empty">{empty_message.clone()}</p> }
            >
                <For
                    each=move || items.get()
                    key=|item| item.id.clone()
                    children=move |item| {
                        let id = item.id.clone();
                        let is_active = {
                            let id = id.clone();
                            move || selected.with(|s| s.as_deref() == Some(id.as_str()))
                        };
                        view! {
                            <button
                                class=move || if is_active() { "db-button active" } else { "db-button" }
                                on:click=move |_| on_select.run(id.clone())
                            >
                                {item.label().to_string()}
                            </button>
                        }
                    }
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(ListItem::new("cb_1", None).label(), "cb_1");
        assert_eq!(ListItem::new("cb_1", Some(String::new())).label(), "cb_1");
        assert_eq!(ListItem::new("cb_1", Some("Trust codes".into())).label(), "Trust codes");
    }

    #[test]
    fn test_initial_selection_prefers_wanted_then_last() {
        let items = vec![ListItem::new("a", None), ListItem::new("b", None), ListItem::new("c", None)];
        assert_eq!(initial_selection(&items, Some("a")), Some("a".to_string()));
        assert_eq!(initial_selection(&items, Some("zzz")), Some("c".to_string()));
        assert_eq!(initial_selection(&items, None), Some("c".to_string()));
        assert_eq!(initial_selection(&[], Some("a")), None);
    }
}
