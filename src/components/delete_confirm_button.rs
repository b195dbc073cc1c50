//! Delete Confirm Button Component
//!
//! "Delete" first, then an inline `Delete "name"?` with ✓/✗.

use leptos::prelude::*;

#[component]
pub fn DeleteConfirmButton(
    /// Shown in the confirmation prompt
    #[prop(into)] item_name: String,
    /// True while a delete is in flight
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = format!("Delete \"{}\"?", item_name);

    // Clicks stay inside the row; list rows are clickable too
    let set_armed = move |ev: web_sys::MouseEvent, value: bool| {
        ev.stop_propagation();
        armed.set(value);
    };

    move || {
        if !armed.get() {
            return view! {
                <button
                    class="delete-btn"
                    disabled=move || disabled.get().unwrap_or(false)
                    on:click=move |ev| set_armed(ev, true)
                >
                    "Delete"
                </button>
            }
            .into_any();
        }
        view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Confirm"
                    on:click=move |ev| {
                        set_armed(ev, false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button class="cancel-btn" title="Cancel" on:click=move |ev| set_armed(ev, false)>
                    "✗"
                </button>
            </span>
        }
        .into_any()
    }
}
