//! Error Display Component

use leptos::prelude::*;

/// Inline error line, dismissable when `on_dismiss` is given
#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional, into)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|msg| {
            view! {
                <div class="error-display">
                    <p class="error-message">{msg}</p>
                    {on_dismiss.map(|cb| view! {
                        <button class="dismiss-btn" on:click=move |_| cb.run(())>"×"</button>
                    })}
                </div>
            }
        })
    }
}
