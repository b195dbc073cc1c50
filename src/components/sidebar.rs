//! Sidebar Component
//!
//! Auth-aware navigation. Re-probes the session whenever the auth
//! version changes; hidden entirely while collapsed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{probe_session, AuthStatus};
use crate::context::{use_api, use_app_context};
use crate::routes::Route;

fn nav_items(status: AuthStatus) -> Vec<(&'static str, Route)> {
    match status {
        AuthStatus::Loading => Vec::new(),
        AuthStatus::Authenticated => vec![
            ("Home", Route::Home),
            ("Import Data", Route::Import),
            ("View Data", Route::Data { database: None }),
            ("View Filtered Data", Route::FilteredData { database: None }),
            ("Generate Codebook", Route::GenerateCodebook),
            ("View Codebook", Route::ViewCodebook { selected: None }),
            ("Apply Codebook", Route::ApplyCodebook),
            ("View Coding", Route::ViewCoding { selected: None }),
            ("Compare Codebooks", Route::CompareCodebooks { codebook_a: None }),
        ],
        AuthStatus::Unauthenticated => vec![("Login", Route::Login), ("Register", Route::Register)],
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let (status, set_status) = signal(AuthStatus::Loading);

    let probe_api = api.clone();
    Effect::new(move |_| {
        let version = ctx.auth_version.get();
        let api = probe_api.clone();
        spawn_local(async move {
            let next = AuthStatus::from_probe(probe_session(&api).await);
            tracing::debug!("[AUTH] sidebar probe (v{}): {:?}", version, next);
            set_status.set(next);
        });
    });

    let visible = move || status.get() != AuthStatus::Loading && !ctx.sidebar_collapsed.get();

    view! {
        <Show when=visible>
            <aside class="app-sidebar">
                <div class="sidebar-header">
                    <button
                        class="sidebar-close"
                        aria-label="Collapse sidebar"
                        on:click={
                            let api = api.clone();
                            move |_| ctx.toggle_sidebar(api.session())
                        }
                    >
                        "✕"
                    </button>
                </div>
                {move || {
                    nav_items(status.get())
                        .into_iter()
                        .map(|(label, route)| {
                            let active = {
                                let page = std::mem::discriminant(&route);
                                move || ctx.route.with(|r| std::mem::discriminant(r) == page)
                            };
                            view! {
                                <button
                                    class=move || if active() { "sidebar-btn active" } else { "sidebar-btn" }
                                    on:click=move |_| ctx.navigate(route.clone())
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </aside>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_items_by_status() {
        assert!(nav_items(AuthStatus::Loading).is_empty());
        let anon: Vec<_> = nav_items(AuthStatus::Unauthenticated).into_iter().map(|(l, _)| l).collect();
        assert_eq!(anon, vec!["Login", "Register"]);
        let authed = nav_items(AuthStatus::Authenticated);
        assert!(authed.iter().all(|(_, r)| r.is_protected()));
    }
}
