//! Protected Route Component
//!
//! Probes the session once on mount; children render only when the
//! backend accepts it, otherwise the user is sent back to `/`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{probe_session, AuthStatus};
use crate::context::{use_api, use_app_context};
use crate::routes::Route;

/// Redirect only for a rejected session, and only while the user is still
/// on the page that was gated. `current` is `None` once the app is gone.
fn should_redirect(status: AuthStatus, gated: &Route, current: Option<&Route>) -> bool {
    status == AuthStatus::Unauthenticated && current.is_some_and(|r| r.page() == gated.page())
}

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let (status, set_status) = signal(AuthStatus::Loading);
    let gated = ctx.route.get_untracked();

    spawn_local(async move {
        let status = AuthStatus::from_probe(probe_session(&api).await);
        let current = ctx.route.try_get_untracked();
        if should_redirect(status, &gated, current.as_ref()) {
            tracing::info!("[AUTH] not signed in, redirecting");
            ctx.replace(Route::Landing);
        }
        // Gone if the page unmounted while the session check was in flight
        set_status.try_set(status);
    });

    view! {
        <Show when=move || status.get() == AuthStatus::Authenticated>
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_on_gated_page_redirects() {
        let home = Route::Home;
        assert!(should_redirect(AuthStatus::Unauthenticated, &home, Some(&Route::Home)));
        let view = Route::ViewCodebook { selected: None };
        let same_page = Route::ViewCodebook { selected: Some("cb_1".into()) };
        assert!(should_redirect(AuthStatus::Unauthenticated, &view, Some(&same_page)));
    }

    #[test]
    fn test_no_redirect_when_signed_in_or_loading() {
        assert!(!should_redirect(AuthStatus::Authenticated, &Route::Home, Some(&Route::Home)));
        assert!(!should_redirect(AuthStatus::Loading, &Route::Home, Some(&Route::Home)));
    }

    #[test]
    fn test_no_redirect_after_leaving_page() {
        assert!(!should_redirect(AuthStatus::Unauthenticated, &Route::Home, Some(&Route::Login)));
        assert!(!should_redirect(AuthStatus::Unauthenticated, &Route::Home, Some(&Route::Import)));
        assert!(!should_redirect(AuthStatus::Unauthenticated, &Route::Home, None));
    }
}
