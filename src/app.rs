//! Qualitative Coding Frontend App
//!
//! Provides the shared context and renders navbar, sidebar and the page
//! for the current route.

use leptos::ev;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{Navbar, ProtectedRoute, Sidebar};
use crate::config::AppConfig;
use crate::context::{location_route, AppContext};
use crate::pages::*;
use crate::routes::Route;
use crate::session::Session;
use crate::store::AppState;

fn render_page(route: Route) -> AnyView {
    match route {
        Route::Landing => view! { <LandingPage /> }.into_any(),
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Register => view! { <RegisterPage /> }.into_any(),
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::Import => view! { <ImportPage /> }.into_any(),
        Route::Data { .. } => view! { <DataPage /> }.into_any(),
        Route::FilteredData { .. } => view! { <FilteredDataPage /> }.into_any(),
        Route::GenerateCodebook => view! { <GenerateCodebookPage /> }.into_any(),
        Route::ViewCodebook { .. } => view! { <ViewCodebookPage /> }.into_any(),
        Route::ApplyCodebook => view! { <ApplyCodebookPage /> }.into_any(),
        Route::ViewCoding { .. } => view! { <ViewCodingPage /> }.into_any(),
        Route::CompareCodebooks { .. } => view! { <CompareCodebooksPage /> }.into_any(),
        Route::Project { id } => view! { <ProjectPage id=id /> }.into_any(),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let session = Session::browser();
    let ctx = AppContext::new(location_route(), session.sidebar_collapsed());
    tracing::info!("[APP] backend {}", config.api_base_url);

    // Provide context to all children
    provide_context(ApiClient::new(&config.api_base_url, session));
    provide_context(config);
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));

    // Back/forward buttons
    let _ = window_event_listener(ev::popstate, move |_| ctx.sync_from_location());

    // Remount only when the page itself changes, not its query parameters
    let page = Memo::new(move |_| ctx.route.with(Route::page));
    let content = move || {
        let route = page.get();
        tracing::debug!("[ROUTE] {}", route.href());
        if route.is_protected() {
            view! { <ProtectedRoute>{render_page(route.clone())}</ProtectedRoute> }.into_any()
        } else {
            render_page(route)
        }
    };

    view! {
        <div class="app-layout">
            <Navbar />
            <div class="app-body">
                <Sidebar />
                <main class="main-content">{content}</main>
            </div>
        </div>
    }
}
