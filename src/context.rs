//! Application Context
//!
//! Shared state provided via Leptos Context API. Components notify each
//! other through these signals (auth changes, prompt edits, sidebar state).

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::routes::Route;
use crate::session::Session;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub route: ReadSignal<Route>,
    /// Current page - write
    set_route: WriteSignal<Route>,
    /// Bumped on login/logout so auth-aware views re-probe - read
    pub auth_version: ReadSignal<u32>,
    /// Bumped on login/logout so auth-aware views re-probe - write
    set_auth_version: WriteSignal<u32>,
    /// Bumped when prompts are saved or deleted - read
    pub prompts_version: ReadSignal<u32>,
    /// Bumped when prompts are saved or deleted - write
    set_prompts_version: WriteSignal<u32>,
    /// Sidebar collapse flag - read
    pub sidebar_collapsed: ReadSignal<bool>,
    /// Sidebar collapse flag - write
    set_sidebar_collapsed: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(initial_route: Route, sidebar_collapsed: bool) -> Self {
        let (route, set_route) = signal(initial_route);
        let (auth_version, set_auth_version) = signal(0);
        let (prompts_version, set_prompts_version) = signal(0);
        let (sidebar_collapsed, set_sidebar_collapsed) = signal(sidebar_collapsed);
        Self {
            route,
            set_route,
            auth_version,
            set_auth_version,
            prompts_version,
            set_prompts_version,
            sidebar_collapsed,
            set_sidebar_collapsed,
        }
    }

    /// Push a history entry and switch page
    pub fn navigate(&self, route: Route) {
        update_history(&route, false);
        self.set_route.set(route);
    }

    /// Replace the current history entry and switch page
    pub fn replace(&self, route: Route) {
        update_history(&route, true);
        self.set_route.set(route);
    }

    /// Re-read the route from the address bar (back/forward)
    pub fn sync_from_location(&self) {
        self.set_route.set(location_route());
    }

    pub fn notify_auth_changed(&self) {
        self.set_auth_version.update(|v| *v += 1);
    }

    pub fn notify_prompts_changed(&self) {
        self.set_prompts_version.update(|v| *v += 1);
    }

    /// Flip the sidebar and persist the new flag
    pub fn toggle_sidebar(&self, session: &Session) {
        let collapsed = !self.sidebar_collapsed.get_untracked();
        session.set_sidebar_collapsed(collapsed);
        self.set_sidebar_collapsed.set(collapsed);
    }
}

/// Route for the current `location`; `Landing` outside a browser
pub fn location_route() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::Landing;
    };
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    Route::parse(&path, &search)
}

fn update_history(route: &Route, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let href = route.href();
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&href))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&href))
    };
    if let Err(e) = result {
        tracing::warn!("[ROUTE] history update failed: {}", crate::api::js_error_message(&e));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}
