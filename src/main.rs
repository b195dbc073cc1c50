#![allow(warnings)]
//! Qualitative Coding Frontend Entry Point

mod api;
mod config;
mod session;
mod models;
mod form;
mod tree;
mod content;
mod routes;
mod format;
mod search;
mod context;
mod store;
mod components;
mod pages;
mod app;
mod markdown;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
    mount_to_body(App);
}
