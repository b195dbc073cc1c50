//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{Codebook, DatabaseItem, Prompt};

/// Lists shared across pages, field-level reactive
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Saved codebooks, newest list from `/api/list-codebooks`
    pub codebooks: Vec<Codebook>,
    /// Raw-data projects
    pub databases: Vec<DatabaseItem>,
    /// Saved generation prompts
    pub prompts: Vec<Prompt>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_codebooks(store: &AppStore, codebooks: Vec<Codebook>) {
    *store.codebooks().write() = codebooks;
}

/// Remove a codebook from the store by ID
pub fn store_remove_codebook(store: &AppStore, codebook_id: &str) {
    store.codebooks().write().retain(|c| c.id != codebook_id);
}

pub fn store_set_databases(store: &AppStore, databases: Vec<DatabaseItem>) {
    *store.databases().write() = databases;
}

/// Remove a database from the store by schema name
pub fn store_remove_database(store: &AppStore, schema: &str) {
    store.databases().write().retain(|d| d.name != schema);
}

pub fn store_set_prompts(store: &AppStore, prompts: Vec<Prompt>) {
    *store.prompts().write() = prompts;
}

/// Add or replace a prompt by ID
pub fn store_upsert_prompt(store: &AppStore, prompt: Prompt) {
    let field = store.prompts();
    let mut prompts = field.write();
    match prompts.iter_mut().find(|p| p.id == prompt.id) {
        Some(existing) => *existing = prompt,
        None => prompts.push(prompt),
    }
}

pub fn store_remove_prompt(store: &AppStore, prompt_id: &str) {
    store.prompts().write().retain(|p| p.id != prompt_id);
}
