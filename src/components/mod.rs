//! UI Components
//!
//! Reusable Leptos components.

mod selection_list;
mod dynamic_form;
mod content_viewer;
mod codebook_tree;
mod protected_route;
mod error_display;
mod delete_confirm_button;
mod sidebar;
mod navbar;
mod codebook_manager;
mod database_manager;
mod file_upload;
mod prompt_manager;
mod entries_table;
mod entry_modal;

pub use selection_list::{initial_selection, ListItem, SelectionList};
pub use dynamic_form::{DynamicForm, SubmitButton};
pub use content_viewer::{ContentViewer, SavedContent};
pub use codebook_tree::CodebookTree;
pub use protected_route::ProtectedRoute;
pub use error_display::ErrorDisplay;
pub use delete_confirm_button::DeleteConfirmButton;
pub use sidebar::Sidebar;
pub use navbar::Navbar;
pub use codebook_manager::{reload_codebooks, CodebookManager};
pub use database_manager::{reload_databases, DatabaseManager, RAW_DATA_PROJECT_TYPE};
pub use file_upload::FileUpload;
pub use prompt_manager::PromptManager;
pub use entries_table::EntriesTable;
pub use entry_modal::{Entry, EntryModal};
