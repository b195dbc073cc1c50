//! Content Editor State
//!
//! View/load/edit state machine behind `ContentViewer`, kept free of
//! signals so it can be driven from tests.

use crate::api::{with_query, with_segment, ApiError};

/// How the selected id is put into the fetch URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStyle {
    /// `base?param=id`
    Query { param: String },
    /// `base/id`
    Path,
}

/// Where content comes from and where edits go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSource {
    pub fetch_base: String,
    pub fetch_style: FetchStyle,
    pub save_url: String,
    pub save_id_field: String,
}

impl ContentSource {
    pub fn codebooks() -> Self {
        Self {
            fetch_base: "/api/codebook".to_string(),
            fetch_style: FetchStyle::Query { param: "codebook_id".to_string() },
            save_url: "/api/save-codebook/".to_string(),
            save_id_field: "codebook_id".to_string(),
        }
    }

    pub fn coding_reports() -> Self {
        Self {
            fetch_base: "/api/coding".to_string(),
            fetch_style: FetchStyle::Path,
            save_url: "/api/save-coding/".to_string(),
            save_id_field: "report_name".to_string(),
        }
    }

    pub fn content_url(&self, id: &str) -> String {
        match &self.fetch_style {
            FetchStyle::Query { param } => with_query(&self.fetch_base, param, id),
            FetchStyle::Path => with_segment(&self.fetch_base, id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Viewing,
    Loading,
    Editing,
}

/// Validated save payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDraft {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentEditor {
    selected: Option<String>,
    /// Last successfully fetched (or saved) content
    content: String,
    edited: String,
    name: String,
    mode: ViewMode,
    saving: bool,
    error: Option<String>,
}

impl ContentEditor {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn edited(&self) -> &str {
        &self.edited
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Change selection. Returns true when a fetch should start.
    pub fn select(&mut self, id: Option<String>) -> bool {
        self.error = None;
        self.saving = false;
        match id.filter(|id| !id.is_empty()) {
            Some(id) => {
                self.name = id.clone();
                self.selected = Some(id);
                self.mode = ViewMode::Loading;
                true
            }
            None => {
                *self = Self::default();
                false
            }
        }
    }

    /// Apply fetched content; replies for a stale selection are dropped
    pub fn fetch_succeeded(&mut self, id: &str, content: String) {
        if self.selected.as_deref() != Some(id) {
            return;
        }
        self.edited = content.clone();
        self.content = content;
        self.name = id.to_string();
        self.mode = ViewMode::Viewing;
    }

    pub fn fetch_failed(&mut self, id: &str, error: &ApiError) {
        if self.selected.as_deref() != Some(id) {
            return;
        }
        self.error = Some(error.to_string());
        self.mode = ViewMode::Viewing;
    }

    pub fn begin_edit(&mut self) {
        if self.selected.is_none() {
            return;
        }
        self.edited = self.content.clone();
        self.name = self.selected.clone().unwrap_or_default();
        self.mode = ViewMode::Editing;
    }

    pub fn set_edited(&mut self, text: String) {
        self.edited = text;
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Drop unsaved edits and restore the last fetched content
    pub fn cancel(&mut self) {
        self.edited = self.content.clone();
        self.name = self.selected.clone().unwrap_or_default();
        self.error = None;
        self.saving = false;
        self.mode = ViewMode::Viewing;
    }

    /// Validate and mark a save in flight. An empty name is rejected
    /// without touching the network.
    pub fn prepare_save(&mut self) -> Result<SaveDraft, ApiError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            let err = ApiError::validation("Name cannot be empty");
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.saving = true;
        Ok(SaveDraft { name, content: self.edited.clone() })
    }

    /// Finish a successful save. Without a completion callback the
    /// displayed content becomes the edited text.
    pub fn save_succeeded(&mut self, draft: &SaveDraft, has_callback: bool) {
        if !has_callback {
            self.content = draft.content.clone();
        }
        self.saving = false;
        self.error = None;
        self.mode = ViewMode::Viewing;
    }

    pub fn save_failed(&mut self, error: &ApiError) {
        self.saving = false;
        self.error = Some(format!("Error saving content: {}", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(content: &str) -> ContentEditor {
        let mut editor = ContentEditor::default();
        assert!(editor.select(Some("cb1".into())));
        assert_eq!(editor.mode(), ViewMode::Loading);
        editor.fetch_succeeded("cb1", content.to_string());
        editor
    }

    #[test]
    fn test_content_urls() {
        assert_eq!(ContentSource::codebooks().content_url("a b"), "/api/codebook?codebook_id=a%20b");
        assert_eq!(ContentSource::coding_reports().content_url("r/1"), "/api/coding/r%2F1");
        let source = ContentSource {
            fetch_base: "/api/codebook?v=2".into(),
            ..ContentSource::codebooks()
        };
        assert_eq!(source.content_url("x"), "/api/codebook?v=2&codebook_id=x");
    }

    #[test]
    fn test_no_selection_clears() {
        let mut editor = loaded("# Codes");
        assert!(!editor.select(None));
        assert_eq!(editor.content(), "");
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.mode(), ViewMode::Viewing);
    }

    #[test]
    fn test_cancel_restores_last_fetched_content() {
        let mut editor = loaded("original");
        editor.begin_edit();
        assert_eq!(editor.mode(), ViewMode::Editing);
        for i in 0..50 {
            editor.set_edited(format!("typed {}", i));
        }
        editor.set_name("renamed".into());
        editor.cancel();
        assert_eq!(editor.content(), "original");
        assert_eq!(editor.edited(), "original");
        assert_eq!(editor.name(), "cb1");
        assert_eq!(editor.mode(), ViewMode::Viewing);
    }

    #[test]
    fn test_empty_name_rejected_locally() {
        let mut editor = loaded("text");
        editor.begin_edit();
        editor.set_name("   ".into());
        let err = editor.prepare_save().unwrap_err();
        assert_eq!(err, ApiError::validation("Name cannot be empty"));
        assert_eq!(editor.error(), Some("Name cannot be empty"));
        assert!(!editor.is_saving());
        assert_eq!(editor.mode(), ViewMode::Editing);
    }

    #[test]
    fn test_save_without_callback_updates_content() {
        let mut editor = loaded("old");
        editor.begin_edit();
        editor.set_edited("new".into());
        editor.set_name(" cb1 ".into());
        let draft = editor.prepare_save().unwrap();
        assert_eq!(draft, SaveDraft { name: "cb1".into(), content: "new".into() });
        assert!(editor.is_saving());
        editor.save_succeeded(&draft, false);
        assert_eq!(editor.content(), "new");
        assert_eq!(editor.mode(), ViewMode::Viewing);
        assert!(!editor.is_saving());
    }

    #[test]
    fn test_save_with_callback_leaves_content_to_refetch() {
        let mut editor = loaded("old");
        editor.begin_edit();
        editor.set_edited("new".into());
        let draft = editor.prepare_save().unwrap();
        editor.save_succeeded(&draft, true);
        assert_eq!(editor.content(), "old");
    }

    #[test]
    fn test_save_failure_message() {
        let mut editor = loaded("old");
        editor.begin_edit();
        let _ = editor.prepare_save().unwrap();
        editor.save_failed(&ApiError::Status { status: 500, detail: "boom".into() });
        assert_eq!(editor.error(), Some("Error saving content: HTTP error 500: boom"));
        assert_eq!(editor.mode(), ViewMode::Editing);
        assert!(!editor.is_saving());
    }

    #[test]
    fn test_stale_fetch_ignored() {
        let mut editor = ContentEditor::default();
        editor.select(Some("a".into()));
        editor.select(Some("b".into()));
        editor.fetch_succeeded("a", "from a".into());
        assert_eq!(editor.mode(), ViewMode::Loading);
        editor.fetch_succeeded("b", "from b".into());
        assert_eq!(editor.content(), "from b");
    }

    #[test]
    fn test_fetch_failure_shown() {
        let mut editor = ContentEditor::default();
        editor.select(Some("a".into()));
        editor.fetch_failed("a", &ApiError::Transport("offline".into()));
        assert_eq!(editor.error(), Some("Network error: offline"));
        assert_eq!(editor.mode(), ViewMode::Viewing);
    }
}
