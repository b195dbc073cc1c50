//! Tree Utilities
//!
//! Expand/collapse state for the parsed codebook hierarchy, plus the
//! fallback labels used when the parser left names empty.

use crate::models::{Code, Family};

/// One expand flag per family index, parallel to the fetched families
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: Vec<bool>,
}

impl ExpandState {
    /// Every family starts expanded
    pub fn for_families(count: usize) -> Self {
        Self { expanded: vec![true; count] }
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Flip one family; out-of-range indices are ignored
    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.expanded.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded.iter_mut().for_each(|f| *f = true);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.iter_mut().for_each(|f| *f = false);
    }
}

pub const EMPTY_TREE_MESSAGE: &str = "No codebook content found.";

/// What the tree panel shows for a given fetch state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreePanel {
    Loading,
    Error(String),
    /// Parsed fine but had no families
    Empty,
    Families,
}

impl TreePanel {
    pub fn from_state(loading: bool, error: Option<String>, families: &[Family]) -> Self {
        match (loading, error) {
            (true, _) => TreePanel::Loading,
            (false, Some(msg)) => TreePanel::Error(msg),
            (false, None) if families.is_empty() => TreePanel::Empty,
            (false, None) => TreePanel::Families,
        }
    }
}

pub fn family_label(index: usize, family: &Family) -> String {
    if family.family_name.trim().is_empty() {
        format!("Family {}", index + 1)
    } else {
        family.family_name.clone()
    }
}

pub fn code_label(index: usize, code: &Code) -> String {
    if code.code_name.trim().is_empty() {
        format!("Code {}", index + 1)
    } else {
        code.code_name.clone()
    }
}

pub fn code_definition(code: &Code) -> String {
    if code.definition.trim().is_empty() {
        "(no definition)".to_string()
    } else {
        code.definition.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParsedCodebook;

    #[test]
    fn test_initialized_expanded() {
        let state = ExpandState::for_families(3);
        assert_eq!(state.len(), 3);
        assert!((0..3).all(|i| state.is_expanded(i)));
        assert!(!state.is_expanded(3));
    }

    #[test]
    fn test_toggle_only_affects_one_family() {
        let mut state = ExpandState::for_families(4);
        state.toggle(2);
        assert!(!state.is_expanded(2));
        assert!(state.is_expanded(0) && state.is_expanded(1) && state.is_expanded(3));
        state.toggle(2);
        assert!(state.is_expanded(2));
        state.toggle(10);
        assert_eq!(state, ExpandState::for_families(4));
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut state = ExpandState::for_families(3);
        state.toggle(1);
        state.collapse_all();
        assert!((0..3).all(|i| !state.is_expanded(i)));
        state.toggle(0);
        state.expand_all();
        assert!((0..3).all(|i| state.is_expanded(i)));
    }

    #[test]
    fn test_empty_parse_result() {
        let parsed: ParsedCodebook = serde_json::from_str(r#"{"parsed": []}"#).unwrap();
        let state = ExpandState::for_families(parsed.parsed.len());
        assert!(state.is_empty());
        assert_eq!(TreePanel::from_state(false, None, &parsed.parsed), TreePanel::Empty);
        assert_eq!(EMPTY_TREE_MESSAGE, "No codebook content found.");
    }

    #[test]
    fn test_panel_precedence() {
        let parsed: ParsedCodebook =
            serde_json::from_str(r#"{"parsed": [{"family_name": "Trust", "codes": []}]}"#).unwrap();
        assert_eq!(TreePanel::from_state(true, Some("x".into()), &[]), TreePanel::Loading);
        assert_eq!(TreePanel::from_state(false, Some("bad".into()), &[]), TreePanel::Error("bad".into()));
        assert_eq!(TreePanel::from_state(false, None, &parsed.parsed), TreePanel::Families);
    }

    #[test]
    fn test_fallback_labels() {
        let parsed: ParsedCodebook = serde_json::from_str(
            r#"{"parsed": [{"family_name": "", "codes": [{"code_name": "Trust", "definition": ""}, {}]}]}"#,
        )
        .unwrap();
        let family = &parsed.parsed[0];
        assert_eq!(family_label(0, family), "Family 1");
        assert_eq!(code_label(0, &family.codes[0]), "Trust");
        assert_eq!(code_label(1, &family.codes[1]), "Code 2");
        assert_eq!(code_definition(&family.codes[0]), "(no definition)");
    }
}
