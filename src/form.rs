//! Form Descriptors
//!
//! Declarative field definitions and the value state behind `DynamicForm`.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// Raw or filtered Reddit data, as the generate and apply endpoints name them
pub fn data_source_options() -> Vec<SelectOption> {
    vec![SelectOption::new("original", "Reddit Data"), SelectOption::new("filtered", "Filtered Data")]
}

/// Widget kind for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    Textarea { rows: u32 },
    Select { options: Vec<SelectOption> },
    Radio { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    /// Initial value
    pub value: String,
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            value: String::new(),
            placeholder: None,
        }
    }

    pub fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn password(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Password)
    }

    pub fn textarea(id: &str, label: &str, rows: u32) -> Self {
        Self::new(id, label, FieldKind::Textarea { rows })
    }

    /// Select field; the first option is the initial value
    pub fn select(id: &str, label: &str, options: Vec<SelectOption>) -> Self {
        let value = options.first().map(|o| o.value.clone()).unwrap_or_default();
        Self { value, ..Self::new(id, label, FieldKind::Select { options }) }
    }

    pub fn radio(id: &str, label: &str, options: Vec<SelectOption>) -> Self {
        let value = options.first().map(|o| o.value.clone()).unwrap_or_default();
        Self { value, ..Self::new(id, label, FieldKind::Radio { options }) }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("duplicate field id `{0}`")]
    DuplicateId(String),
}

/// Ordered field list with unique ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDescriptor {
    fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, FormError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.id == field.id) {
                return Err(FormError::DuplicateId(field.id.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Build a descriptor, logging and falling back to an empty form on
    /// duplicate ids
    pub fn or_empty(fields: Vec<FieldDescriptor>) -> Self {
        Self::new(fields).unwrap_or_else(|e| {
            tracing::error!("[FORM] {}", e);
            Self::default()
        })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Submitted snapshot: field id → value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Value for `id`, empty when absent
    pub fn get(&self, id: &str) -> &str {
        self.0.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Current editable value per field, in descriptor order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: Vec<(String, String)>,
}

impl FormState {
    pub fn from_descriptor(descriptor: &FormDescriptor) -> Self {
        Self {
            values: descriptor
                .fields()
                .iter()
                .map(|f| (f.id.clone(), f.value.clone()))
                .collect(),
        }
    }

    /// Discard edits and take the defaults of `descriptor`
    pub fn reset(&mut self, descriptor: &FormDescriptor) {
        *self = Self::from_descriptor(descriptor);
    }

    pub fn value(&self, id: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Update a field; unknown ids are ignored
    pub fn set(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.values.iter_mut().find(|(k, _)| k == id) {
            Some((_, v)) => {
                *v = value.into();
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> FormValues {
        FormValues(self.values.iter().cloned().collect())
    }
}

/// Block shown under a form after submission
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult {
    Text(String),
    Json(serde_json::Value),
}

impl FormResult {
    /// Strings are kept as text, anything else shown as JSON
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(FormResult::Text(s)),
            other => Some(FormResult::Json(other)),
        }
    }

    pub fn render(&self) -> String {
        match self {
            FormResult::Text(text) => text.clone(),
            FormResult::Json(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormDescriptor {
        FormDescriptor::new(vec![
            FieldDescriptor::select(
                "database",
                "Database",
                vec![SelectOption::new("original", "Reddit Data"), SelectOption::new("filtered", "Filtered Data")],
            ),
            FieldDescriptor::textarea("methodology", "Methodology", 4),
            FieldDescriptor::text("report_name", "Report name").with_value("report"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = FormDescriptor::new(vec![FieldDescriptor::text("a", "A"), FieldDescriptor::password("a", "B")]);
        assert_eq!(err, Err(FormError::DuplicateId("a".into())));
        assert!(FormDescriptor::or_empty(vec![FieldDescriptor::text("a", "A"), FieldDescriptor::text("a", "A")]).is_empty());
    }

    #[test]
    fn test_initial_values() {
        let state = FormState::from_descriptor(&sample());
        assert_eq!(state.value("database"), "original");
        assert_eq!(state.value("methodology"), "");
        assert_eq!(state.value("report_name"), "report");
    }

    #[test]
    fn test_snapshot_has_exactly_descriptor_ids_with_last_value() {
        let descriptor = sample();
        let mut state = FormState::from_descriptor(&descriptor);
        state.set("methodology", "first");
        state.set("methodology", "second");
        state.set("database", "filtered");
        assert!(!state.set("unknown", "x"));

        let snapshot = state.snapshot();
        let ids: Vec<_> = snapshot.ids().collect();
        assert_eq!(ids, vec!["database", "methodology", "report_name"]);
        assert_eq!(snapshot.len(), descriptor.fields().len());
        assert_eq!(snapshot.get("methodology"), "second");
        assert_eq!(snapshot.get("database"), "filtered");
        assert_eq!(snapshot.get("report_name"), "report");
    }

    #[test]
    fn test_reset_discards_edits() {
        let mut state = FormState::from_descriptor(&sample());
        state.set("methodology", "typed");
        let next = FormDescriptor::new(vec![
            FieldDescriptor::text("methodology", "Methodology").with_value("default"),
            FieldDescriptor::password("api_key", "API key"),
        ])
        .unwrap();
        state.reset(&next);
        assert_eq!(state.value("methodology"), "default");
        assert_eq!(state.value("api_key"), "");
        assert_eq!(state.value("database"), "");
        assert_eq!(state.snapshot().len(), 2);
    }

    #[test]
    fn test_form_result_rendering() {
        assert_eq!(FormResult::from_value(serde_json::Value::Null), None);
        assert_eq!(
            FormResult::from_value(serde_json::json!("plain")).map(|r| r.render()),
            Some("plain".to_string())
        );
        let json = FormResult::from_value(serde_json::json!({"a": 1})).unwrap();
        assert_eq!(json.render(), "{\n  \"a\": 1\n}");
    }
}
