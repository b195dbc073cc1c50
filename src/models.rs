//! Frontend Models
//!
//! Data structures matching backend responses.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept ids sent either as JSON strings or numbers
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

/// Codebook list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Codebook {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: CodebookMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodebookMetadata {
    #[serde(default, alias = "char_count", alias = "chars")]
    pub characters: Option<u64>,
    /// Unix seconds
    #[serde(default)]
    pub date_created: Option<f64>,
}

impl Codebook {
    pub fn label(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodebookList {
    #[serde(default)]
    pub codebooks: Vec<Codebook>,
}

/// Fetched text blob (codebook or coding report)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentPayload {
    #[serde(default)]
    pub codebook: Option<String>,
    #[serde(default)]
    pub coded_data: Option<String>,
}

impl ContentPayload {
    pub fn into_text(self) -> String {
        self.codebook.or(self.coded_data).unwrap_or_default()
    }
}

// ========================
// Parsed codebook
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
    #[serde(default)]
    pub code_name: String,
    #[serde(default)]
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Family {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub codes: Vec<Code>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParsedCodebook {
    #[serde(default)]
    pub parsed: Vec<Family>,
}

// ========================
// Projects / databases
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTable {
    pub table_name: String,
    #[serde(default)]
    pub row_count: u64,
}

/// Entry from `/api/my-projects/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub schema_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tables: Vec<ProjectTable>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    pub created_at: Option<String>,
    pub tables: Vec<ProjectTable>,
    pub total_submissions: u64,
    pub total_comments: u64,
}

/// A raw-data project as shown in the manage-databases list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseItem {
    /// Schema name, the database identifier
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub metadata: DatabaseMetadata,
}

impl From<Project> for DatabaseItem {
    fn from(p: Project) -> Self {
        let rows = |table: &str| {
            p.tables
                .iter()
                .find(|t| t.table_name == table)
                .map_or(0, |t| t.row_count)
        };
        let total_submissions = rows("submissions");
        let total_comments = rows("comments");
        DatabaseItem {
            display_name: p.display_name.clone().unwrap_or_else(|| p.schema_name.clone()),
            name: p.schema_name,
            description: p.description,
            metadata: DatabaseMetadata {
                created_at: p.created_at,
                tables: p.tables,
                total_submissions,
                total_comments,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub file_type: String,
    #[serde(default)]
    pub schema_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ProjectFile {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.schema_name)
    }
}

/// Entry from `/api/projects/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub projectname: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
}

impl ProjectRecord {
    pub fn file_of_type(&self, file_type: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.file_type == file_type)
    }
}

/// Reply of `/api/create-project/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreatedProject {
    #[serde(default)]
    pub project: ProjectRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectRecordList {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

// ========================
// Reddit entries
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub num_comments: Option<i64>,
    #[serde(default)]
    pub created_utc: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub link_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatabaseEntries {
    #[serde(default)]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Server note, e.g. when the schema has no tables yet
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentList {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

// ========================
// Prompts
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, alias = "promptname")]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, rename = "type")]
    pub prompt_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PromptList {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_item_from_project() {
        let project: Project = serde_json::from_str(
            r#"{
                "schema_name": "proj_7",
                "display_name": "Gaming",
                "created_at": "2025-03-01T10:00:00Z",
                "tables": [
                    {"table_name": "submissions", "row_count": 120},
                    {"table_name": "comments", "row_count": 3400}
                ]
            }"#,
        )
        .unwrap();
        let item = DatabaseItem::from(project);
        assert_eq!(item.name, "proj_7");
        assert_eq!(item.display_name, "Gaming");
        assert_eq!(item.metadata.total_submissions, 120);
        assert_eq!(item.metadata.total_comments, 3400);
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_database_item_missing_tables() {
        let item = DatabaseItem::from(Project { schema_name: "proj_1".into(), ..Default::default() });
        assert_eq!(item.display_name, "proj_1");
        assert_eq!(item.metadata.total_submissions, 0);
        assert_eq!(item.metadata.total_comments, 0);
    }

    #[test]
    fn test_content_payload_fallbacks() {
        let cb: ContentPayload = serde_json::from_str(r#"{"codebook":"a","coded_data":"b"}"#).unwrap();
        assert_eq!(cb.into_text(), "a");
        let coded: ContentPayload = serde_json::from_str(r#"{"coded_data":"b"}"#).unwrap();
        assert_eq!(coded.into_text(), "b");
        let empty: ContentPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_text(), "");
    }

    #[test]
    fn test_codebook_metadata_aliases() {
        let cb: Codebook =
            serde_json::from_str(r#"{"id":"cb1","name":"First","metadata":{"char_count":1500,"date_created":1700000000}}"#)
                .unwrap();
        assert_eq!(cb.metadata.characters, Some(1500));
        assert_eq!(cb.metadata.date_created, Some(1_700_000_000.0));
        let bare: Codebook = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(bare.id, "42");
        assert_eq!(bare.label(), "42");
    }

    #[test]
    fn test_project_record_id_and_files() {
        let rec: ProjectRecord = serde_json::from_str(
            r#"{"id": 3, "projectname": "P", "files": [{"file_type": "codebook", "schema_name": "cb_3"}]}"#,
        )
        .unwrap();
        assert_eq!(rec.id, "3");
        assert_eq!(rec.file_of_type("codebook").map(|f| f.label()), Some("cb_3"));
        assert!(rec.file_of_type("coding").is_none());
    }
}
