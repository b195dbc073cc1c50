//! Reddit Data Endpoints
//!
//! Upload, browse and delete imported databases.

use serde::Deserialize;

use super::{encode_component, with_query, ApiClient, ApiError, Multipart, RequestOptions};
use crate::models::{Comment, CommentList, DatabaseEntries};

/// Only Zstandard dumps are accepted
pub const UPLOAD_EXTENSION: &str = ".zst";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    #[default]
    Submissions,
    Comments,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Submissions => "submissions",
            DataType::Comments => "comments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataType::Submissions => "Posts",
            DataType::Comments => "Comments",
        }
    }
}

/// Check a picked file name before anything is sent
pub fn validate_upload_file(file_name: Option<&str>) -> Result<(), ApiError> {
    match file_name {
        None => Err(ApiError::validation("Please select a file")),
        Some(name) if !name.ends_with(UPLOAD_EXTENSION) => Err(ApiError::validation("Please select a .zst file")),
        Some(_) => Ok(()),
    }
}

pub fn validate_database_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ApiError::validation("Please enter a database name"))
    } else {
        Ok(name.to_string())
    }
}

/// Normalize and append a subreddit tag; returns false when rejected
pub fn add_subreddit(tags: &mut Vec<String>, raw: &str) -> bool {
    let value = raw.trim().trim_end_matches(',').trim().to_lowercase();
    if value.is_empty() || tags.contains(&value) {
        return false;
    }
    tags.push(value);
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadReply {
    pub fn display_message(&self) -> String {
        if self.status.as_deref() == Some("processing") {
            "File uploaded. Import processing in background...".to_string()
        } else {
            self.message.clone().unwrap_or_else(|| "Upload completed".to_string())
        }
    }
}

pub struct UploadRequest {
    pub file: web_sys::File,
    pub subreddits: Vec<String>,
    pub data_type: DataType,
    pub name: String,
}

pub async fn upload_zst(client: &ApiClient, request: UploadRequest) -> Result<UploadReply, ApiError> {
    validate_upload_file(Some(request.file.name().as_str()))?;
    let name = validate_database_name(&request.name)?;
    let subreddits = if request.subreddits.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&request.subreddits).map_err(|e| ApiError::Browser(e.to_string()))?)
    };
    let form = Multipart::new()
        .file("file", request.file)
        .text_if("subreddits", subreddits)
        .text("data_type", request.data_type.as_str())
        .text("name", name);
    client.send_json("/api/upload-zst/", RequestOptions::post_form(form)).await
}

/// `proj_<word chars>` with an optional `.db` suffix
pub fn is_project_schema(name: &str) -> bool {
    let stem = name.strip_suffix(".db").unwrap_or(name);
    stem.strip_prefix("proj_")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Project schemas are read through the project entries endpoint
pub fn entries_path(database: &str, limit: u32) -> String {
    let (base, key) = if is_project_schema(database) {
        ("/api/project-entries/", "schema")
    } else {
        ("/api/database-entries/", "database")
    };
    let path = with_query(base, "limit", &limit.to_string());
    with_query(&path, key, database)
}

pub async fn database_entries(client: &ApiClient, database: &str, limit: u32) -> Result<DatabaseEntries, ApiError> {
    client.get_json(&entries_path(database, limit)).await
}

pub async fn submission_comments(
    client: &ApiClient,
    submission_id: &str,
    database: &str,
) -> Result<Vec<Comment>, ApiError> {
    let path = with_query(&format!("/api/comments/{}", encode_component(submission_id)), "database", database);
    let list: CommentList = client.get_json(&path).await?;
    Ok(list.comments)
}

pub async fn delete_database(client: &ApiClient, schema: &str) -> Result<(), ApiError> {
    let path = format!("/api/delete-database/{}", encode_component(schema));
    client.send_ok(&path, RequestOptions::delete()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_file_validation() {
        assert_eq!(
            validate_upload_file(Some("RS_2023-01.json")),
            Err(ApiError::validation("Please select a .zst file"))
        );
        assert_eq!(validate_upload_file(None), Err(ApiError::validation("Please select a file")));
        assert!(validate_upload_file(Some("RC_2023-01.zst")).is_ok());
    }

    #[test]
    fn test_database_name_validation() {
        assert!(validate_database_name("   ").is_err());
        assert_eq!(validate_database_name("  gaming ").unwrap(), "gaming");
    }

    #[test]
    fn test_add_subreddit_normalizes_and_dedupes() {
        let mut tags = Vec::new();
        assert!(add_subreddit(&mut tags, " AskScience, "));
        assert!(!add_subreddit(&mut tags, "askscience"));
        assert!(!add_subreddit(&mut tags, "   "));
        assert!(add_subreddit(&mut tags, "rust"));
        assert_eq!(tags, vec!["askscience".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_upload_reply_message() {
        let processing = UploadReply { status: Some("processing".into()), message: None };
        assert_eq!(processing.display_message(), "File uploaded. Import processing in background...");
        let done = UploadReply { status: None, message: Some("Imported 10 rows".into()) };
        assert_eq!(done.display_message(), "Imported 10 rows");
        assert_eq!(UploadReply::default().display_message(), "Upload completed");
    }

    #[test]
    fn test_entries_path_by_schema_kind() {
        assert_eq!(entries_path("proj_1", 10), "/api/project-entries/?limit=10&schema=proj_1");
        assert_eq!(entries_path("proj_raw_7.db", 50), "/api/project-entries/?limit=50&schema=proj_raw_7.db");
        assert_eq!(entries_path("gaming", 10), "/api/database-entries/?limit=10&database=gaming");
        assert_eq!(entries_path("proj_", 10), "/api/database-entries/?limit=10&database=proj_");
        assert_eq!(entries_path("proj-x y", 5), "/api/database-entries/?limit=5&database=proj-x%20y");
    }
}
