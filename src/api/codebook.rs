//! Codebook Endpoints
//!
//! List, fetch, save, rename, delete, parse, generate, apply, compare.

use serde::Deserialize;

use super::{encode_component, with_query, ApiClient, ApiError, Multipart, RequestOptions};
use crate::models::{Codebook, CodebookList, ContentPayload, Family, ParsedCodebook};

pub async fn list_codebooks(client: &ApiClient) -> Result<Vec<Codebook>, ApiError> {
    let list: CodebookList = client.get_json("/api/list-codebooks").await?;
    Ok(list.codebooks)
}

/// Fetch a text blob from a fully built content URL
pub async fn fetch_content(client: &ApiClient, url: &str) -> Result<String, ApiError> {
    let payload: ContentPayload = client.get_json(url).await?;
    Ok(payload.into_text())
}

/// POST edited content as multipart `{id_field: name, content}`.
/// Returns the server's JSON reply (`Null` for an empty body).
pub async fn save_content(
    client: &ApiClient,
    save_url: &str,
    id_field: &str,
    name: &str,
    content: &str,
) -> Result<serde_json::Value, ApiError> {
    let form = Multipart::new().text(id_field, name).text("content", content);
    let resp = client.fetch(save_url, RequestOptions::post_form(form)).await?.into_result()?;
    Ok(reply_value(&resp.body))
}

pub async fn rename_codebook(client: &ApiClient, old_id: &str, new_id: &str) -> Result<(), ApiError> {
    let new_id = new_id.trim();
    if new_id.is_empty() {
        return Err(ApiError::validation("New name cannot be empty"));
    }
    let form = Multipart::new().text("old_id", old_id).text("new_id", new_id);
    client.send_ok("/api/rename-codebook/", RequestOptions::post_form(form)).await
}

pub async fn delete_codebook(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let path = format!("/api/delete-codebook/{}", encode_component(id));
    client.send_ok(&path, RequestOptions::delete()).await
}

pub fn parse_codebook_path(codebook_id: Option<&str>) -> String {
    match codebook_id {
        Some(id) if !id.is_empty() => with_query("/api/parse-codebook", "codebook_id", id),
        _ => "/api/parse-codebook".to_string(),
    }
}

pub async fn parse_codebook(client: &ApiClient, codebook_id: Option<&str>) -> Result<Vec<Family>, ApiError> {
    let parsed: ParsedCodebook = client.get_json(&parse_codebook_path(codebook_id)).await?;
    Ok(parsed.parsed)
}

#[derive(Debug, Default, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    codebook: Option<String>,
}

fn generate_options(database: &str, api_key: &str, custom_prompt: &str, timeout_ms: u32) -> RequestOptions {
    let custom_prompt = Some(custom_prompt.trim().to_string()).filter(|p| !p.is_empty());
    let form = Multipart::new()
        .text("database", database)
        .text("api_key", api_key)
        .text_if("custom_prompt", custom_prompt);
    RequestOptions::post_form(form).with_timeout(timeout_ms)
}

/// Generate a codebook; aborted client side after `timeout_ms`.
/// A non-blank `custom_prompt` is appended to the generator's instructions.
pub async fn generate_codebook(
    client: &ApiClient,
    database: &str,
    api_key: &str,
    custom_prompt: &str,
    timeout_ms: u32,
) -> Result<String, ApiError> {
    let options = generate_options(database, api_key, custom_prompt, timeout_ms);
    let reply: GenerateReply = client.send_json("/api/generate-codebook/", options).await?;
    Ok(reply.codebook.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyRequest {
    pub database: String,
    pub codebook: String,
    pub report_name: String,
    pub methodology: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApplyReply {
    #[serde(default)]
    classification_report: Option<serde_json::Value>,
}

pub async fn apply_codebook(
    client: &ApiClient,
    request: &ApplyRequest,
    api_key: &str,
) -> Result<serde_json::Value, ApiError> {
    let form = Multipart::new()
        .text("api_key", api_key)
        .text("database", request.database.as_str())
        .text("report_name", request.report_name.as_str())
        .text("codebook", request.codebook.as_str())
        .text("methodology", request.methodology.as_str());
    let reply: ApplyReply = client.send_json("/api/apply-codebook/", RequestOptions::post_form(form)).await?;
    Ok(reply.classification_report.unwrap_or(serde_json::Value::Null))
}

#[derive(Debug, Default, Deserialize)]
struct CompareReply {
    #[serde(default)]
    comparison: Option<String>,
}

/// Both sides must be picked before anything is sent
pub fn validate_compare_selection(a: &str, b: &str) -> Result<(), ApiError> {
    if a.is_empty() || b.is_empty() {
        return Err(ApiError::validation("Select two codebooks to compare"));
    }
    Ok(())
}

pub async fn compare_codebooks(
    client: &ApiClient,
    codebook_a: &str,
    codebook_b: &str,
    api_key: &str,
    model: Option<String>,
) -> Result<String, ApiError> {
    validate_compare_selection(codebook_a, codebook_b)?;
    let form = Multipart::new()
        .text("codebook_a", codebook_a)
        .text("codebook_b", codebook_b)
        .text("api_key", api_key)
        .text_if("model", model.filter(|m| !m.is_empty()));
    let reply: CompareReply = client.send_json("/api/compare-codebooks/", RequestOptions::post_form(form)).await?;
    Ok(reply.comparison.unwrap_or_default())
}

fn reply_value(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, RequestBody};

    fn field_names(options: &RequestOptions) -> Vec<&str> {
        match &options.body {
            RequestBody::Multipart(fields) => fields.iter().map(|(n, _)| n.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_generate_request_carries_timeout() {
        let options = generate_options("proj_1", "sk-test", "  ", 60_000);
        assert_eq!(options.method, Method::Post);
        assert_eq!(options.timeout_ms, Some(60_000));
        assert_eq!(field_names(&options), vec!["database", "api_key"]);
    }

    #[test]
    fn test_generate_sends_custom_prompt() {
        let options = generate_options("proj_1", "sk-test", "Focus on trust", 1_000);
        assert_eq!(field_names(&options), vec!["database", "api_key", "custom_prompt"]);
    }

    #[test]
    fn test_compare_needs_both_sides() {
        assert_eq!(
            validate_compare_selection("cb1", ""),
            Err(ApiError::validation("Select two codebooks to compare"))
        );
        assert!(validate_compare_selection("cb1", "cb2").is_ok());
    }

    #[test]
    fn test_parse_codebook_path() {
        assert_eq!(parse_codebook_path(None), "/api/parse-codebook");
        assert_eq!(parse_codebook_path(Some("")), "/api/parse-codebook");
        assert_eq!(parse_codebook_path(Some("cb 1")), "/api/parse-codebook?codebook_id=cb%201");
    }

    #[test]
    fn test_reply_value() {
        assert_eq!(reply_value(""), serde_json::Value::Null);
        assert_eq!(reply_value(r#"{"ok":true}"#), serde_json::json!({"ok": true}));
        assert_eq!(reply_value("saved"), serde_json::Value::String("saved".into()));
    }
}
