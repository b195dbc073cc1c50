//! Prompt Endpoints
//!
//! Prompts are sent as multipart `promptname`/`prompt`/`type` fields and
//! listed per type.

use super::{encode_component, with_query, ApiClient, ApiError, Multipart, RequestOptions};
use crate::models::{Prompt, PromptList};

/// Prompts offered on the generate page
pub const CODEBOOK_PROMPT_TYPE: &str = "codebook";

pub async fn list_prompts(client: &ApiClient, prompt_type: &str) -> Result<Vec<Prompt>, ApiError> {
    let path = with_query("/api/prompts/", "prompt_type", prompt_type);
    let list: PromptList = client.get_json(&path).await?;
    Ok(list.prompts)
}

/// Name used when the user leaves the name blank
pub fn default_prompt_name(existing: usize) -> String {
    format!("Prompt {}", existing + 1)
}

fn prompt_form(name: &str, prompt: &str, prompt_type: &str) -> Result<Multipart, ApiError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::validation("Please enter prompt content"));
    }
    Ok(Multipart::new()
        .text("promptname", name.trim())
        .text("prompt", prompt)
        .text("type", prompt_type))
}

pub async fn save_prompt(
    client: &ApiClient,
    name: &str,
    prompt: &str,
    prompt_type: &str,
) -> Result<Prompt, ApiError> {
    let form = prompt_form(name, prompt, prompt_type)?;
    client.send_json("/api/prompts/", RequestOptions::post_form(form)).await
}

fn prompt_path(id: &str) -> String {
    format!("/api/prompts/{}", encode_component(id))
}

/// Replace name and text of a saved prompt. A blank name keeps `current_name`.
pub async fn update_prompt(
    client: &ApiClient,
    id: &str,
    name: &str,
    current_name: &str,
    prompt: &str,
    prompt_type: &str,
) -> Result<(), ApiError> {
    let name = if name.trim().is_empty() { current_name } else { name };
    let form = prompt_form(name, prompt, prompt_type)?;
    client.send_ok(&prompt_path(id), RequestOptions::put_form(form)).await
}

pub async fn delete_prompt(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.send_ok(&prompt_path(id), RequestOptions::delete()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FormValue;

    fn text_fields(form: Multipart) -> Vec<(String, String)> {
        form.fields
            .into_iter()
            .map(|(name, value)| match value {
                FormValue::Text(text) => (name, text),
                FormValue::File(_) => (name, "<file>".to_string()),
            })
            .collect()
    }

    #[test]
    fn test_default_prompt_name() {
        assert_eq!(default_prompt_name(0), "Prompt 1");
        assert_eq!(default_prompt_name(4), "Prompt 5");
    }

    #[test]
    fn test_prompt_form_fields() {
        let form = prompt_form(" Prompt 2 ", "  Focus on trust.  ", CODEBOOK_PROMPT_TYPE).unwrap();
        assert_eq!(
            text_fields(form),
            vec![
                ("promptname".to_string(), "Prompt 2".to_string()),
                ("prompt".to_string(), "Focus on trust.".to_string()),
                ("type".to_string(), "codebook".to_string()),
            ]
        );
    }

    #[test]
    fn test_prompt_form_rejects_blank_content() {
        assert_eq!(
            prompt_form("Prompt 1", "   ", CODEBOOK_PROMPT_TYPE).unwrap_err(),
            ApiError::validation("Please enter prompt content")
        );
    }

    #[test]
    fn test_prompt_path_encodes_id() {
        assert_eq!(prompt_path("12"), "/api/prompts/12");
        assert_eq!(prompt_path("a b"), "/api/prompts/a%20b");
    }

    #[test]
    fn test_prompt_decodes_promptname() {
        let prompt: Prompt =
            serde_json::from_str(r#"{"id":3,"promptname":"Prompt 3","prompt":"x","type":"codebook"}"#).unwrap();
        assert_eq!(prompt.id, "3");
        assert_eq!(prompt.name, "Prompt 3");
        assert_eq!(prompt.prompt_type.as_deref(), Some("codebook"));
    }
}
