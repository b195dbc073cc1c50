//! API Errors
//!
//! Every failure a page can show inline.

use thiserror::Error;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Network unreachable, CORS rejection, aborted fetch
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("HTTP error {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Empty or unparseable response body
    #[error("Invalid response from server: {0}")]
    Malformed(String),

    /// 2xx response whose body carries an `error` field
    #[error("{0}")]
    Server(String),

    /// Rejected locally before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("Request timed out. Please try again.")]
    Timeout,

    /// Missing window/storage or a JS exception outside of fetch
    #[error("Browser error: {0}")]
    Browser(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    /// Status code for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Format a JS exception value for display
pub fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings() {
        assert_eq!(ApiError::Timeout.to_string(), "Request timed out. Please try again.");
        assert_eq!(ApiError::validation("Name cannot be empty").to_string(), "Name cannot be empty");
        let err = ApiError::Status { status: 404, detail: "Not found".into() };
        assert_eq!(err.to_string(), "HTTP error 404: Not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Timeout.status(), None);
    }
}
