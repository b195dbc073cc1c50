//! Backend API
//!
//! Fetch wrapper plus endpoint bindings, organized by domain.

mod error;
mod url;
mod auth;
mod codebook;
mod data;
mod project;
mod prompt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, FormData, Headers, Request, RequestCredentials, RequestInit, Response};

use crate::session::Session;

pub use error::{js_error_message, ApiError};
pub use url::{encode_component, is_absolute, join_url, with_query, with_segment};

// Re-export all endpoint bindings
pub use auth::*;
pub use codebook::*;
pub use data::*;
pub use project::*;
pub use prompt::*;

// ========================
// Request Types
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One multipart field
#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    File(web_sys::File),
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Multipart(Vec<(String, FormValue)>),
}

/// Builder for multipart bodies
#[derive(Debug, Clone, Default)]
pub struct Multipart {
    fields: Vec<(String, FormValue)>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), FormValue::Text(value.into())));
        self
    }

    pub fn file(mut self, name: &str, file: web_sys::File) -> Self {
        self.fields.push((name.to_string(), FormValue::File(file)));
        self
    }

    pub fn text_if(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }
}

impl From<Multipart> for RequestBody {
    fn from(form: Multipart) -> Self {
        RequestBody::Multipart(form.fields)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Abort the request after this many milliseconds
    pub timeout_ms: Option<u32>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self { method: Method::Delete, ..Self::default() }
    }

    pub fn post_form(form: Multipart) -> Self {
        Self { method: Method::Post, body: form.into(), ..Self::default() }
    }

    pub fn put_form(form: Multipart) -> Self {
        Self { method: Method::Put, body: form.into(), ..Self::default() }
    }

    pub fn post_json<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Browser(e.to_string()))?;
        Ok(Self {
            method: Method::Post,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: RequestBody::Json(json),
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// Final request, ready to hand to `fetch`
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub include_credentials: bool,
    pub body: RequestBody,
    pub timeout_ms: Option<u32>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status plus body text, whatever the status
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a JSON success body, mapping failures onto `ApiError`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if !self.ok() {
            return Err(ApiError::Status { status: self.status, detail: error_detail(&self.body) });
        }
        if self.body.trim().is_empty() {
            return Err(ApiError::Malformed("Empty response from server".to_string()));
        }
        let value: serde_json::Value =
            serde_json::from_str(&self.body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        if let Some(msg) = value.get("error").and_then(error_text) {
            return Err(ApiError::Server(msg));
        }
        serde_json::from_value(value).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Succeed on 2xx regardless of body
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(ApiError::Status { status: self.status, detail: error_detail(&self.body) })
        }
    }
}

fn error_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Best human-readable reason from an error body
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(text) = value.get(key).and_then(error_text) {
                return text;
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed".to_string()
    } else {
        trimmed.to_string()
    }
}

// ========================
// Client
// ========================

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Self {
        Self {
            base_url: base_url.to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve URL, credentials and auth header for a request
    pub fn prepare(&self, path: &str, options: RequestOptions) -> PreparedRequest {
        let absolute = is_absolute(path);
        let url = join_url(&self.base_url, path);
        let mut headers = options.headers;
        if !absolute {
            if let Some(token) = self.session.token() {
                headers.retain(|(k, _)| !k.eq_ignore_ascii_case("Authorization"));
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }
        PreparedRequest {
            url,
            method: options.method,
            headers,
            include_credentials: true,
            body: options.body,
            timeout_ms: options.timeout_ms,
        }
    }

    /// Fetch-like call. Any HTTP status is a successful result; only
    /// transport failures and timeouts are errors.
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let prepared = self.prepare(path, options);
        tracing::debug!("[API] {} {}", prepared.method.as_str(), prepared.url);
        let response = send(prepared).await;
        if let Err(e) = &response {
            tracing::warn!("[API] request failed: {}", e);
        }
        response
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(path, RequestOptions::get()).await?.json()
    }

    pub async fn send_json<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        self.fetch(path, options).await?.json()
    }

    /// Send and require a 2xx status, ignoring the body
    pub async fn send_ok(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.fetch(path, options).await?.into_result().map(|_| ())
    }
}

fn browser_err(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Browser(js_error_message(&e))
}

/// A rejected fetch whose abort signal fired is a timeout
fn fetch_failure(timed_out: bool, message: String) -> ApiError {
    if timed_out {
        ApiError::Timeout
    } else {
        ApiError::Transport(message)
    }
}

async fn send(prepared: PreparedRequest) -> Result<ApiResponse, ApiError> {
    let init = RequestInit::new();
    init.set_method(prepared.method.as_str());
    if prepared.include_credentials {
        init.set_credentials(RequestCredentials::Include);
    }

    let headers = Headers::new().map_err(browser_err)?;
    for (name, value) in &prepared.headers {
        headers.set(name, value).map_err(browser_err)?;
    }
    init.set_headers(&headers);

    match &prepared.body {
        RequestBody::Empty => {}
        RequestBody::Json(json) => init.set_body(&wasm_bindgen::JsValue::from_str(json)),
        RequestBody::Multipart(fields) => {
            let form = FormData::new().map_err(browser_err)?;
            for (name, value) in fields {
                match value {
                    FormValue::Text(text) => form.append_with_str(name, text).map_err(browser_err)?,
                    FormValue::File(file) => form
                        .append_with_blob_and_filename(name, file, &file.name())
                        .map_err(browser_err)?,
                }
            }
            init.set_body(&form);
        }
    }

    // Timer aborts the fetch; dropping it on completion cancels the timer
    let controller = match prepared.timeout_ms {
        Some(_) => Some(AbortController::new().map_err(browser_err)?),
        None => None,
    };
    let _timer = match (&controller, prepared.timeout_ms) {
        (Some(controller), Some(ms)) => {
            init.set_signal(Some(&controller.signal()));
            let controller = controller.clone();
            Some(gloo_timers::callback::Timeout::new(ms, move || controller.abort()))
        }
        _ => None,
    };

    let request = Request::new_with_str_and_init(&prepared.url, &init).map_err(browser_err)?;
    let window = web_sys::window().ok_or_else(|| ApiError::Browser("no window".to_string()))?;

    let timed_out = || controller.as_ref().map_or(false, |c| c.signal().aborted());

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fetch_failure(timed_out(), js_error_message(&e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Browser("response is not a Response".to_string()))?;

    let status = resp.status();
    let text_promise = resp.text().map_err(browser_err)?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| fetch_failure(timed_out(), js_error_message(&e)))?
        .as_string()
        .unwrap_or_default();

    Ok(ApiResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn client_with_token(token: Option<&str>) -> ApiClient {
        let session = Session::in_memory();
        if let Some(t) = token {
            session.set_token(t);
        }
        ApiClient::new("http://localhost:8000/", session)
    }

    #[test]
    fn test_prepare_joins_and_includes_credentials() {
        let client = client_with_token(None);
        let req = client.prepare("/api/list-codebooks", RequestOptions::get());
        assert_eq!(req.url, "http://localhost:8000/api/list-codebooks");
        assert!(req.include_credentials);
        assert_eq!(req.header("Authorization"), None);
        assert_eq!(req.method, Method::Get);
    }

    #[test]
    fn test_prepare_injects_bearer_token() {
        let client = client_with_token(Some("tok123"));
        let req = client.prepare("api/me/", RequestOptions::get());
        assert_eq!(req.header("authorization"), Some("Bearer tok123"));
    }

    #[test]
    fn test_prepare_reads_token_at_call_time() {
        let client = client_with_token(None);
        client.session().set_token("later");
        let req = client.prepare("/api/me/", RequestOptions::get());
        assert_eq!(req.header("Authorization"), Some("Bearer later"));
    }

    #[test]
    fn test_prepare_absolute_url_untouched() {
        let client = client_with_token(Some("tok123"));
        let req = client.prepare("https://cdn.example.org/file.json", RequestOptions::get());
        assert_eq!(req.url, "https://cdn.example.org/file.json");
        assert!(req.include_credentials);
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn test_post_json_sets_content_type() {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
        }
        let opts = RequestOptions::post_json(&Body { email: "a@b.c" }).unwrap();
        let req = client_with_token(None).prepare("/api/login/", opts);
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        match req.body {
            RequestBody::Json(json) => assert_eq!(json, r#"{"email":"a@b.c"}"#),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_aborted_fetch_is_timeout() {
        assert_eq!(fetch_failure(true, "The user aborted a request.".into()), ApiError::Timeout);
        assert_eq!(
            fetch_failure(false, "Failed to fetch".into()),
            ApiError::Transport("Failed to fetch".into())
        );
    }

    #[test]
    fn test_multipart_builder_order() {
        let form = Multipart::new()
            .text("codebook_id", "cb1")
            .text_if("model", None)
            .text("content", "# Title");
        match RequestBody::from(form) {
            RequestBody::Multipart(fields) => {
                let names: Vec<_> = fields.iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, vec!["codebook_id", "content"]);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        #[serde(default)]
        codebook: Option<String>,
    }

    #[test]
    fn test_json_success() {
        let resp = ApiResponse { status: 200, body: r#"{"codebook":"text"}"#.into() };
        let payload: Payload = resp.json().unwrap();
        assert_eq!(payload.codebook.as_deref(), Some("text"));
    }

    #[test]
    fn test_json_status_error_uses_detail() {
        let resp = ApiResponse { status: 400, body: r#"{"detail":"Bad file"}"#.into() };
        let err = resp.json::<Payload>().unwrap_err();
        assert_eq!(err, ApiError::Status { status: 400, detail: "Bad file".into() });
    }

    #[test]
    fn test_json_status_error_plain_text() {
        let resp = ApiResponse { status: 500, body: "boom".into() };
        assert_eq!(resp.json::<Payload>().unwrap_err(), ApiError::Status { status: 500, detail: "boom".into() });
        let empty = ApiResponse { status: 502, body: "".into() };
        assert_eq!(empty.json::<Payload>().unwrap_err().status(), Some(502));
    }

    #[test]
    fn test_json_empty_and_malformed_bodies() {
        let empty = ApiResponse { status: 200, body: "  ".into() };
        assert!(matches!(empty.json::<Payload>(), Err(ApiError::Malformed(_))));
        let garbage = ApiResponse { status: 200, body: "<html>".into() };
        assert!(matches!(garbage.json::<Payload>(), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_json_error_field_is_server_error() {
        let resp = ApiResponse { status: 200, body: r#"{"error":"No API key"}"#.into() };
        assert_eq!(resp.json::<Payload>().unwrap_err(), ApiError::Server("No API key".into()));
        let null_err = ApiResponse { status: 200, body: r#"{"error":null,"codebook":"x"}"#.into() };
        assert!(null_err.json::<Payload>().is_ok());
    }

    #[test]
    fn test_into_result() {
        assert!(ApiResponse { status: 204, body: String::new() }.into_result().is_ok());
        assert!(ApiResponse { status: 401, body: String::new() }.into_result().is_err());
    }
}
