//! Auth Endpoints
//!
//! Session probe, login, register.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, RequestOptions};

pub const SESSION_PROBE_PATH: &str = "/api/me/";

/// Result of the session probe behind the auth gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    pub fn from_probe(ok: bool) -> Self {
        if ok {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// True when the backend accepts the current session
pub async fn probe_session(client: &ApiClient) -> bool {
    match client.fetch(SESSION_PROBE_PATH, RequestOptions::get()).await {
        Ok(resp) => resp.ok(),
        Err(e) => {
            tracing::debug!("[AUTH] probe failed: {}", e);
            false
        }
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::validation("Please fill in all fields"));
    }
    Ok(())
}

pub fn validate_register(email: &str, password: &str, confirm: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(ApiError::validation("Please fill in all fields"));
    }
    if password != confirm {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(())
}

/// An empty success body means a cookie-only session; anything else must
/// be the JSON reply
fn parse_auth_reply(body: &str) -> Result<AuthReply, ApiError> {
    if body.trim().is_empty() {
        return Ok(AuthReply::default());
    }
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("[AUTH] unreadable login reply: {}", e);
        ApiError::Malformed(e.to_string())
    })
}

async fn authenticate(client: &ApiClient, path: &str, email: &str, password: &str) -> Result<AuthReply, ApiError> {
    let options = RequestOptions::post_json(&Credentials { email: email.trim(), password })?;
    let resp = client.fetch(path, options).await?.into_result()?;
    let reply = parse_auth_reply(&resp.body)?;
    if let Some(token) = reply.access_token.as_deref() {
        client.session().set_token(token);
    }
    Ok(reply)
}

/// Log in; a returned token is persisted to the session
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthReply, ApiError> {
    validate_login(email, password)?;
    authenticate(client, "/api/login/", email, password).await
}

pub async fn register(client: &ApiClient, email: &str, password: &str, confirm: &str) -> Result<AuthReply, ApiError> {
    validate_register(email, password, confirm)?;
    authenticate(client, "/api/register/", email, password).await
}

/// API key needed by the LLM-backed endpoints
pub fn require_api_key(session: &crate::session::Session) -> Result<String, ApiError> {
    session
        .api_key()
        .ok_or_else(|| ApiError::validation("Please set your API key in the navbar first."))
}

/// Forget the local token
pub fn logout(client: &ApiClient) {
    client.session().clear_token();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_reply_parsing() {
        let reply = parse_auth_reply(r#"{"access_token":"tok"}"#).unwrap();
        assert_eq!(reply.access_token.as_deref(), Some("tok"));
        assert_eq!(parse_auth_reply("  ").unwrap(), AuthReply::default());
        assert_eq!(parse_auth_reply("{}").unwrap().access_token, None);
        assert!(matches!(parse_auth_reply("<html>ok</html>"), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_validate_login() {
        assert_eq!(validate_login("", "x"), Err(ApiError::validation("Please fill in all fields")));
        assert_eq!(validate_login("a@b.c", ""), Err(ApiError::validation("Please fill in all fields")));
        assert!(validate_login("a@b.c", "pw").is_ok());
    }

    #[test]
    fn test_validate_register() {
        assert_eq!(validate_register("a@b.c", "one", "two"), Err(ApiError::validation("Passwords do not match")));
        assert_eq!(validate_register("a@b.c", "one", ""), Err(ApiError::validation("Please fill in all fields")));
        assert!(validate_register("a@b.c", "same", "same").is_ok());
    }

    #[test]
    fn test_require_api_key() {
        let session = crate::session::Session::in_memory();
        assert_eq!(
            require_api_key(&session),
            Err(ApiError::validation("Please set your API key in the navbar first."))
        );
        session.set_api_key(" sk-test ");
        assert_eq!(require_api_key(&session), Ok("sk-test".to_string()));
    }

    #[test]
    fn test_auth_status_from_probe() {
        assert_eq!(AuthStatus::default(), AuthStatus::Loading);
        assert_eq!(AuthStatus::from_probe(true), AuthStatus::Authenticated);
        assert_eq!(AuthStatus::from_probe(false), AuthStatus::Unauthenticated);
    }
}
