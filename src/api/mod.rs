use crate::models::{
    LoginRequest, NewUser, Note, NoteDraft, PasswordChangeRequest, User, VerifiedResponse,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("Too many requests")]
    RateLimited,
    #[error("Request failed ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("{0}")]
    Network(String),
    #[error("Invalid response body: {0}")]
    Parse(String),
    /// An authenticated call was attempted without a session token.
    #[error("Token should not be null")]
    MissingToken,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    /// Short machine-ish name shown in the diagnostic log of the error dialog.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "NotFound",
            Self::RateLimited => "RateLimited",
            Self::Http { .. } => "HttpError",
            Self::Network(_) => "NetworkError",
            Self::Parse(_) => "ParseError",
            Self::MissingToken => "MissingToken",
        }
    }

    async fn from_response(res: Response) -> Self {
        match res.status() {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            status => {
                let body = res.text().await.unwrap_or_default();
                Self::Http {
                    status: status.as_u16(),
                    body,
                }
            }
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub log_level: String,
    /// Target of the error dialog's "反馈" button; hidden when unset.
    pub feedback_url: Option<String>,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_log_level = "info".to_string();

        let Some(window) = web_sys::window() else {
            return Self {
                api_url: String::new(),
                log_level: default_log_level,
                feedback_url: None,
            };
        };

        // Both `window.ENV.API_URL` and `window.ENV.api_url` are accepted.
        let read_env = |keys: [&str; 2]| -> Option<String> {
            let env = window.get("ENV")?;
            if env.is_undefined() || !env.is_object() {
                return None;
            }
            keys.iter().find_map(|k| {
                js_sys::Reflect::get(&env, &(*k).into())
                    .ok()
                    .and_then(|v| v.as_string())
                    .filter(|s| !s.trim().is_empty())
            })
        };

        // The backend is normally served from the same origin as the app.
        let api_url = read_env(["API_URL", "api_url"])
            .or_else(|| window.location().origin().ok())
            .unwrap_or_default();
        let log_level = read_env(["LOG_LEVEL", "log_level"]).unwrap_or(default_log_level);
        let feedback_url = read_env(["FEEDBACK_URL", "feedback_url"]);

        Self {
            api_url,
            log_level,
            feedback_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Note endpoints used by the note board workflows.
///
/// Implemented by [`ApiClient`]; tests provide an in-memory fake.
pub(crate) trait NotesApi {
    async fn list_notes(&self) -> ApiResult<Vec<Note>>;
    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note>;
    async fn update_note(&self, id: &str, draft: &NoteDraft) -> ApiResult<Note>;
    async fn remove_note(&self, id: &str) -> ApiResult<()>;
    async fn undo_remove_note(&self, id: &str) -> ApiResult<Note>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn auth_header(&self) -> ApiResult<String> {
        self.token
            .as_ref()
            .map(|t| format!("bearer {t}"))
            .ok_or(ApiError::MissingToken)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        reqwest::Client::new().request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let header = self.auth_header()?;
        Ok(self.public(method, path).header(AUTHORIZATION, header))
    }

    async fn execute(req: RequestBuilder) -> ApiResult<Response> {
        let res = req.send().await.map_err(ApiError::network)?;
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(ApiError::from_response(res).await)
        }
    }

    async fn execute_json<T: DeserializeOwned>(req: RequestBuilder) -> ApiResult<T> {
        Self::execute(req).await?.json().await.map_err(ApiError::parse)
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let req = self.public(Method::POST, "/api/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        Self::execute_json(req).await
    }

    pub async fn register(&self, new_user: &NewUser) -> ApiResult<()> {
        let req = self.public(Method::POST, "/api/users").json(new_user);
        Self::execute(req).await.map(|_| ())
    }

    pub async fn change_password(&self, body: &PasswordChangeRequest) -> ApiResult<()> {
        let req = self.public(Method::PUT, "/api/users/password").json(body);
        Self::execute(req).await.map(|_| ())
    }

    /// `Err(NotFound)` means the email has never been registered.
    pub async fn is_verified(&self, email: &str) -> ApiResult<bool> {
        let path = format!("/api/users/{}/is-verified/", urlencoding::encode(email));
        let res: VerifiedResponse = Self::execute_json(self.public(Method::GET, &path)).await?;
        Ok(res.verified)
    }

    pub async fn resend_verify(&self, email: &str) -> ApiResult<()> {
        let path = format!("/api/email/{}/resend/", urlencoding::encode(email));
        Self::execute(self.public(Method::GET, &path)).await.map(|_| ())
    }
}

fn note_path(id: &str) -> String {
    format!("/api/notes/{}", urlencoding::encode(id))
}

impl NotesApi for ApiClient {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        Self::execute_json(self.authed(Method::GET, "/api/notes")?).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        Self::execute_json(self.authed(Method::POST, "/api/notes")?.json(draft)).await
    }

    async fn update_note(&self, id: &str, draft: &NoteDraft) -> ApiResult<Note> {
        Self::execute_json(self.authed(Method::PUT, &note_path(id))?.json(draft)).await
    }

    async fn remove_note(&self, id: &str) -> ApiResult<()> {
        Self::execute(self.authed(Method::DELETE, &note_path(id))?)
            .await
            .map(|_| ())
    }

    async fn undo_remove_note(&self, id: &str) -> ApiResult<Note> {
        Self::execute_json(self.authed(Method::POST, &note_path(id))?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3001/".to_string());
        assert_eq!(client.base_url, "http://localhost:3001");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_auth_header_without_token_is_missing_token() {
        let client = ApiClient::new("http://localhost:3001".to_string());
        assert_eq!(client.auth_header(), Err(ApiError::MissingToken));
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_auth_header_uses_lowercase_bearer_scheme() {
        let mut client = ApiClient::new("http://localhost:3001".to_string());
        client.set_token("jwt");
        assert_eq!(client.auth_header().as_deref(), Ok("bearer jwt"));
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_clear_token_revokes_authentication() {
        let mut client = ApiClient::new("http://localhost:3001".to_string());
        client.set_token("jwt");
        client.clear_token();
        assert!(client.authed(Method::GET, "/api/notes").is_err());
    }

    #[test]
    fn test_note_path_encodes_id() {
        assert_eq!(note_path("abc"), "/api/notes/abc");
        assert_eq!(note_path("a/b"), "/api/notes/a%2Fb");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_note_calls_fail_fast_without_token() {
        // Port 9 is never contacted: the token check precedes the request.
        let client = ApiClient::new("http://127.0.0.1:9".to_string());
        assert_eq!(client.list_notes().await, Err(ApiError::MissingToken));
        assert_eq!(client.remove_note("1").await, Err(ApiError::MissingToken));
        assert_eq!(
            client.undo_remove_note("1").await,
            Err(ApiError::MissingToken)
        );
    }

    #[test]
    fn test_error_names_are_distinct() {
        assert_eq!(ApiError::MissingToken.name(), "MissingToken");
        assert_eq!(
            ApiError::Http {
                status: 500,
                body: "boom".to_string()
            }
            .to_string(),
            "Request failed (500): boom"
        );
    }
}
