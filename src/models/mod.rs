use serde::{Deserialize, Serialize};

/// Logged-in account as returned by `POST /api/login`.
///
/// This is also the shape persisted in localStorage; see `session` for the
/// strict parser used when reading it back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub token: String,
    pub verified: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Note {
    pub id: String,
    pub content: String,
    pub important: bool,
    /// ISO-8601 timestamp assigned by the server.
    pub date: String,
    /// Owner reference. The backend sends either an id or an embedded user,
    /// so it is kept opaque.
    #[serde(default)]
    pub user: serde_json::Value,
}

impl Note {
    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            content: self.content.clone(),
            important: self.important,
        }
    }
}

/// Body of `POST /api/notes` and `PUT /api/notes/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteDraft {
    pub content: String,
    pub important: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Fields collected by the edit-password dialog.
#[derive(Clone, Debug, Default)]
pub(crate) struct NewPassword {
    pub password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body of `PUT /api/users/password`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordChangeRequest {
    pub email: String,
    pub password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeRequest {
    pub fn new(email: &str, fields: NewPassword) -> Self {
        Self {
            email: email.to_string(),
            password: fields.password,
            new_password: fields.new_password,
            confirm_password: fields.confirm_password,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct VerifiedResponse {
    pub verified: bool,
}
