//! Durable "current session" slot.
//!
//! The stored payload is untrusted (older builds, manual edits), so it goes
//! through a strict parser instead of a plain `serde` derive: a session is
//! either complete or rejected as a whole.

use crate::api::ApiClient;
use crate::models::User;
use crate::storage::{save_json_to_storage, KeyValueStore, USER_KEY};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("stored session is not valid JSON: {0}")]
    Json(String),
    #[error("Incorrect or missing {0}")]
    Field(&'static str),
    #[error("Incorrect or missing boolean: verified")]
    Verified,
}

fn parse_string(fields: &Value, name: &'static str) -> Result<String, SessionError> {
    match fields.get(name).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(SessionError::Field(name)),
    }
}

pub(crate) fn parse_user(json: &str) -> Result<User, SessionError> {
    let fields: Value = serde_json::from_str(json).map_err(|e| SessionError::Json(e.to_string()))?;

    Ok(User {
        id: parse_string(&fields, "id")?,
        email: parse_string(&fields, "email")?,
        name: parse_string(&fields, "name")?,
        token: parse_string(&fields, "token")?,
        verified: fields
            .get("verified")
            .and_then(Value::as_bool)
            .ok_or(SessionError::Verified)?,
    })
}

pub(crate) struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the persisted session. A malformed slot is dropped so the app
    /// starts logged out instead of failing on every launch.
    pub fn restore(&self) -> Option<User> {
        let json = self.store.get_item(USER_KEY)?;
        match parse_user(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored session");
                self.store.remove_item(USER_KEY);
                None
            }
        }
    }

    pub fn save(&self, user: &User) {
        save_json_to_storage(&self.store, USER_KEY, user);
    }

    pub fn clear(&self, api_client: &mut ApiClient) {
        self.store.remove_item(USER_KEY);
        api_client.clear_token();
    }
}
