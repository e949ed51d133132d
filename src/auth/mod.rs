//! Outcome mapping for the account dialogs (login, register, password).
//!
//! Validation-shaped failures stay on the form as field text; everything
//! else becomes an [`ErrorMessage`] for the global error dialog.

use crate::api::{ApiError, ApiResult};
use crate::models::NewPassword;
use crate::notify::{
    ErrorMessage, Snackbar, PASSWORD_MISMATCH, RELOGIN_REQUIRED, RESEND_LIMITED,
    WRONG_CREDENTIALS, WRONG_PASSWORD,
};

/// Where a failed submission should be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Feedback {
    /// Helper text under the form fields.
    Field(&'static str),
    Dialog(ErrorMessage),
    Toast(Snackbar),
}

pub(crate) fn login_failure(error: &ApiError) -> Feedback {
    match error {
        ApiError::Unauthorized => Feedback::Field(WRONG_CREDENTIALS),
        other => Feedback::Dialog(ErrorMessage::unexpected(other)),
    }
}

pub(crate) fn validate_new_password(fields: &NewPassword) -> Result<(), Feedback> {
    if fields.new_password != fields.confirm_password {
        return Err(Feedback::Field(PASSWORD_MISMATCH));
    }
    Ok(())
}

/// `session_email` is `None` when the dialog was submitted after logout.
pub(crate) fn password_email(session_email: Option<&str>) -> Result<&str, Feedback> {
    session_email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Feedback::Dialog(ErrorMessage::titled(RELOGIN_REQUIRED)))
}

pub(crate) fn password_failure(error: &ApiError) -> Feedback {
    match error {
        ApiError::Unauthorized => Feedback::Field(WRONG_PASSWORD),
        other => Feedback::Dialog(ErrorMessage::unexpected(other)),
    }
}

pub(crate) fn resend_failure(error: &ApiError) -> Feedback {
    match error {
        ApiError::RateLimited => Feedback::Toast(Snackbar::info(RESEND_LIMITED)),
        other => Feedback::Dialog(ErrorMessage::unexpected(other)),
    }
}

/// What the registration form knows about the typed email.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum RegistrationStatus {
    /// Never registered (or not checked yet): the full form is shown.
    #[default]
    New,
    /// Registered, verification mail not confirmed: offer a resend.
    Unverified,
    /// Registered and verified: the form is disabled.
    Verified,
}

impl RegistrationStatus {
    /// Maps the `is-verified` lookup; a 404 means the email is free.
    pub fn from_lookup(result: ApiResult<bool>) -> Result<Self, ApiError> {
        match result {
            Ok(true) => Ok(Self::Verified),
            Ok(false) => Ok(Self::Unverified),
            Err(ApiError::NotFound) => Ok(Self::New),
            Err(e) => Err(e),
        }
    }

    pub fn can_submit(self) -> bool {
        self != Self::Verified
    }
}
