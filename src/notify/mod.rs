use crate::api::ApiError;

/// Auto-hide delay of the snackbar, which is also the undo window.
pub(crate) const UNDO_TIMEOUT_MS: i32 = 5000;

pub(crate) const UNKNOWN_ERROR_TITLE: &str = "您遇到了一个未知的问题";
pub(crate) const WRONG_CREDENTIALS: &str = "您输入的用户名或密码有误";
pub(crate) const WRONG_PASSWORD: &str = "您输入的密码有误";
pub(crate) const PASSWORD_MISMATCH: &str = "两次输入的密码不一致";
pub(crate) const RELOGIN_REQUIRED: &str = "请重新登入后再试";
pub(crate) const ALREADY_REGISTERED: &str = "用户已注册";
pub(crate) const PASSWORD_CHANGED: &str = "密码修改成功。";
pub(crate) const REGISTERED: &str =
    "请检查收件箱或垃圾邮件内的注册邮件，并点击邮件内的链接完成注册。";
pub(crate) const RESEND_LIMITED: &str = "重发次数已达上限，请明天再试。";

/// Verb used in "您要<verb>的便签已不存在".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoteOperation {
    Delete,
    Restore,
    Edit,
    Modify,
}

impl NoteOperation {
    fn verb(self) -> &'static str {
        match self {
            Self::Delete => "删除",
            Self::Restore => "恢复",
            Self::Edit => "编辑",
            Self::Modify => "修改",
        }
    }
}

/// Payload of the error dialog. `content` carries a copyable diagnostic log
/// for unexpected failures and is absent for known conditions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ErrorMessage {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ErrorMessage {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn unexpected(error: &ApiError) -> Self {
        Self {
            title: None,
            content: Some(format!(
                "error.name:\n{}\n\nerror.message:\n{}\n",
                error.name(),
                error
            )),
        }
    }

    /// `NotFound` becomes a titled message; anything else is unexpected.
    pub fn for_note(error: &ApiError, operation: NoteOperation) -> Self {
        match error {
            ApiError::NotFound => Self::titled(format!("您要{}的便签已不存在", operation.verb())),
            other => Self::unexpected(other),
        }
    }

    /// The note vanished from the local cache before it could be deleted.
    pub fn missing_in_cache() -> Self {
        Self {
            title: Some("找不到您要删除的便签".to_string()),
            content: Some("请刷新后重试".to_string()),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_ERROR_TITLE)
    }
}

/// Undo affordance attached to a snackbar. It names the pending deletion by
/// ticket, so a stale snackbar can never undo a newer deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UndoAction {
    pub ticket: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Snackbar {
    pub message: String,
    pub undo: Option<UndoAction>,
}

impl Snackbar {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            undo: None,
        }
    }

    pub fn note_deleted(content: &str, ticket: u64) -> Self {
        Self {
            message: format!("便签「{content}」已被删除"),
            undo: Some(UndoAction { ticket }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_on_delete_is_titled_without_log() {
        let msg = ErrorMessage::for_note(&ApiError::NotFound, NoteOperation::Delete);
        assert_eq!(msg.title.as_deref(), Some("您要删除的便签已不存在"));
        assert!(msg.content.is_none());
    }

    #[test]
    fn test_other_errors_carry_diagnostic_log() {
        let msg = ErrorMessage::for_note(
            &ApiError::Network("connection refused".to_string()),
            NoteOperation::Restore,
        );
        assert!(msg.title.is_none());
        assert_eq!(msg.display_title(), UNKNOWN_ERROR_TITLE);
        let log = msg.content.unwrap_or_default();
        assert!(log.contains("NetworkError"));
        assert!(log.contains("connection refused"));
    }

    #[test]
    fn test_note_deleted_snackbar_offers_undo() {
        let bar = Snackbar::note_deleted("买牛奶", 3);
        assert_eq!(bar.message, "便签「买牛奶」已被删除");
        assert_eq!(bar.undo, Some(UndoAction { ticket: 3 }));
        assert!(Snackbar::info(PASSWORD_CHANGED).undo.is_none());
    }
}
