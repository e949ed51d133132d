//! Note workflows: one function per user intent, each pairing the board
//! mutation with its API call and the resulting feedback.

use crate::api::{ApiError, NotesApi};
use crate::models::NoteDraft;
use crate::notify::{ErrorMessage, NoteOperation, Snackbar, UndoAction};
use crate::state::board::{BoardError, NoteBoard};

/// Where the workflows read and write application state.
///
/// The browser implementation is backed by signals; tests record calls.
pub(crate) trait BoardHost {
    /// `None` when the state is gone (the app was torn down mid-request).
    fn update_board<R>(&self, f: impl FnOnce(&mut NoteBoard) -> R) -> Option<R>;
    fn show_error(&self, message: ErrorMessage);
    /// The undo offer on the snackbar currently shown.
    fn current_undo(&self) -> Option<UndoAction>;
    /// Puts `snackbar` on screen, or clears it, and restarts the auto-hide
    /// timer. Leaves the board alone.
    fn set_snackbar(&self, snackbar: Option<Snackbar>);

    /// Replaces the current snackbar. An undo offer on the replaced one is
    /// withdrawn.
    fn show_snackbar(&self, snackbar: Snackbar) {
        if let Some(previous) = self.current_undo().filter(|p| snackbar.undo != Some(*p)) {
            if self.update_board(|b| b.expire(previous.ticket)) == Some(true) {
                tracing::debug!(ticket = previous.ticket, "undo withdrawn by a newer message");
            }
        }
        self.set_snackbar(Some(snackbar));
    }

    fn hide_snackbar(&self) {
        self.set_snackbar(None);
    }
}

pub(crate) async fn load_notes<A: NotesApi, H: BoardHost>(api: &A, host: &H) {
    match api.list_notes().await {
        Ok(notes) => {
            let count = host.update_board(|b| {
                b.load(notes);
                b.notes().len()
            });
            tracing::info!(?count, "notes loaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load notes");
            host.show_error(ErrorMessage::unexpected(&e));
        }
    }
}

pub(crate) async fn create_note<A: NotesApi, H: BoardHost>(api: &A, host: &H, draft: NoteDraft) {
    match api.create_note(&draft).await {
        Ok(note) => {
            tracing::info!(id = %note.id, "note created");
            host.update_board(|b| b.created(note));
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create note");
            host.show_error(ErrorMessage::unexpected(&e));
        }
    }
}

/// Returns whether the server accepted the change.
pub(crate) async fn update_note<A: NotesApi, H: BoardHost>(
    api: &A,
    host: &H,
    id: &str,
    draft: NoteDraft,
    operation: NoteOperation,
) -> bool {
    match api.update_note(id, &draft).await {
        Ok(note) => {
            // The note may have been deleted locally while the request was
            // in flight; the board keeps the deletion.
            if let Some(Err(BoardError::NotCached(id))) = host.update_board(|b| b.updated(note)) {
                tracing::warn!(%id, "updated note is no longer cached");
            }
            true
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "failed to update note");
            host.show_error(ErrorMessage::for_note(&e, operation));
            false
        }
    }
}

/// Optimistic delete with a fresh undo window.
///
/// The note leaves the board before the server answers and is never put
/// back on failure. Any earlier pending deletion is finalized.
pub(crate) async fn delete_note<A: NotesApi, H: BoardHost>(api: &A, host: &H, id: &str, now_ms: i64) {
    let started = match host.update_board(|b| b.begin_delete(id, now_ms)) {
        Some(Ok(started)) => started,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "delete requested for unknown note");
            host.show_error(ErrorMessage::missing_in_cache());
            return;
        }
        None => return,
    };

    if let Some(previous) = &started.superseded {
        tracing::debug!(
            id = %previous.note.id,
            held_ms = now_ms - previous.removed_at_ms,
            "pending delete finalized"
        );
    }
    tracing::info!(%id, ticket = started.ticket, "note removed, undo window open");
    host.show_snackbar(Snackbar::note_deleted(&started.note.content, started.ticket));

    if let Err(e) = api.remove_note(id).await {
        tracing::warn!(%id, error = %e, "server delete failed");
        host.show_error(ErrorMessage::for_note(&e, NoteOperation::Delete));
    }
}

/// Undoes the deletion named by `ticket`. A stale or repeated undo is a no-op.
pub(crate) async fn undo_delete<A: NotesApi, H: BoardHost>(api: &A, host: &H, ticket: u64) {
    let Some(record) = host.update_board(|b| b.take_undo(ticket)).flatten() else {
        tracing::debug!(ticket, "undo ignored, nothing pending");
        return;
    };
    host.hide_snackbar();

    let id = record.note.id;
    match api.undo_remove_note(&id).await {
        Ok(note) => {
            tracing::info!(%id, "note restored");
            host.update_board(|b| b.restored(note));
        }
        Err(e) => {
            if e == ApiError::NotFound {
                tracing::error!(%id, "undo window drifted, note already purged");
            } else {
                tracing::warn!(%id, error = %e, "undo failed");
            }
            host.show_error(ErrorMessage::for_note(&e, NoteOperation::Restore));
        }
    }
}

/// The undo window of `ticket` elapsed.
pub(crate) fn expire_delete<H: BoardHost>(host: &H, ticket: u64) {
    if host.update_board(|b| b.expire(ticket)) == Some(true) {
        tracing::debug!(ticket, "undo window closed");
    }
}

/// Snackbar closed by the user or its timer: the undo offer it carried is
/// withdrawn for good.
pub(crate) fn dismiss_snackbar<H: BoardHost>(host: &H) {
    if let Some(undo) = host.current_undo() {
        expire_delete(host, undo.ticket);
    }
    host.hide_snackbar();
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::ApiResult;
    use crate::cache::note;
    use crate::models::Note;
    use crate::notify::PASSWORD_CHANGED;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Server double: keeps live notes and a trash that undo can restore from.
    #[derive(Default)]
    struct FakeApi {
        live: RefCell<Vec<Note>>,
        trash: RefCell<Vec<Note>>,
        calls: RefCell<Vec<String>>,
        next_id: RefCell<u32>,
    }

    impl FakeApi {
        fn with(notes: Vec<Note>) -> Self {
            Self {
                live: RefCell::new(notes),
                ..Default::default()
            }
        }

        fn purge_trash(&self) {
            self.trash.borrow_mut().clear();
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl NotesApi for FakeApi {
        async fn list_notes(&self) -> ApiResult<Vec<Note>> {
            self.calls.borrow_mut().push("list".to_string());
            Ok(self.live.borrow().clone())
        }

        async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
            self.calls.borrow_mut().push("create".to_string());
            *self.next_id.borrow_mut() += 1;
            let created = Note {
                id: format!("new-{}", self.next_id.borrow()),
                content: draft.content.clone(),
                important: draft.important,
                date: "2021-05-01T00:00:00Z".to_string(),
                user: serde_json::Value::Null,
            };
            self.live.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_note(&self, id: &str, draft: &NoteDraft) -> ApiResult<Note> {
            self.calls.borrow_mut().push(format!("update {id}"));
            let mut live = self.live.borrow_mut();
            let n = live.iter_mut().find(|n| n.id == id).ok_or(ApiError::NotFound)?;
            n.content = draft.content.clone();
            n.important = draft.important;
            Ok(n.clone())
        }

        async fn remove_note(&self, id: &str) -> ApiResult<()> {
            self.calls.borrow_mut().push(format!("remove {id}"));
            let mut live = self.live.borrow_mut();
            let pos = live.iter().position(|n| n.id == id).ok_or(ApiError::NotFound)?;
            let removed = live.remove(pos);
            self.trash.borrow_mut().push(removed);
            Ok(())
        }

        async fn undo_remove_note(&self, id: &str) -> ApiResult<Note> {
            self.calls.borrow_mut().push(format!("undo {id}"));
            let mut trash = self.trash.borrow_mut();
            let pos = trash.iter().position(|n| n.id == id).ok_or(ApiError::NotFound)?;
            let restored = trash.remove(pos);
            self.live.borrow_mut().push(restored.clone());
            Ok(restored)
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        board: RefCell<NoteBoard>,
        errors: RefCell<Vec<ErrorMessage>>,
        snackbar: RefCell<Option<Snackbar>>,
    }

    impl BoardHost for RecordingHost {
        fn update_board<R>(&self, f: impl FnOnce(&mut NoteBoard) -> R) -> Option<R> {
            Some(f(&mut self.board.borrow_mut()))
        }

        fn show_error(&self, message: ErrorMessage) {
            self.errors.borrow_mut().push(message);
        }

        fn current_undo(&self) -> Option<UndoAction> {
            self.snackbar.borrow().as_ref().and_then(|s| s.undo)
        }

        fn set_snackbar(&self, snackbar: Option<Snackbar>) {
            *self.snackbar.borrow_mut() = snackbar;
        }
    }

    impl RecordingHost {
        fn ids(&self) -> HashSet<String> {
            self.board
                .borrow()
                .notes()
                .as_slice()
                .iter()
                .map(|n| n.id.clone())
                .collect()
        }

        fn undo_ticket(&self) -> Option<u64> {
            self.current_undo().map(|u| u.ticket)
        }
    }

    fn notes() -> Vec<Note> {
        vec![
            note("1", "a", false, "2021-01-01T00:00:00Z"),
            note("2", "b", true, "2021-01-02T00:00:00Z"),
            note("5", "c", false, "2021-01-03T00:00:00Z"),
        ]
    }

    async fn loaded() -> (FakeApi, RecordingHost) {
        let api = FakeApi::with(notes());
        let host = RecordingHost::default();
        load_notes(&api, &host).await;
        (api, host)
    }

    #[tokio::test]
    async fn test_delete_then_undo_restores_original_note() {
        let (api, host) = loaded().await;
        let before = host.ids();

        delete_note(&api, &host, "2", 0).await;
        assert!(!host.ids().contains("2"));
        let ticket = host.undo_ticket().expect("undo is offered");

        undo_delete(&api, &host, ticket).await;
        assert_eq!(host.ids(), before);
        let board = host.board.borrow();
        let restored = board.notes().find("2").expect("note 2 is back");
        assert_eq!(restored, &note("2", "b", true, "2021-01-02T00:00:00Z"));
        assert_eq!(board.notes().len(), 3);
        assert!(host.snackbar.borrow().is_none());
        assert!(host.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_undo_twice_restores_once() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "1", 0).await;
        let ticket = host.undo_ticket().unwrap();

        undo_delete(&api, &host, ticket).await;
        undo_delete(&api, &host, ticket).await;

        let undo_calls = api.calls().iter().filter(|c| c.starts_with("undo")).count();
        assert_eq!(undo_calls, 1);
        assert_eq!(host.board.borrow().notes().len(), 3);
    }

    #[tokio::test]
    async fn test_expired_window_offers_no_undo() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "1", 0).await;
        let ticket = host.undo_ticket().unwrap();

        expire_delete(&host, ticket);
        undo_delete(&api, &host, ticket).await;

        assert!(!host.ids().contains("1"));
        assert!(!api.calls().iter().any(|c| c.starts_with("undo")));
    }

    #[tokio::test]
    async fn test_info_message_replacing_undo_withdraws_it() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "1", 0).await;
        let ticket = host.undo_ticket().unwrap();

        host.show_snackbar(Snackbar::info(PASSWORD_CHANGED));
        assert!(host.undo_ticket().is_none());

        undo_delete(&api, &host, ticket).await;
        assert!(!host.ids().contains("1"));
        assert!(!api.calls().iter().any(|c| c.starts_with("undo")));
        assert_eq!(
            host.snackbar.borrow().as_ref().map(|s| s.message.as_str()),
            Some(PASSWORD_CHANGED)
        );
    }

    #[tokio::test]
    async fn test_dismissed_snackbar_withdraws_undo() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "2", 0).await;
        let ticket = host.undo_ticket().unwrap();

        dismiss_snackbar(&host);
        assert!(host.snackbar.borrow().is_none());

        undo_delete(&api, &host, ticket).await;
        assert!(!host.ids().contains("2"));
        assert!(!api.calls().iter().any(|c| c.starts_with("undo")));
    }

    #[tokio::test]
    async fn test_dismissing_plain_message_keeps_nothing_pending() {
        let (api, host) = loaded().await;
        host.show_snackbar(Snackbar::info(PASSWORD_CHANGED));
        dismiss_snackbar(&host);
        assert!(host.snackbar.borrow().is_none());

        delete_note(&api, &host, "5", 0).await;
        let ticket = host.undo_ticket().unwrap();
        undo_delete(&api, &host, ticket).await;
        assert!(host.ids().contains("5"));
    }

    #[tokio::test]
    async fn test_second_delete_finalizes_first() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "1", 0).await;
        let first = host.undo_ticket().unwrap();
        delete_note(&api, &host, "2", 1).await;
        let second = host.undo_ticket().unwrap();
        assert_ne!(first, second);

        undo_delete(&api, &host, first).await;
        assert!(!host.ids().contains("1"));

        undo_delete(&api, &host, second).await;
        assert!(host.ids().contains("2"));
        assert!(!host.ids().contains("1"));
    }

    #[tokio::test]
    async fn test_server_404_on_delete_keeps_note_removed() {
        let (api, host) = loaded().await;
        // Someone else already deleted "5" on the server.
        api.live.borrow_mut().retain(|n| n.id != "5");

        delete_note(&api, &host, "5", 0).await;

        assert!(!host.ids().contains("5"));
        let errors = host.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title.as_deref(), Some("您要删除的便签已不存在"));
    }

    #[tokio::test]
    async fn test_undo_after_server_purge_surfaces_error() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "1", 0).await;
        let ticket = host.undo_ticket().unwrap();
        api.purge_trash();

        undo_delete(&api, &host, ticket).await;

        assert!(!host.ids().contains("1"));
        assert_eq!(
            host.errors.borrow()[0].title.as_deref(),
            Some("您要恢复的便签已不存在")
        );
    }

    #[tokio::test]
    async fn test_delete_of_uncached_note_skips_server() {
        let (api, host) = loaded().await;
        delete_note(&api, &host, "9", 0).await;

        assert!(!api.calls().iter().any(|c| c.starts_with("remove")));
        assert_eq!(host.errors.borrow()[0], ErrorMessage::missing_in_cache());
        assert!(host.snackbar.borrow().is_none());
    }

    #[tokio::test]
    async fn test_create_and_toggle_important() {
        let (api, host) = loaded().await;
        create_note(
            &api,
            &host,
            NoteDraft {
                content: "new".to_string(),
                important: false,
            },
        )
        .await;
        assert_eq!(host.board.borrow().notes().len(), 4);

        let ok = update_note(
            &api,
            &host,
            "new-1",
            NoteDraft {
                content: "new".to_string(),
                important: true,
            },
            NoteOperation::Edit,
        )
        .await;
        assert!(ok);
        let board = host.board.borrow();
        assert_eq!(board.notes().find("new-1").map(|n| n.important), Some(true));
    }

    #[tokio::test]
    async fn test_update_of_missing_note_reports_operation() {
        let (api, host) = loaded().await;
        api.live.borrow_mut().clear();

        let ok = update_note(&api, &host, "1", NoteDraft::default(), NoteOperation::Modify).await;

        assert!(!ok);
        assert_eq!(
            host.errors.borrow()[0].title.as_deref(),
            Some("您要修改的便签已不存在")
        );
        assert_eq!(host.board.borrow().notes().len(), 3);
    }
}
