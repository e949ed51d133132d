use crate::cache::NoteCache;
use crate::models::Note;
use crate::sort::{SortKey, SortState};
use crate::state::deletion::{DeleteController, PendingRecord};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum BoardError {
    #[error("note {0} is not in the local cache")]
    NotCached(String),
}

/// Result of an optimistic delete.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StartedDelete {
    pub note: Note,
    pub ticket: u64,
    /// Previous pending deletion, finalized by this one.
    pub superseded: Option<PendingRecord>,
}

/// Notes of the signed-in user plus the controllers that act on them.
///
/// This is the only owner of the note cache; rendering reads [`NoteBoard::view`].
#[derive(Clone, Debug, Default)]
pub(crate) struct NoteBoard {
    notes: NoteCache,
    sort: SortState,
    deletion: DeleteController,
}

impl NoteBoard {
    pub fn notes(&self) -> &NoteCache {
        &self.notes
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&PendingRecord> {
        self.deletion.pending()
    }

    /// Display order. Derived on every call; the cache keeps insertion order.
    pub fn view(&self) -> Vec<Note> {
        self.sort.apply(self.notes.as_slice())
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
    }

    pub fn load(&mut self, notes: Vec<Note>) {
        self.notes = NoteCache::new(notes);
        self.deletion.reset();
    }

    /// Logout: forget notes and any pending deletion, keep the sort choice.
    pub fn clear(&mut self) {
        self.notes = NoteCache::default();
        self.deletion.reset();
    }

    pub fn created(&mut self, note: Note) {
        self.notes = self.notes.insert(note);
    }

    pub fn updated(&mut self, note: Note) -> Result<(), BoardError> {
        let id = note.id.clone();
        self.notes = self
            .notes
            .replace(&id, note)
            .ok_or(BoardError::NotCached(id))?;
        Ok(())
    }

    /// Optimistically removes `id` and opens a new undo window for it.
    pub fn begin_delete(&mut self, id: &str, now_ms: i64) -> Result<StartedDelete, BoardError> {
        let note = self
            .notes
            .find(id)
            .cloned()
            .ok_or_else(|| BoardError::NotCached(id.to_string()))?;

        let (ticket, superseded) = self.deletion.begin(note.clone(), now_ms);
        self.notes = self.notes.remove(id);

        Ok(StartedDelete {
            note,
            ticket,
            superseded,
        })
    }

    pub fn take_undo(&mut self, ticket: u64) -> Option<PendingRecord> {
        self.deletion.take_for_undo(ticket)
    }

    pub fn restored(&mut self, note: Note) {
        self.notes = self.notes.restore(note);
    }

    pub fn expire(&mut self, ticket: u64) -> bool {
        self.deletion.expire(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::note;

    fn board() -> NoteBoard {
        let mut board = NoteBoard::default();
        board.load(vec![
            note("1", "a", false, "2021-01-01T00:00:00Z"),
            note("2", "b", true, "2021-01-02T00:00:00Z"),
        ]);
        board
    }

    #[test]
    fn test_begin_delete_removes_before_server_confirms() {
        let mut board = board();
        let started = board.begin_delete("1", 100).expect("note 1 is cached");
        assert_eq!(started.note.content, "a");
        assert!(!board.notes().contains("1"));
        assert_eq!(board.pending().map(|r| r.note.id.as_str()), Some("1"));
    }

    #[test]
    fn test_begin_delete_of_unknown_id_changes_nothing() {
        let mut board = board();
        assert_eq!(
            board.begin_delete("9", 100),
            Err(BoardError::NotCached("9".to_string()))
        );
        assert_eq!(board.notes().len(), 2);
        assert!(board.pending().is_none());
    }

    #[test]
    fn test_updated_missing_note_is_reported() {
        let mut board = board();
        let result = board.updated(note("9", "x", false, "2021-01-01T00:00:00Z"));
        assert_eq!(result, Err(BoardError::NotCached("9".to_string())));
    }

    #[test]
    fn test_view_is_sorted_but_cache_is_not() {
        let mut board = board();
        board.toggle_sort(SortKey::Important);
        let view: Vec<_> = board.view().into_iter().map(|n| n.id).collect();
        assert_eq!(view, vec!["2", "1"]);
        assert_eq!(board.notes().as_slice()[0].id, "1");
    }

    #[test]
    fn test_clear_drops_pending_delete() {
        let mut board = board();
        let started = board.begin_delete("1", 100).unwrap();
        board.clear();
        assert!(board.notes().is_empty());
        assert!(board.take_undo(started.ticket).is_none());
    }
}
