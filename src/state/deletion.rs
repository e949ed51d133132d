use crate::models::Note;

/// Undo-eligible deletion. The note snapshot is what the undo call restores
/// from the server; `ticket` ties timers and snackbars to this deletion only.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingRecord {
    pub note: Note,
    pub ticket: u64,
    pub removed_at_ms: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum PendingDelete {
    #[default]
    NoPendingDelete,
    PendingDelete(PendingRecord),
}

/// Delete-with-undo state machine.
///
/// Holds at most one pending deletion. Starting a new one finalizes the
/// previous record, which then loses its undo affordance.
#[derive(Clone, Debug, Default)]
pub(crate) struct DeleteController {
    state: PendingDelete,
    next_ticket: u64,
}

impl DeleteController {
    #[cfg(test)]
    pub fn pending(&self) -> Option<&PendingRecord> {
        match &self.state {
            PendingDelete::PendingDelete(record) => Some(record),
            PendingDelete::NoPendingDelete => None,
        }
    }

    /// Enters `PendingDelete` for `note`, returning the new ticket and the
    /// record it superseded, if any.
    pub fn begin(&mut self, note: Note, removed_at_ms: i64) -> (u64, Option<PendingRecord>) {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let previous = std::mem::replace(
            &mut self.state,
            PendingDelete::PendingDelete(PendingRecord {
                note,
                ticket,
                removed_at_ms,
            }),
        );

        let superseded = match previous {
            PendingDelete::PendingDelete(record) => Some(record),
            PendingDelete::NoPendingDelete => None,
        };
        (ticket, superseded)
    }

    /// Takes the pending record for an undo. The state is cleared before any
    /// network call, so a second undo for the same ticket gets `None`.
    pub fn take_for_undo(&mut self, ticket: u64) -> Option<PendingRecord> {
        match &self.state {
            PendingDelete::PendingDelete(record) if record.ticket == ticket => {}
            _ => return None,
        }
        match std::mem::take(&mut self.state) {
            PendingDelete::PendingDelete(record) => Some(record),
            PendingDelete::NoPendingDelete => None,
        }
    }

    /// Undo window elapsed. Stale tickets (already undone or superseded)
    /// are ignored; returns whether a record was discarded.
    pub fn expire(&mut self, ticket: u64) -> bool {
        match &self.state {
            PendingDelete::PendingDelete(record) if record.ticket == ticket => {
                self.state = PendingDelete::NoPendingDelete;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = PendingDelete::NoPendingDelete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::note;

    #[test]
    fn test_begin_from_idle_has_nothing_to_finalize() {
        let mut ctl = DeleteController::default();
        let (ticket, superseded) = ctl.begin(note("1", "a", false, "d"), 10);
        assert!(superseded.is_none());
        assert_eq!(ctl.pending().map(|r| r.ticket), Some(ticket));
        assert_eq!(ctl.pending().map(|r| r.removed_at_ms), Some(10));
    }

    #[test]
    fn test_second_delete_supersedes_first() {
        let mut ctl = DeleteController::default();
        let (first, _) = ctl.begin(note("1", "a", false, "d"), 10);
        let (second, superseded) = ctl.begin(note("2", "b", false, "d"), 20);

        assert_eq!(superseded.map(|r| r.note.id), Some("1".to_string()));
        assert!(ctl.take_for_undo(first).is_none());
        assert_eq!(
            ctl.take_for_undo(second).map(|r| r.note.id),
            Some("2".to_string())
        );
    }

    #[test]
    fn test_undo_is_single_shot() {
        let mut ctl = DeleteController::default();
        let (ticket, _) = ctl.begin(note("1", "a", false, "d"), 10);
        assert!(ctl.take_for_undo(ticket).is_some());
        assert!(ctl.take_for_undo(ticket).is_none());
        assert!(ctl.pending().is_none());
    }

    #[test]
    fn test_expire_ignores_stale_ticket() {
        let mut ctl = DeleteController::default();
        let (first, _) = ctl.begin(note("1", "a", false, "d"), 10);
        let (second, _) = ctl.begin(note("2", "b", false, "d"), 20);

        assert!(!ctl.expire(first));
        assert!(ctl.pending().is_some());
        assert!(ctl.expire(second));
        assert!(ctl.pending().is_none());
        assert!(ctl.take_for_undo(second).is_none());
    }

    #[test]
    fn test_tickets_are_never_reused_after_reset() {
        let mut ctl = DeleteController::default();
        let (first, _) = ctl.begin(note("1", "a", false, "d"), 10);
        ctl.reset();
        let (second, _) = ctl.begin(note("1", "a", false, "d"), 20);
        assert_ne!(first, second);
    }
}
