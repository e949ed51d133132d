use crate::models::Note;

/// Ordered notes of the current session, keyed by `id`.
///
/// Every operation returns a new cache; the previous value stays untouched so
/// a pending deletion can keep the snapshot it was taken from.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NoteCache {
    notes: Vec<Note>,
}

impl NoteCache {
    pub fn new(notes: Vec<Note>) -> Self {
        let mut cache = Self::default();
        for note in notes {
            cache = cache.insert(note);
        }
        cache
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    /// Appends `note`. A note with the same id is replaced in place instead,
    /// which keeps ids unique if the server echoes a note twice.
    pub fn insert(&self, note: Note) -> Self {
        if let Some(replaced) = self.replace(&note.id, note.clone()) {
            return replaced;
        }
        let mut notes = self.notes.clone();
        notes.push(note);
        Self { notes }
    }

    /// `None` when `id` is not cached; callers treat that as "reload needed".
    pub fn replace(&self, id: &str, note: Note) -> Option<Self> {
        let pos = self.notes.iter().position(|n| n.id == id)?;
        let mut notes = self.notes.clone();
        notes[pos] = note;
        Some(Self { notes })
    }

    pub fn remove(&self, id: &str) -> Self {
        Self {
            notes: self.notes.iter().filter(|n| n.id != id).cloned().collect(),
        }
    }

    /// Puts an undeleted note back (at the end, like a fresh insert).
    pub fn restore(&self, note: Note) -> Self {
        self.insert(note)
    }
}

#[cfg(test)]
pub(crate) fn note(id: &str, content: &str, important: bool, date: &str) -> Note {
    Note {
        id: id.to_string(),
        content: content.to_string(),
        important,
        date: date.to_string(),
        user: serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cache: &NoteCache) -> Vec<&str> {
        cache.as_slice().iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_insert_appends_in_order() {
        let cache = NoteCache::default()
            .insert(note("1", "a", false, "2021-01-01T00:00:00Z"))
            .insert(note("2", "b", true, "2021-01-02T00:00:00Z"));
        assert_eq!(ids(&cache), vec!["1", "2"]);
    }

    #[test]
    fn test_insert_keeps_ids_unique() {
        let cache = NoteCache::new(vec![
            note("1", "a", false, "2021-01-01T00:00:00Z"),
            note("1", "a2", false, "2021-01-01T00:00:00Z"),
        ]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.find("1").map(|n| n.content.as_str()), Some("a2"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let cache = NoteCache::new(vec![
            note("1", "a", false, "2021-01-01T00:00:00Z"),
            note("2", "b", false, "2021-01-02T00:00:00Z"),
        ]);
        let next = cache
            .replace("1", note("1", "edited", true, "2021-01-01T00:00:00Z"))
            .expect("note 1 is cached");
        assert_eq!(ids(&next), vec!["1", "2"]);
        assert_eq!(next.find("1").map(|n| n.important), Some(true));
    }

    #[test]
    fn test_replace_missing_id_reports_miss() {
        let cache = NoteCache::new(vec![note("1", "a", false, "2021-01-01T00:00:00Z")]);
        assert!(cache
            .replace("9", note("9", "x", false, "2021-01-01T00:00:00Z"))
            .is_none());
    }

    #[test]
    fn test_remove_is_noop_on_missing_id() {
        let cache = NoteCache::new(vec![note("1", "a", false, "2021-01-01T00:00:00Z")]);
        assert_eq!(cache.remove("9"), cache);
        assert!(cache.remove("1").is_empty());
    }

    #[test]
    fn test_operations_leave_source_untouched() {
        let cache = NoteCache::new(vec![note("1", "a", false, "2021-01-01T00:00:00Z")]);
        let _ = cache.remove("1");
        let _ = cache.insert(note("2", "b", false, "2021-01-01T00:00:00Z"));
        assert_eq!(ids(&cache), vec!["1"]);
    }
}
