use crate::models::Note;
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub(crate) enum SortKey {
    #[strum(to_string = "时间")]
    Date,
    #[strum(to_string = "重要")]
    Important,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn aria(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }
}

/// One active `(key, direction)` pair; every other key is inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SortState {
    active: Option<(SortKey, SortDirection)>,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            active: Some((SortKey::Date, SortDirection::Desc)),
        }
    }
}

impl SortState {
    #[cfg(test)]
    pub fn unsorted() -> Self {
        Self { active: None }
    }

    pub fn direction(&self, key: SortKey) -> Option<SortDirection> {
        match self.active {
            Some((k, d)) if k == key => Some(d),
            _ => None,
        }
    }

    /// Table headers in display order with their current direction.
    pub fn heads(&self) -> Vec<(SortKey, Option<SortDirection>)> {
        SortKey::iter().map(|k| (k, self.direction(k))).collect()
    }

    /// The active key flips `desc -> asc -> desc`; any other key starts at
    /// `desc` and deactivates the previous one.
    pub fn toggle(&self, key: SortKey) -> Self {
        let direction = match self.direction(key) {
            Some(d) => d.toggled(),
            None => SortDirection::Desc,
        };
        Self {
            active: Some((key, direction)),
        }
    }

    /// Sorted copy of `notes`. The sort is stable, so equal keys keep the
    /// cache order.
    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        let mut out = notes.to_vec();
        let Some((key, direction)) = self.active else {
            return out;
        };

        match key {
            SortKey::Date => out.sort_by(|a, b| {
                let ord = parse_date(&a.date).cmp(&parse_date(&b.date));
                directed(ord, direction)
            }),
            // `false < true`, so descending puts important notes first.
            SortKey::Important => {
                out.sort_by(|a, b| directed(a.important.cmp(&b.important), direction))
            }
        }
        out
    }
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Unparseable timestamps become `None`, which orders before every instant.
fn parse_date(date: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(date).ok()
}
