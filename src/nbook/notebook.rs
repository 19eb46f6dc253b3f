//! # Notebook Document Model
//!
//! A [`Notebook`] is an ordered collection of [`Note`]s. The position of a note
//! in the sequence is its row number (0-based) and that order is both the
//! display order and the persisted order; there is no separate sort.
//!
//! ## Tabular Data Source
//!
//! Views bind to a notebook through the [`TableModel`] trait: a fixed grid of
//! two columns ([`Column::Title`], [`Column::Text`]) and one row per note.
//!
//! Every mutating operation fires a [`ModelChange`] to the registered
//! subscribers after the mutation has been applied, carrying the affected row
//! range so a view can redraw only what changed.
//!
//! ## Preconditions
//!
//! [`Notebook::erase`] and [`Notebook::update_note_at`] require a valid row.
//! Passing an out-of-range row is a caller bug and panics; callers holding user
//! input must validate it first (see [`Notebook::get`]).
//!
//! When several rows are removed at once they must be erased from the highest
//! index down, otherwise each erase shifts the rows still pending.
//! [`Notebook::erase_rows`] does this for you.

use crate::model::Note;
use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Text,
}

impl Column {
    pub const ALL: [Column; 2] = [Column::Title, Column::Text];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Column::Title => 0,
            Column::Text => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Text => "Text",
        }
    }
}

/// Describes which rows a mutation touched. Ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    RowsInserted { first: usize, last: usize },
    RowsRemoved { first: usize, last: usize },
    DataChanged { first: usize, last: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ModelChange)>;

/// Read access to a grid of text cells.
pub trait TableModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Cell text, or `None` when the coordinates fall outside the grid.
    fn cell(&self, row: usize, column: usize) -> Option<&str>;

    fn header(&self, column: usize) -> Option<&'static str>;
}

#[derive(Default)]
pub struct Notebook {
    notes: Vec<Note>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a note as the last row.
    pub fn insert(&mut self, note: Note) {
        self.notes.push(note);
        let row = self.notes.len() - 1;
        self.notify(ModelChange::RowsInserted {
            first: row,
            last: row,
        });
    }

    /// Removes the note at `row`; subsequent rows move up by one.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.size()`.
    pub fn erase(&mut self, row: usize) {
        assert!(
            row < self.notes.len(),
            "erase: row {} out of range (size {})",
            row,
            self.notes.len()
        );
        self.notes.remove(row);
        self.notify(ModelChange::RowsRemoved {
            first: row,
            last: row,
        });
    }

    /// Replaces the note at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.size()`.
    pub fn update_note_at(&mut self, note: Note, row: usize) {
        assert!(
            row < self.notes.len(),
            "update_note_at: row {} out of range (size {})",
            row,
            self.notes.len()
        );
        self.notes[row] = note;
        self.notify(ModelChange::DataChanged {
            first: row,
            last: row,
        });
    }

    /// Erases a batch of rows in descending order. Duplicates are ignored.
    ///
    /// # Panics
    ///
    /// Panics if any row is out of range; the check happens before anything
    /// is erased.
    pub fn erase_rows(&mut self, rows: &[usize]) {
        let rows = distinct_rows(rows);
        if let Some(&highest) = rows.last() {
            assert!(
                highest < self.notes.len(),
                "erase_rows: row {} out of range (size {})",
                highest,
                self.notes.len()
            );
        }
        for row in rows.into_iter().rev() {
            self.erase(row);
        }
    }

    pub fn size(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Note> {
        self.notes.get(row)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ModelChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn clear_subscribers(&mut self) {
        self.listeners.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, change: ModelChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl Index<usize> for Notebook {
    type Output = Note;

    fn index(&self, row: usize) -> &Note {
        &self.notes[row]
    }
}

impl FromIterator<Note> for Notebook {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<'a> IntoIterator for &'a Notebook {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl fmt::Debug for Notebook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notebook")
            .field("notes", &self.notes)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

impl TableModel for Notebook {
    fn row_count(&self) -> usize {
        self.notes.len()
    }

    fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let note = self.notes.get(row)?;
        match Column::from_index(column)? {
            Column::Title => Some(note.title()),
            Column::Text => Some(note.text()),
        }
    }

    fn header(&self, column: usize) -> Option<&'static str> {
        Column::from_index(column).map(|c| c.label())
    }
}

/// A row selection sorted ascending with repeats removed.
pub fn distinct_rows(rows: &[usize]) -> Vec<usize> {
    let mut rows = rows.to_vec();
    rows.sort_unstable();
    rows.dedup();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn notebook_of(titles: &[&str]) -> Notebook {
        titles
            .iter()
            .map(|t| Note::new(*t, format!("{} body", t)))
            .collect()
    }

    fn recording(nb: &mut Notebook) -> Rc<RefCell<Vec<ModelChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        nb.subscribe(move |change| sink.borrow_mut().push(*change));
        seen
    }

    #[test]
    fn insert_appends_in_order() {
        let mut nb = Notebook::new();
        nb.insert(Note::new("A", "a"));
        nb.insert(Note::new("B", "b"));

        assert_eq!(nb.size(), 2);
        assert_eq!(nb[0], Note::new("A", "a"));
        assert_eq!(nb[1], Note::new("B", "b"));
    }

    #[test]
    fn insert_notifies_new_row() {
        let mut nb = notebook_of(&["A"]);
        let seen = recording(&mut nb);

        nb.insert(Note::new("B", "b"));

        assert_eq!(
            *seen.borrow(),
            vec![ModelChange::RowsInserted { first: 1, last: 1 }]
        );
    }

    #[test]
    fn erase_shifts_following_rows() {
        let mut nb = notebook_of(&["A", "B", "C"]);
        let seen = recording(&mut nb);

        nb.erase(1);

        assert_eq!(nb.size(), 2);
        assert_eq!(nb[0].title(), "A");
        assert_eq!(nb[1].title(), "C");
        assert_eq!(
            *seen.borrow(),
            vec![ModelChange::RowsRemoved { first: 1, last: 1 }]
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn erase_out_of_range_panics() {
        let mut nb = notebook_of(&["A"]);
        nb.erase(1);
    }

    #[test]
    fn update_replaces_only_that_row() {
        let mut nb = notebook_of(&["A", "B"]);
        let seen = recording(&mut nb);

        nb.update_note_at(Note::new("Z", "z"), 1);

        assert_eq!(nb[0].title(), "A");
        assert_eq!(nb[1], Note::new("Z", "z"));
        assert_eq!(
            *seen.borrow(),
            vec![ModelChange::DataChanged { first: 1, last: 1 }]
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn update_out_of_range_panics() {
        let mut nb = Notebook::new();
        nb.update_note_at(Note::new("A", "a"), 0);
    }

    #[test]
    fn descending_batch_delete_keeps_middle_row() {
        let mut nb = notebook_of(&["A", "B", "C"]);

        nb.erase(2);
        nb.erase(0);

        assert_eq!(nb.size(), 1);
        assert_eq!(nb[0].title(), "B");
    }

    #[test]
    fn erase_rows_sorts_and_dedups() {
        let mut nb = notebook_of(&["A", "B", "C", "D"]);
        let seen = recording(&mut nb);

        nb.erase_rows(&[0, 2, 0]);

        let titles: Vec<_> = nb.iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["B", "D"]);
        assert_eq!(
            *seen.borrow(),
            vec![
                ModelChange::RowsRemoved { first: 2, last: 2 },
                ModelChange::RowsRemoved { first: 0, last: 0 },
            ]
        );
    }

    #[test]
    fn distinct_rows_sorts_and_drops_repeats() {
        assert_eq!(distinct_rows(&[3, 1, 3, 0, 1]), vec![0, 1, 3]);
        assert!(distinct_rows(&[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn erase_rows_checks_before_erasing() {
        let mut nb = notebook_of(&["A", "B"]);
        nb.erase_rows(&[0, 5]);
    }

    #[test]
    fn mixed_operations_track_size_and_latest_values() {
        let mut nb = Notebook::new();
        for i in 0..5 {
            nb.insert(Note::new(format!("T{}", i), format!("t{}", i)));
        }
        nb.erase(4);
        nb.update_note_at(Note::new("X", "x"), 2);
        nb.erase(0);
        nb.insert(Note::new("Y", "y"));

        assert_eq!(nb.size(), 4);
        let titles: Vec<_> = nb.iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["T1", "X", "T3", "Y"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut nb = Notebook::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = nb.subscribe(move |_| *sink.borrow_mut() += 1);

        nb.insert(Note::new("A", "a"));
        assert!(nb.unsubscribe(id));
        assert!(!nb.unsubscribe(id));
        nb.insert(Note::new("B", "b"));

        assert_eq!(*seen.borrow(), 1);
        assert_eq!(nb.subscriber_count(), 0);
    }

    #[test]
    fn table_model_exposes_cells_and_headers() {
        let nb = notebook_of(&["A"]);

        assert_eq!(nb.row_count(), 1);
        assert_eq!(nb.column_count(), 2);
        assert_eq!(nb.cell(0, 0), Some("A"));
        assert_eq!(nb.cell(0, 1), Some("A body"));
        assert_eq!(nb.cell(0, 2), None);
        assert_eq!(nb.cell(1, 0), None);
        assert_eq!(nb.header(0), Some("Title"));
        assert_eq!(nb.header(1), Some("Text"));
        assert_eq!(nb.header(2), None);
    }
}
