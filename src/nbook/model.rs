use serde::{Deserialize, Serialize};

/// A single notebook entry: a title and a body text.
///
/// The type itself accepts any strings, including empty ones. Non-empty
/// fields are enforced by [`crate::dialog::EditNoteDialog`] when a note is
/// created or edited interactively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    title: String,
    text: String,
}

impl Note {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// True when both fields carry something. Used to decide whether an edit
    /// dialog should pre-fill its fields from this note.
    pub fn is_filled(&self) -> bool {
        !self.title.is_empty() && !self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_note_is_empty() {
        let note = Note::default();
        assert_eq!(note.title(), "");
        assert_eq!(note.text(), "");
        assert!(!note.is_filled());
    }

    #[test]
    fn setters_replace_fields() {
        let mut note = Note::new("Groceries", "Milk");
        note.set_title("Chores");
        note.set_text("Laundry");
        assert_eq!(note, Note::new("Chores", "Laundry"));
        assert!(note.is_filled());
    }

    #[test]
    fn half_filled_note_is_not_filled() {
        assert!(!Note::new("Title", "").is_filled());
        assert!(!Note::new("", "Body").is_filled());
    }
}
