//! # Edit-Note Dialog Controller
//!
//! The dialog edits a note owned by someone else. Its lifecycle:
//!
//! ```text
//! Idle --set_note--> Editing --accept (valid)--> Accepted
//!                       |  ^
//!                       |  +--accept (invalid): stays Editing
//!                       +----cancel----------> Cancelled
//! ```
//!
//! Validation trims both fields only to decide emptiness; what gets written
//! back into the note is the field text exactly as entered.

use crate::error::{NbookError, Result};
use crate::model::Note;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Editing,
    Accepted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTitle,
    EmptyText,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyTitle => {
                write!(f, "Title cannot be empty (all spaces - empty too)")
            }
            ValidationIssue::EmptyText => {
                write!(f, "Text cannot be empty (all spaces - empty too)")
            }
        }
    }
}

/// Human-readable report listing every violated rule, one per line.
pub fn validation_message(issues: &[ValidationIssue]) -> String {
    let mut message = String::from("Some errors happened while saving your note:");
    for issue in issues {
        message.push_str("\n- ");
        message.push_str(&issue.to_string());
    }
    message
}

pub fn validate(title: &str, text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if title.trim().is_empty() {
        issues.push(ValidationIssue::EmptyTitle);
    }
    if text.trim().is_empty() {
        issues.push(ValidationIssue::EmptyText);
    }
    issues
}

pub struct EditNoteDialog<'a> {
    window_title: String,
    note: Option<&'a mut Note>,
    title_field: String,
    text_field: String,
    state: DialogState,
}

impl<'a> EditNoteDialog<'a> {
    pub fn new(window_title: impl Into<String>) -> Self {
        Self {
            window_title: window_title.into(),
            note: None,
            title_field: String::new(),
            text_field: String::new(),
            state: DialogState::Idle,
        }
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// Binds the dialog to `note`. A note with both fields filled pre-fills
    /// the editable fields; otherwise they start blank.
    pub fn set_note(&mut self, note: &'a mut Note) {
        if note.is_filled() {
            self.title_field = note.title().to_string();
            self.text_field = note.text().to_string();
        } else {
            self.title_field.clear();
            self.text_field.clear();
        }
        self.note = Some(note);
        self.state = DialogState::Editing;
    }

    pub fn note(&self) -> Option<&Note> {
        self.note.as_deref()
    }

    pub fn title_field(&self) -> &str {
        &self.title_field
    }

    pub fn text_field(&self) -> &str {
        &self.text_field
    }

    pub fn set_title_field(&mut self, title: impl Into<String>) {
        self.title_field = title.into();
    }

    pub fn set_text_field(&mut self, text: impl Into<String>) {
        self.text_field = text.into();
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, DialogState::Accepted | DialogState::Cancelled)
    }

    /// Validates the fields and, if both are non-blank, writes them into the
    /// bound note and closes the dialog as accepted.
    ///
    /// On a validation failure the note is untouched, the dialog stays in
    /// `Editing`, and the error lists every violated rule.
    pub fn accept(&mut self) -> Result<()> {
        if self.state != DialogState::Editing {
            return Err(NbookError::Api(format!(
                "Cannot accept a dialog in state {:?}",
                self.state
            )));
        }

        let issues = validate(&self.title_field, &self.text_field);
        if !issues.is_empty() {
            log::debug!("edit dialog rejected: {:?}", issues);
            return Err(NbookError::Validation(issues));
        }

        if let Some(note) = self.note.as_deref_mut() {
            note.set_title(self.title_field.clone());
            note.set_text(self.text_field.clone());
        }
        self.state = DialogState::Accepted;
        Ok(())
    }

    /// Closes the dialog without touching the bound note.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.state = DialogState::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dialog_is_idle_and_cannot_accept() {
        let mut dlg = EditNoteDialog::new("New Note");
        assert_eq!(dlg.state(), DialogState::Idle);
        assert!(matches!(dlg.accept(), Err(NbookError::Api(_))));
    }

    #[test]
    fn empty_note_leaves_fields_blank() {
        let mut note = Note::default();
        let mut dlg = EditNoteDialog::new("New Note");
        dlg.set_note(&mut note);

        assert_eq!(dlg.state(), DialogState::Editing);
        assert_eq!(dlg.title_field(), "");
        assert_eq!(dlg.text_field(), "");
    }

    #[test]
    fn filled_note_prefills_fields() {
        let mut note = Note::new("Groceries", "Milk");
        let mut dlg = EditNoteDialog::new("Edit Note");
        dlg.set_note(&mut note);

        assert_eq!(dlg.title_field(), "Groceries");
        assert_eq!(dlg.text_field(), "Milk");
    }

    #[test]
    fn half_filled_note_does_not_prefill() {
        let mut note = Note::new("Only title", "");
        let mut dlg = EditNoteDialog::new("Edit Note");
        dlg.set_note(&mut note);

        assert_eq!(dlg.title_field(), "");
    }

    #[test]
    fn blank_title_is_rejected_and_note_untouched() {
        let mut note = Note::default();
        {
            let mut dlg = EditNoteDialog::new("New Note");
            dlg.set_note(&mut note);
            dlg.set_title_field(" ");
            dlg.set_text_field("hello");

            match dlg.accept() {
                Err(NbookError::Validation(issues)) => {
                    assert_eq!(issues, vec![ValidationIssue::EmptyTitle])
                }
                other => panic!("Expected validation error, got {:?}", other),
            }
            assert_eq!(dlg.state(), DialogState::Editing);
        }
        assert_eq!(note, Note::default());
    }

    #[test]
    fn both_blank_reports_both_rules() {
        let mut note = Note::default();
        let mut dlg = EditNoteDialog::new("New Note");
        dlg.set_note(&mut note);
        dlg.set_title_field("\t");
        dlg.set_text_field("\n  ");

        let err = dlg.accept().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Some errors happened while saving your note:"));
        assert!(message.contains("- Title cannot be empty"));
        assert!(message.contains("- Text cannot be empty"));
    }

    #[test]
    fn valid_fields_are_written_back() {
        let mut note = Note::default();
        {
            let mut dlg = EditNoteDialog::new("New Note");
            dlg.set_note(&mut note);
            dlg.set_title_field("Groceries");
            dlg.set_text_field("Milk");
            dlg.accept().unwrap();
            assert_eq!(dlg.state(), DialogState::Accepted);
            assert!(dlg.is_finished());
        }
        assert_eq!(note, Note::new("Groceries", "Milk"));
    }

    #[test]
    fn surrounding_whitespace_is_preserved_on_accept() {
        let mut note = Note::default();
        {
            let mut dlg = EditNoteDialog::new("New Note");
            dlg.set_note(&mut note);
            dlg.set_title_field("  padded ");
            dlg.set_text_field("body\n");
            dlg.accept().unwrap();
        }
        assert_eq!(note.title(), "  padded ");
        assert_eq!(note.text(), "body\n");
    }

    #[test]
    fn correction_after_rejection_succeeds() {
        let mut note = Note::default();
        {
            let mut dlg = EditNoteDialog::new("New Note");
            dlg.set_note(&mut note);
            dlg.set_title_field("Title");
            assert!(dlg.accept().is_err());
            dlg.set_text_field("Now filled");
            dlg.accept().unwrap();
        }
        assert_eq!(note, Note::new("Title", "Now filled"));
    }

    #[test]
    fn cancel_leaves_note_untouched() {
        let mut note = Note::new("Keep", "Me");
        {
            let mut dlg = EditNoteDialog::new("Edit Note");
            dlg.set_note(&mut note);
            dlg.set_title_field("Changed");
            dlg.cancel();
            assert_eq!(dlg.state(), DialogState::Cancelled);
            assert!(matches!(dlg.accept(), Err(NbookError::Api(_))));
        }
        assert_eq!(note, Note::new("Keep", "Me"));
    }
}
