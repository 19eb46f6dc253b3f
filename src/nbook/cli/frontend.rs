//! Terminal implementations of [`Frontend`].
//!
//! [`BatchFrontend`] serves one-shot commands: everything it needs comes from
//! the command line and it never blocks on input unless a deletion needs
//! confirming on a real terminal. [`TermFrontend`] serves the interactive
//! shell and reads every answer from its input stream.

use super::render::print_message;
use super::styles::{paint, PROMPT};
use console::Term;
use nbook::dialog::{DialogState, EditNoteDialog};
use nbook::editor::{edit_content, EditorContent};
use nbook::error::{NbookError, Result};
use nbook::session::{FileKind, Frontend, MessageLevel, SaveChoice};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use url::Url;

fn launch_url(url: &Url) -> Result<()> {
    log::info!("opening {}", url);
    open::that(url.as_str())
        .map_err(|e| NbookError::Api(format!("Unable to open {}: {}", url, e)))
}

/// Fills an editor buffer from the dialog fields and copies the result back.
fn edit_fields_in_editor(dialog: &mut EditNoteDialog<'_>) -> Result<()> {
    let initial = EditorContent::new(dialog.title_field(), dialog.text_field());
    let edited = edit_content(&initial)?;
    dialog.set_title_field(edited.title);
    dialog.set_text_field(edited.text);
    Ok(())
}

/// Adds the configured extension when the user typed a bare name.
pub fn with_default_ext(path: PathBuf, ext: &str) -> PathBuf {
    if path.extension().is_some() || ext.is_empty() {
        return path;
    }
    let mut name = path.into_os_string();
    name.push(ext);
    PathBuf::from(name)
}

/// Field values given on the command line. `None` keeps whatever the dialog
/// was pre-filled with.
#[derive(Debug, Clone, Default)]
pub struct NoteFields {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl NoteFields {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none()
    }
}

#[derive(Debug, Default)]
pub struct BatchFrontend {
    pub fields: NoteFields,
    pub use_editor: bool,
    pub assume_yes: bool,
}

impl Frontend for BatchFrontend {
    fn pick_open_file(&mut self) -> Option<PathBuf> {
        None
    }

    fn pick_save_file(&mut self, _kind: FileKind) -> Option<PathBuf> {
        None
    }

    fn ask_save_changes(&mut self, _notebook_name: &str, _allow_cancel: bool) -> SaveChoice {
        // One-shot commands save explicitly before the session goes away.
        SaveChoice::Discard
    }

    fn confirm_delete(&mut self, count: usize) -> bool {
        if self.assume_yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            self.notify(
                MessageLevel::Warning,
                "Refusing to delete without confirmation. Pass --yes to proceed.",
            );
            return false;
        }
        let term = Term::stderr();
        let _ = term.write_str(&format!("Delete {} note(s)? [y/N] ", count));
        matches!(
            term.read_line().map(|l| l.trim().to_lowercase()).as_deref(),
            Ok("y") | Ok("yes")
        )
    }

    fn run_edit_dialog(&mut self, dialog: &mut EditNoteDialog<'_>) {
        if !self.fields.is_empty() {
            if let Some(title) = self.fields.title.clone() {
                dialog.set_title_field(title);
            }
            if let Some(text) = self.fields.text.clone() {
                dialog.set_text_field(text);
            }
        } else if self.use_editor {
            if let Err(e) = edit_fields_in_editor(dialog) {
                self.notify(MessageLevel::Error, &e.to_string());
                dialog.cancel();
                return;
            }
        }

        if let Err(e) = dialog.accept() {
            self.notify(MessageLevel::Error, &e.to_string());
            dialog.cancel();
        }
    }

    fn notify(&mut self, level: MessageLevel, message: &str) {
        print_message(level, message);
    }

    fn open_url(&mut self, url: &Url) -> Result<()> {
        launch_url(url)
    }
}

/// Prompts on the terminal and reads answers line by line from `input`.
pub struct TermFrontend {
    input: Box<dyn BufRead>,
    term: Term,
    pub use_editor: bool,
    pub file_ext: String,
    pub text_ext: String,
}

impl TermFrontend {
    pub fn new(use_editor: bool, file_ext: &str, text_ext: &str) -> Self {
        Self::with_input(Box::new(io::BufReader::new(io::stdin())), use_editor, file_ext, text_ext)
    }

    pub fn with_input(
        input: Box<dyn BufRead>,
        use_editor: bool,
        file_ext: &str,
        text_ext: &str,
    ) -> Self {
        Self {
            input,
            term: Term::stdout(),
            use_editor,
            file_ext: file_ext.to_string(),
            text_ext: text_ext.to_string(),
        }
    }

    /// Shows `label` and reads one line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Option<String> {
        let use_color = self.term.features().colors_supported();
        let _ = self.term.write_str(&paint(&PROMPT, label, use_color));
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }

    fn prompt_path(&mut self, label: &str, ext: &str) -> Option<PathBuf> {
        let answer = self.prompt(label)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        Some(with_default_ext(PathBuf::from(answer), ext))
    }

    fn ask_yes_no(&mut self, label: &str, default: bool) -> bool {
        match self.prompt(label).map(|a| a.trim().to_lowercase()).as_deref() {
            Some("y") | Some("yes") => true,
            Some("n") | Some("no") => false,
            _ => default,
        }
    }

    /// Asks for each field, showing the current value; an empty answer keeps it.
    fn prompt_fields(&mut self, dialog: &mut EditNoteDialog<'_>) -> bool {
        let current_title = dialog.title_field().to_string();
        let Some(title) = self.prompt(&format!("Title [{}]: ", current_title)) else {
            return false;
        };
        if !title.is_empty() {
            dialog.set_title_field(title);
        }

        let current_text = dialog.text_field().replace('\n', " / ");
        let Some(text) = self.prompt(&format!("Text [{}]: ", current_text)) else {
            return false;
        };
        if !text.is_empty() {
            dialog.set_text_field(text);
        }
        true
    }
}

impl Frontend for TermFrontend {
    fn pick_open_file(&mut self) -> Option<PathBuf> {
        let ext = self.file_ext.clone();
        self.prompt_path("Open notebook: ", &ext)
    }

    fn pick_save_file(&mut self, kind: FileKind) -> Option<PathBuf> {
        let (label, ext) = match kind {
            FileKind::Notebook => ("Save notebook as: ", self.file_ext.clone()),
            FileKind::Text => ("Export text to: ", self.text_ext.clone()),
        };
        self.prompt_path(label, &ext)
    }

    fn ask_save_changes(&mut self, notebook_name: &str, allow_cancel: bool) -> SaveChoice {
        let label = if allow_cancel {
            format!("Save changes to {}? [y]es/[n]o/[c]ancel: ", notebook_name)
        } else {
            format!("Save changes to {}? [y]es/[n]o: ", notebook_name)
        };
        loop {
            let Some(answer) = self.prompt(&label) else {
                return if allow_cancel {
                    SaveChoice::Cancel
                } else {
                    SaveChoice::Discard
                };
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return SaveChoice::Save,
                "n" | "no" => return SaveChoice::Discard,
                "c" | "cancel" if allow_cancel => return SaveChoice::Cancel,
                _ => continue,
            }
        }
    }

    fn confirm_delete(&mut self, count: usize) -> bool {
        self.ask_yes_no(&format!("Delete {} note(s)? [y/N] ", count), false)
    }

    fn run_edit_dialog(&mut self, dialog: &mut EditNoteDialog<'_>) {
        while dialog.state() == DialogState::Editing {
            let filled = if self.use_editor {
                match edit_fields_in_editor(dialog) {
                    Ok(()) => true,
                    Err(e) => {
                        self.notify(MessageLevel::Error, &e.to_string());
                        false
                    }
                }
            } else {
                self.prompt_fields(dialog)
            };
            if !filled {
                dialog.cancel();
                return;
            }

            if let Err(e) = dialog.accept() {
                self.notify(MessageLevel::Error, &e.to_string());
                if !self.ask_yes_no("Try again? [Y/n] ", true) {
                    dialog.cancel();
                }
            }
        }
    }

    fn notify(&mut self, level: MessageLevel, message: &str) {
        print_message(level, message);
    }

    fn open_url(&mut self, url: &Url) -> Result<()> {
        launch_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbook::model::Note;
    use std::io::Cursor;

    fn term_with(input: &str) -> TermFrontend {
        TermFrontend::with_input(Box::new(Cursor::new(input.to_string())), false, ".nbk", ".txt")
    }

    #[test]
    fn test_default_ext_added_to_bare_name() {
        assert_eq!(with_default_ext(PathBuf::from("notes"), ".nbk"), PathBuf::from("notes.nbk"));
        assert_eq!(with_default_ext(PathBuf::from("a.bin"), ".nbk"), PathBuf::from("a.bin"));
    }

    #[test]
    fn test_batch_fields_override_prefill() {
        let mut note = Note::new("Old", "old text");
        {
            let mut frontend = BatchFrontend {
                fields: NoteFields {
                    title: Some("New".to_string()),
                    text: None,
                },
                ..Default::default()
            };
            let mut dialog = EditNoteDialog::new("Edit Note");
            dialog.set_note(&mut note);
            frontend.run_edit_dialog(&mut dialog);
            assert_eq!(dialog.state(), DialogState::Accepted);
        }
        assert_eq!(note, Note::new("New", "old text"));
    }

    #[test]
    fn test_batch_invalid_fields_cancel() {
        let mut note = Note::default();
        let mut frontend = BatchFrontend {
            fields: NoteFields {
                title: Some("   ".to_string()),
                text: Some("body".to_string()),
            },
            ..Default::default()
        };
        let mut dialog = EditNoteDialog::new("New Note");
        dialog.set_note(&mut note);
        frontend.run_edit_dialog(&mut dialog);
        assert_eq!(dialog.state(), DialogState::Cancelled);
    }

    #[test]
    fn test_batch_confirm_with_yes() {
        let mut frontend = BatchFrontend {
            assume_yes: true,
            ..Default::default()
        };
        assert!(frontend.confirm_delete(3));
    }

    #[test]
    fn test_term_prompt_fields_keep_blank_answers() {
        let mut note = Note::new("Keep", "body");
        {
            let mut frontend = term_with("\nnew body\n");
            let mut dialog = EditNoteDialog::new("Edit Note");
            dialog.set_note(&mut note);
            frontend.run_edit_dialog(&mut dialog);
        }
        assert_eq!(note, Note::new("Keep", "new body"));
    }

    #[test]
    fn test_term_retries_after_rejection() {
        let mut note = Note::default();
        {
            // title, blank text (rejected), retry, then text
            let mut frontend = term_with("Title\n\ny\n\nfilled\n");
            let mut dialog = EditNoteDialog::new("New Note");
            dialog.set_note(&mut note);
            frontend.run_edit_dialog(&mut dialog);
            assert_eq!(dialog.state(), DialogState::Accepted);
        }
        assert_eq!(note, Note::new("Title", "filled"));
    }

    #[test]
    fn test_term_end_of_input_cancels_dialog() {
        let mut note = Note::default();
        let mut frontend = term_with("Only a title\n");
        let mut dialog = EditNoteDialog::new("New Note");
        dialog.set_note(&mut note);
        frontend.run_edit_dialog(&mut dialog);
        assert_eq!(dialog.state(), DialogState::Cancelled);
    }

    #[test]
    fn test_term_save_prompt() {
        let mut frontend = term_with("maybe\nc\n");
        assert_eq!(frontend.ask_save_changes("a.nbk", true), SaveChoice::Cancel);

        let mut frontend = term_with("c\nn\n");
        assert_eq!(frontend.ask_save_changes("a.nbk", false), SaveChoice::Discard);

        let mut frontend = term_with("");
        assert_eq!(frontend.ask_save_changes("a.nbk", true), SaveChoice::Cancel);
    }

    #[test]
    fn test_term_pickers_apply_extensions() {
        let mut frontend = term_with("notes\nreport\n\n");
        assert_eq!(frontend.pick_open_file(), Some(PathBuf::from("notes.nbk")));
        assert_eq!(
            frontend.pick_save_file(FileKind::Text),
            Some(PathBuf::from("report.txt"))
        );
        assert_eq!(frontend.pick_save_file(FileKind::Notebook), None);
    }
}
