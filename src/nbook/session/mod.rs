//! # Session (Main Window Controller)
//!
//! The [`Session`] owns at most one [`Notebook`] at a time and the document
//! state that goes with it: the bound file name and the modified flag. It is
//! the single entry point for user commands, whatever the UI.
//!
//! ## States
//!
//! ```text
//! NoNotebook  <--close--  Open(clean)  --mutate-->  Open(dirty)
//!      |                      ^                         |
//!      +--new--> Open(dirty)  +----------save-----------+
//!      +--open-> Open(clean)
//! ```
//!
//! ## Interaction
//!
//! Prompts, pickers, the edit dialog and error reports go through a
//! [`Frontend`]. Cancelling any prompt aborts the flow before anything is
//! mutated or written. I/O failures are reported through
//! [`Frontend::notify`] and leave the previous state in place: a failed open
//! installs nothing, a failed save keeps the notebook dirty and does not bind
//! the new file name.
//!
//! ## Events
//!
//! Observers registered with [`Session::subscribe`] receive [`SessionEvent`]s,
//! including every row change of the current notebook, so a view can keep a
//! grid in sync without holding a reference to the notebook.

use crate::config::NbookConfig;
use crate::dialog::{DialogState, EditNoteDialog};
use crate::error::{NbookError, Result};
use crate::export::format_as_text;
use crate::links;
use crate::lottery::{self, LotteryOutcome};
use crate::model::Note;
use crate::notebook::{distinct_rows, ModelChange, Notebook};
use crate::store::NotebookStore;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

mod frontend;
#[cfg(any(test, feature = "test_utils"))]
pub mod scripted;

pub use frontend::{FileKind, Frontend, MessageLevel, SaveChoice};

pub const APP_NAME: &str = "nbook";
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    NotebookReady,
    NotebookCreated,
    NotebookOpened(PathBuf),
    NotebookSaved,
    NotebookClosed,
    FileNameChanged(Option<PathBuf>),
    RowsChanged(ModelChange),
}

/// Which commands make sense right now. Mirrors menu item enablement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub save: bool,
    pub save_as: bool,
    pub save_as_text: bool,
    pub close: bool,
    pub new_note: bool,
    pub edit_note: bool,
    pub delete_notes: bool,
    pub web_search: bool,
}

type EventListener = Box<dyn FnMut(&SessionEvent)>;
type Listeners = Rc<RefCell<Vec<EventListener>>>;

pub struct Session<S: NotebookStore, F: Frontend> {
    store: S,
    frontend: F,
    config: NbookConfig,
    notebook: Option<Notebook>,
    file_name: Option<PathBuf>,
    modified: Rc<Cell<bool>>,
    listeners: Listeners,
}

impl<S: NotebookStore, F: Frontend> Session<S, F> {
    /// Starts with no notebook open. Call [`Session::new_notebook`] for the
    /// usual "fresh untitled notebook" start.
    pub fn new(store: S, frontend: F, config: NbookConfig) -> Self {
        Self {
            store,
            frontend,
            config,
            notebook: None,
            file_name: None,
            modified: Rc::new(Cell::new(false)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    // --- Accessors ---

    pub fn notebook(&self) -> Option<&Notebook> {
        self.notebook.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.notebook.is_some()
    }

    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn config(&self) -> &NbookConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Display name: `None` when closed, "Untitled" when never saved,
    /// otherwise the file name without its directory.
    pub fn notebook_name(&self) -> Option<String> {
        self.notebook.as_ref()?;
        Some(match &self.file_name {
            None => UNTITLED.to_string(),
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        })
    }

    pub fn window_title(&self) -> String {
        match self.notebook_name() {
            None => APP_NAME.to_string(),
            Some(name) => {
                let marker = if self.is_modified() { "*" } else { "" };
                format!("{} - {}{}", APP_NAME, name, marker)
            }
        }
    }

    pub fn actions(&self, selected_rows: usize) -> ActionState {
        let open = self.is_open();
        ActionState {
            save: open,
            save_as: open,
            save_as_text: open,
            close: open,
            new_note: open,
            edit_note: open && selected_rows == 1,
            delete_notes: open && selected_rows > 0,
            web_search: open && selected_rows == 1,
        }
    }

    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: FnMut(&SessionEvent) + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    // --- Document lifecycle ---

    /// Closes the current notebook (per the close rules) and starts a fresh,
    /// untitled one. Returns false if the close was cancelled.
    pub fn new_notebook(&mut self) -> bool {
        if !self.close_notebook() {
            return false;
        }
        self.install(Notebook::new());
        self.set_file_name(None);
        self.modified.set(true);
        log::info!("created untitled notebook");
        self.emit(SessionEvent::NotebookReady);
        self.emit(SessionEvent::NotebookCreated);
        true
    }

    /// Closes the current notebook, asks for a file and loads it.
    pub fn open_notebook(&mut self) -> bool {
        if !self.close_notebook() {
            return false;
        }
        match self.frontend.pick_open_file() {
            Some(path) => self.load_from(path),
            None => false,
        }
    }

    /// Like [`Session::open_notebook`] with the file already chosen.
    pub fn open_path(&mut self, path: impl Into<PathBuf>) -> bool {
        if !self.close_notebook() {
            return false;
        }
        self.load_from(path.into())
    }

    /// Saves to the bound file, or behaves as Save-As when there is none.
    pub fn save(&mut self) -> bool {
        if !self.require_open() {
            return false;
        }
        let Some(path) = self.file_name.clone() else {
            return self.save_as();
        };
        if !self.write_notebook(&path) {
            return false;
        }
        self.mark_saved();
        true
    }

    /// Asks for a destination, writes there and binds the file name.
    pub fn save_as(&mut self) -> bool {
        if !self.require_open() {
            return false;
        }
        let Some(path) = self.frontend.pick_save_file(FileKind::Notebook) else {
            return false;
        };
        self.save_to(path)
    }

    /// Save-As with the destination already chosen.
    pub fn save_to(&mut self, path: impl Into<PathBuf>) -> bool {
        if !self.require_open() {
            return false;
        }
        let path = path.into();
        if !self.write_notebook(&path) {
            return false;
        }
        self.set_file_name(Some(path));
        self.mark_saved();
        true
    }

    /// Closes the current notebook. A dirty notebook prompts
    /// Save/Discard/Cancel first; Cancel, or a Save that does not complete,
    /// aborts the close and returns false. Closing with nothing open is a
    /// no-op returning true.
    pub fn close_notebook(&mut self) -> bool {
        let Some(name) = self.notebook_name() else {
            return true;
        };
        if self.is_modified() {
            match self.frontend.ask_save_changes(&name, true) {
                SaveChoice::Save => {
                    if !self.save() {
                        return false;
                    }
                }
                SaveChoice::Discard => {}
                SaveChoice::Cancel => return false,
            }
        }
        self.discard_notebook();
        true
    }

    /// Offers to save a dirty notebook (no cancel), tears the session down
    /// and returns the process exit code.
    pub fn exit(&mut self) -> i32 {
        if let Some(name) = self.notebook_name() {
            if self.is_modified()
                && self.frontend.ask_save_changes(&name, false) == SaveChoice::Save
                && !self.save()
            {
                log::warn!("exiting with unsaved changes in {}", name);
            }
            self.discard_notebook();
        }
        0
    }

    // --- Note workflows ---

    /// Runs the edit dialog on an empty note and appends it when accepted.
    pub fn new_note(&mut self) -> bool {
        if !self.require_open() {
            return false;
        }
        let mut note = Note::default();
        if !self.run_dialog("New Note", &mut note) {
            return false;
        }
        if let Some(nb) = self.notebook.as_mut() {
            nb.insert(note);
        }
        true
    }

    /// Edits the single selected row through a copy of its note. Does nothing
    /// unless exactly one row is selected.
    pub fn edit_note(&mut self, selection: &[usize]) -> bool {
        let Some(row) = self.single_row(selection, "edit") else {
            return false;
        };
        let Some(mut note) = self.note_at(row).cloned() else {
            return false;
        };
        if !self.run_dialog("Edit Note", &mut note) {
            return false;
        }
        if let Some(nb) = self.notebook.as_mut() {
            nb.update_note_at(note, row);
        }
        true
    }

    /// Confirms, then erases every selected row from the highest index down.
    pub fn delete_notes(&mut self, selection: &[usize]) -> bool {
        if !self.require_open() || selection.is_empty() {
            return false;
        }
        let rows = distinct_rows(selection);
        if let Some(&bad) = rows.iter().find(|&&r| self.note_at(r).is_none()) {
            self.report(missing_row(bad));
            return false;
        }
        if !self.frontend.confirm_delete(rows.len()) {
            return false;
        }
        if let Some(nb) = self.notebook.as_mut() {
            nb.erase_rows(&rows);
        }
        true
    }

    // --- Export and hand-offs ---

    /// Asks for a destination and writes the plain-text export there.
    pub fn save_as_text(&mut self) -> bool {
        if !self.require_open() {
            return false;
        }
        let Some(path) = self.frontend.pick_save_file(FileKind::Text) else {
            return false;
        };
        self.export_text_to(path)
    }

    pub fn export_text_to(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(nb) = self.notebook.as_ref() else {
            self.frontend.notify(MessageLevel::Warning, "No open notebooks");
            return false;
        };
        let text = format_as_text(nb);
        match self.store.write_text(path, &text) {
            Ok(()) => {
                log::info!("exported {} notes to {}", nb.size(), path.display());
                true
            }
            Err(e) => {
                self.frontend.notify(
                    MessageLevel::Error,
                    &format!("Unable to write to the file {}: {}", path.display(), e),
                );
                false
            }
        }
    }

    /// Searches the web for the text of the single selected note.
    pub fn web_search(&mut self, selection: &[usize]) -> bool {
        let Some(row) = self.single_row(selection, "search for") else {
            return false;
        };
        let Some(note) = self.note_at(row) else {
            return false;
        };
        let url = links::search_url(&self.config.search_url, note.text());
        self.launch(url)
    }

    pub fn search_url(&self, row: usize) -> Result<url::Url> {
        let note = self.note_at(row).ok_or_else(|| missing_row(row))?;
        links::search_url(&self.config.search_url, note.text())
    }

    pub fn visit_help(&mut self) -> bool {
        let url = links::help_url(&self.config.help_url);
        self.launch(url)
    }

    pub fn lottery(&self) -> LotteryOutcome {
        LotteryOutcome {
            date: chrono::Local::now().date_naive(),
            draw: lottery::draw(self.config.lottery_odds),
        }
    }

    pub fn about(&self) -> String {
        format!(
            "{} {}\nA notebook of titled notes, saved in a compact binary format\n\
             and exportable to plain text.",
            APP_NAME,
            env!("CARGO_PKG_VERSION")
        )
    }

    // --- Internals ---

    fn note_at(&self, row: usize) -> Option<&Note> {
        self.notebook.as_ref()?.get(row)
    }

    fn require_open(&mut self) -> bool {
        if self.notebook.is_none() {
            self.report(NbookError::NoNotebook);
            return false;
        }
        true
    }

    /// The one existing row a single-note command acts on. Anything else is
    /// reported and yields `None`.
    fn single_row(&mut self, selection: &[usize], verb: &str) -> Option<usize> {
        if !self.require_open() {
            return None;
        }
        let &[row] = selection else {
            self.frontend.notify(
                MessageLevel::Warning,
                &format!("Select exactly one note to {}", verb),
            );
            return None;
        };
        if self.note_at(row).is_none() {
            self.report(missing_row(row));
            return None;
        }
        Some(row)
    }

    fn report(&mut self, error: NbookError) {
        let level = match error {
            NbookError::NoNotebook => MessageLevel::Warning,
            _ => MessageLevel::Error,
        };
        self.frontend.notify(level, &error.to_string());
    }

    fn launch(&mut self, url: Result<url::Url>) -> bool {
        match url.and_then(|u| self.frontend.open_url(&u)) {
            Ok(()) => true,
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn run_dialog(&mut self, title: &str, note: &mut Note) -> bool {
        let mut dialog = EditNoteDialog::new(title);
        dialog.set_note(note);
        self.frontend.run_edit_dialog(&mut dialog);
        if !dialog.is_finished() {
            dialog.cancel();
        }
        dialog.state() == DialogState::Accepted
    }

    fn load_from(&mut self, path: PathBuf) -> bool {
        let notebook = match self.store.load(&path) {
            Ok(nb) => nb,
            Err(e) => {
                log::warn!("failed to open {}: {}", path.display(), e);
                self.frontend.notify(
                    MessageLevel::Error,
                    &format!("Unable to open the file {}: {}", path.display(), e),
                );
                return false;
            }
        };
        log::info!("opened {} ({} notes)", path.display(), notebook.size());
        self.install(notebook);
        self.set_file_name(Some(path.clone()));
        self.modified.set(false);
        self.emit(SessionEvent::NotebookReady);
        self.emit(SessionEvent::NotebookOpened(path));
        true
    }

    fn write_notebook(&mut self, path: &Path) -> bool {
        let Some(nb) = self.notebook.as_ref() else {
            return false;
        };
        match self.store.save(path, nb) {
            Ok(()) => {
                log::info!("saved {} notes to {}", nb.size(), path.display());
                true
            }
            Err(e) => {
                self.frontend.notify(
                    MessageLevel::Error,
                    &format!("Unable to write to the file {}: {}", path.display(), e),
                );
                false
            }
        }
    }

    fn mark_saved(&mut self) {
        self.modified.set(false);
        self.emit(SessionEvent::NotebookReady);
        self.emit(SessionEvent::NotebookSaved);
    }

    /// Replaces the current notebook, wiring its change channel to the
    /// modified flag and to session observers.
    fn install(&mut self, mut notebook: Notebook) {
        self.drop_notebook();
        let modified = Rc::clone(&self.modified);
        let listeners = Rc::clone(&self.listeners);
        notebook.subscribe(move |change| {
            modified.set(true);
            let event = SessionEvent::RowsChanged(*change);
            for listener in listeners.borrow_mut().iter_mut() {
                listener(&event);
            }
        });
        self.notebook = Some(notebook);
    }

    fn drop_notebook(&mut self) {
        if let Some(mut nb) = self.notebook.take() {
            nb.clear_subscribers();
        }
    }

    fn discard_notebook(&mut self) {
        self.drop_notebook();
        self.set_file_name(None);
        self.modified.set(false);
        self.emit(SessionEvent::NotebookClosed);
    }

    fn set_file_name(&mut self, path: Option<PathBuf>) {
        self.file_name = path.clone();
        self.emit(SessionEvent::FileNameChanged(path));
    }

    fn emit(&self, event: SessionEvent) {
        for listener in self.listeners.borrow_mut().iter_mut() {
            listener(&event);
        }
    }
}

fn missing_row(row: usize) -> NbookError {
    NbookError::Api(format!("Row {} does not exist", row + 1))
}
