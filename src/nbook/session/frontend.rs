use crate::dialog::EditNoteDialog;
use crate::error::Result;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Answer to "Would you like to save <name>?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// What a save picker is choosing a destination for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Notebook,
    Text,
}

/// Everything the session needs from a user interface.
///
/// The session never talks to a terminal or window directly; every prompt,
/// picker and message goes through this trait. Returning `None`/`false`
/// from a prompt means the user backed out, which aborts the flow without
/// side effects.
pub trait Frontend {
    fn pick_open_file(&mut self) -> Option<PathBuf>;

    fn pick_save_file(&mut self, kind: FileKind) -> Option<PathBuf>;

    /// Asks whether to save `notebook_name` before it goes away. When
    /// `allow_cancel` is false the answer must be `Save` or `Discard`.
    fn ask_save_changes(&mut self, notebook_name: &str, allow_cancel: bool) -> SaveChoice;

    fn confirm_delete(&mut self, count: usize) -> bool;

    /// Drives `dialog` until it is accepted or cancelled. Rejected accepts
    /// should be shown to the user and the dialog kept open for correction.
    fn run_edit_dialog(&mut self, dialog: &mut EditNoteDialog<'_>);

    fn notify(&mut self, level: MessageLevel, message: &str);

    /// Hands `url` to the host's default handler.
    fn open_url(&mut self, url: &Url) -> Result<()>;
}
