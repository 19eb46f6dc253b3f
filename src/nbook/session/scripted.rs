//! A [`Frontend`] that answers from pre-recorded scripts, for tests.

use super::frontend::{FileKind, Frontend, MessageLevel, SaveChoice};
use crate::dialog::EditNoteDialog;
use crate::error::{NbookError, Result};
use std::collections::VecDeque;
use std::path::PathBuf;
use url::Url;

/// How the user handles one edit dialog.
#[derive(Debug, Clone)]
pub enum DialogScript {
    /// Try each (title, text) pair in turn until one is accepted; cancel if
    /// every attempt is rejected.
    Attempts(Vec<(String, String)>),
    /// Press OK without touching the pre-filled fields.
    KeepFields,
    Cancel,
}

impl DialogScript {
    pub fn fill(title: &str, text: &str) -> Self {
        DialogScript::Attempts(vec![(title.to_string(), text.to_string())])
    }
}

#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    pub open_files: VecDeque<Option<PathBuf>>,
    pub save_files: VecDeque<Option<PathBuf>>,
    pub save_choices: VecDeque<SaveChoice>,
    pub delete_confirms: VecDeque<bool>,
    pub dialogs: VecDeque<DialogScript>,
    pub fail_url_launch: bool,

    /// Everything the session told the user, in order.
    pub messages: Vec<(MessageLevel, String)>,
    /// (window title, pre-filled title, pre-filled text) per dialog shown.
    pub dialogs_seen: Vec<(String, String, String)>,
    pub save_prompts: Vec<(String, bool)>,
    pub save_pickers: Vec<FileKind>,
    /// Note count named by each delete confirmation.
    pub delete_prompts: Vec<usize>,
    pub opened_urls: Vec<Url>,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.open_files.push_back(Some(path.into()));
        self
    }

    pub fn save_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_files.push_back(Some(path.into()));
        self
    }

    pub fn cancel_open_picker(mut self) -> Self {
        self.open_files.push_back(None);
        self
    }

    pub fn cancel_save_picker(mut self) -> Self {
        self.save_files.push_back(None);
        self
    }

    pub fn answer_save(mut self, choice: SaveChoice) -> Self {
        self.save_choices.push_back(choice);
        self
    }

    pub fn confirm(mut self, yes: bool) -> Self {
        self.delete_confirms.push_back(yes);
        self
    }

    pub fn dialog(mut self, script: DialogScript) -> Self {
        self.dialogs.push_back(script);
        self
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(level, _)| *level == MessageLevel::Error)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Frontend for ScriptedFrontend {
    fn pick_open_file(&mut self) -> Option<PathBuf> {
        self.open_files.pop_front().flatten()
    }

    fn pick_save_file(&mut self, kind: FileKind) -> Option<PathBuf> {
        self.save_pickers.push(kind);
        self.save_files.pop_front().flatten()
    }

    fn ask_save_changes(&mut self, notebook_name: &str, allow_cancel: bool) -> SaveChoice {
        self.save_prompts
            .push((notebook_name.to_string(), allow_cancel));
        let choice = self.save_choices.pop_front().unwrap_or(SaveChoice::Cancel);
        if !allow_cancel && choice == SaveChoice::Cancel {
            SaveChoice::Discard
        } else {
            choice
        }
    }

    fn confirm_delete(&mut self, count: usize) -> bool {
        self.delete_prompts.push(count);
        self.delete_confirms.pop_front().unwrap_or(false)
    }

    fn run_edit_dialog(&mut self, dialog: &mut EditNoteDialog<'_>) {
        self.dialogs_seen.push((
            dialog.window_title().to_string(),
            dialog.title_field().to_string(),
            dialog.text_field().to_string(),
        ));
        match self.dialogs.pop_front().unwrap_or(DialogScript::Cancel) {
            DialogScript::Cancel => dialog.cancel(),
            DialogScript::KeepFields => {
                if let Err(e) = dialog.accept() {
                    self.messages.push((MessageLevel::Error, e.to_string()));
                    dialog.cancel();
                }
            }
            DialogScript::Attempts(attempts) => {
                for (title, text) in attempts {
                    dialog.set_title_field(title);
                    dialog.set_text_field(text);
                    match dialog.accept() {
                        Ok(()) => return,
                        Err(e) => self.messages.push((MessageLevel::Error, e.to_string())),
                    }
                }
                dialog.cancel();
            }
        }
    }

    fn notify(&mut self, level: MessageLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }

    fn open_url(&mut self, url: &Url) -> Result<()> {
        if self.fail_url_launch {
            return Err(NbookError::Api(format!("Unable to open {}", url)));
        }
        self.opened_urls.push(url.clone());
        Ok(())
    }
}
