use crate::error::{NbookError, Result};
use crate::model::Note;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// A note as laid out in an editor buffer.
/// Format: title\n\ntext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub text: String,
}

impl EditorContent {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title(), note.text())
    }

    pub fn to_buffer(&self) -> String {
        format!("{}\n\n{}", self.title, self.text)
    }

    /// Parses an editor buffer back into title and text.
    /// The first line is the title; one optional blank line separates it from
    /// the text, which keeps its inner line breaks.
    pub fn from_buffer(buffer: &str) -> Self {
        let (title, rest) = match buffer.split_once('\n') {
            Some((title, rest)) => (title, rest),
            None => (buffer, ""),
        };
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);

        Self {
            title: title.trim_end_matches('\r').to_string(),
            text: rest.trim_end().to_string(),
        }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NbookError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();
    log::debug!("launching {} on {}", editor, path.display());

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| NbookError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NbookError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Opens an editor on `initial` and returns what the user left in the buffer.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("nbook-note-{}.txt", uuid::Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer())?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}
