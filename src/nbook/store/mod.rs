//! # Storage Layer
//!
//! Notebooks persist as an opaque binary stream. The [`NotebookStore`] trait
//! lets the session work against different backends:
//!
//! - [`fs::FileStore`]: production storage on the local filesystem. Writes go
//!   to a temporary file next to the target and are renamed over it only once
//!   fully written, so a failed save never clobbers the previous file.
//! - [`memory::InMemoryStore`]: map-backed storage for tests, able to simulate
//!   read and commit failures.
//!
//! ## Binary Format
//!
//! The stream is the bincode encoding (fixed-width integers, little endian)
//! of the note sequence:
//!
//! ```text
//! u64            number of notes
//! per note:
//!   u64 + bytes  title (UTF-8)
//!   u64 + bytes  text  (UTF-8)
//! ```
//!
//! There is no magic number, version tag or checksum. A stream that is
//! truncated, carries trailing bytes, or contains invalid UTF-8 fails to decode
//! and no notebook is produced.

use crate::error::Result;
use crate::model::Note;
use crate::notebook::Notebook;
use bincode::Options;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Upper bound on a decoded stream, guards against absurd length prefixes.
const DECODE_LIMIT: u64 = 256 * 1024 * 1024;

pub trait NotebookStore {
    /// Read and decode the notebook stored at `path`.
    fn load(&self, path: &Path) -> Result<Notebook>;

    /// Encode `notebook` and atomically replace `path` with it.
    fn save(&mut self, path: &Path, notebook: &Notebook) -> Result<()>;

    /// Atomically replace `path` with `contents`.
    fn write_text(&mut self, path: &Path, contents: &str) -> Result<()>;
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(DECODE_LIMIT)
        .reject_trailing_bytes()
}

pub fn encode(notebook: &Notebook) -> Result<Vec<u8>> {
    Ok(codec().serialize(notebook.notes())?)
}

pub fn decode(bytes: &[u8]) -> Result<Notebook> {
    let notes: Vec<Note> = codec().deserialize(bytes)?;
    log::debug!("decoded {} notes from {} bytes", notes.len(), bytes.len());
    Ok(notes.into_iter().collect())
}
