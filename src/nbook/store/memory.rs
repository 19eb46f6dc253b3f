use super::{decode, encode, NotebookStore};
use crate::error::{NbookError, Result};
use crate::notebook::Notebook;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Map-backed store. Files are kept as the same bytes [`super::fs::FileStore`]
/// would write, so decoding behaves identically.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: HashMap<PathBuf, Vec<u8>>,
    fail_commits: bool,
    fail_reads: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save/write fail at commit time.
    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn put_raw(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn raw(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(|b| b.as_slice())
    }

    pub fn text(&self, path: &Path) -> Option<String> {
        self.raw(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn commit(&mut self, path: &Path, bytes: Vec<u8>) -> Result<()> {
        if self.fail_commits {
            return Err(NbookError::Io(io::Error::new(
                io::ErrorKind::Other,
                "Unable to commit the save",
            )));
        }
        self.files.insert(path.to_path_buf(), bytes);
        Ok(())
    }
}

impl NotebookStore for InMemoryStore {
    fn load(&self, path: &Path) -> Result<Notebook> {
        if self.fail_reads {
            return Err(NbookError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read refused",
            )));
        }
        let bytes = self.files.get(path).ok_or_else(|| {
            NbookError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })?;
        decode(bytes)
    }

    fn save(&mut self, path: &Path, notebook: &Notebook) -> Result<()> {
        let bytes = encode(notebook)?;
        self.commit(path, bytes)
    }

    fn write_text(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.commit(path, contents.as_bytes().to_vec())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Note;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Stores a notebook with `count` generated notes at `path`.
        pub fn with_notebook(mut self, path: &str, count: usize) -> Self {
            let nb: Notebook = (0..count)
                .map(|i| Note::new(format!("Note {}", i + 1), format!("Body {}", i + 1)))
                .collect();
            self.store.save(Path::new(path), &nb).unwrap();
            self
        }

        pub fn with_corrupt_file(mut self, path: &str) -> Self {
            self.store.put_raw(path, vec![0xde, 0xad, 0xbe, 0xef]);
            self
        }
    }
}
