use super::{decode, encode, NotebookStore};
use crate::error::{NbookError, Result};
use crate::notebook::Notebook;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn temp_path_for(target: &Path) -> Result<PathBuf> {
        let file_name = target
            .file_name()
            .ok_or_else(|| NbookError::Api(format!("Not a file path: {}", target.display())))?;
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(dir.join(format!(
            ".{}-{}.tmp",
            file_name.to_string_lossy(),
            Uuid::new_v4()
        )))
    }

    /// Writes `bytes` next to `target`, then renames over it. The target is
    /// only touched by the final rename.
    fn replace_atomically(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = Self::temp_path_for(target)?;

        let written = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()
        })();

        let committed = written.and_then(|_| fs::rename(&tmp, target));
        if let Err(e) = committed {
            let _ = fs::remove_file(&tmp);
            log::warn!("commit to {} failed: {}", target.display(), e);
            return Err(NbookError::Io(e));
        }

        log::debug!("wrote {} bytes to {}", bytes.len(), target.display());
        Ok(())
    }
}

impl NotebookStore for FileStore {
    fn load(&self, path: &Path) -> Result<Notebook> {
        let bytes = fs::read(path)?;
        decode(&bytes)
    }

    fn save(&mut self, path: &Path, notebook: &Notebook) -> Result<()> {
        let bytes = encode(notebook)?;
        self.replace_atomically(path, &bytes)
    }

    fn write_text(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.replace_atomically(path, contents.as_bytes())
    }
}
