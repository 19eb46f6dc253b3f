//! Plain-text rendition of a notebook. Write-only: there is no importer.
//!
//! Each note becomes four lines, numbered 1-based against the total count:
//!
//! ```text
//! +++ 1/2 +++
//! Title: Groceries
//! Content: Milk
//! --- 1/2 ---
//! ```

use crate::notebook::Notebook;
use std::fmt::Write;

pub fn format_as_text(notebook: &Notebook) -> String {
    let total = notebook.size();
    let mut out = String::new();
    for (i, note) in notebook.iter().enumerate() {
        let n = i + 1;
        // Writing into a String cannot fail.
        let _ = writeln!(out, "+++ {}/{} +++", n, total);
        let _ = writeln!(out, "Title: {}", note.title());
        let _ = writeln!(out, "Content: {}", note.text());
        let _ = writeln!(out, "--- {}/{} ---", n, total);
    }
    out
}
