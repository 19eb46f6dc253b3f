//! # nbook Architecture
//!
//! nbook keeps a notebook of titled notes. The notebook lives in memory, is
//! saved to a compact binary file, and can be exported to plain text.
//!
//! Like any document editor, the library is the product and the binary is one
//! client of it. Nothing below the session layer knows about terminals,
//! windows, or exit codes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - One-shot commands and the interactive shell              │
//! │  - Implements Frontend: prompts, pickers, message output    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session/)                                   │
//! │  - Current notebook, bound file name, modified flag         │
//! │  - New / Open / Save / Save-As / Close / Exit workflows     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document Layer (notebook.rs, model.rs, dialog.rs)          │
//! │  - Ordered notes exposed as a two-column table              │
//! │  - Change notifications for views and the session           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NotebookStore trait and the binary codec                 │
//! │  - FileStore (atomic replace), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Document and storage**: unit tests next to the code.
//! 2. **Session**: driven end to end through `InMemoryStore` and a scripted
//!    [`session::Frontend`], so every prompt answer and failure is reproducible.
//! 3. **CLI**: integration tests under `tests/` run the real binary against
//!    temporary directories.
//!
//! ## Module Overview
//!
//! - [`model`]: The `Note` value type
//! - [`notebook`]: The notebook collection and its table view
//! - [`store`]: Binary format, storage trait and implementations
//! - [`dialog`]: Edit-note dialog controller and validation
//! - [`session`]: Document lifecycle and user command workflows
//! - [`export`]: Plain-text export
//! - [`links`]: Help and web-search URLs
//! - [`lottery`]: The daily lottery
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod config;
pub mod dialog;
pub mod editor;
pub mod error;
pub mod export;
pub mod links;
pub mod lottery;
pub mod model;
pub mod notebook;
pub mod session;
pub mod store;
