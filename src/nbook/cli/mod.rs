//! # CLI Layer
//!
//! One client of the nbook library. This is the only place that reads
//! arguments, touches the terminal, or decides exit codes.
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and one `handle_*` per subcommand
//! - `frontend`: terminal implementations of the session's `Frontend`
//! - `shell`: the interactive main window
//! - `render` / `styles`: tables, messages, colors
//!
//! One-shot commands open the notebook file, run a single session command,
//! and save straight away, so a file is never left half-updated between runs.

mod commands;
mod frontend;
mod render;
mod setup;
mod shell;
mod styles;

pub use commands::run;
