//! # Interactive Shell
//!
//! A line-oriented main window: the prompt shows the window title (name plus
//! `*` when dirty) and each line runs one menu command against the session.
//! Rows are 1-based, as in the one-shot commands.

use super::frontend::TermFrontend;
use super::render::{print_message, render_full, render_table};
use nbook::error::NbookError;
use nbook::notebook::distinct_rows;
use nbook::session::{MessageLevel, Session, SessionEvent};
use nbook::store::NotebookStore;
use std::path::PathBuf;

const COMMANDS_HELP: &str = "\
Commands:
  new                 Start a new untitled notebook
  open [FILE]         Open a notebook
  save                Save the notebook
  saveas [FILE]       Save the notebook under a new name
  export [FILE]       Save the notebook as text
  close               Close the notebook
  list                List notes
  show                Print every note in full
  add                 Add a note
  edit ROW            Edit a note
  rm ROW...           Delete notes
  search ROW          Search the web for a note's text
  help                Open the help site
  lottery             Try your luck
  about               About nbook
  exit                Leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    New,
    Open(Option<PathBuf>),
    Save,
    SaveAs(Option<PathBuf>),
    Export(Option<PathBuf>),
    Close,
    List,
    Show,
    Add,
    Edit(Vec<usize>),
    Delete(Vec<usize>),
    Search(Vec<usize>),
    Help,
    Lottery,
    About,
    Commands,
    Exit,
}

/// Parses 1-based row numbers into 0-based indexes.
pub fn parse_rows<'a>(args: impl Iterator<Item = &'a str>) -> Result<Vec<usize>, String> {
    args.map(|arg| match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{}' is not a row number (rows start at 1)", arg)),
    })
    .collect()
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let path = || (!rest.is_empty()).then(|| PathBuf::from(rest.join(" ")));

    let command = match name.to_lowercase().as_str() {
        "new" => ShellCommand::New,
        "open" => ShellCommand::Open(path()),
        "save" => ShellCommand::Save,
        "saveas" => ShellCommand::SaveAs(path()),
        "export" => ShellCommand::Export(path()),
        "close" => ShellCommand::Close,
        "list" | "ls" => ShellCommand::List,
        "show" => ShellCommand::Show,
        "add" => ShellCommand::Add,
        "edit" => ShellCommand::Edit(parse_rows(rest.iter().copied())?),
        "rm" | "delete" => ShellCommand::Delete(parse_rows(rest.iter().copied())?),
        "search" => ShellCommand::Search(parse_rows(rest.iter().copied())?),
        "help" => ShellCommand::Help,
        "lottery" => ShellCommand::Lottery,
        "about" => ShellCommand::About,
        "?" | "commands" => ShellCommand::Commands,
        "exit" | "quit" | "q" => ShellCommand::Exit,
        other => return Err(format!("Unknown command '{}'. Type ? for a list.", other)),
    };
    Ok(Some(command))
}

/// Prints lifecycle events as they happen.
pub fn announce_events<S: NotebookStore>(session: &mut Session<S, TermFrontend>) {
    session.subscribe(|event| match event {
        SessionEvent::NotebookOpened(path) => {
            print_message(MessageLevel::Info, &format!("Opened {}", path.display()))
        }
        SessionEvent::NotebookSaved => print_message(MessageLevel::Success, "Saved"),
        SessionEvent::NotebookClosed => print_message(MessageLevel::Info, "Closed"),
        SessionEvent::RowsChanged(change) => log::debug!("rows changed: {:?}", change),
        _ => {}
    });
}

/// Reads and runs commands until `exit` or end of input. Returns the exit code.
pub fn run_shell<S: NotebookStore>(session: &mut Session<S, TermFrontend>) -> i32 {
    loop {
        let label = format!("{}> ", session.window_title());
        let Some(line) = session.frontend_mut().prompt(&label) else {
            println!();
            return session.exit();
        };
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Exit)) => return session.exit(),
            Ok(Some(command)) => execute(session, command),
            Err(message) => print_message(MessageLevel::Warning, &message),
        }
    }
}

/// True when the command is enabled for this selection; warns otherwise.
fn enabled<S: NotebookStore>(
    session: &Session<S, TermFrontend>,
    allowed: bool,
    hint: &str,
) -> bool {
    if !session.is_open() {
        print_message(MessageLevel::Warning, &NbookError::NoNotebook.to_string());
        return false;
    }
    if !allowed {
        print_message(MessageLevel::Warning, hint);
    }
    allowed
}

pub fn execute<S: NotebookStore>(session: &mut Session<S, TermFrontend>, command: ShellCommand) {
    let use_color = colored::control::SHOULD_COLORIZE.should_colorize();
    match command {
        ShellCommand::New => {
            session.new_notebook();
        }
        ShellCommand::Open(None) => {
            session.open_notebook();
        }
        ShellCommand::Open(Some(path)) => {
            session.open_path(path);
        }
        ShellCommand::Save => {
            session.save();
        }
        ShellCommand::SaveAs(None) => {
            session.save_as();
        }
        ShellCommand::SaveAs(Some(path)) => {
            session.save_to(path);
        }
        ShellCommand::Export(None) => {
            if session.save_as_text() {
                print_message(MessageLevel::Success, "Exported");
            }
        }
        ShellCommand::Export(Some(path)) => {
            if session.export_text_to(&path) {
                print_message(
                    MessageLevel::Success,
                    &format!("Exported to {}", path.display()),
                );
            }
        }
        ShellCommand::Close => {
            session.close_notebook();
        }
        ShellCommand::List => match session.notebook() {
            Some(nb) => print!("{}", render_table(nb, use_color)),
            None => print_message(MessageLevel::Warning, &NbookError::NoNotebook.to_string()),
        },
        ShellCommand::Show => match session.notebook() {
            Some(nb) => print!("{}", render_full(nb, use_color)),
            None => print_message(MessageLevel::Warning, &NbookError::NoNotebook.to_string()),
        },
        ShellCommand::Add => {
            session.new_note();
        }
        ShellCommand::Edit(rows) => {
            let allowed = session.actions(rows.len()).edit_note;
            if enabled(session, allowed, "edit takes exactly one row") {
                session.edit_note(&rows);
            }
        }
        ShellCommand::Delete(rows) => {
            let rows = distinct_rows(&rows);
            let allowed = session.actions(rows.len()).delete_notes;
            if enabled(session, allowed, "rm takes one or more rows") && session.delete_notes(&rows)
            {
                print_message(
                    MessageLevel::Success,
                    &format!("Deleted {} note(s)", rows.len()),
                );
            }
        }
        ShellCommand::Search(rows) => {
            let allowed = session.actions(rows.len()).web_search;
            if enabled(session, allowed, "search takes exactly one row") {
                session.web_search(&rows);
            }
        }
        ShellCommand::Help => {
            session.visit_help();
        }
        ShellCommand::Lottery => println!("{}", session.lottery()),
        ShellCommand::About => println!("{}", session.about()),
        ShellCommand::Commands => println!("{}", COMMANDS_HELP),
        ShellCommand::Exit => {}
    }
}
