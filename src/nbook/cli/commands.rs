use super::frontend::{BatchFrontend, NoteFields, TermFrontend};
use super::render::{print_message, render_full, render_table};
use super::setup::{Cli, Commands};
use super::shell::{announce_events, run_shell};
use clap::{CommandFactory, Parser};
use nbook::config::{config_dir, NbookConfig};
use nbook::error::{NbookError, Result};
use nbook::links;
use nbook::notebook::distinct_rows;
use nbook::session::{MessageLevel, Session};
use nbook::store::fs::FileStore;
use std::path::{Path, PathBuf};

type BatchSession = Session<FileStore, BatchFrontend>;

/// Parses the command line and dispatches. Returns the process exit code;
/// failures already reported to the user come back as `Ok(1)`.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = config_dir()?;
    let config = NbookConfig::load(&config_dir)?;
    log::debug!("config loaded from {}", config_dir.display());

    match cli.command {
        Some(Commands::New { file, force }) => handle_new(config, file, force),
        Some(Commands::List { file, full }) => handle_list(config, &file, full),
        Some(Commands::Add {
            file,
            title,
            text,
            no_editor,
        }) => handle_add(config, &file, NoteFields { title, text }, no_editor),
        Some(Commands::Edit {
            file,
            row,
            title,
            text,
            no_editor,
        }) => handle_edit(config, &file, row, NoteFields { title, text }, no_editor),
        Some(Commands::Delete { file, rows, yes }) => handle_delete(config, &file, &rows, yes),
        Some(Commands::Export { file, output }) => handle_export(config, &file, &output),
        Some(Commands::Search { file, row, print }) => handle_search(config, &file, row, print),
        Some(Commands::HelpSite { print }) => handle_help_site(config, print),
        Some(Commands::Lottery) => handle_lottery(config),
        Some(Commands::About) => handle_about(config),
        Some(Commands::Config { key, value }) => handle_config(config, &config_dir, key, value),
        Some(Commands::Shell { file, no_editor }) => handle_shell(config, file, no_editor),
        None => {
            Cli::command().print_help()?;
            Ok(0)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter(Some("nbook"), level)
        .parse_default_env()
        .init();
}

fn exit_code(ok: bool) -> i32 {
    if ok {
        0
    } else {
        1
    }
}

fn use_color() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

/// Converts 1-based command-line rows to 0-based indexes.
fn to_index(row: usize) -> Result<usize> {
    row.checked_sub(1)
        .ok_or_else(|| NbookError::Api("Rows start at 1".to_string()))
}

fn open_session(config: NbookConfig, file: &Path, frontend: BatchFrontend) -> Option<BatchSession> {
    let mut session = Session::new(FileStore::new(), frontend, config);
    session.open_path(file).then_some(session)
}

fn require_row(session: &BatchSession, index: usize) -> Result<()> {
    match session.notebook().and_then(|nb| nb.get(index)) {
        Some(_) => Ok(()),
        None => Err(NbookError::Api(format!("Row {} does not exist", index + 1))),
    }
}

fn handle_new(config: NbookConfig, file: PathBuf, force: bool) -> Result<i32> {
    if file.exists() && !force {
        return Err(NbookError::Api(format!(
            "{} already exists (use --force to overwrite)",
            file.display()
        )));
    }
    let mut session = Session::new(FileStore::new(), BatchFrontend::default(), config);
    session.new_notebook();
    if !session.save_to(&file) {
        return Ok(1);
    }
    print_message(
        MessageLevel::Success,
        &format!("Created {}", file.display()),
    );
    Ok(0)
}

fn handle_list(config: NbookConfig, file: &Path, full: bool) -> Result<i32> {
    let Some(session) = open_session(config, file, BatchFrontend::default()) else {
        return Ok(1);
    };
    if let Some(nb) = session.notebook() {
        if full {
            print!("{}", render_full(nb, use_color()));
        } else {
            print!("{}", render_table(nb, use_color()));
        }
    }
    Ok(0)
}

fn handle_add(config: NbookConfig, file: &Path, fields: NoteFields, no_editor: bool) -> Result<i32> {
    let frontend = BatchFrontend {
        fields,
        use_editor: config.use_editor && !no_editor,
        assume_yes: false,
    };
    let Some(mut session) = open_session(config, file, frontend) else {
        return Ok(1);
    };
    if !session.new_note() || !session.save() {
        return Ok(1);
    }
    let size = session.notebook().map(|nb| nb.size()).unwrap_or(0);
    print_message(MessageLevel::Success, &format!("Added note {}", size));
    Ok(0)
}

fn handle_edit(
    config: NbookConfig,
    file: &Path,
    row: usize,
    fields: NoteFields,
    no_editor: bool,
) -> Result<i32> {
    let index = to_index(row)?;
    let frontend = BatchFrontend {
        fields,
        use_editor: config.use_editor && !no_editor,
        assume_yes: false,
    };
    let Some(mut session) = open_session(config, file, frontend) else {
        return Ok(1);
    };
    require_row(&session, index)?;
    if !session.edit_note(&[index]) || !session.save() {
        return Ok(1);
    }
    print_message(MessageLevel::Success, &format!("Updated note {}", row));
    Ok(0)
}

fn handle_delete(config: NbookConfig, file: &Path, rows: &[usize], yes: bool) -> Result<i32> {
    let indexes = rows
        .iter()
        .map(|&r| to_index(r))
        .collect::<Result<Vec<_>>>()?;
    let indexes = distinct_rows(&indexes);
    let frontend = BatchFrontend {
        assume_yes: yes,
        ..Default::default()
    };
    let Some(mut session) = open_session(config, file, frontend) else {
        return Ok(1);
    };
    if !session.delete_notes(&indexes) || !session.save() {
        return Ok(1);
    }
    print_message(
        MessageLevel::Success,
        &format!("Deleted {} note(s)", indexes.len()),
    );
    Ok(0)
}

fn handle_export(config: NbookConfig, file: &Path, output: &Path) -> Result<i32> {
    let Some(mut session) = open_session(config, file, BatchFrontend::default()) else {
        return Ok(1);
    };
    if !session.export_text_to(output) {
        return Ok(1);
    }
    print_message(
        MessageLevel::Success,
        &format!("Exported to {}", output.display()),
    );
    Ok(0)
}

fn handle_search(config: NbookConfig, file: &Path, row: usize, print: bool) -> Result<i32> {
    let index = to_index(row)?;
    let Some(mut session) = open_session(config, file, BatchFrontend::default()) else {
        return Ok(1);
    };
    if print {
        println!("{}", session.search_url(index)?);
        return Ok(0);
    }
    require_row(&session, index)?;
    Ok(exit_code(session.web_search(&[index])))
}

fn handle_help_site(config: NbookConfig, print: bool) -> Result<i32> {
    if print {
        println!("{}", links::help_url(&config.help_url)?);
        return Ok(0);
    }
    let mut session = Session::new(FileStore::new(), BatchFrontend::default(), config);
    Ok(exit_code(session.visit_help()))
}

fn handle_lottery(config: NbookConfig) -> Result<i32> {
    let session = Session::new(FileStore::new(), BatchFrontend::default(), config);
    println!("{}", session.lottery());
    Ok(0)
}

fn handle_about(config: NbookConfig) -> Result<i32> {
    let session = Session::new(FileStore::new(), BatchFrontend::default(), config);
    println!("{}", session.about());
    Ok(0)
}

fn handle_config(
    mut config: NbookConfig,
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
) -> Result<i32> {
    match (key, value) {
        (None, _) => {
            for (k, v) in config.entries() {
                println!("{} = {}", k, v);
            }
        }
        (Some(k), None) => match config.get(&k) {
            Some(v) => println!("{} = {}", k, v),
            None => return Err(NbookError::Config(format!("Unknown config key: {}", k))),
        },
        (Some(k), Some(v)) => {
            config.set(&k, &v)?;
            config.save(config_dir)?;
            let shown = config.get(&k).unwrap_or(v);
            print_message(MessageLevel::Success, &format!("{} = {}", k, shown));
        }
    }
    Ok(0)
}

fn handle_shell(config: NbookConfig, file: Option<PathBuf>, no_editor: bool) -> Result<i32> {
    let frontend = TermFrontend::new(
        config.use_editor && !no_editor,
        &config.file_ext,
        &config.text_ext,
    );
    let mut session = Session::new(FileStore::new(), frontend, config);
    announce_events(&mut session);

    let started = match file {
        Some(path) => session.open_path(path),
        None => session.new_notebook(),
    };
    if !started {
        log::warn!("shell started without a notebook");
    }
    Ok(run_shell(&mut session))
}
