use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "nbook", bin_name = "nbook", version = get_version())]
#[command(about = "A notebook of titled notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty notebook file
    New {
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// List the notes of a notebook
    #[command(alias = "ls")]
    List {
        file: PathBuf,

        /// Print each note in full instead of one line per note
        #[arg(short, long)]
        full: bool,
    },

    /// Add a note (opens the editor unless title and text are given)
    #[command(alias = "a")]
    Add {
        file: PathBuf,

        #[arg(short, long)]
        title: Option<String>,

        /// Note text
        #[arg(short = 'b', long = "text")]
        text: Option<String>,

        /// Never open the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Edit the note at ROW (1-based)
    #[command(alias = "e")]
    Edit {
        file: PathBuf,
        row: usize,

        #[arg(short, long)]
        title: Option<String>,

        /// Note text
        #[arg(short = 'b', long = "text")]
        text: Option<String>,

        /// Never open the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Delete one or more notes (1-based rows)
    #[command(alias = "rm")]
    Delete {
        file: PathBuf,

        #[arg(required = true, num_args = 1..)]
        rows: Vec<usize>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a notebook to plain text
    Export { file: PathBuf, output: PathBuf },

    /// Search the web for the text of the note at ROW
    Search {
        file: PathBuf,
        row: usize,

        /// Print the URL instead of opening it
        #[arg(long)]
        print: bool,
    },

    /// Open the help site
    HelpSite {
        /// Print the URL instead of opening it
        #[arg(long)]
        print: bool,
    },

    /// Try your luck
    Lottery,

    /// About nbook
    About,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., file-ext)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive notebook shell
    Shell {
        /// Notebook to open on start (a new untitled one otherwise)
        file: Option<PathBuf>,

        /// Prompt for note fields instead of opening the editor
        #[arg(long)]
        no_editor: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_fields() {
        let cli = Cli::parse_from(["nbook", "add", "a.nbk", "-t", "Title", "-b", "Body"]);
        match cli.command {
            Some(Commands::Add { file, title, text, no_editor }) => {
                assert_eq!(file, PathBuf::from("a.nbk"));
                assert_eq!(title.as_deref(), Some("Title"));
                assert_eq!(text.as_deref(), Some("Body"));
                assert!(!no_editor);
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rm_alias_with_rows() {
        let cli = Cli::parse_from(["nbook", "rm", "a.nbk", "1", "3", "-y"]);
        match cli.command {
            Some(Commands::Delete { rows, yes, .. }) => {
                assert_eq!(rows, vec![1, 3]);
                assert!(yes);
            }
            other => panic!("Expected Delete, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_verbosity_counts() {
        let cli = Cli::parse_from(["nbook", "-vv", "about"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_delete_requires_rows() {
        assert!(Cli::try_parse_from(["nbook", "delete", "a.nbk"]).is_err());
    }
}
