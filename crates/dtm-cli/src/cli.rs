//! CLI argument definitions for the data table editor.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Environment variable naming the snapshot file.
pub const STATE_ENV: &str = "DATATABLE_STATE";

/// Snapshot file used when neither `--state` nor the environment names one.
pub const DEFAULT_STATE_FILE: &str = "datatable-state.json";

#[derive(Parser)]
#[command(
    name = "datatable",
    version,
    about = "Tabular data editor - view, edit, and reshape a persisted table",
    long_about = "View, search, sort, and edit a table of records.\n\n\
                  Rows and columns persist between runs in a JSON snapshot.\n\
                  Tables can be imported from and exported to CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Snapshot file holding the table (default: $DATATABLE_STATE, then ./datatable-state.json).
    #[arg(long = "state", value_name = "PATH", global = true)]
    pub state: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one page of the table.
    Show(ShowArgs),

    /// Add a row.
    AddRow(AddRowArgs),

    /// Delete a row by id.
    DeleteRow {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Edit fields of a row and commit them.
    Edit(EditArgs),

    /// Manage columns.
    #[command(subcommand)]
    Columns(ColumnsCommand),

    /// Replace every row with the contents of a CSV file.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the visible columns of every row to a CSV file.
    Export {
        /// Output file (default: table-export-<millis>.csv).
        #[arg(long = "output", short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct ShowArgs {
    /// Only show rows where some field contains this text (case-insensitive).
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort by this column (id or label).
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc", requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1.
    #[arg(
        long = "page",
        value_name = "N",
        default_value_t = 1,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub page: usize,
}

#[derive(Args)]
pub struct AddRowArgs {
    #[arg(long = "name")]
    pub name: String,

    #[arg(long = "email")]
    pub email: String,

    #[arg(long = "age")]
    pub age: String,

    /// Role (Developer, Designer, Manager, Analyst, or any other text).
    #[arg(long = "role", default_value = dtm_core::DEFAULT_ROLE)]
    pub role: String,

    /// Value for a custom column, as COLUMN=VALUE. Repeatable.
    #[arg(long = "field", value_name = "COLUMN=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    /// New value for a field, as COLUMN=VALUE. Repeatable.
    #[arg(long = "set", value_name = "COLUMN=VALUE", required = true)]
    pub set: Vec<String>,
}

#[derive(Subcommand)]
pub enum ColumnsCommand {
    /// List columns in display order.
    List,

    /// Add a custom column; its id is derived from the label.
    Add {
        #[arg(value_name = "LABEL")]
        label: String,
    },

    /// Delete a custom column and its values.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Show or hide a column.
    Toggle {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Change a column's label.
    Rename {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "LABEL")]
        label: String,
    },

    /// Move a column from one position to another (positions start at 1).
    Move {
        #[arg(value_name = "FROM")]
        from: usize,
        #[arg(value_name = "TO")]
        to: usize,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Resolve the snapshot path: flag, then environment, then default.
pub fn resolve_state_path(flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    flag.or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
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
    fn test_state_path_precedence() {
        assert_eq!(
            resolve_state_path(Some("a.json".into()), Some("b.json".into())),
            PathBuf::from("a.json")
        );
        assert_eq!(
            resolve_state_path(None, Some("b.json".into())),
            PathBuf::from("b.json")
        );
        assert_eq!(
            resolve_state_path(None, Some(OsString::new())),
            PathBuf::from(DEFAULT_STATE_FILE)
        );
        assert_eq!(resolve_state_path(None, None), PathBuf::from(DEFAULT_STATE_FILE));
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["datatable", "show", "--sort", "age", "--desc", "--page", "2"])
            .unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.sort.as_deref(), Some("age"));
        assert!(args.desc);
        assert_eq!(args.page, 2);
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(Cli::try_parse_from(["datatable", "show", "--page", "0"]).is_err());
    }
}
