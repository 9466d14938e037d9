use clap::{Args, Parser, Subcommand, ValueEnum};
use skillport_convert::Dialect;
use std::path::PathBuf;

/// Command-line interface for the `skillport` application.
#[derive(Debug, Parser)]
#[command(
    name = "skillport",
    version,
    about = "Convert agent skills, commands, instructions and MCP configs between Claude, OpenCode, Copilot and Cursor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `skillport` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Converts a file or every artifact under a directory to another dialect.
    Convert(ConvertArgs),
}

/// Arguments for `skillport convert`.
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Local file or directory to convert.
    #[arg(value_name = "SOURCE")]
    pub source: String,
    /// Target dialect: claude, opencode, copilot or cursor.
    #[arg(long = "to", env = "SKILLPORT_TARGET", value_name = "DIALECT")]
    pub to: Dialect,
    /// Source dialect, overriding detection from the path.
    #[arg(long = "from", value_name = "DIALECT")]
    pub from: Option<Dialect>,
    /// Directory converted files are written under.
    #[arg(
        long,
        short,
        env = "SKILLPORT_OUTPUT",
        value_name = "DIR",
        default_value = "."
    )]
    pub output: PathBuf,
    /// Prints destinations and warnings without writing anything.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Overwrites files that already exist at the destination.
    #[arg(long, env = "SKILLPORT_FORCE", default_value_t = false)]
    pub force: bool,
    /// Output format: text or json.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// How the convert report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}
