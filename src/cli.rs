use crate::config::{CliOverrides, Config};
use crate::error::{Result, SheetSplitError};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sheetsplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split spreadsheet rows into individual text files")]
#[command(
    long_about = "SheetSplit reads the first sheet of a workbook and writes every row after \
                  the header to its own file in a timestamped folder. The first column names \
                  the file; the remaining columns, joined by commas, are its content."
)]
#[command(after_help = "EXAMPLES:\n  \
    sheetsplit contacts.xlsx\n  \
    sheetsplit contacts.xlsx --output-dir /srv/exports\n  \
    sheetsplit contacts.xlsx --dry-run -v\n  \
    sheetsplit --generate-config --config sheetsplit.toml")]
pub struct Cli {
    /// Spreadsheet to split (.xlsx, .xlsm, .xlsb, .xls, .ods)
    pub input: Option<PathBuf>,

    /// Directory the timestamped output folder is created in (defaults to the working directory)
    #[arg(short, long, env = "SHEETSPLIT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only progress lines and errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Validate rows and show the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output_dir.clone())
            .with_log_level(self.log_level().map(str::to_string))
    }

    /// The spreadsheet path, or [`SheetSplitError::Usage`] when none was given.
    pub fn input_path(&self) -> Result<&Path> {
        self.input.as_deref().ok_or(SheetSplitError::Usage)
    }

    /// Tracing level requested with `-v`, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        match self.verbosity_level() {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// File name of `path` with its final extension removed.
///
/// `book.v2.xlsx` becomes `book.v2`; a name without a dot is kept whole.
pub fn input_base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.rfind('.') {
        Some(index) => file_name[..index].to_string(),
        None => file_name,
    }
}
