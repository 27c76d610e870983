pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod sheet;
pub mod ui;

// Public API re-exports
pub use cli::{input_base_name, Cli, OutputFormat};
pub use config::{CliOverrides, Config, LoggingConfig, OutputConfig};
pub use error::{Result, SheetSplitError, UserFriendlyError};

// Core functionality re-exports
pub use export::{
    ExportReport, FilenameRegistry, OutputFolder, OutputRecord, RowExporter, RowFailure,
    RowOutcome,
};
pub use sheet::{cell_to_text, SheetReader, SheetRow};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;
use tracing::info;

/// Main library interface: one spreadsheet in, one folder of row files out.
pub struct SheetSplit {
    config: Config,
    output_formatter: OutputFormatter,
    dry_run: bool,
}

impl SheetSplit {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Create a SheetSplit instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
            .with_dry_run(cli_args.dry_run))
    }

    /// Split `input` into the timestamped output folder.
    ///
    /// Rows that fail to write are reported and listed in the returned
    /// report. A duplicate filename, an unreadable workbook or an output
    /// folder that cannot be created end the run with an error.
    pub fn run(&self, input: &Path) -> Result<ExportReport> {
        let rows = SheetReader::read_data_rows(input)?;
        self.output_formatter
            .info(&format!("Read {} data rows from {}", rows.len(), input.display()));

        let folder = OutputFolder::timestamped(
            &self.config.output.base_directory,
            &input_base_name(input),
        );

        if self.dry_run {
            self.output_formatter
                .print_plan(input, folder.path(), rows.len());
        } else {
            folder.create()?;
            self.output_formatter.success(&format!(
                "Created output folder: {}",
                folder.path().display()
            ));
        }

        let mut exporter = RowExporter::new().with_dry_run(self.dry_run);
        let report = exporter.export(&rows, &folder, |outcome| {
            self.output_formatter.row_outcome(outcome)
        })?;

        info!(
            folder = %report.output_folder.display(),
            written = report.rows_written,
            failed = report.failures.len(),
            "export finished"
        );
        self.output_formatter.print_export_summary(&report);

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SheetSplitError) {
        self.output_formatter.fatal(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
