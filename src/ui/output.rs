use crate::error::{SheetSplitError, UserFriendlyError};
use crate::export::{ExportReport, RowOutcome};
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// The per-row progress line. This is the tool's primary output, so it
    /// is printed even in quiet mode.
    pub fn row_written(&self, counter: usize) {
        match self.mode {
            OutputMode::Human | OutputMode::Plain => println!("{}", progress_line(counter)),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "progress",
                "row": counter,
                "message": progress_line(counter),
            })),
        }
    }

    pub fn row_outcome(&self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Written {
                counter,
                row,
                path,
                bytes,
                ..
            } => {
                self.row_written(*counter);
                self.debug(&format!(
                    "sheet row {} -> {} ({} bytes)",
                    row,
                    path.display(),
                    bytes
                ));
            }
            RowOutcome::Failed { error, .. } => self.error(&error.user_message()),
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    /// Errors always go to stderr, whatever the verbosity.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    /// Report a condition that ended the run.
    pub fn fatal(&self, error: &SheetSplitError) {
        // The duplicate and usage lines are part of the CLI contract.
        match error {
            SheetSplitError::DuplicateFilename { .. } => {
                eprintln!("{}", error.user_message());
                return;
            }
            SheetSplitError::Usage => {
                println!("{}", error.user_message());
                return;
            }
            _ => {}
        }

        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => self.print_json_object(&serde_json::json!({
                    "type": "suggestion",
                    "message": suggestion
                })),
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_plan(&self, input: &Path, output_folder: &Path, rows: usize) {
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "plan",
                "input": input.display().to_string(),
                "output_folder": output_folder.display().to_string(),
                "data_rows": rows,
            })),
            _ => {
                println!("Input:         {}", input.display());
                println!("Output folder: {}", output_folder.display());
                println!("Data rows:     {}", rows);
            }
        }
    }

    /// End-of-run summary: shown with `-v`, or always as JSON.
    pub fn print_export_summary(&self, report: &ExportReport) {
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "summary",
                "output_folder": report.output_folder.display().to_string(),
                "rows_written": report.rows_written,
                "rows_failed": report.failures.len(),
                "duration_ms": report.elapsed.as_millis(),
                "dry_run": report.dry_run,
            })),
            OutputMode::Human if self.should_show_message(1) => self.print_human_summary(report),
            OutputMode::Plain if self.should_show_message(1) => self.print_plain_summary(report),
            _ => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        let value = serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if level == "error" {
            eprintln!(
                "{}",
                serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
            );
        } else {
            self.print_json_object(&value);
        }
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, report: &ExportReport) {
        println!();
        println!("{}", "-".repeat(60));

        let headline = if report.dry_run {
            "Dry run completed"
        } else {
            "Export completed"
        };
        if self.use_colors {
            println!("{} {}", style(headline).green().bold(), CHECKMARK);
        } else {
            println!("✓ {}", headline);
        }

        println!("  Output folder:  {}", report.output_folder.display());
        println!("  Rows written:   {}", report.rows_written);
        if !report.failures.is_empty() {
            println!("  Rows failed:    {}", report.failures.len());
        }
        println!("  Time taken:     {}", format_duration(report.elapsed));
        println!("{}", "-".repeat(60));
    }

    fn print_plain_summary(&self, report: &ExportReport) {
        println!("COMPLETED: {}", report.output_folder.display());
        println!("Rows written: {}", report.rows_written);
        if !report.failures.is_empty() {
            println!("Rows failed: {}", report.failures.len());
        }
        println!("Duration: {:?}", report.elapsed);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Info,
}

pub fn progress_line(counter: usize) -> String {
    format!("Conversion for row {} completed successfully.", counter)
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_format() {
        assert_eq!(
            progress_line(1),
            "Conversion for row 1 completed successfully."
        );
        assert_eq!(
            progress_line(12),
            "Conversion for row 12 completed successfully."
        );
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(!formatter.use_colors);
        assert!(!formatter.should_show_message(0));
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));
        assert_eq!(formatter.mode(), OutputMode::Plain);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    }
}
