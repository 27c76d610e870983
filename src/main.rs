use clap::Parser;
use sheetsplit::{Cli, Config, OutputFormatter, OutputMode, SheetSplit, SheetSplitError, UserFriendlyError};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let input = match cli.input_path() {
        Ok(input) => input.to_path_buf(),
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    let sheetsplit = match SheetSplit::from_cli(&cli) {
        Ok(sheetsplit) => sheetsplit,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    setup_logging(sheetsplit.config());

    match sheetsplit.run(&input) {
        // Rows that failed to write were already reported; they do not change the exit code.
        Ok(_) => 0,
        Err(e) => {
            sheetsplit.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "sheetsplit.toml".to_string());

    match SheetSplit::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  sheetsplit <excelFilePath> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &SheetSplitError) {
    let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
    formatter.fatal(error);
}

/// Diagnostics go to stderr so stdout stays one progress line per row.
fn setup_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
