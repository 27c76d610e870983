use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetSplitError {
    #[error("No spreadsheet path was given")]
    Usage,

    #[error("Failed to open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook contains no sheets: {path}")]
    NoSheets { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate filename detected - {name}")]
    DuplicateFilename { name: String },

    #[error("Failed to write row {row} to {path}: {source}")]
    RowWrite {
        row: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetSplitError {
    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SheetSplitError::Usage => 1,
            SheetSplitError::DuplicateFilename { .. } => 1,
            SheetSplitError::WorkbookOpen { .. } | SheetSplitError::NoSheets { .. } => 2,
            SheetSplitError::DirectoryCreation { .. } => 3,
            SheetSplitError::Config { .. } => 4,
            _ => 1,
        }
    }

    /// Row write failures are reported and skipped; everything else ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SheetSplitError::RowWrite { .. })
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SheetSplitError {
    fn user_message(&self) -> String {
        match self {
            SheetSplitError::Usage => "Usage: sheetsplit <excelFilePath>".to_string(),
            SheetSplitError::WorkbookOpen { path, source } => {
                format!("Could not read workbook {}: {}", path.display(), source)
            }
            SheetSplitError::NoSheets { path } => {
                format!("Workbook has no sheets: {}", path.display())
            }
            SheetSplitError::DirectoryCreation { path, source } => {
                format!(
                    "Could not create output directory {}: {}",
                    path.display(),
                    source
                )
            }
            SheetSplitError::DuplicateFilename { name } => {
                format!("Error: Duplicate filename detected - {}", name)
            }
            SheetSplitError::RowWrite { row, path, source } => {
                format!("Row {}: could not write {}: {}", row, path.display(), source)
            }
            SheetSplitError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SheetSplitError::WorkbookOpen { .. } => Some(
                "Check that the file exists and is a valid spreadsheet (.xlsx, .xlsm, .xlsb, .xls or .ods).".to_string()
            ),
            SheetSplitError::NoSheets { .. } => Some(
                "Add at least one sheet with a header row to the workbook.".to_string()
            ),
            SheetSplitError::DirectoryCreation { .. } => Some(
                "Ensure you have write permissions for the base directory, or choose another one with --output-dir.".to_string()
            ),
            SheetSplitError::DuplicateFilename { .. } => Some(
                "Every value in the first column must be unique. Rows written before the duplicate were kept.".to_string()
            ),
            SheetSplitError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SheetSplitError {
    fn from(error: toml::de::Error) -> Self {
        SheetSplitError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetSplitError>;
