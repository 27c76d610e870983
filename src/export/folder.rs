use crate::error::{Result, SheetSplitError};
use chrono::{DateTime, Local, TimeZone};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use tracing::debug;

/// Fixed `yyyyMMdd_HHmmss` suffix of every output folder.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The per-run directory every row file is written into.
#[derive(Debug, Clone)]
pub struct OutputFolder {
    path: PathBuf,
}

impl OutputFolder {
    /// `<base>/<base_name>_<now>` using local wall-clock time.
    pub fn timestamped<P: AsRef<Path>>(base: P, base_name: &str) -> Self {
        Self::at(base, base_name, &Local::now())
    }

    pub fn at<P: AsRef<Path>, Tz: TimeZone>(base: P, base_name: &str, time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let name = format!("{}_{}", base_name, time.format(TIMESTAMP_FORMAT));
        Self {
            path: base.as_ref().join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<folder><separator><filename>`, joined textually so that a filename
    /// which looks absolute still lands under the folder.
    pub fn file_path(&self, filename: &str) -> PathBuf {
        let mut joined = OsString::from(self.path.as_os_str());
        joined.push(MAIN_SEPARATOR_STR);
        joined.push(filename);
        PathBuf::from(joined)
    }

    /// Create the folder and any missing parents. An existing folder is reused.
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.path).map_err(|source| SheetSplitError::DirectoryCreation {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "created output folder");
        Ok(())
    }
}
