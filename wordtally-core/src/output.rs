//! Report output.
//!
//! Reports are saved next to their source document, inside a dedicated
//! subdirectory and under a prefixed copy of the source file name:
//! `<dir>/Edited/New-<name>` with the default writer.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::report::Report;

/// Default output subdirectory.
pub const DEFAULT_DIR_NAME: &str = "Edited";

/// Default file name prefix.
pub const DEFAULT_PREFIX: &str = "New-";

/// Writes reports to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWriter {
    dir_name: String,
    prefix: String,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(DEFAULT_DIR_NAME, DEFAULT_PREFIX)
    }
}

impl ReportWriter {
    /// Creates a writer using `dir_name` as the output subdirectory and
    /// `prefix` in front of the source file name.
    pub fn new(dir_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            prefix: prefix.into(),
        }
    }

    /// Where the report for `source` is written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `source` has no file name.
    pub fn target_path(&self, source: &Path) -> io::Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid file name: {}", source.display()),
            )
        })?;

        let parent = source.parent().unwrap_or_else(|| Path::new(""));
        let mut name = self.prefix.clone();
        name.push_str(&file_name.to_string_lossy());

        Ok(parent.join(&self.dir_name).join(name))
    }

    /// Writes `report` for `source` and returns the output path.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from creating the directory or writing the file.
    pub fn write(&self, report: &Report, source: &Path) -> io::Result<PathBuf> {
        self.write_with(report, source, |_| {})
    }

    /// Like [`ReportWriter::write`], also passing every section to `mirror`
    /// as it is written.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from creating the directory or writing the file.
    pub fn write_with<F>(
        &self,
        report: &Report,
        source: &Path,
        mut mirror: F,
    ) -> io::Result<PathBuf>
    where
        F: FnMut(&str),
    {
        let target = self.target_path(source)?;
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut file = BufWriter::new(File::create(&target)?);
        for section in report.sections() {
            mirror(section);
            writeln!(file, "{}", section)?;
        }
        file.flush()?;

        info!(path = %target.display(), "report saved");
        Ok(target)
    }
}
