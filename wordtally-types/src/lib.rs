//! Core types, configuration and errors for the wordtally analyzer.
//!
//! This crate provides the types that are shared between the analysis core
//! and its binaries. Keeping them separate ensures:
//!
//! - **Cross-crate compatibility**: the library and the CLI agree on config and errors
//! - **Clean boundaries**: no dependency from the types back into the pipeline

#![warn(missing_docs)]

use core::fmt;
use std::io;
use std::path::PathBuf;

/// Default number of lines sanitized by one normalization task.
pub const DEFAULT_TASK_LIMIT: usize = 500;

/// How a group's share of the total word count is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentageBasis {
    /// `words_in_group / total_words`.
    ///
    /// Matches the historical report layout, where a group is weighted by how
    /// many distinct words it lists regardless of their frequency.
    #[default]
    ListedWords,
    /// `frequency * words_in_group / total_words`, the group's share of all
    /// word occurrences in the document.
    Occurrences,
}

/// Analysis configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Maximum number of lines per normalization batch. Never zero.
    pub task_limit: usize,
    /// Basis for the per-group "percentage per word" column.
    pub percentage_basis: PercentageBasis,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            task_limit: DEFAULT_TASK_LIMIT,
            percentage_basis: PercentageBasis::ListedWords,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a configuration that normalizes the whole document in one task.
    pub const fn sequential() -> Self {
        Self {
            task_limit: usize::MAX,
            percentage_basis: PercentageBasis::ListedWords,
        }
    }

    /// Returns a copy with the given batch size, clamped to at least one line.
    #[must_use]
    pub const fn with_task_limit(mut self, task_limit: usize) -> Self {
        self.task_limit = if task_limit == 0 { 1 } else { task_limit };
        self
    }

    /// Returns a copy using the given percentage basis.
    #[must_use]
    pub const fn with_percentage_basis(mut self, basis: PercentageBasis) -> Self {
        self.percentage_basis = basis;
        self
    }
}

/// Errors raised by the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    /// No lines were supplied.
    EmptyInput,
    /// Sanitization removed every character of the document.
    EmptyResult,
    /// A frequency bucket was produced twice while merging group results.
    DuplicateGroupKey {
        /// The occurrence count both results claimed.
        count: usize,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::EmptyInput => write!(f, "input value is invalid: no lines supplied"),
            AnalysisError::EmptyResult => {
                write!(f, "data is not valid: nothing left after sanitization")
            }
            AnalysisError::DuplicateGroupKey { count } => {
                write!(f, "attempted to assign the same frequency group twice: {}", count)
            }
        }
    }
}

impl core::error::Error for AnalysisError {}

/// Errors that can occur when loading a document from disk.
#[derive(Debug)]
pub enum DocumentError {
    /// The path does not point to an existing file.
    NotFound {
        /// The path that was checked.
        path: PathBuf,
    },
    /// The file name has no extension.
    MissingExtension {
        /// The offending path.
        path: PathBuf,
    },
    /// The extension is not one of the supported file types.
    UnsupportedExtension {
        /// The lowercased extension without its dot.
        extension: String,
    },
    /// The file exists but holds no lines.
    NoData {
        /// The empty file.
        path: PathBuf,
    },
    /// Reading the file failed.
    Io(io::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::NotFound { path } => {
                write!(f, "selected file is invalid: {}", path.display())
            }
            DocumentError::MissingExtension { path } => {
                write!(f, "failed to find extension: {}", path.display())
            }
            DocumentError::UnsupportedExtension { extension } => {
                write!(f, "invalid file type selected: .{}", extension)
            }
            DocumentError::NoData { path } => {
                write!(f, "no data found in file: {}", path.display())
            }
            DocumentError::Io(err) => write!(f, "failed to read document: {}", err),
        }
    }
}

impl core::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            DocumentError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DocumentError {
    fn from(err: io::Error) -> Self {
        DocumentError::Io(err)
    }
}

/// Number formatting used by the report.
///
/// Counts are grouped in thousands with commas and percentages are printed
/// with three decimals, falling back to `<0.001%` for tiny shares.
pub mod format {
    /// Smallest percentage printed as a number.
    pub const PERCENT_FLOOR: f64 = 0.001;

    /// Formats an integer with comma thousands separators.
    ///
    /// # Example
    /// ```
    /// use wordtally_types::format::group_thousands;
    ///
    /// assert_eq!(group_thousands(1234567), "1,234,567");
    /// assert_eq!(group_thousands(12), "12");
    /// ```
    pub fn group_thousands(n: u64) -> String {
        let s = n.to_string();
        let mut out = String::with_capacity(s.len() + s.len() / 3);

        for (i, ch) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out.chars().rev().collect()
    }

    /// Formats a percentage (already scaled to 0..=100).
    ///
    /// # Example
    /// ```
    /// use wordtally_types::format::format_percentage;
    ///
    /// assert_eq!(format_percentage(50.0), "50.000%");
    /// assert_eq!(format_percentage(0.0004), "<0.001%");
    /// ```
    pub fn format_percentage(value: f64) -> String {
        if value < PERCENT_FLOOR {
            "<0.001%".to_string()
        } else {
            format!("{:.3}%", value)
        }
    }

    /// Computes `100 * part / whole`, returning 0 for an empty whole.
    #[inline]
    pub fn percentage(part: usize, whole: usize) -> f64 {
        if whole == 0 {
            return 0.0;
        }
        part as f64 / whole as f64 * 100.0
    }
}
