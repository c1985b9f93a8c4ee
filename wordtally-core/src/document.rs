//! Document loading.
//!
//! Validates a path before the pipeline sees it: the file must exist, carry a
//! supported extension and hold at least one line. Lines are returned without
//! their terminators. Bytes that are not valid UTF-8 are replaced with U+FFFD,
//! which the normalizer drops like any other non-ASCII character.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use wordtally_types::DocumentError;

/// File types accepted by [`load`]. All of them are read as plain lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFileType {
    /// Plain text (`.txt`).
    Txt,
    /// Comma-separated values (`.csv`).
    Csv,
    /// JSON (`.json`).
    Json,
}

impl SupportedFileType {
    /// Every supported type.
    pub const ALL: [SupportedFileType; 3] = [Self::Txt, Self::Csv, Self::Json];

    /// The extension without its dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Parses a case-insensitive extension without its dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.extension().eq_ignore_ascii_case(ext))
    }

    /// Detects the type of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::MissingExtension` if the path has no extension
    /// and `DocumentError::UnsupportedExtension` if it is not recognized.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DocumentError::MissingExtension {
                path: path.to_path_buf(),
            })?;

        Self::from_extension(ext).ok_or_else(|| DocumentError::UnsupportedExtension {
            extension: ext.to_ascii_lowercase(),
        })
    }
}

/// Lines of a document as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    path: PathBuf,
    file_type: SupportedFileType,
    lines: Vec<String>,
}

impl RawDocument {
    /// Source path.
    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected file type.
    #[inline(always)]
    pub fn file_type(&self) -> SupportedFileType {
        self.file_type
    }

    /// Lines in file order.
    #[inline(always)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the document has no lines.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Validates `path` and reads it line by line.
///
/// # Errors
///
/// Returns `DocumentError::NotFound` if `path` is not an existing file, an
/// extension error from [`SupportedFileType::from_path`], `DocumentError::NoData`
/// for a file without lines, and `DocumentError::Io` if reading fails.
pub fn load(path: &Path) -> Result<RawDocument, DocumentError> {
    if !path.is_file() {
        warn!(path = %path.display(), "selected file is invalid");
        return Err(DocumentError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file_type = SupportedFileType::from_path(path)?;
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, Cow::Owned(_)) {
        warn!(path = %path.display(), "document is not valid UTF-8, replacing invalid bytes");
    }

    let text = content.strip_prefix('\u{feff}').unwrap_or(&*content);
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();

    if lines.is_empty() {
        warn!(path = %path.display(), "no data found in file");
        return Err(DocumentError::NoData {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), lines = lines.len(), ?file_type, "loaded document");
    Ok(RawDocument {
        path: path.to_path_buf(),
        file_type,
        lines,
    })
}
