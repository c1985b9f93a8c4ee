use rayon::prelude::*;
use tracing::debug;
use wordtally_types::{AnalysisError, DEFAULT_TASK_LIMIT};

/// Byte → sanitized byte. `0` marks a byte that is dropped.
///
/// Digits and lowercase letters map to themselves, uppercase letters to their
/// lowercase form, the ASCII space to itself. Every other byte, including tab,
/// newline and all bytes of multi-byte UTF-8 sequences, is stripped.
const SANITIZE_TABLE: [u8; 256] = build_sanitize_table();

const fn build_sanitize_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut b = 0usize;
    while b < 256 {
        let byte = b as u8;
        table[b] = match byte {
            b'0'..=b'9' | b'a'..=b'z' | b' ' => byte,
            b'A'..=b'Z' => byte + 32,
            _ => 0,
        };
        b += 1;
    }
    table
}

/// Configuration options for text normalization.
#[derive(Clone, Copy, Debug)]
pub struct NormalizerConfig {
    /// Maximum number of lines sanitized by one parallel task.
    pub task_limit: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            task_limit: DEFAULT_TASK_LIMIT,
        }
    }
}

/// Normalized document text: lowercase `[a-z0-9 ]`, single spaces, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    batches: usize,
}

impl NormalizedText {
    /// Returns the normalized text.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of parallel batches the document was split into.
    #[inline(always)]
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Length in bytes (equal to characters, the text is ASCII).
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always `false` for a value produced by [`TextNormalizer::normalize`].
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Batch-parallel line normalizer.
///
/// Performs the following operations:
/// - Joins lines with a single space (no separator after the document's last line)
/// - Strips every character outside `[0-9a-zA-Z ]`
/// - Collapses runs of spaces into one
/// - Lowercases and trims the result
///
/// Lines are cut into contiguous batches of at most `task_limit` lines. Each
/// batch is sanitized on the rayon pool; results are stitched back together
/// in batch order, so the output never depends on the batch size or on
/// scheduling.
///
/// # Examples
///
/// ```
/// use wordtally_core::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
///
/// let normalizer = TextNormalizer::new(NormalizerConfig { task_limit: 1 });
/// let text = normalizer.normalize(&["Hello, world!", "hello World"]).unwrap();
/// assert_eq!(text.as_str(), "hello world hello world");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        let task_limit = config.task_limit.max(1);
        Self {
            config: NormalizerConfig { task_limit },
        }
    }

    /// Maximum lines per batch.
    #[inline(always)]
    pub fn task_limit(&self) -> usize {
        self.config.task_limit
    }

    /// Normalizes `lines` into an existing String buffer.
    ///
    /// Clears the buffer before writing. Returns the number of batches used.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyInput` when `lines` is empty and
    /// `AnalysisError::EmptyResult` when nothing survives sanitization.
    pub fn normalize_into<S>(&self, lines: &[S], out: &mut String) -> Result<usize, AnalysisError>
    where
        S: AsRef<str> + Sync,
    {
        out.clear();

        if lines.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let task_limit = self.config.task_limit;
        let last_batch = (lines.len() - 1) / task_limit;
        let batches = last_batch + 1;

        if batches == 1 {
            sanitize_batch(lines, true, out);
        } else {
            let parts: Vec<String> = lines
                .par_chunks(task_limit)
                .enumerate()
                .map(|(idx, batch)| {
                    let mut part = String::new();
                    sanitize_batch(batch, idx == last_batch, &mut part);
                    part
                })
                .collect();

            out.reserve(parts.iter().map(String::len).sum());
            for part in &parts {
                // Seam between two batches: the previous one may end in a
                // separator while this one starts with a space-led line.
                if out.ends_with(' ') && part.starts_with(' ') {
                    out.push_str(&part[1..]);
                } else {
                    out.push_str(part);
                }
            }
        }

        let trimmed = out.trim_matches(' ');
        if trimmed.is_empty() {
            out.clear();
            return Err(AnalysisError::EmptyResult);
        }
        if trimmed.len() != out.len() {
            *out = trimmed.to_string();
        }

        debug!(lines = lines.len(), batches, bytes = out.len(), "normalized document");
        Ok(batches)
    }

    /// Normalizes `lines` and returns a new [`NormalizedText`].
    ///
    /// # Errors
    ///
    /// See [`TextNormalizer::normalize_into`].
    pub fn normalize<S>(&self, lines: &[S]) -> Result<NormalizedText, AnalysisError>
    where
        S: AsRef<str> + Sync,
    {
        let mut text = String::new();
        let batches = self.normalize_into(lines, &mut text)?;
        Ok(NormalizedText { text, batches })
    }
}

/// Sanitizes one batch into `out`.
///
/// Every line is followed by a separating space unless `ends_document` is set
/// and it is the batch's final line. Runs of spaces collapse inside the batch;
/// a single leading or trailing space is kept for the seam logic.
fn sanitize_batch<S: AsRef<str>>(batch: &[S], ends_document: bool, out: &mut String) {
    out.reserve(batch.iter().map(|l| l.as_ref().len() + 1).sum());

    let mut prev_space = false;
    let last = batch.len().saturating_sub(1);

    for (i, line) in batch.iter().enumerate() {
        for &b in line.as_ref().as_bytes() {
            push_sanitized(b, &mut prev_space, out);
        }
        if !(ends_document && i == last) {
            push_sanitized(b' ', &mut prev_space, out);
        }
    }
}

#[inline(always)]
fn push_sanitized(b: u8, prev_space: &mut bool, out: &mut String) {
    let mapped = SANITIZE_TABLE[b as usize];
    match mapped {
        0 => {}
        b' ' => {
            if !*prev_space {
                out.push(' ');
                *prev_space = true;
            }
        }
        _ => {
            out.push(mapped as char);
            *prev_space = false;
        }
    }
}
