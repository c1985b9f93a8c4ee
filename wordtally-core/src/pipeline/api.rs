//! Public API for running the pipeline.

use tracing::{debug, info};

use crate::analyzer::frequency::group;
use crate::analyzer::tokenizer::{line_character_count, word_count};
use crate::document::RawDocument;
use crate::pipeline::stats::AnalysisStats;
use crate::pipeline::types::{Analysis, Analyzer};
use wordtally_types::AnalysisError;

impl Analyzer {
    /// Runs normalize → tokenize → group → report over `lines`.
    ///
    /// The character total is taken from the raw lines, before sanitization.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyInput` if `lines` is empty.
    /// Returns `AnalysisError::EmptyResult` if sanitization leaves no text.
    #[inline(never)]
    pub fn analyze<S>(&self, lines: &[S]) -> Result<Analysis, AnalysisError>
    where
        S: AsRef<str> + Sync,
    {
        let total_characters = line_character_count(lines);
        let normalized = self.normalizer.normalize(lines)?;

        let (total_words, words) = word_count(normalized.as_str());
        debug!(words = total_words, "tokenized normalized text");

        let frequencies = group(words.as_slice());
        let report = self.reporter.build(
            lines.len(),
            total_words,
            frequencies.unique_count,
            total_characters,
            &frequencies.groups,
        );

        let stats = AnalysisStats {
            total_lines: lines.len(),
            total_words,
            unique_words: frequencies.unique_count,
            total_characters,
            normalized_characters: normalized.len(),
            groups: frequencies.groups.len(),
            singletons: frequencies.groups.get(1).map_or(0, |g| g.len()),
            batches: normalized.batches(),
        };
        info!(%stats, "analysis complete");

        Ok(Analysis { report, stats })
    }

    /// Analyzes a loaded document.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn analyze_document(&self, document: &RawDocument) -> Result<Analysis, AnalysisError> {
        debug!(path = %document.path().display(), "analyzing document");
        self.analyze(document.lines())
    }
}
