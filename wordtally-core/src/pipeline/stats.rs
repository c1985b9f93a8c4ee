//! Statistics and AnalysisStats.

use wordtally_types::format::{group_thousands, percentage};

/// A snapshot of one run's numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Number of input lines.
    pub total_lines: usize,
    /// Number of words after normalization.
    pub total_words: usize,
    /// Number of distinct words.
    pub unique_words: usize,
    /// Characters across all raw lines, excluding line terminators.
    pub total_characters: usize,
    /// Length of the normalized text.
    pub normalized_characters: usize,
    /// Number of frequency groups.
    pub groups: usize,
    /// Number of words that occur exactly once.
    pub singletons: usize,
    /// Number of normalization batches.
    pub batches: usize,
}

impl AnalysisStats {
    /// Share of the raw characters that survived sanitization, in percent.
    pub fn retained_ratio(&self) -> f64 {
        percentage(self.normalized_characters, self.total_characters)
    }

    /// Average number of occurrences per distinct word.
    pub fn mean_frequency(&self) -> f64 {
        if self.unique_words == 0 {
            return 0.0;
        }
        self.total_words as f64 / self.unique_words as f64
    }
}

impl core::fmt::Display for AnalysisStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} lines, {} words ({} unique, {} once), {} chars, {} groups",
            group_thousands(self.total_lines as u64),
            group_thousands(self.total_words as u64),
            group_thousands(self.unique_words as u64),
            group_thousands(self.singletons as u64),
            group_thousands(self.total_characters as u64),
            self.groups
        )?;

        if self.batches > 1 {
            write!(f, ", {} batches", self.batches)?;
        }

        Ok(())
    }
}
