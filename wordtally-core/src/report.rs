//! Report assembly.
//!
//! A report is an ordered list of text sections: four summary lines, then one
//! block per frequency group from the highest count down. Writers emit each
//! section followed by a newline.

use core::fmt;

use crate::analyzer::frequency::{FrequencyGroup, FrequencyGroups};
use wordtally_types::format::{format_percentage, group_thousands, percentage};
use wordtally_types::PercentageBasis;

/// Number of summary sections at the top of every report.
pub const SUMMARY_SECTIONS: usize = 4;

/// Finished, immutable report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    sections: Vec<String>,
}

impl Report {
    /// All sections in emission order.
    #[inline(always)]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// The four summary lines.
    pub fn summary(&self) -> &[String] {
        &self.sections[..SUMMARY_SECTIONS.min(self.sections.len())]
    }

    /// The per-group blocks.
    pub fn group_sections(&self) -> &[String] {
        &self.sections[SUMMARY_SECTIONS.min(self.sections.len())..]
    }

    /// Number of sections.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the report has no sections.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Consumes the report and returns its sections.
    pub fn into_sections(self) -> Vec<String> {
        self.sections
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section)?;
        }
        Ok(())
    }
}

/// Builds [`Report`]s.
///
/// # Example
///
/// ```
/// use wordtally_core::analyzer::frequency::group;
/// use wordtally_core::report::ReportBuilder;
///
/// let analysis = group(&["a", "a", "a", "b"]);
/// let report = ReportBuilder::default().build(1, 4, analysis.unique_count, 7, &analysis.groups);
///
/// assert_eq!(report.summary()[1], "Total Words: (4)");
/// assert!(report.group_sections()[1].contains("Total entries: (Once)"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    basis: PercentageBasis,
}

impl ReportBuilder {
    /// Creates a builder using the given percentage basis.
    pub const fn new(basis: PercentageBasis) -> Self {
        Self { basis }
    }

    /// Assembles the report.
    pub fn build(
        &self,
        total_lines: usize,
        total_words: usize,
        unique_count: usize,
        total_characters: usize,
        groups: &FrequencyGroups<'_>,
    ) -> Report {
        let mut sections = Vec::with_capacity(SUMMARY_SECTIONS + groups.len());

        sections.push(format!("Total Lines: ({})", group_thousands(total_lines as u64)));
        sections.push(format!("Total Words: ({})", group_thousands(total_words as u64)));
        sections.push(format!(
            "Total Unique Words: ({})",
            group_thousands(unique_count as u64)
        ));
        sections.push(format!(
            "Total Character Count: ({})",
            group_thousands(total_characters as u64)
        ));

        for (idx, group) in groups.iter().enumerate() {
            sections.push(self.group_section(idx + 1, group, total_words, unique_count));
        }

        Report { sections }
    }

    fn group_section(
        &self,
        index: usize,
        group: &FrequencyGroup<'_>,
        total_words: usize,
        unique_count: usize,
    ) -> String {
        let listed = group.len();
        let share = match self.basis {
            PercentageBasis::ListedWords => listed,
            PercentageBasis::Occurrences => group.occurrences(),
        };

        let title = if group.count == 1 {
            "Once".to_string()
        } else {
            group_thousands(group.count as u64)
        };

        let word_list_len: usize = group.words.iter().map(|w| w.len() + 3).sum();
        let mut words = String::with_capacity(word_list_len);
        for word in &group.words {
            words.push(' ');
            words.push('(');
            words.push_str(word);
            words.push(')');
        }

        format!(
            "\nGroup: {}\n Total entries: ({}) Percentage Per Word: ({}) Unique Word Count: ({}) Total Unique Word Percentage: ({})\n{}",
            index,
            title,
            format_percentage(percentage(share, total_words)),
            group_thousands(listed as u64),
            format_percentage(percentage(listed, unique_count)),
            words
        )
    }
}
