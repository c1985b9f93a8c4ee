//! End-to-end analysis pipeline.
//!
//! Normalizer → Tokenizer → FrequencyAnalyzer → ReportBuilder, wired together
//! by a configured [`Analyzer`].
//!
//! Threading:
//! - [`Analyzer`] is `Copy` and holds configuration only. Normalization
//!   batches and frequency buckets run on rayon's global pool; each stage
//!   joins its tasks before the next one starts.

mod api;
mod stats;
mod types;

pub use stats::AnalysisStats;
pub use types::{Analysis, Analyzer};

#[cfg(test)]
mod tests {
    use super::*;
    use wordtally_types::{AnalysisError, AnalyzerConfig, PercentageBasis};

    #[test]
    fn hello_world_example() {
        let analysis = Analyzer::new()
            .analyze(&["Hello, world!", "hello World"])
            .expect("should analyze");

        let stats = analysis.stats;
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.unique_words, 2);
        assert_eq!(stats.total_characters, 24);
        assert_eq!(stats.groups, 1);
        assert_eq!(stats.singletons, 0);

        let report = analysis.report;
        assert_eq!(report.len(), 5);
        let block = &report.group_sections()[0];
        assert!(block.contains("Total entries: (2)"));
        assert!(block.contains("Percentage Per Word: (50.000%)"));
        assert!(block.contains("Total Unique Word Percentage: (100.000%)"));
    }

    #[test]
    fn single_line_example() {
        let analysis = Analyzer::new().analyze(&["a a a b"]).expect("should analyze");
        assert_eq!(analysis.stats.total_words, 4);
        assert_eq!(analysis.stats.unique_words, 2);
        assert_eq!(analysis.stats.singletons, 1);

        let blocks = analysis.report.group_sections();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Total entries: (3)"));
        assert!(blocks[0].ends_with("(a)"));
        assert!(blocks[1].contains("Total entries: (Once)"));
        assert!(blocks[1].ends_with("(b)"));
    }

    #[test]
    fn empty_input_produces_no_report() {
        let lines: [&str; 0] = [];
        let err = Analyzer::new().analyze(&lines).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyInput);
    }

    #[test]
    fn punctuation_only_input_fails() {
        let err = Analyzer::new().analyze(&["...", "!?"]).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyResult);
    }

    #[test]
    fn report_is_batch_size_invariant() {
        let lines: Vec<String> = (0..2_000)
            .map(|i| format!("Line {}: the {} fox, jumps over {}!", i, i % 13, i % 7))
            .collect();

        let one = Analyzer::with_config(AnalyzerConfig::default().with_task_limit(1))
            .analyze(&lines)
            .unwrap();
        let sequential = Analyzer::with_config(AnalyzerConfig::sequential())
            .analyze(&lines)
            .unwrap();
        let default = Analyzer::new().analyze(&lines).unwrap();

        assert_eq!(one.report, sequential.report);
        assert_eq!(default.report, sequential.report);
        assert_eq!(one.stats.batches, 2_000);
        assert_eq!(default.stats.batches, 4);
        assert_eq!(sequential.stats.batches, 1);
    }

    #[test]
    fn group_word_counts_sum_to_unique() {
        let lines = ["the cat and the hat", "a cat in a hat", "the end"];
        let analysis = Analyzer::new().analyze(&lines).unwrap();

        let listed: usize = analysis
            .report
            .group_sections()
            .iter()
            .map(|block| block.lines().last().unwrap_or("").matches('(').count())
            .sum();
        assert_eq!(listed, analysis.stats.unique_words);
    }

    #[test]
    fn groups_emitted_in_descending_order() {
        let lines = ["z y y x x x w w w w"];
        let analysis = Analyzer::new().analyze(&lines).unwrap();
        let titles: Vec<&str> = analysis
            .report
            .group_sections()
            .iter()
            .map(|block| {
                let start = block.find("Total entries: (").unwrap() + "Total entries: (".len();
                let end = start + block[start..].find(')').unwrap();
                &block[start..end]
            })
            .collect();
        assert_eq!(titles, ["4", "3", "2", "Once"]);
    }

    #[test]
    fn occurrence_basis_is_configurable() {
        let config = AnalyzerConfig::default().with_percentage_basis(PercentageBasis::Occurrences);
        let analyzer = Analyzer::with_config(config);
        assert_eq!(analyzer.config().percentage_basis, PercentageBasis::Occurrences);

        let analysis = analyzer.analyze(&["a a a b"]).unwrap();
        assert!(analysis.report.group_sections()[0].contains("Percentage Per Word: (75.000%)"));
    }

    #[test]
    fn characters_counted_before_sanitization() {
        let analysis = Analyzer::new().analyze(&["Ça va?", "   "]).unwrap();
        assert_eq!(analysis.stats.total_characters, 9);
        assert_eq!(analysis.stats.normalized_characters, "a va".len());
        assert_eq!(analysis.stats.total_words, 2);
    }

    #[test]
    fn zero_task_limit_is_clamped() {
        let analyzer = Analyzer::with_config(AnalyzerConfig {
            task_limit: 0,
            ..Default::default()
        });
        assert_eq!(analyzer.config().task_limit, 1);
        assert!(analyzer.analyze(&["ok"]).is_ok());
    }

    #[test]
    fn stats_display_and_ratios() {
        let analysis = Analyzer::with_config(AnalyzerConfig::default().with_task_limit(1))
            .analyze(&["one two", "two"])
            .unwrap();
        let stats = analysis.stats;

        let text = stats.to_string();
        assert!(text.starts_with("2 lines, 3 words (2 unique, 1 once)"));
        assert!(text.ends_with(", 2 batches"));
        assert_eq!(stats.mean_frequency(), 1.5);
        assert!(stats.retained_ratio() > 99.0);

        assert_eq!(AnalysisStats::default().mean_frequency(), 0.0);
    }

    #[test]
    fn analyzer_runs_concurrently() {
        let analyzer = Analyzer::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let lines = vec![format!("run {i} run {i}")];
                    analyzer.analyze(&lines).map(|a| a.stats.unique_words)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(2));
        }
    }
}
