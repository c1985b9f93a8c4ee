//! Pipeline types.

use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
use crate::report::{Report, ReportBuilder};
use crate::pipeline::stats::AnalysisStats;
use wordtally_types::AnalyzerConfig;

/// Configured analysis pipeline.
///
/// Holds no per-run state: every call to [`Analyzer::analyze`] threads its
/// intermediate values through the stages and returns them, so one analyzer
/// can serve concurrent runs.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    pub(crate) normalizer: TextNormalizer,
    pub(crate) reporter: ReportBuilder,
    pub(crate) config: AnalyzerConfig,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        let config = config.with_task_limit(config.task_limit);
        Self {
            normalizer: TextNormalizer::new(NormalizerConfig {
                task_limit: config.task_limit,
            }),
            reporter: ReportBuilder::new(config.percentage_basis),
            config,
        }
    }

    /// Returns the active configuration.
    #[inline(always)]
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The rendered report, ready for a writer.
    pub report: Report,
    /// The numbers behind the report.
    pub stats: AnalysisStats,
}
