//! Word frequency analysis for text documents.
//!
//! The pipeline turns the lines of a document into a human-readable report:
//!
//! 1. [`analyzer::normalizer`] joins lines in parallel batches, strips
//!    everything outside `[0-9a-zA-Z ]`, collapses spaces and lowercases
//! 2. [`analyzer::tokenizer`] splits the result into words
//! 3. [`analyzer::frequency`] counts words and buckets them by count
//! 4. [`report`] renders summary lines and one block per bucket
//!
//! [`pipeline::Analyzer`] runs all four stages. [`document`] and [`output`]
//! are the file-system boundary around it.
//!
//! ```
//! use wordtally_core::Analyzer;
//!
//! let analysis = Analyzer::new().analyze(&["a a a b"]).unwrap();
//! assert_eq!(analysis.stats.unique_words, 2);
//! assert_eq!(analysis.report.sections()[0], "Total Lines: (1)");
//! ```

pub mod analyzer;
pub mod document;
pub mod output;
pub mod pipeline;
pub mod report;

pub use document::{load, RawDocument, SupportedFileType};
pub use output::ReportWriter;
pub use pipeline::{Analysis, AnalysisStats, Analyzer};
pub use report::{Report, ReportBuilder};
pub use wordtally_types::{AnalysisError, AnalyzerConfig, DocumentError, PercentageBasis};
