//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Joins lines in parallel batches and sanitizes them
//! - **Tokenizer**: Splits normalized text into words, counts characters
//! - **Frequency**: Counts words and buckets them by occurrence count

pub mod frequency;
pub mod normalizer;
pub mod tokenizer;

pub use frequency::{group, FrequencyAnalysis, FrequencyGroup, FrequencyGroups, FrequencyTable};
pub use normalizer::{NormalizedText, NormalizerConfig, TextNormalizer};
pub use tokenizer::{character_count, line_character_count, word_count, Tokenizer, WordSequence};
