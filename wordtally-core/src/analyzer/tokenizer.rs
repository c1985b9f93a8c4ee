//! Word Tokenizer Module
//!
//! This module splits normalized text into words and provides the character
//! counts used by the report. It's the second stage in the pipeline, taking
//! the normalizer's output and producing the word sequence that frequency
//! analysis consumes.
//!
//! ## What It Does
//!
//! Given normalized input like `"hello world hello"`, it emits each word with
//! its position in the document:
//!
//! ```ignore
//! ("hello", 0)
//! ("world", 1)
//! ("hello", 2)
//! ```
//!
//! ## Key Features
//!
//! - **Zero Allocation**: Tokens are slices of the original string, not new allocations
//! - **Streaming**: [`Tokenizer::tokenize`] emits through a callback
//! - **Fast**: `memchr` scan for the space byte when the text has no other separators
//! - **Forgiving**: leading, trailing and repeated separators never produce empty tokens
//!
//! ## Separators
//!
//! Space, tab, newline and carriage return. The normalizer only ever emits
//! single spaces, but [`word_count`] also accepts raw text.
//!
//! ## Character Counts
//!
//! [`character_count`] counts the characters of one string;
//! [`line_character_count`] sums the characters of each line and therefore
//! never includes line terminators. It measures content, not file size.

use core::str;
use memchr::{memchr3, memchr_iter};
use tracing::warn;

#[inline(always)]
const fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Ordered words of a document, borrowed from the text they were split from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSequence<'a> {
    words: Vec<&'a str>,
}

impl<'a> WordSequence<'a> {
    /// Number of words.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if there are no words.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in document order.
    #[inline(always)]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.words
    }

    /// Iterates the words in document order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.words.iter().copied()
    }
}

impl<'a> FromIterator<&'a str> for WordSequence<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

/// Streaming tokenizer - splits text into words.
///
/// Tokens are not copied; they're slices (`&str`) into the input string. The
/// position passed to the callback is the word's zero-based index.
///
/// ## Example
///
/// ```
/// use wordtally_core::analyzer::tokenizer::Tokenizer;
///
/// let mut count = 0;
/// Tokenizer::new().tokenize("  hello world foo ", |_text, _pos| {
///     count += 1;
/// });
///
/// assert_eq!(count, 3);
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes `text` and emits `(word, position)` for every word.
    #[inline(always)]
    #[allow(clippy::needless_lifetimes)]
    pub fn tokenize<'n, F>(&self, text: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, usize),
    {
        let bytes = text.as_bytes();
        let mut start = 0usize;
        let mut pos = 0usize;

        if memchr3(b'\t', b'\n', b'\r', bytes).is_none() {
            for i in memchr_iter(b' ', bytes) {
                emit_span(bytes, start, i, &mut pos, &mut emit);
                start = i + 1;
            }
        } else {
            for (i, &b) in bytes.iter().enumerate() {
                if is_separator(b) {
                    emit_span(bytes, start, i, &mut pos, &mut emit);
                    start = i + 1;
                }
            }
        }

        emit_span(bytes, start, bytes.len(), &mut pos, &mut emit);
    }
}

#[inline(always)]
fn emit_span<'n, F>(bytes: &'n [u8], start: usize, end: usize, pos: &mut usize, emit: &mut F)
where
    F: FnMut(&'n str, usize),
{
    if start < end {
        // SAFETY: `bytes` comes from a `&str` and every separator is a single
        // ASCII byte, never a continuation byte, so `bytes[start..end]` is a
        // valid UTF-8 subslice.
        let word = unsafe { str::from_utf8_unchecked(&bytes[start..end]) };
        emit(word, *pos);
        *pos += 1;
    }
}

/// Splits `text` into words and returns `(count, words)`.
///
/// Empty text yields `(0, [])`. That is not an error, but it is logged since
/// callers are expected to check for a zero count before using the result.
///
/// # Example
///
/// ```
/// use wordtally_core::analyzer::tokenizer::word_count;
///
/// let (count, words) = word_count(" a\tb  c\r\n");
/// assert_eq!(count, 3);
/// assert_eq!(words.as_slice(), &["a", "b", "c"]);
/// ```
pub fn word_count(text: &str) -> (usize, WordSequence<'_>) {
    let trimmed = text.trim_matches(|c: char| c.is_ascii() && is_separator(c as u8));
    if trimmed.is_empty() {
        warn!("word count requested on empty text");
        return (0, WordSequence::default());
    }

    let mut words = Vec::with_capacity(trimmed.len() / 5 + 1);
    Tokenizer::new().tokenize(trimmed, |word, _| words.push(word));

    (words.len(), WordSequence { words })
}

/// Number of characters in `text`.
#[inline]
pub fn character_count(text: &str) -> usize {
    text.chars().count()
}

/// Sum of the character counts of every line, excluding line terminators.
pub fn line_character_count<S: AsRef<str>>(lines: &[S]) -> usize {
    lines.iter().map(|line| character_count(line.as_ref())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(&str, usize)> {
        let mut out = Vec::new();
        Tokenizer::new().tokenize(input, |text, pos| out.push((text, pos)));
        out
    }

    #[test]
    fn single_word() {
        let out = collect("hello");
        assert_eq!(out, vec![("hello", 0)]);
    }

    #[test]
    fn two_words() {
        let out = collect("hello world");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].0, "hello");
        assert_eq!(out[1].0, "world");
    }

    #[test]
    fn positions_are_sequential() {
        let out = collect("the quick brown fox");
        for (i, (_, pos)) in out.iter().enumerate() {
            assert_eq!(*pos, i);
        }
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("   ").is_empty());
    }

    #[test]
    fn mixed_separators() {
        let out = collect("a\tb\nc\rd e");
        let words: Vec<&str> = out.iter().map(|(w, _)| *w).collect();
        assert_eq!(words, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn repeated_separators_skip_empty_tokens() {
        let out = collect("a  \t b");
        assert_eq!(out, vec![("a", 0), ("b", 1)]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        Tokenizer::new().tokenize(&input, |text, _| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn non_ascii_words_kept_whole() {
        let out = collect("café über");
        assert_eq!(out[0].0, "café");
        assert_eq!(out[1].0, "über");
    }

    #[test]
    fn word_count_on_normalized_text() {
        let (count, words) = word_count("hello world hello world");
        assert_eq!(count, 4);
        assert_eq!(words.len(), 4);
        assert_eq!(words.as_slice(), &["hello", "world", "hello", "world"]);
    }

    #[test]
    fn word_count_trims_before_split() {
        let (count, words) = word_count("\r\n  padded words \t");
        assert_eq!(count, 2);
        assert_eq!(words.iter().collect::<Vec<_>>(), ["padded", "words"]);
    }

    #[test]
    fn word_count_empty_is_zero() {
        let (count, words) = word_count("");
        assert_eq!(count, 0);
        assert!(words.is_empty());

        let (count, _) = word_count(" \t\n");
        assert_eq!(count, 0);
    }

    #[test]
    fn word_count_is_idempotent() {
        let text = "one two three two one";
        assert_eq!(word_count(text), word_count(text));
    }

    #[test]
    fn character_count_counts_chars_not_bytes() {
        assert_eq!(character_count(""), 0);
        assert_eq!(character_count("hello"), 5);
        assert_eq!(character_count("café"), 4);
    }

    #[test]
    fn line_character_count_excludes_terminators() {
        let lines = ["Hello, world!", "hello World"];
        assert_eq!(line_character_count(&lines), 13 + 11);

        let empty: [&str; 0] = [];
        assert_eq!(line_character_count(&empty), 0);

        let owned = vec![String::from("ab"), String::new(), String::from("c")];
        assert_eq!(line_character_count(&owned), 3);
    }

    #[test]
    fn word_sequence_from_iter() {
        let seq: WordSequence<'_> = ["x", "y"].into_iter().collect();
        assert_eq!(seq.len(), 2);
        assert!(!seq.is_empty());
    }
}
