//! Frequency analysis.
//!
//! Counts word occurrences and buckets words by their exact count. One pass
//! over the table partitions the words by count; each partition then becomes a
//! group in its own rayon task, and the groups are merged into
//! [`FrequencyGroups`] in a single-threaded reduction. Tasks never touch the
//! shared container, so two writers can only collide on a key through a logic
//! error, which the merge reports and skips.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, error};
use wordtally_types::AnalysisError;

/// Words of one group. Most high-frequency buckets hold only a handful of words.
pub type GroupWords<'a> = SmallVec<[&'a str; 4]>;

/// Word → occurrence count.
///
/// Iteration follows first appearance in the word sequence. That order is
/// deterministic but carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable<'a> {
    entries: Vec<(&'a str, usize)>,
    index: FxHashMap<&'a str, usize>,
}

impl<'a> FrequencyTable<'a> {
    /// Counts every word of `words`.
    pub fn from_words(words: &[&'a str]) -> Self {
        let mut table = Self {
            entries: Vec::new(),
            index: FxHashMap::with_capacity_and_hasher(words.len() / 4, Default::default()),
        };

        for &word in words {
            match table.index.get(word) {
                Some(&slot) => table.entries[slot].1 += 1,
                None => {
                    table.index.insert(word, table.entries.len());
                    table.entries.push((word, 1));
                }
            }
        }

        table
    }

    /// Number of distinct words.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no word was counted.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence count of `word`, if present.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.index
            .get(word)
            .map(|&slot| self.entries[slot].1)
    }

    /// Iterates `(word, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Partitions the words by count in a single pass, highest count first.
    ///
    /// Words keep their first-appearance order inside each partition.
    pub fn partitions(&self) -> Vec<(usize, GroupWords<'a>)> {
        let mut slots: FxHashMap<usize, usize> = FxHashMap::default();
        let mut parts: Vec<(usize, GroupWords<'a>)> = Vec::new();

        for &(word, count) in &self.entries {
            let slot = *slots.entry(count).or_insert_with(|| {
                parts.push((count, GroupWords::new()));
                parts.len() - 1
            });
            parts[slot].1.push(word);
        }

        parts.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        parts
    }
}

/// All distinct words sharing one occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyGroup<'a> {
    /// Occurrence count shared by every word of the group.
    pub count: usize,
    /// The words, each listed once.
    pub words: GroupWords<'a>,
}

impl FrequencyGroup<'_> {
    /// Number of words listed in the group.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the group lists no word.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total occurrences the group accounts for (`count * len`).
    #[inline(always)]
    pub fn occurrences(&self) -> usize {
        self.count * self.words.len()
    }
}

/// Frequency groups kept in strictly descending count order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyGroups<'a> {
    groups: Vec<FrequencyGroup<'a>>,
}

impl<'a> FrequencyGroups<'a> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Inserts `group` at its sorted position.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DuplicateGroupKey` if a group with the same
    /// count is already present. The existing group is left untouched.
    pub fn insert(&mut self, group: FrequencyGroup<'a>) -> Result<(), AnalysisError> {
        match self
            .groups
            .binary_search_by(|probe| group.count.cmp(&probe.count))
        {
            Ok(_) => Err(AnalysisError::DuplicateGroupKey { count: group.count }),
            Err(pos) => {
                self.groups.insert(pos, group);
                Ok(())
            }
        }
    }

    /// Group for `count`, if any word occurs exactly that often.
    pub fn get(&self, count: usize) -> Option<&FrequencyGroup<'a>> {
        self.groups
            .binary_search_by(|probe| count.cmp(&probe.count))
            .ok()
            .map(|idx| &self.groups[idx])
    }

    /// Number of groups.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates groups from the highest count down.
    pub fn iter(&self) -> core::slice::Iter<'_, FrequencyGroup<'a>> {
        self.groups.iter()
    }

    /// Sum of words listed across all groups.
    pub fn listed_words(&self) -> usize {
        self.groups.iter().map(FrequencyGroup::len).sum()
    }
}

impl<'g, 'a> IntoIterator for &'g FrequencyGroups<'a> {
    type Item = &'g FrequencyGroup<'a>;
    type IntoIter = core::slice::Iter<'g, FrequencyGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Result of [`group`].
#[derive(Debug, Clone, Default)]
pub struct FrequencyAnalysis<'a> {
    /// Per-word counts.
    pub table: FrequencyTable<'a>,
    /// Words bucketed by count, highest first.
    pub groups: FrequencyGroups<'a>,
    /// Number of distinct words.
    pub unique_count: usize,
}

/// Counts `words` and buckets them by occurrence count.
///
/// # Example
///
/// ```
/// use wordtally_core::analyzer::frequency::group;
///
/// let analysis = group(&["a", "a", "a", "b"]);
/// assert_eq!(analysis.unique_count, 2);
///
/// let counts: Vec<usize> = analysis.groups.iter().map(|g| g.count).collect();
/// assert_eq!(counts, [3, 1]);
/// ```
pub fn group<'a>(words: &[&'a str]) -> FrequencyAnalysis<'a> {
    let table = FrequencyTable::from_words(words);
    let unique_count = table.len();

    let buckets: Vec<FrequencyGroup<'a>> = table
        .partitions()
        .into_par_iter()
        .map(|(count, words)| FrequencyGroup { count, words })
        .collect();

    let groups = merge_groups(buckets);
    debug!(
        words = words.len(),
        unique = unique_count,
        groups = groups.len(),
        "grouped words by frequency"
    );

    FrequencyAnalysis {
        table,
        groups,
        unique_count,
    }
}

/// Single-threaded reduction of per-task results.
///
/// A duplicate key is logged and the later bucket dropped; the run goes on.
pub(crate) fn merge_groups<'a, I>(buckets: I) -> FrequencyGroups<'a>
where
    I: IntoIterator<Item = FrequencyGroup<'a>>,
{
    let mut groups = FrequencyGroups::new();
    for bucket in buckets {
        if let Err(err) = groups.insert(bucket) {
            error!(error = %err, "skipping conflicting frequency group");
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn counts_occurrences() {
        let table = FrequencyTable::from_words(&["hello", "world", "hello", "world"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("hello"), Some(2));
        assert_eq!(table.get("world"), Some(2));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn table_keeps_first_appearance_order() {
        let table = FrequencyTable::from_words(&["b", "a", "b", "c"]);
        let order: Vec<&str> = table.iter().map(|(w, _)| w).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn partitions_descending_in_one_pass() {
        let table = FrequencyTable::from_words(&["a", "b", "b", "c", "c", "d", "d", "d", "e"]);
        let parts = table.partitions();

        let counts: Vec<usize> = parts.iter().map(|(c, _)| *c).collect();
        assert_eq!(counts, [3, 2, 1]);
        assert_eq!(parts[0].1.as_slice(), ["d"]);
        assert_eq!(parts[1].1.as_slice(), ["b", "c"]);
        assert_eq!(parts[2].1.as_slice(), ["a", "e"]);
    }

    #[test]
    fn many_distinct_words_keep_their_slots() {
        let words: Vec<String> = (0..100_000).map(|i| format!("w{i}")).collect();
        let mut refs: Vec<&str> = words.iter().map(String::as_str).collect();
        refs.push("w99999");

        let table = FrequencyTable::from_words(&refs);
        assert_eq!(table.len(), 100_000);
        assert_eq!(table.get("w0"), Some(1));
        assert_eq!(table.get("w99999"), Some(2));
        assert_eq!(table.partitions()[0].1.as_slice(), ["w99999"]);
    }

    #[test]
    fn single_shared_group() {
        let analysis = group(&["hello", "world", "hello", "world"]);
        assert_eq!(analysis.unique_count, 2);
        assert_eq!(analysis.groups.len(), 1);

        let g = analysis.groups.get(2).expect("group for count 2");
        let mut words = g.words.to_vec();
        words.sort_unstable();
        assert_eq!(words, ["hello", "world"]);
        assert_eq!(g.occurrences(), 4);
    }

    #[test]
    fn groups_in_descending_order() {
        let analysis = group(&["a", "a", "a", "b"]);
        let keys: Vec<usize> = analysis.groups.iter().map(|g| g.count).collect();
        assert_eq!(keys, [3, 1]);
        assert_eq!(analysis.groups.get(3).unwrap().words.as_slice(), ["a"]);
        assert_eq!(analysis.groups.get(1).unwrap().words.as_slice(), ["b"]);
    }

    #[test]
    fn every_word_in_exactly_one_group() {
        let words: Vec<String> = (0..500).map(|i| format!("w{}", i % 37 * (i % 5))).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let analysis = group(&refs);

        assert_eq!(analysis.groups.listed_words(), analysis.unique_count);

        let mut seen = rustc_hash::FxHashSet::default();
        for g in &analysis.groups {
            for w in &g.words {
                assert!(seen.insert(*w), "{w} listed twice");
                assert_eq!(analysis.table.get(w), Some(g.count));
            }
        }
        assert_eq!(seen.len(), analysis.table.len());

        let total: usize = analysis.groups.iter().map(FrequencyGroup::occurrences).sum();
        assert_eq!(total, refs.len());
    }

    #[test]
    fn keys_strictly_descending() {
        let words: Vec<String> = (0..200).map(|i| format!("{}", i * i % 23)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let analysis = group(&refs);
        let keys: Vec<usize> = analysis.groups.iter().map(|g| g.count).collect();
        for w in keys.windows(2) {
            assert!(w[0] > w[1], "keys not strictly descending: {keys:?}");
        }
    }

    #[test]
    fn empty_words_yield_empty_analysis() {
        let analysis = group(&[]);
        assert_eq!(analysis.unique_count, 0);
        assert!(analysis.table.is_empty());
        assert!(analysis.groups.is_empty());
    }

    #[test]
    fn unique_count_is_not_hapax_count() {
        let analysis = group(&["x", "x", "y", "z"]);
        assert_eq!(analysis.unique_count, 3);
        assert_eq!(analysis.groups.get(1).unwrap().len(), 2);
    }

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut groups = FrequencyGroups::new();
        groups
            .insert(FrequencyGroup {
                count: 2,
                words: smallvec!["a"],
            })
            .unwrap();

        let err = groups
            .insert(FrequencyGroup {
                count: 2,
                words: smallvec!["b"],
            })
            .unwrap_err();
        assert_eq!(err, AnalysisError::DuplicateGroupKey { count: 2 });
        assert_eq!(groups.get(2).unwrap().words.as_slice(), ["a"]);
    }

    #[test]
    fn merge_skips_conflicts_and_sorts() {
        let buckets = vec![
            FrequencyGroup {
                count: 1,
                words: smallvec!["c"],
            },
            FrequencyGroup {
                count: 5,
                words: smallvec!["a"],
            },
            FrequencyGroup {
                count: 1,
                words: smallvec!["d"],
            },
            FrequencyGroup {
                count: 3,
                words: smallvec!["b"],
            },
        ];

        let groups = merge_groups(buckets);
        let keys: Vec<usize> = groups.iter().map(|g| g.count).collect();
        assert_eq!(keys, [5, 3, 1]);
        assert_eq!(groups.get(1).unwrap().words.as_slice(), ["c"]);
    }
}
