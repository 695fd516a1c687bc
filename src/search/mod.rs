//! Query entry points.
//!
//! Four read-only operations share one descent engine:
//!
//! - [`PrefixTrie::search`] - best whole-string match within budget
//! - [`PrefixTrie::search_count`] - how many entries fall in budget
//! - [`PrefixTrie::search_substring`] - best windowed match in a text
//! - [`PrefixTrie::longest_prefix_match`] - longest exact prefix hit
//!
//! Exact lookups short-circuit through the entry set and never touch
//! the tree.

pub(crate) mod engine;
mod prefix;
mod substring;

pub use prefix::PrefixMatch;
pub use substring::SubstringMatch;

use crate::trie::PrefixTrie;
use engine::{Accept, Descent};

/// Result of a whole-string search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The stored entry closest to the query
    pub entry: Vec<u8>,
    /// Levenshtein distance between query and entry
    pub distance: usize,
}

impl PrefixTrie {
    /// Find the stored entry with the smallest edit distance to
    /// `query`, provided that distance is at most `budget`.
    ///
    /// Ties are broken toward the lexicographically smallest entry.
    /// Without `allow_indels` the budget buys substitutions only, so
    /// entries of a different length than the query never match.
    /// `budget = 0` is an exact-membership probe.
    pub fn search(&self, query: &[u8], budget: usize) -> Option<Match> {
        // Exact hits take the O(1) set path regardless of budget
        if self.entries.contains(query) {
            return Some(Match {
                entry: query.to_vec(),
                distance: 0,
            });
        }
        if budget == 0 || self.entries.is_empty() {
            return None;
        }
        Descent::best_match(
            &self.store,
            query,
            budget,
            self.config.allow_indels,
            Accept::WholeQuery,
        )
        .map(|m| Match {
            entry: m.entry,
            distance: m.cost,
        })
    }

    /// Count the entries whose edit distance to `query` is at most
    /// `budget`.
    pub fn search_count(&self, query: &[u8], budget: usize) -> usize {
        if budget == 0 {
            return usize::from(self.entries.contains(query));
        }
        if self.entries.is_empty() {
            return 0;
        }
        Descent::count_matches(&self.store, query, budget, self.config.allow_indels) as usize
    }
}
