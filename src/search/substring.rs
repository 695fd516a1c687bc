//! Windowed search: find a region of a text that some entry matches.

use crate::search::engine::{Accept, Descent};
use crate::trie::PrefixTrie;

/// Result of a substring search: the window `text[start..end]` is
/// within `distance` edits of `entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringMatch {
    /// The stored entry matched against the window
    pub entry: Vec<u8>,
    /// Levenshtein distance between window and entry
    pub distance: usize,
    /// Window start offset in the text (inclusive)
    pub start: usize,
    /// Window end offset in the text (exclusive)
    pub end: usize,
}

impl PrefixTrie {
    /// Find a window of `text` within `budget` edits of some stored
    /// entry.
    ///
    /// Minimizes distance first, then window start, then window
    /// length; remaining ties go to the lexicographically smallest
    /// entry. Note that a stored empty entry matches the empty window
    /// at any position, so it wins every query at distance zero.
    pub fn search_substring(&self, text: &[u8], budget: usize) -> Option<SubstringMatch> {
        if self.entries.is_empty() {
            return None;
        }

        // An empty text still exposes the empty window at offset 0;
        // any other text never benefits from the trailing empty
        // window, since the same candidates exist at offset 0.
        let mut best: Option<SubstringMatch> = None;
        for start in 0..text.len().max(1) {
            let found = Descent::best_match(
                &self.store,
                &text[start..],
                budget,
                self.config.allow_indels,
                Accept::AnyPrefix,
            );
            if let Some(m) = found {
                // Later starts only win by strictly beating the
                // distance; equal distance keeps the earlier window.
                if best.as_ref().map_or(true, |b| m.cost < b.distance) {
                    let zero = m.cost == 0;
                    best = Some(SubstringMatch {
                        entry: m.entry,
                        distance: m.cost,
                        start,
                        end: start + m.consumed,
                    });
                    if zero {
                        break;
                    }
                }
            }
        }
        best
    }
}
