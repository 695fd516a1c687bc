//! Longest-prefix match: the longest stored entry that begins a
//! suffix of a text.

use crate::compare::common_prefix_len;
use crate::error::TrieError;
use crate::trie::store::ROOT;
use crate::trie::PrefixTrie;

/// Result of a longest-prefix match: `entry` equals
/// `text[start..start + length]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    /// The matched entry
    pub entry: Vec<u8>,
    /// Offset in the text where the entry begins
    pub start: usize,
    /// Entry length in bytes
    pub length: usize,
}

impl PrefixTrie {
    /// Find the longest entry that is a prefix of some suffix
    /// `text[start..]`, requiring at least `min_match_length` bytes.
    ///
    /// Ties on length go to the smallest start. Returns
    /// [`TrieError::InvalidArgument`] when `min_match_length` is zero;
    /// `Ok(None)` when nothing long enough matches.
    pub fn longest_prefix_match(
        &self,
        text: &[u8],
        min_match_length: usize,
    ) -> Result<Option<PrefixMatch>, TrieError> {
        if min_match_length == 0 {
            return Err(TrieError::invalid_argument(
                "min_match_length must be at least 1",
            ));
        }
        if self.entries.is_empty() {
            return Ok(None);
        }

        let mut best: Option<(usize, usize)> = None; // (start, length)
        for start in 0..text.len() {
            // A longer match than the current best cannot fit in the
            // remaining text.
            if let Some((_, len)) = best {
                if text.len() - start <= len {
                    break;
                }
            }
            if let Some(len) = self.deepest_terminal(&text[start..]) {
                if len >= min_match_length && best.map_or(true, |(_, b)| len > b) {
                    best = Some((start, len));
                }
            }
        }

        Ok(best.map(|(start, length)| PrefixMatch {
            entry: text[start..start + length].to_vec(),
            start,
            length,
        }))
    }

    /// Depth in bytes of the deepest terminal reached by exact descent
    /// along `text`.
    fn deepest_terminal(&self, text: &[u8]) -> Option<usize> {
        let mut deepest = self.store.node(ROOT).terminal.then_some(0);
        let mut node = ROOT;
        let mut pos = 0;
        while pos < text.len() {
            let Some(child) = self.store.child(node, text[pos]) else {
                break;
            };
            let label = self.store.label(child);
            if common_prefix_len(label, &text[pos..]) < label.len() {
                // The edge runs past the text or diverges from it; no
                // completed entry lies this way.
                break;
            }
            node = child;
            pos += label.len();
            if self.store.node(node).terminal {
                deepest = Some(pos);
            }
        }
        deepest
    }
}
