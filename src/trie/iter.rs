//! Lexicographic iteration over stored entries.
//!
//! A depth-first walk over sorted child tables yields entries in
//! lexicographic order: a terminal node is emitted before its
//! descendants, and a prefix always sorts before its extensions. The
//! walk keeps one shared path buffer and clones it only when an entry
//! is emitted.

use crate::compare::common_prefix_len;
use crate::trie::store::{NodeId, ROOT};
use crate::trie::PrefixTrie;

impl PrefixTrie {
    /// Iterate over all entries in lexicographic order.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            trie: self,
            stack: vec![(ROOT, 0)],
            path: Vec::new(),
            pending: self.store.node(ROOT).terminal,
        }
    }

    /// Iterate, in lexicographic order, over the entries that start
    /// with `prefix`.
    pub fn iter_prefix(&self, prefix: &[u8]) -> Entries<'_> {
        let empty = Entries {
            trie: self,
            stack: Vec::new(),
            path: Vec::new(),
            pending: false,
        };

        // Descend to the locus: the shallowest node whose path has
        // `prefix` as a prefix. The prefix may end mid-label.
        let mut node = ROOT;
        let mut pos = 0;
        let mut path = Vec::new();
        while pos < prefix.len() {
            let Some(child) = self.store.child(node, prefix[pos]) else {
                return empty;
            };
            let label = self.store.label(child);
            let k = common_prefix_len(label, &prefix[pos..]);
            if k < label.len() && pos + k < prefix.len() {
                // Diverged inside the edge: nothing stored below
                return empty;
            }
            path.extend_from_slice(label);
            node = child;
            pos += k;
        }

        Entries {
            trie: self,
            stack: vec![(node, 0)],
            path,
            pending: self.store.node(node).terminal,
        }
    }
}

/// Iterator over stored entries; see [`PrefixTrie::iter`].
pub struct Entries<'a> {
    trie: &'a PrefixTrie,
    /// (node, next child index); the node's label is already in `path`
    stack: Vec<(NodeId, usize)>,
    path: Vec<u8>,
    /// The current locus itself is terminal and not yet emitted
    pending: bool,
}

impl Iterator for Entries<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.pending {
            self.pending = false;
            return Some(self.path.clone());
        }

        loop {
            let &(id, cursor) = self.stack.last()?;
            match self.trie.store.node(id).children.get(cursor) {
                Some(&(_, child)) => {
                    self.stack.last_mut().unwrap().1 += 1;
                    self.path.extend_from_slice(self.trie.store.label(child));
                    self.stack.push((child, 0));
                    if self.trie.store.node(child).terminal {
                        return Some(self.path.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    let len = self.trie.store.node(id).label_len();
                    // The root (or the iter_prefix locus) keeps its
                    // path bytes; everything deeper is unwound.
                    if !self.stack.is_empty() {
                        self.path.truncate(self.path.len() - len);
                    }
                }
            }
        }
    }
}
