//! Compressed prefix trie over byte strings.
//!
//! This module provides the core structure:
//!
//! - [`store`] - node arena, label arena, subtree length bounds
//! - [`mutate`] - compression-preserving insert / remove
//! - [`iter`] - lexicographic entry iteration
//!
//! The search entry points live in [`crate::search`].

pub(crate) mod iter;
pub(crate) mod mutate;
pub(crate) mod store;

pub use iter::Entries;

use crate::error::TrieError;
use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use store::{NodeId, NodeStore, ROOT};

/// Above this many input entries, bulk construction sorts in parallel
const PAR_SORT_THRESHOLD: usize = 100_000;

/// Construction-time options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Permit insertions and deletions during fuzzy search; when
    /// false, the budget only buys substitutions
    pub allow_indels: bool,
    /// Reject `add`/`remove` after construction
    pub immutable: bool,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            allow_indels: false,
            immutable: true,
        }
    }
}

/// Size and shape counters, mostly for the CLI and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    /// Stored entries
    pub entry_count: usize,
    /// Live nodes, root included
    pub node_count: usize,
    /// Label arena size, slack included
    pub label_bytes: usize,
    /// Label bytes referenced by live nodes
    pub live_label_bytes: usize,
    /// Longest root-to-leaf chain, in nodes
    pub max_depth: usize,
}

/// A path-compressed trie with budget-limited fuzzy lookup.
///
/// Stores a set of byte strings (duplicates collapse) and answers
/// exact, fuzzy, substring and longest-prefix queries over them. All
/// queries are read-only; concurrent readers are safe as long as no
/// mutator runs.
///
/// # Examples
///
/// ```ignore
/// use ftrie::{PrefixTrie, TrieConfig};
///
/// let trie = PrefixTrie::new(
///     ["ACGT", "ACGG", "ACGC"],
///     TrieConfig { allow_indels: true, ..Default::default() },
/// );
/// let hit = trie.search(b"ACGA", 1).unwrap();
/// assert_eq!((hit.entry.as_slice(), hit.distance), (&b"ACGC"[..], 1));
/// ```
#[derive(Debug)]
pub struct PrefixTrie {
    pub(crate) store: NodeStore,
    pub(crate) entries: AHashSet<Box<[u8]>>,
    pub(crate) config: TrieConfig,
}

impl PrefixTrie {
    /// Build a trie from `entries` with the given options.
    ///
    /// Inputs are deduplicated; the empty string is a valid entry and
    /// marks the root terminal. Construction sorts the input (in
    /// parallel for large batches) so the resulting structure is
    /// independent of input order.
    pub fn new<I, S>(entries: I, config: TrieConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut sorted: Vec<Box<[u8]>> = entries
            .into_iter()
            .map(|e| Box::<[u8]>::from(e.as_ref()))
            .collect();
        if sorted.len() > PAR_SORT_THRESHOLD {
            sorted.par_sort_unstable();
        } else {
            sorted.sort_unstable();
        }
        sorted.dedup();

        let mut store = NodeStore::new();
        let mut path = Vec::new();
        for entry in &sorted {
            mutate::insert_entry(&mut store, entry, &mut path);
        }
        store.rebuild_tails();

        Self {
            store,
            entries: sorted.into_iter().collect(),
            config,
        }
    }

    /// Build with the default configuration (substitutions only,
    /// immutable)
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self::new(entries, TrieConfig::default())
    }

    /// The configuration this trie was built with
    pub fn config(&self) -> TrieConfig {
        self.config
    }

    /// True if `entry` is stored. O(1) expected; never walks the tree.
    pub fn contains(&self, entry: &[u8]) -> bool {
        self.entries.contains(entry)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `entry`. Idempotent; fails on an immutable trie.
    pub fn add(&mut self, entry: &[u8]) -> Result<(), TrieError> {
        if self.config.immutable {
            return Err(TrieError::ImmutableViolation);
        }
        if self.entries.contains(entry) {
            return Ok(());
        }
        let mut path = Vec::new();
        mutate::insert_entry(&mut self.store, entry, &mut path);
        for &id in path.iter().rev() {
            self.store.recompute_tail(id);
        }
        self.entries.insert(entry.into());
        Ok(())
    }

    /// Remove `entry`. Idempotent; fails on an immutable trie.
    pub fn remove(&mut self, entry: &[u8]) -> Result<(), TrieError> {
        if self.config.immutable {
            return Err(TrieError::ImmutableViolation);
        }
        if !self.entries.contains(entry) {
            return Ok(());
        }
        let mut path = Vec::new();
        mutate::remove_entry(&mut self.store, entry, &mut path);
        self.entries.remove(entry);
        Ok(())
    }

    /// Gather size and shape counters
    pub fn stats(&self) -> TrieStats {
        let mut live_label_bytes = 0;
        let mut max_depth = 0;
        // Depth-first walk without recursion; depth counts nodes below
        // the root, which equals the stack height at push time.
        let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
        while let Some(top) = stack.last_mut() {
            let (id, cursor) = *top;
            match self.store.node(id).children.get(cursor) {
                Some(&(_, child)) => {
                    top.1 += 1;
                    live_label_bytes += self.store.node(child).label_len();
                    max_depth = max_depth.max(stack.len());
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
        TrieStats {
            entry_count: self.entries.len(),
            node_count: self.store.live_nodes(),
            label_bytes: self.store.label_bytes(),
            live_label_bytes,
            max_depth,
        }
    }

    /// Check every structural invariant, panicking with a description
    /// on the first violation. Test and fuzzing hook; not part of the
    /// stable API.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let mut seen_entries: Vec<Vec<u8>> = Vec::new();
        let mut visited = 1usize;
        let mut path: Vec<u8> = Vec::new();
        self.check_node(ROOT, &mut path, &mut seen_entries, &mut visited);

        assert_eq!(
            visited,
            self.store.live_nodes(),
            "arena holds nodes unreachable from the root"
        );
        assert_eq!(
            seen_entries.len(),
            self.entries.len(),
            "entry set and tree disagree on entry count"
        );
        for entry in &seen_entries {
            assert!(
                self.entries.contains(entry.as_slice()),
                "tree yields entry missing from the entry set: {entry:?}"
            );
        }
    }

    fn check_node(
        &self,
        id: NodeId,
        path: &mut Vec<u8>,
        entries: &mut Vec<Vec<u8>>,
        visited: &mut usize,
    ) {
        let node = self.store.node(id);
        if id != ROOT {
            assert!(!self.store.label(id).is_empty(), "non-root node with empty label");
        }
        if node.terminal {
            entries.push(path.clone());
        } else if id != ROOT {
            assert!(
                node.children.len() >= 2,
                "non-terminal interior node with {} child(ren): not path-compressed",
                node.children.len()
            );
        }

        // Tail bounds must match a from-scratch recomputation
        let own = node.label_len() as u32;
        let mut min_tail = if node.terminal { own } else { u32::MAX };
        let mut max_tail = if node.terminal { own } else { 0 };

        let mut prev_first: Option<u8> = None;
        for &(first, child) in &node.children {
            if let Some(p) = prev_first {
                assert!(p < first, "child table out of order or duplicated first byte");
            }
            prev_first = Some(first);
            assert_eq!(
                self.store.label(child)[0],
                first,
                "child table key disagrees with child label"
            );

            *visited += 1;
            path.extend_from_slice(self.store.label(child));
            self.check_node(child, path, entries, visited);
            path.truncate(path.len() - self.store.label(child).len());

            let c = self.store.node(child);
            assert_ne!(c.min_tail, u32::MAX, "subtree without a terminal survived");
            min_tail = min_tail.min(own + c.min_tail);
            max_tail = max_tail.max(own + c.max_tail);
        }

        assert_eq!(node.min_tail, min_tail, "stale min_tail on node {id}");
        assert_eq!(node.max_tail, max_tail, "stale max_tail on node {id}");
    }
}
