//! # ftrie - fuzzy prefix trie
//!
//! A path-compressed trie over byte strings with budget-limited fuzzy
//! lookup: given a query and an edit budget, find the stored entry at
//! the smallest Levenshtein distance within that budget.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`trie`] - the compressed structure: node arena, construction,
//!   mutation, iteration
//! - [`search`] - exact, fuzzy, substring and longest-prefix queries
//! - [`compare`] - the widened byte-range comparison primitive
//! - [`snapshot`] - single-file binary persistence
//! - [`error`] - typed errors for contract violations
//!
//! ## Quick Start
//!
//! ```ignore
//! use ftrie::{PrefixTrie, TrieConfig};
//!
//! let trie = PrefixTrie::new(
//!     ["ACGT", "ACGG", "ACGC"],
//!     TrieConfig { allow_indels: true, ..Default::default() },
//! );
//!
//! // Exact hit, O(|query|)
//! assert!(trie.contains(b"ACGT"));
//!
//! // One edit of slack: substitutions, insertions and deletions
//! let hit = trie.search(b"ACGA", 1).unwrap();
//! assert_eq!(hit.distance, 1);
//!
//! // Where does an entry (approximately) occur inside a longer text?
//! let win = trie.search_substring(b"ttACGTtt", 0).unwrap();
//! assert_eq!((win.start, win.end), (2, 6));
//! ```
//!
//! ## Performance
//!
//! Edges carry multi-byte labels (path compression), so exact descent
//! compares whole label runs with 16-byte wide loads instead of one
//! node per byte. The fuzzy search walks the same structure with a
//! budgeted branch-and-bound; per-subtree entry-length bounds prune
//! branches whose length mismatch already exceeds the remaining
//! budget.

pub mod compare;
pub mod error;
pub mod search;
pub mod snapshot;
pub mod trie;

pub use error::TrieError;
pub use search::{Match, PrefixMatch, SubstringMatch};
pub use trie::{Entries, PrefixTrie, TrieConfig, TrieStats};
