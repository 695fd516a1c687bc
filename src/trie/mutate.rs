//! Structural mutation: compressed-preserving insert and remove.
//!
//! Both operations descend with a recorded path so the subtree length
//! bounds can be recomputed bottom-up afterwards. The compression
//! invariants are restored locally: insert splits an edge at the point
//! of divergence; remove detaches an empty leaf and merges a parent
//! left with a single child.

use crate::compare::common_prefix_len;
use crate::trie::store::{NodeId, NodeStore, ROOT};

/// Insert `entry` into the compressed tree.
///
/// `path` receives every node on the root-to-insertion-point walk,
/// deepest last, including nodes created here; the caller decides
/// whether to recompute tail bounds incrementally (single `add`) or in
/// one pass at the end (bulk construction). The entry-set bookkeeping
/// is the caller's.
pub(crate) fn insert_entry(store: &mut NodeStore, entry: &[u8], path: &mut Vec<NodeId>) {
    path.clear();
    path.push(ROOT);

    let mut node = ROOT;
    let mut pos = 0;
    loop {
        if pos == entry.len() {
            store.node_mut(node).terminal = true;
            return;
        }
        let Some(child) = store.child(node, entry[pos]) else {
            // No edge starts with the next byte: the whole remaining
            // suffix becomes one new leaf edge.
            let leaf = store.alloc(&entry[pos..], true);
            store.link(node, leaf);
            path.push(leaf);
            return;
        };

        let k = common_prefix_len(store.label(child), &entry[pos..]);
        if k == store.node(child).label_len() {
            // Edge fully consumed; keep descending
            node = child;
            pos += k;
            path.push(child);
            continue;
        }

        // Divergence inside the edge: split after the shared prefix
        let mid = store.split(node, child, k);
        path.push(mid);
        if pos + k == entry.len() {
            // The entry ends exactly at the split point
            store.node_mut(mid).terminal = true;
        } else {
            let leaf = store.alloc(&entry[pos + k..], true);
            store.link(mid, leaf);
            path.push(leaf);
        }
        return;
    }
}

/// Remove `entry` from the compressed tree.
///
/// The caller has already checked membership, so the descent cannot
/// miss. No single-child non-terminal interior node and no empty
/// label survives this call; `path` receives the surviving walk for
/// tail recomputation.
pub(crate) fn remove_entry(store: &mut NodeStore, entry: &[u8], path: &mut Vec<NodeId>) {
    path.clear();
    path.push(ROOT);

    let mut node = ROOT;
    let mut pos = 0;
    while pos < entry.len() {
        let child = store
            .child(node, entry[pos])
            .expect("entry_set and tree structure out of sync");
        let len = store.node(child).label_len();
        debug_assert_eq!(common_prefix_len(store.label(child), &entry[pos..]), len);
        node = child;
        pos += len;
        path.push(child);
    }

    debug_assert!(store.node(node).terminal);
    store.node_mut(node).terminal = false;

    // Detach the node if nothing below it leads to an entry anymore
    if node != ROOT && store.node(node).children.is_empty() {
        let parent = path[path.len() - 2];
        let first = store.label(node)[0];
        store.unlink(parent, first);
        store.recycle(node);
        path.pop();
        node = parent;
    }

    // A non-terminal interior node left with one child violates the
    // compression invariant; absorb the child.
    if node != ROOT && !store.node(node).terminal && store.node(node).children.len() == 1 {
        store.merge_with_child(node);
    }

    for &id in path.iter().rev() {
        store.recompute_tail(id);
    }
}
