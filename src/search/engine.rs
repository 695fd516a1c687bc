//! Budget-limited fuzzy descent.
//!
//! The search walks edge labels byte-by-byte, tracking how much of the
//! query has been consumed and how many edits have been spent. At each
//! label position the state can branch:
//!
//! - match: query byte equals the edge byte, free
//! - substitute: consume both at the cost of one edit
//! - insert: consume the edge byte only (indel mode)
//! - delete: consume the query byte only (indel mode)
//!
//! When the bytes match, only the match move is taken: for unit-cost
//! edits, aligning equal bytes diagonally never loses to an indel
//! detour, so the other branches are redundant work.
//!
//! Branches die when the budget runs out or when the subtree length
//! bounds prove the remaining query can no longer line up with any
//! entry below (the length difference between two strings is a lower
//! bound on their edit distance).

use crate::trie::store::{NodeId, NodeStore, ROOT};
use roaring::RoaringBitmap;

/// What counts as reaching an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Accept {
    /// The whole query must be consumed (whole-string distance)
    WholeQuery,
    /// Any terminal accepts; unconsumed query is outside the window
    AnyPrefix,
}

/// Winning candidate of a best-match descent.
#[derive(Debug, Clone)]
pub(crate) struct BestMatch {
    /// Edits spent to reach the entry
    pub cost: usize,
    /// The stored entry, reconstructed from the walked labels
    pub entry: Vec<u8>,
    /// Query bytes consumed at acceptance (window length in
    /// [`Accept::AnyPrefix`] mode; the full query otherwise)
    pub consumed: usize,
}

pub(crate) struct Descent<'t> {
    store: &'t NodeStore,
    query: &'t [u8],
    budget: usize,
    allow_indels: bool,
    accept: Accept,
    /// Count mode: distinct terminal ids instead of a best candidate
    collect: Option<RoaringBitmap>,
    best: Option<BestMatch>,
    /// Labels walked so far; equals the candidate entry at acceptance
    path: Vec<u8>,
}

impl<'t> Descent<'t> {
    /// Best entry within `budget` edits of `query`, or `None`.
    ///
    /// Ties on cost are broken toward the shorter window (in
    /// [`Accept::AnyPrefix`] mode) and then the lexicographically
    /// smallest entry, so the result is independent of tree layout
    /// history.
    pub(crate) fn best_match(
        store: &'t NodeStore,
        query: &'t [u8],
        budget: usize,
        allow_indels: bool,
        accept: Accept,
    ) -> Option<BestMatch> {
        let mut descent = Descent {
            store,
            query,
            budget,
            allow_indels,
            accept,
            collect: None,
            best: None,
            path: Vec::new(),
        };
        descent.boundary(ROOT, 0, 0);
        descent.best
    }

    /// Number of distinct entries within `budget` edits of `query`.
    pub(crate) fn count_matches(
        store: &'t NodeStore,
        query: &'t [u8],
        budget: usize,
        allow_indels: bool,
    ) -> u64 {
        let mut descent = Descent {
            store,
            query,
            budget,
            allow_indels,
            accept: Accept::WholeQuery,
            collect: Some(RoaringBitmap::new()),
            best: None,
            path: Vec::new(),
        };
        descent.boundary(ROOT, 0, 0);
        descent.collect.expect("collect mode").len()
    }

    /// Budget still honored by new candidates. Once a best match is
    /// held, anything costlier can be cut; equal cost stays live for
    /// the tie-break.
    #[inline]
    fn effective_budget(&self) -> usize {
        match (&self.collect, &self.best) {
            (None, Some(best)) => self.budget.min(best.cost),
            _ => self.budget,
        }
    }

    /// True once nothing can improve on the held match
    #[inline]
    fn done(&self) -> bool {
        self.collect.is_none() && matches!(&self.best, Some(b) if b.cost == 0)
    }

    /// A terminal was reached with `cost` edits and `consumed` query
    /// bytes; record it.
    fn offer(&mut self, node: NodeId, cost: usize, consumed: usize) {
        if let Some(set) = &mut self.collect {
            set.insert(node);
            return;
        }
        let better = match &self.best {
            None => true,
            Some(best) => {
                cost < best.cost
                    || (cost == best.cost
                        && match self.accept {
                            Accept::AnyPrefix => {
                                consumed < best.consumed
                                    || (consumed == best.consumed
                                        && self.path.as_slice() < best.entry.as_slice())
                            }
                            Accept::WholeQuery => self.path.as_slice() < best.entry.as_slice(),
                        })
            }
        };
        if better {
            self.best = Some(BestMatch {
                cost,
                entry: self.path.clone(),
                consumed,
            });
        }
    }

    /// Arrived at `node` with its label fully consumed.
    fn boundary(&mut self, node: NodeId, qpos: usize, used: usize) {
        if self.store.node(node).terminal {
            match self.accept {
                Accept::WholeQuery => {
                    if qpos == self.query.len() {
                        self.offer(node, used, qpos);
                    } else if self.allow_indels {
                        // The entry ended early; the rest of the query
                        // can only be deleted.
                        let total = used + (self.query.len() - qpos);
                        if total <= self.effective_budget() {
                            self.offer(node, total, self.query.len());
                        }
                    }
                }
                Accept::AnyPrefix => self.offer(node, used, qpos),
            }
        }
        if self.done() {
            return;
        }

        let mut cursor = 0;
        while let Some(&(_, child)) = self.store.node(node).children.get(cursor) {
            cursor += 1;
            self.edge(child, 0, qpos, used);
            if self.done() {
                return;
            }
        }
    }

    /// Continue along `node`'s label from byte `i`.
    fn edge(&mut self, node: NodeId, i: usize, qpos: usize, used: usize) {
        if self.done() {
            return;
        }
        let budget = self.effective_budget();
        if used > budget {
            // A better match arrived after this state was queued
            return;
        }
        if self.pruned(node, i, qpos, budget - used) {
            return;
        }

        let n = self.store.node(node);
        if i == n.label_len() {
            self.boundary(node, qpos, used);
            return;
        }
        let edge_byte = self.store.label_byte(node, i);

        if qpos < self.query.len() && self.query[qpos] == edge_byte {
            self.path.push(edge_byte);
            self.edge(node, i + 1, qpos + 1, used);
            self.path.pop();
            return;
        }

        if used < budget {
            if qpos < self.query.len() {
                // Substitute the query byte for the edge byte
                self.path.push(edge_byte);
                self.edge(node, i + 1, qpos + 1, used + 1);
                self.path.pop();
            }
            if self.allow_indels {
                // Insert: accept the edge byte the query doesn't have
                self.path.push(edge_byte);
                self.edge(node, i + 1, qpos, used + 1);
                self.path.pop();
                // Delete: drop the query byte the entry doesn't have
                if qpos < self.query.len() {
                    self.edge(node, i, qpos + 1, used + 1);
                }
            }
        }
    }

    /// Length-bound pruning: can any terminal below still be reached
    /// within `remaining` further edits?
    #[inline]
    fn pruned(&self, node: NodeId, i: usize, qpos: usize, remaining: usize) -> bool {
        let n = self.store.node(node);
        let q_rem = self.query.len() - qpos;
        // Tail bounds are measured from the start of this label; shift
        // them to the current position.
        let min_tail = (n.min_tail as usize).saturating_sub(i);
        let max_tail = (n.max_tail as usize).saturating_sub(i);
        match (self.accept, self.allow_indels) {
            // Every reachable entry ends between min_tail and max_tail
            // bytes from here; the query has q_rem left. Length
            // difference lower-bounds the remaining edits.
            (Accept::WholeQuery, true) => {
                q_rem > max_tail + remaining || min_tail > q_rem + remaining
            }
            // Substitutions preserve length exactly
            (Accept::WholeQuery, false) => q_rem < min_tail || q_rem > max_tail,
            // The window may end early, so only a too-deep subtree
            // prunes: reaching the nearest terminal costs at least
            // (min_tail - q_rem) insertions.
            (Accept::AnyPrefix, true) => min_tail > q_rem + remaining,
            (Accept::AnyPrefix, false) => min_tail > q_rem,
        }
    }
}
