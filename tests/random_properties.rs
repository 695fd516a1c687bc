//! Randomized property tests against brute-force oracles.
//!
//! Every case uses a seeded xorshift generator, so failures reproduce
//! deterministically. Datasets stay small because the oracles are
//! quadratic-or-worse on purpose: they are the definition, not an
//! implementation.

use ftrie::{PrefixTrie, TrieConfig};
use std::collections::BTreeSet;

/// Deterministic xorshift64 generator
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Rng(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn bytes(&mut self, max_len: usize, alphabet: &[u8]) -> Vec<u8> {
        let len = self.below(max_len + 1);
        (0..len).map(|_| alphabet[self.below(alphabet.len())]).collect()
    }
}

/// Textbook Levenshtein DP, the definition the trie must agree with
fn levenshtein(a: &[u8], b: &[u8]) -> usize {
    let mut dp: Vec<usize> = (0..=b.len()).collect();
    for (i, &ac) in a.iter().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let tmp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = tmp;
        }
    }
    dp[b.len()]
}

/// Substitution-only distance: defined only for equal lengths
fn hamming(a: &[u8], b: &[u8]) -> Option<usize> {
    (a.len() == b.len()).then(|| a.iter().zip(b).filter(|(x, y)| x != y).count())
}

/// Distance under the trie's edit model
fn oracle_distance(a: &[u8], b: &[u8], allow_indels: bool) -> Option<usize> {
    if allow_indels {
        Some(levenshtein(a, b))
    } else {
        hamming(a, b)
    }
}

fn random_entry_set(rng: &mut Rng, count: usize, max_len: usize, alphabet: &[u8]) -> Vec<Vec<u8>> {
    (0..count).map(|_| rng.bytes(max_len, alphabet)).collect()
}

fn build(entries: &[Vec<u8>], allow_indels: bool) -> PrefixTrie {
    PrefixTrie::new(
        entries.iter().map(|e| e.as_slice()),
        TrieConfig {
            allow_indels,
            immutable: true,
        },
    )
}

#[test]
fn construction_matches_input_set() {
    let mut rng = Rng::new(0xDEC0DE);
    for round in 0..40 {
        let entries = random_entry_set(&mut rng, 30, 8, b"ab");
        let trie = build(&entries, true);
        trie.assert_invariants();

        let expected: BTreeSet<Vec<u8>> = entries.iter().cloned().collect();
        assert_eq!(trie.len(), expected.len(), "round {round}");
        let iterated: Vec<Vec<u8>> = trie.iter().collect();
        assert_eq!(
            iterated,
            expected.into_iter().collect::<Vec<_>>(),
            "iteration must equal the sorted input set (round {round})"
        );
        for entry in &entries {
            assert!(trie.contains(entry));
        }
    }
}

#[test]
fn stored_entries_search_to_themselves() {
    let mut rng = Rng::new(0xACE);
    let entries = random_entry_set(&mut rng, 60, 10, b"ACGT");
    let trie = build(&entries, true);
    for entry in &entries {
        let hit = trie.search(entry, 0).unwrap();
        assert_eq!(hit.entry, *entry);
        assert_eq!(hit.distance, 0);
    }
}

#[test]
fn search_agrees_with_oracle() {
    for allow_indels in [true, false] {
        let mut rng = Rng::new(if allow_indels { 0xF00D } else { 0xBEEF });
        for round in 0..60 {
            let entries = random_entry_set(&mut rng, 25, 7, b"abc");
            let trie = build(&entries, allow_indels);
            let query = rng.bytes(9, b"abcd");
            let budget = rng.below(4);

            // The oracle answer: smallest reachable distance, with the
            // lexicographically smallest entry at that distance.
            let dedup: BTreeSet<Vec<u8>> = entries.iter().cloned().collect();
            let best = dedup
                .iter()
                .filter_map(|e| {
                    oracle_distance(&query, e, allow_indels)
                        .filter(|&d| d <= budget)
                        .map(|d| (d, e.clone()))
                })
                .min();

            let got = trie.search(&query, budget);
            match (best, got) {
                (None, None) => {}
                (Some((d, e)), Some(hit)) => {
                    assert_eq!(
                        (hit.distance, hit.entry.clone()),
                        (d, e),
                        "indels={allow_indels} round={round} query={query:?} budget={budget}"
                    );
                }
                (expected, got) => panic!(
                    "indels={allow_indels} round={round} query={query:?} budget={budget}: \
                     expected {expected:?}, got {got:?}"
                ),
            }
        }
    }
}

#[test]
fn search_count_agrees_with_oracle() {
    for allow_indels in [true, false] {
        let mut rng = Rng::new(0xC0FFEE + u64::from(allow_indels));
        for round in 0..60 {
            let entries = random_entry_set(&mut rng, 25, 6, b"ab");
            let trie = build(&entries, allow_indels);
            let query = rng.bytes(8, b"abc");
            let budget = rng.below(4);

            let dedup: BTreeSet<Vec<u8>> = entries.iter().cloned().collect();
            let expected = dedup
                .iter()
                .filter(|e| {
                    oracle_distance(&query, e, allow_indels).is_some_and(|d| d <= budget)
                })
                .count();

            assert_eq!(
                trie.search_count(&query, budget),
                expected,
                "indels={allow_indels} round={round} query={query:?} budget={budget}"
            );
        }
    }
}

#[test]
fn substring_agrees_with_oracle() {
    let mut rng = Rng::new(0x5EED);
    for round in 0..40 {
        let entries = random_entry_set(&mut rng, 8, 5, b"ab");
        let trie = build(&entries, true);
        let text = rng.bytes(14, b"ab");
        let budget = rng.below(3);

        // Oracle: scan every (start, end) window against every entry,
        // minimizing (distance, start, width, entry).
        let dedup: BTreeSet<Vec<u8>> = entries.iter().cloned().collect();
        let mut best: Option<(usize, usize, usize, Vec<u8>)> = None;
        for start in 0..=text.len() {
            for end in start..=text.len() {
                for entry in &dedup {
                    let d = levenshtein(&text[start..end], entry);
                    if d <= budget {
                        let cand = (d, start, end - start, entry.clone());
                        if best.as_ref().map_or(true, |b| cand < *b) {
                            best = Some(cand);
                        }
                    }
                }
            }
        }
        let got = trie.search_substring(&text, budget);
        match (&best, &got) {
            (None, None) => {}
            (Some((d, start, width, entry)), Some(hit)) => {
                assert_eq!(
                    (hit.distance, hit.start, hit.end - hit.start, &hit.entry),
                    (*d, *start, *width, entry),
                    "round={round} text={text:?} budget={budget}"
                );
            }
            _ => panic!("round={round} text={text:?} budget={budget}: {best:?} vs {got:?}"),
        }
    }
}

#[test]
fn longest_prefix_agrees_with_oracle() {
    let mut rng = Rng::new(0x1DEA);
    for round in 0..60 {
        let entries = random_entry_set(&mut rng, 15, 6, b"ab");
        let trie = build(&entries, true);
        let text = rng.bytes(12, b"ab");
        let min_len = 1 + rng.below(4);

        let dedup: BTreeSet<Vec<u8>> = entries.iter().cloned().collect();
        let mut best: Option<(usize, usize)> = None; // (start, length)
        for start in 0..text.len() {
            for entry in &dedup {
                if entry.len() >= min_len
                    && text[start..].starts_with(entry)
                    && best.map_or(true, |(_, l)| entry.len() > l)
                {
                    best = Some((start, entry.len()));
                }
            }
        }

        let got = trie.longest_prefix_match(&text, min_len).unwrap();
        match (best, &got) {
            (None, None) => {}
            (Some((start, length)), Some(hit)) => {
                assert_eq!(
                    (hit.start, hit.length, hit.entry.as_slice()),
                    (start, length, &text[start..start + length]),
                    "round={round} text={text:?} min_len={min_len}"
                );
            }
            _ => panic!("round={round} text={text:?} min_len={min_len}: {best:?} vs {got:?}"),
        }
    }
}

#[test]
fn mutation_stream_tracks_reference_set() {
    let mut rng = Rng::new(0xFACADE);
    let mut trie = PrefixTrie::new(
        Vec::<&[u8]>::new(),
        TrieConfig {
            allow_indels: true,
            immutable: false,
        },
    );
    let mut reference: BTreeSet<Vec<u8>> = BTreeSet::new();

    for step in 0..400 {
        let entry = rng.bytes(6, b"abc");
        if rng.below(3) == 0 {
            trie.remove(&entry).unwrap();
            reference.remove(&entry);
        } else {
            trie.add(&entry).unwrap();
            reference.insert(entry);
        }

        if step % 20 == 0 {
            trie.assert_invariants();
        }
        assert_eq!(trie.len(), reference.len(), "step {step}");
    }

    trie.assert_invariants();
    let iterated: Vec<Vec<u8>> = trie.iter().collect();
    assert_eq!(iterated, reference.into_iter().collect::<Vec<_>>());
}

#[test]
fn add_remove_of_existing_and_absent_are_noops() {
    let mut rng = Rng::new(0xAB5E);
    let entries = random_entry_set(&mut rng, 20, 6, b"ab");
    let mut trie = PrefixTrie::new(
        entries.iter().map(|e| e.as_slice()),
        TrieConfig {
            allow_indels: false,
            immutable: false,
        },
    );

    let before_stats = trie.stats();
    let before_entries: Vec<Vec<u8>> = trie.iter().collect();

    // Re-adding present entries must change nothing
    for entry in &entries {
        trie.add(entry).unwrap();
    }
    // Removing absent entries must change nothing
    for _ in 0..20 {
        let absent = rng.bytes(9, b"xyz");
        trie.remove(&absent).unwrap();
    }

    assert_eq!(trie.stats(), before_stats);
    assert_eq!(trie.iter().collect::<Vec<_>>(), before_entries);
    trie.assert_invariants();
}

#[test]
fn rebuild_from_iteration_is_identical() {
    let mut rng = Rng::new(0x7007);
    for _ in 0..20 {
        let entries = random_entry_set(&mut rng, 40, 8, b"ACGT");
        let original = build(&entries, true);
        let rebuilt = PrefixTrie::new(original.iter(), original.config());

        assert_eq!(
            original.iter().collect::<Vec<_>>(),
            rebuilt.iter().collect::<Vec<_>>()
        );
        assert_eq!(original.stats().node_count, rebuilt.stats().node_count);
        assert_eq!(
            original.stats().live_label_bytes,
            rebuilt.stats().live_label_bytes
        );
        rebuilt.assert_invariants();
    }
}

#[test]
fn fuzzy_result_never_beats_its_own_distance_claim() {
    // The reported distance must be the true distance to the reported
    // entry, not merely a bound.
    let mut rng = Rng::new(0x90DD);
    for _ in 0..80 {
        let entries = random_entry_set(&mut rng, 30, 8, b"ACGT");
        let trie = build(&entries, true);
        let query = rng.bytes(10, b"ACGT");
        let budget = rng.below(4);

        if let Some(hit) = trie.search(&query, budget) {
            assert!(hit.distance <= budget);
            assert_eq!(levenshtein(&query, &hit.entry), hit.distance);
            assert!(trie.contains(&hit.entry));
        }
    }
}
