#![no_main]

use ftrie::{PrefixTrie, TrieConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Split arbitrary bytes into entries and build a mutable trie.
    // Structural invariants must hold after construction and after
    // every mutation.
    let entries: Vec<&[u8]> = data.split(|&b| b == 0xFF).collect();
    let mut trie = PrefixTrie::new(
        entries.iter().copied(),
        TrieConfig {
            allow_indels: true,
            immutable: false,
        },
    );
    trie.assert_invariants();

    // Iteration must be sorted and agree with the set size
    let listed: Vec<Vec<u8>> = trie.iter().collect();
    assert_eq!(listed.len(), trie.len());
    assert!(listed.windows(2).all(|w| w[0] < w[1]));

    // Removing every other entry must keep the structure compressed
    for entry in listed.iter().step_by(2) {
        trie.remove(entry).unwrap();
    }
    trie.assert_invariants();
    assert_eq!(trie.len(), listed.len() - listed.len().div_ceil(2));
});
