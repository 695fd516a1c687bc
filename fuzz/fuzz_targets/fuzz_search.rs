#![no_main]

use ftrie::{PrefixTrie, TrieConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the budget and edit model; the rest splits
    // into a query and the entry list.
    let Some((&control, rest)) = data.split_first() else {
        return;
    };
    let budget = (control & 0x07) as usize;
    let allow_indels = control & 0x08 != 0;

    let mut parts = rest.split(|&b| b == 0xFF);
    let query = parts.next().unwrap_or(b"");
    let entries: Vec<&[u8]> = parts.collect();

    let trie = PrefixTrie::new(
        entries.iter().copied(),
        TrieConfig {
            allow_indels,
            immutable: true,
        },
    );

    // Any reported match must be a stored entry within budget
    if let Some(hit) = trie.search(query, budget) {
        assert!(hit.distance <= budget);
        assert!(trie.contains(&hit.entry));
        if hit.distance == 0 {
            assert_eq!(hit.entry.as_slice(), query);
        }
        if !allow_indels {
            assert_eq!(hit.entry.len(), query.len());
        }
    }

    // Counting must agree with a non-counting probe on emptiness
    let count = trie.search_count(query, budget);
    assert_eq!(count > 0, trie.search(query, budget).is_some());

    // Substring hits must point at a real window
    if let Some(hit) = trie.search_substring(query, budget) {
        assert!(hit.distance <= budget);
        assert!(hit.start <= hit.end && hit.end <= query.len());
        assert!(trie.contains(&hit.entry));
    }
});
