//! Single-file binary snapshots.
//!
//! The compressed structure is cheap to rebuild, so a snapshot stores
//! only what cannot be derived: the configuration flags and the sorted
//! entry list. Layout, all integers little-endian:
//!
//! ```text
//! magic      u32   "FTRI"
//! version    u32
//! flags      u8    bit 0 = allow_indels, bit 1 = immutable
//! count      u64   number of entries
//! entries    count * (len: u32, bytes: [u8; len]), sorted
//! ```

use crate::trie::{PrefixTrie, TrieConfig};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

const MAGIC: u32 = u32::from_le_bytes(*b"FTRI");
const VERSION: u32 = 1;

const FLAG_ALLOW_INDELS: u8 = 1 << 0;
const FLAG_IMMUTABLE: u8 = 1 << 1;

/// Write `trie` to `path`, replacing any existing file.
pub fn save(trie: &PrefixTrie, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create snapshot {}", path.display()))?;
    let mut w = BufWriter::new(file);

    w.write_all(&MAGIC.to_le_bytes())?;
    w.write_all(&VERSION.to_le_bytes())?;
    let config = trie.config();
    let mut flags = 0u8;
    if config.allow_indels {
        flags |= FLAG_ALLOW_INDELS;
    }
    if config.immutable {
        flags |= FLAG_IMMUTABLE;
    }
    w.write_all(&[flags])?;
    w.write_all(&(trie.len() as u64).to_le_bytes())?;

    // Iteration is lexicographic, so snapshots of equal tries are
    // byte-identical.
    for entry in trie.iter() {
        w.write_all(&(entry.len() as u32).to_le_bytes())?;
        w.write_all(&entry)?;
    }
    w.flush().context("failed to flush snapshot")?;
    Ok(())
}

/// Read a snapshot written by [`save`] and rebuild the trie.
pub fn load(path: &Path) -> Result<PrefixTrie> {
    let data = fs::read(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let mut pos = 0;

    let magic = read_u32(&data, &mut pos).context("truncated header")?;
    if magic != MAGIC {
        bail!("not a trie snapshot: bad magic {magic:#010x}");
    }
    let version = read_u32(&data, &mut pos).context("truncated header")?;
    if version != VERSION {
        bail!("unsupported snapshot version {version}");
    }
    let flags = *data.get(pos).context("truncated header")?;
    pos += 1;
    let count = read_u64(&data, &mut pos).context("truncated header")?;

    let mut entries: Vec<&[u8]> = Vec::with_capacity(count.min(1 << 20) as usize);
    for i in 0..count {
        let len = read_u32(&data, &mut pos)
            .with_context(|| format!("truncated at entry {i} of {count}"))? as usize;
        let bytes = data
            .get(pos..pos + len)
            .with_context(|| format!("truncated at entry {i} of {count}"))?;
        pos += len;
        entries.push(bytes);
    }
    if pos != data.len() {
        bail!("snapshot has {} trailing bytes", data.len() - pos);
    }

    let config = TrieConfig {
        allow_indels: flags & FLAG_ALLOW_INDELS != 0,
        immutable: flags & FLAG_IMMUTABLE != 0,
    };
    Ok(PrefixTrie::new(entries, config))
}

fn read_u32(data: &[u8], pos: &mut usize) -> Option<u32> {
    let bytes = data.get(*pos..*pos + 4)?;
    *pos += 4;
    Some(u32::from_le_bytes(bytes.try_into().unwrap()))
}

fn read_u64(data: &[u8], pos: &mut usize) -> Option<u64> {
    let bytes = data.get(*pos..*pos + 8)?;
    *pos += 8;
    Some(u64::from_le_bytes(bytes.try_into().unwrap()))
}
