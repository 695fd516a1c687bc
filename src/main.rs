use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ftrie::{snapshot, PrefixTrie, TrieConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ftrie")]
#[command(about = "Fuzzy prefix trie over byte strings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a snapshot from a newline-separated entry file
    Build {
        /// Input file, one entry per line
        entries: PathBuf,

        /// Snapshot file to write
        #[arg(short, long)]
        out: PathBuf,

        /// Allow insertions/deletions in fuzzy search
        #[arg(long)]
        allow_indels: bool,

        /// Permit add/remove on the loaded trie
        #[arg(long)]
        mutable: bool,
    },

    /// Search for the closest entry to a query
    Query {
        /// Snapshot file
        snapshot: PathBuf,

        /// Query string
        query: String,

        /// Maximum edits to tolerate
        #[arg(short = 'k', long, default_value = "0")]
        budget: usize,

        /// Print the number of entries within budget instead
        #[arg(long)]
        count: bool,
    },

    /// Find a window of a text matching some entry
    Substring {
        /// Snapshot file
        snapshot: PathBuf,

        /// Text to scan
        text: String,

        /// Maximum edits to tolerate
        #[arg(short = 'k', long, default_value = "0")]
        budget: usize,
    },

    /// Find the longest entry occurring as a prefix of a text suffix
    Prefix {
        /// Snapshot file
        snapshot: PathBuf,

        /// Text to scan
        text: String,

        /// Shortest acceptable match
        #[arg(long, default_value = "1")]
        min_length: usize,
    },

    /// Print snapshot statistics as JSON
    Stats {
        /// Snapshot file
        snapshot: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            entries,
            out,
            allow_indels,
            mutable,
        } => build(&entries, &out, allow_indels, mutable),
        Commands::Query {
            snapshot,
            query,
            budget,
            count,
        } => query_cmd(&snapshot, query.as_bytes(), budget, count),
        Commands::Substring {
            snapshot,
            text,
            budget,
        } => substring_cmd(&snapshot, text.as_bytes(), budget),
        Commands::Prefix {
            snapshot,
            text,
            min_length,
        } => prefix_cmd(&snapshot, text.as_bytes(), min_length),
        Commands::Stats { snapshot } => stats_cmd(&snapshot),
    }
}

fn build(entries: &Path, out: &Path, allow_indels: bool, mutable: bool) -> Result<()> {
    let data = std::fs::read(entries)
        .with_context(|| format!("failed to read entry file {}", entries.display()))?;
    let lines = data
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty());

    let trie = PrefixTrie::new(
        lines,
        TrieConfig {
            allow_indels,
            immutable: !mutable,
        },
    );
    snapshot::save(&trie, out)?;

    let stats = trie.stats();
    println!(
        "Wrote {} with {} entries ({} nodes)",
        out.display(),
        stats.entry_count,
        stats.node_count
    );
    Ok(())
}

fn query_cmd(path: &Path, query: &[u8], budget: usize, count: bool) -> Result<()> {
    let trie = snapshot::load(path)?;
    if count {
        println!("{}", trie.search_count(query, budget));
        return Ok(());
    }
    match trie.search(query, budget) {
        Some(hit) => println!("{}\t{}", String::from_utf8_lossy(&hit.entry), hit.distance),
        None => println!("no match within {budget} edit(s)"),
    }
    Ok(())
}

fn substring_cmd(path: &Path, text: &[u8], budget: usize) -> Result<()> {
    let trie = snapshot::load(path)?;
    match trie.search_substring(text, budget) {
        Some(hit) => println!(
            "{}\t{}\t{}..{}",
            String::from_utf8_lossy(&hit.entry),
            hit.distance,
            hit.start,
            hit.end
        ),
        None => println!("no window within {budget} edit(s)"),
    }
    Ok(())
}

fn prefix_cmd(path: &Path, text: &[u8], min_length: usize) -> Result<()> {
    let trie = snapshot::load(path)?;
    match trie.longest_prefix_match(text, min_length)? {
        Some(hit) => println!(
            "{}\t{}\t{}",
            String::from_utf8_lossy(&hit.entry),
            hit.start,
            hit.length
        ),
        None => println!("no prefix match of length >= {min_length}"),
    }
    Ok(())
}

fn stats_cmd(path: &Path) -> Result<()> {
    let trie = snapshot::load(path)?;
    let stats = trie.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
