//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `notelink`.
#[derive(Debug, Parser)]
#[command(
    name = "notelink",
    version,
    about = "Resolve links in a document to canonical note URLs on an instance"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve every link in the input document and write the output file.
    Resolve(ResolveArgs),
    /// List the links and account handles found in the input document.
    Extract {
        /// Document to scan.
        #[arg(long, default_value = "input.txt")]
        input: PathBuf,
    },
}

/// Flags for `notelink resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Document to scan for links [default: input.txt].
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// File receiving one line per link [default: output.txt].
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Instance base URL [env: `NOTELINK_INSTANCE`, default: <https://blahaj.zone>].
    #[arg(long)]
    pub instance: Option<String>,
    /// Milliseconds to wait before each page request [env: `NOTELINK_DELAY_MS`, default: 1000].
    #[arg(long)]
    pub delay_ms: Option<u64>,
    /// Report failing links as unmatched instead of aborting the run.
    #[arg(long)]
    pub skip_failed_links: bool,
    /// Replay API and filesystem interactions from cassette files instead of going live.
    #[arg(long = "replay", value_name = "CASSETTE")]
    pub replay: Vec<PathBuf>,
}
