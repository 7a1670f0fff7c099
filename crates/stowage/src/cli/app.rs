use std::path::PathBuf;

use clap::Parser;
use stowage_fetch::CHECKSUM_HEADER;

#[derive(Clone, Debug, Parser)]
#[command(name = "stowage", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// URL of the artifact (http or https)
    pub url: String,

    /// Cache directory; created if missing [default: ~/.cache/stowage]
    #[arg(short = 'd', long, env = "STOWAGE_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show a progress bar while downloading
    #[arg(short, long)]
    pub progress: bool,

    /// Give up on the metadata probe after SECS and use the cached copy
    #[arg(long, value_name = "SECS")]
    pub probe_timeout: Option<u64>,

    /// Abort the download after SECS
    #[arg(long, value_name = "SECS")]
    pub transfer_timeout: Option<u64>,

    /// TCP connect timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Refetch when the server's checksum differs, even if the length matches
    #[arg(long)]
    pub strict_hash: bool,

    /// Response header carrying the SHA-256 of the artifact
    #[arg(long, value_name = "NAME", default_value = CHECKSUM_HEADER)]
    pub checksum_header: String,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}
