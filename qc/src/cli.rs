use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(about = "Compile search-box queries against a fixture")]
pub struct Cli {
    /// JSON file with `references` and `documents`.
    #[clap(long)]
    pub fixture: Option<PathBuf>,
    /// Restrict tenant-owned references to this tenant.
    #[clap(long)]
    pub tenant: Option<u64>,
    /// Compile a single query and exit instead of prompting.
    #[clap(long)]
    pub query: Option<String>,
    /// Print predicates as JSON.
    #[clap(long, default_value = "false")]
    pub json: bool,
    /// Memoize reference lookups for the whole session.
    #[clap(long, default_value = "false")]
    pub cache: bool,
    /// Log filter, used when RUST_LOG is unset.
    #[clap(long, default_value = "info")]
    pub log: String,
}
