use clap::{Args, Parser, Subcommand};

use crate::view::{FilterMode, SortKey};

/// regdeck — terminal dashboard for private Docker Registry V2 instances
#[derive(Parser, Debug)]
#[command(name = "regdeck", version, about)]
pub struct Cli {
    /// Dashboard API URL (e.g., http://localhost:8000)
    #[arg(long, env = "REGDECK_REGISTRY")]
    pub registry: String,

    /// Verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show registry statistics and rankings
    Stats,
    /// List repositories with search, filter and sort controls
    List(ListArgs),
    /// Delete a tagged image (resolves the tag to a digest first)
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only repositories whose name contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    pub search: String,

    /// Which repositories to keep
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterMode,

    /// Sort order for the list
    #[arg(long, value_enum, default_value = "name")]
    pub sort: SortKey,

    /// Also render the tag table for this repository
    #[arg(long)]
    pub expand: Option<String>,

    /// Registry host shown in docker pull commands
    #[arg(long)]
    pub registry_host: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository name
    pub repository: String,

    /// Tag to delete
    pub tag: String,

    /// Skip the confirmation prompt
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}
