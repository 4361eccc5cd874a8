use clap::{Args, Parser, Subcommand};

use crate::model::well::WellId;
use crate::ops::search::SortKey;

#[derive(Parser)]
#[command(name = "wb", about = concat!("wellboard v", env!("CARGO_PKG_VERSION"), " - well records at a glance"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different project directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new wellboard project in the current directory
    Init(InitArgs),
    /// List wells, filtered and sorted like the dashboard
    List(ListArgs),
    /// Show dashboard statistics
    Stats,
    /// Show one well
    Show(ShowArgs),
    /// Create a new draft well
    New,
    /// Remove a well
    Rm(RmArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against name, operator, field and block
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Sort order: name-asc, name-desc, modified-newest, modified-oldest,
    /// spud-newest, spud-oldest
    #[arg(long, default_value = "modified-newest")]
    pub sort: SortKey,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Well ID to show
    pub id: WellId,
}

#[derive(Args)]
pub struct RmArgs {
    /// Well ID to remove
    pub id: WellId,
}
