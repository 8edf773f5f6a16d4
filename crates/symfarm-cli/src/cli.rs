use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use symfarm_sdk::{ConflictPolicy, FarmSettings, LinkMode};

#[derive(Parser)]
#[command(
    name = "symfarm",
    about = "Overlay source directory trees into a single link farm",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a farm in TARGET from one or more source trees
    Create(CreateArgs),
    /// Show the ordered actions a farm would be created with
    Plan(PlanArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Farm directory; must be missing or empty
    pub target: PathBuf,
    /// Source trees, earliest first
    pub sources: Vec<PathBuf>,
    /// Check the target and print the plan instead of creating anything
    #[arg(long)]
    pub dry_run: bool,
    #[command(flatten)]
    pub farm: FarmArgs,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Source trees, earliest first
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,
    #[command(flatten)]
    pub farm: FarmArgs,
}

#[derive(Args)]
pub struct FarmArgs {
    /// TOML settings file (on_conflict, link)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// What to do when several trees provide the same file: fail, skip, first, last
    #[arg(long)]
    pub on_conflict: Option<ConflictPolicy>,
    /// How files are linked into the farm: symlink, hard
    #[arg(long)]
    pub link: Option<LinkMode>,
}

impl FarmArgs {
    /// Settings from the config file (if any) with flags layered on top.
    pub fn settings(&self) -> anyhow::Result<FarmSettings> {
        let mut settings = match &self.config {
            Some(path) => FarmSettings::load(path)?,
            None => FarmSettings::default(),
        };
        if let Some(policy) = self.on_conflict {
            settings.on_conflict = policy;
        }
        if let Some(link) = self.link {
            settings.link = link;
        }
        Ok(settings)
    }
}
