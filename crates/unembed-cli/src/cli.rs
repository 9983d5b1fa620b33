use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unembed")]
#[command(about = "Turns markdown embeds of non-image files into plain links")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to ~/.config/unembed/config.toml)
    #[arg(short = 'C', long = "config", global = true)]
    pub config_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG also works
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite embeds in the given notes, or in every note of the vault
    Fix(FixArgs),
    /// Watch the vault and rewrite notes shortly after they change
    Watch(WatchArgs),
    /// Print the effective settings
    Config {
        /// Write default settings if no config file exists yet
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
pub struct FixArgs {
    /// Vault root used to resolve link targets (overrides config)
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Notes to rewrite; defaults to every markdown file in the vault
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct WatchArgs {
    /// Vault root to watch (overrides config)
    #[arg(long)]
    pub vault: Option<PathBuf>,
}
