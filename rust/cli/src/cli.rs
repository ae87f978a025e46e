//! Argument definitions for the `fourline` binary.

use clap::{Parser, Subcommand};
use fourline_ai::Tier;

#[derive(Parser, Debug)]
#[command(
    name = "fourline",
    version,
    about = "Connect-four arena tools",
    long_about = None
)]
pub struct FourlineCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pit two adversary tiers against each other
    Eval {
        /// Tier for side A (random|medium|hard|impossible or 0-3)
        #[arg(long)]
        tier_a: Tier,
        /// Tier for side B
        #[arg(long)]
        tier_b: Tier,
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Board height, defaults to the configured arena size
        #[arg(long)]
        rows: Option<usize>,
        /// Board width, defaults to the configured arena size
        #[arg(long)]
        cols: Option<usize>,
    },
    /// Show the resolved arena configuration and where each value came from
    Cfg,
}

/// Subcommand names, listed on usage errors.
pub const COMMANDS: &[&str] = &["eval", "cfg"];
