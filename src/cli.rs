use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nimbus synthetic cloud-shadow field generator.
#[derive(Parser)]
#[command(
    name = "nimbus",
    version,
    about = "Synthetic cloud-shadow field generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full field generation pipeline.
    Generate(GenerateArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nimbus.toml")]
    pub config: PathBuf,

    /// Override output field path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
