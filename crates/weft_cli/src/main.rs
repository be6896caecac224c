//! Weft CLI — the command-line interface for the interconnect synthesizer.
//!
//! Provides `weft generate` for running one synthesis job from a
//! `weft.toml` description against a document library directory.

#![warn(missing_docs)]

mod generate;

use std::process;

use clap::{Parser, Subcommand};

/// Weft — a bus-fabric interconnect synthesizer.
#[derive(Parser, Debug)]
#[command(name = "weft", version, about = "Weft interconnect synthesizer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize an interconnect from a job configuration.
    Generate(GenerateArgs),
}

/// Arguments for the `weft generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the job configuration file.
    #[arg(short, long, default_value = "weft.toml")]
    pub config: String,

    /// Document library root directory.
    #[arg(short, long)]
    pub library: String,

    /// Output root for the synthesized component and RTL; defaults to the
    /// library root.
    #[arg(short, long)]
    pub out: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Generate(ref args) => generate::run(&cli, args),
    };
    process::exit(code);
}
