// antlerinator/src/cli.rs
//! Defines the command-line argument structure using clap.
use antlerinator_common::error::Result;
use antlerinator_common::Config;
use antlerinator_net::Transport;
use clap::{ArgAction, Parser, Subcommand};

// Module declarations
pub mod build;
pub mod download;
pub mod hook;

use crate::cli::build::{BuildArgs, CleanArgs};
use crate::cli::download::DownloadArgs;
use crate::cli::hook::HookArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "antlerinator", bin_name = "antlerinator")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the ANTLR v4 tool jar
    Download(DownloadArgs),
    /// Generate parsers/lexers from ANTLR v4 grammar files
    Build(BuildArgs),
    /// Remove parsers/lexers generated from ANTLR v4 grammar files
    Clean(CleanArgs),
    /// Run the steps registered for a build lifecycle phase
    Hook(HookArgs),
}

impl Command {
    pub fn run(&self, config: &Config, transport: &dyn Transport) -> Result<()> {
        match self {
            Self::Download(command) => command.run(config, transport),
            Self::Build(command) => command.run(config, transport),
            Self::Clean(command) => command.run(config, transport),
            Self::Hook(command) => command.run(config, transport),
        }
    }
}
