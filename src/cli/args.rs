//! CLI argument definitions using clap.
//!
//! Both tools live behind one binary as subcommands:
//!
//! - `convert`: migrate NLS message constants to ResourceBundle accessors
//! - `setup`: generate JInto completion settings for migrated accessors

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

impl Arguments {
    /// Get the verbosity level from the command's common args.
    pub fn verbose(&self) -> u8 {
        match &self.command {
            Command::Convert(cmd) => cmd.common.verbose,
            Command::Setup(cmd) => cmd.common.verbose,
        }
    }
}

/// Common arguments shared by both commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Paths to the module directories to process
    #[arg(required = true)]
    pub module_paths: Vec<PathBuf>,

    /// Raise log verbosity (-v: per-file progress, -vv: rewrite tracing)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Process file batches sequentially instead of on the thread pool
    #[arg(long)]
    pub single_process: bool,
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Parent directory of the modules; archived paths are stored relative
    /// to this
    #[arg(short, long)]
    pub parent_directory: PathBuf,

    /// Path of the gzipped tarball to create
    #[arg(short, long)]
    pub target_tarball: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite Eclipse NLS message constants to ResourceBundle accessor calls
    Convert(ConvertArgs),
    /// Generate JInto completion settings for migrated accessor classes
    Setup(SetupArgs),
}
