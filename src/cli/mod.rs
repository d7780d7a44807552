//! Command-line interface for `commhist`.
//!
//! Two pipelines, one subcommand each: `export` (store -> text file) and
//! `import` (text file -> store). SMS is the default mode for both.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commhist_lib::EventKind;

use crate::config::Config;
use crate::logging;

/// `commhist` - move SMS and call history between a store and text files.
#[derive(Parser, Debug)]
#[command(name = "commhist")]
#[command(
    author,
    version,
    about = "Export and import SMS/call history as delimiter-separated text",
    long_about = None
)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Store database location
    #[arg(long, global = true, env = "COMMHIST_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Local account identifier to file imported events under
    #[arg(long, global = true, env = "COMMHIST_ACCOUNT", value_name = "URI")]
    pub account: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export events from the store to a text file
    Export(ExportArgs),

    /// Import events from a text file into the store
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export calls
    #[arg(short, long, conflicts_with = "sms")]
    pub calls: bool,

    /// Export sms (default)
    #[arg(short, long)]
    pub sms: bool,

    /// Write calls newest-first instead of newest-last
    #[arg(long)]
    pub no_reverse: bool,

    /// Output file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Import calls
    #[arg(short, long, conflicts_with = "sms")]
    pub calls: bool,

    /// Import sms (default)
    #[arg(short, long)]
    pub sms: bool,

    /// Input file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Mode selection shared by both subcommands; SMS unless `--calls`.
const fn mode(calls: bool) -> EventKind {
    if calls { EventKind::Call } else { EventKind::Sms }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute; per-record import
/// problems are logged instead.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let config = Config::load(cli.db, cli.account)?;

    match cli.command {
        Commands::Export(args) => commands::export::execute(&config, &args, mode(args.calls)),
        Commands::Import(args) => commands::import::execute(&config, &args, mode(args.calls)),
    }
}
