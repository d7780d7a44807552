//! `commhist` - SMS/call history text transfer
//!
//! Moves communication-history records between a store (see
//! [`commhist_lib`]) and a semicolon-delimited text format.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`record`] - Line formats, parsing and soft-wrap reassembly
//! - [`transfer`] - Export/import pipelines and group resolution
//! - [`config`] - Account identifier and store location
//! - [`error`] - Error types
//! - [`logging`] - tracing setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod transfer;

pub use error::{Result, TransferError};

/// Run the CLI application.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
