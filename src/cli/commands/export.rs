use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use commhist_lib::{EventKind, SqliteStore};

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::transfer::{export_calls, export_sms};

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried, or the output
/// file cannot be written.
pub fn execute(config: &Config, args: &ExportArgs, kind: EventKind) -> Result<()> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("could not open store {}", config.db_path.display()))?;

    let file = File::create(&args.file)
        .with_context(|| format!("could not open {} for writing", args.file.display()))?;
    let mut out = BufWriter::new(file);

    let stats = match kind {
        EventKind::Sms => export_sms(&store, &mut out)?,
        EventKind::Call => export_calls(&store, &mut out, !args.no_reverse)?,
    };
    out.flush()?;

    println!(
        "Exported {} {} record(s) to {}",
        stats.written,
        kind,
        args.file.display()
    );
    Ok(())
}
