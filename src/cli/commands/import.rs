use std::fs::{self, File};
use std::io::BufReader;

use anyhow::{Context, Result};
use commhist_lib::{EventKind, SqliteStore};

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::transfer::{GroupResolver, import_calls, import_sms};

/// Execute the import command.
///
/// # Errors
///
/// Returns an error if the input file is missing or unreadable, or the
/// store cannot be opened. Per-record failures are logged and skipped.
pub fn execute(config: &Config, args: &ImportArgs, kind: EventKind) -> Result<()> {
    let file = File::open(&args.file)
        .with_context(|| format!("could not open {}", args.file.display()))?;
    let reader = BufReader::new(file);

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
    }
    let mut store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("could not open store {}", config.db_path.display()))?;

    let stats = match kind {
        EventKind::Sms => {
            let mut resolver = GroupResolver::new(config.local_uid.as_str());
            import_sms(&mut store, &mut resolver, &config.local_uid, reader)?
        }
        EventKind::Call => import_calls(&mut store, &config.local_uid, reader)?,
    };

    println!(
        "Imported {} {} record(s) from {} ({} skipped)",
        stats.added,
        kind,
        args.file.display(),
        stats.skipped
    );
    Ok(())
}
