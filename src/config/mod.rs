//! Configuration for `commhist`.
//!
//! Values are resolved in order, highest wins:
//! 1. CLI flags (`--db`, `--account`), which clap also fills from
//!    `COMMHIST_DB` / `COMMHIST_ACCOUNT`
//! 2. User config file (`~/.config/commhist/config.json`)
//! 3. Built-in defaults

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Telepathy account path all imported events and groups are filed under
/// when nothing else is configured.
pub const DEFAULT_LOCAL_UID: &str = "/org/freedesktop/Telepathy/Account/ring/tel/account0";

const CONFIG_DIR: &str = "commhist";
const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "commhist.db";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local account identifier events and groups are filed under.
    pub local_uid: String,
    /// Store database location.
    pub db_path: PathBuf,
}

/// On-disk config file shape; every field optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    account: Option<String>,
    database: Option<PathBuf>,
}

impl Config {
    /// Resolve the configuration, merging CLI overrides over the config
    /// file over defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load(db_override: Option<PathBuf>, account_override: Option<String>) -> Result<Self> {
        Ok(Self::resolve(db_override, account_override, read_config_file()?))
    }

    /// Merge overrides over the config file over defaults.
    fn resolve(
        db_override: Option<PathBuf>,
        account_override: Option<String>,
        file: ConfigFile,
    ) -> Self {
        let local_uid = account_override
            .or(file.account)
            .unwrap_or_else(|| DEFAULT_LOCAL_UID.to_string());

        let db_path = db_override
            .or(file.database)
            .unwrap_or_else(default_db_path);

        Self { local_uid, db_path }
    }
}

fn read_config_file() -> Result<ConfigFile> {
    let Some(path) = dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE)) else {
        return Ok(ConfigFile::default());
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let text = fs::read_to_string(&path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let file: ConfigFile = serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(file)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map_or_else(|| PathBuf::from("."), |d| d.join(CONFIG_DIR))
        .join(DB_FILE)
}
