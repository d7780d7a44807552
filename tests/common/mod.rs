//! Shared helpers for CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Temp workspace holding a store database and transfer files.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp workspace"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write test file");
        path
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read test file")
    }

    /// Command pointed at this workspace's store.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("commhist").expect("binary builds");
        cmd.env("COMMHIST_DB", self.path("history.db"));
        cmd.env_remove("COMMHIST_ACCOUNT");
        cmd
    }
}
