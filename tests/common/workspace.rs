//! Scratch directory with input and output files for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};

use edgemap::models::CONFIG_ENV;
use tempfile::TempDir;

/// Temporary directory that cleans up after itself
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the workspace (not created)
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` and return its path
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.path(name)).expect("Failed to read output")
    }

    pub fn read_text(&self, name: &str) -> String {
        String::from_utf8(self.read(name)).expect("Output is not UTF-8")
    }

    /// Run the `edgemap` binary inside the workspace
    pub fn run_cli(&self, args: &[&str]) -> CliOutput {
        let output = Command::new(env!("CARGO_BIN_EXE_edgemap"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove(CONFIG_ENV)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run edgemap binary");
        CliOutput::from(output)
    }
}

/// Captured result of a CLI run
pub struct CliOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CliOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
