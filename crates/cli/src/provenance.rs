//! Run records: one JSON document per CLI run, naming the code revision, the
//! inputs that shaped the figures, and every file the run produced.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Provenance of one run; outputs are appended as they are written.
#[derive(Debug, Serialize)]
pub struct RunRecord {
    pub code_rev: String,
    pub lib_version: &'static str,
    pub callsite: Callsite,
    pub command: &'static str,
    pub params: Value,
    pub outputs: Vec<PathBuf>,
}

impl RunRecord {
    #[track_caller]
    pub fn new(command: &'static str, params: Value) -> Self {
        let caller = Location::caller();
        Self {
            code_rev: code_rev(),
            lib_version: convex_reorder::VERSION,
            callsite: Callsite {
                file: caller.file(),
                line: caller.line(),
            },
            command,
            params,
            outputs: Vec::new(),
        }
    }

    pub fn add_output(&mut self, path: impl Into<PathBuf>) {
        self.outputs.push(path.into());
    }

    /// Write the record as pretty JSON to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating record dir {}", parent.display()))?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), outputs = self.outputs.len(), "run_record_written");
        Ok(())
    }
}

/// `GIT_COMMIT` from the environment, else `git rev-parse HEAD`, else "unknown".
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}
