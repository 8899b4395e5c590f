//! Provenance record written beside every file the CLI produces.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Contents of `<stem>.provenance.json`.
#[derive(Debug, Serialize)]
pub struct Record {
    pub code_rev: String,
    pub version: &'static str,
    /// `file:line` of the call that wrote the artifact.
    pub written_at: String,
    pub params: Value,
    pub inputs: Vec<String>,
    pub output: String,
}

impl Record {
    #[track_caller]
    pub fn new(output: &Path, params: Value, inputs: &[PathBuf]) -> Self {
        let at = Location::caller();
        Self {
            code_rev: current_git_rev(),
            version: rendezvous::VERSION,
            written_at: format!("{}:{}", at.file(), at.line()),
            params,
            inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
            output: output.display().to_string(),
        }
    }

    /// Write the record next to its output and return the sidecar path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = sidecar_path(Path::new(&self.output));
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `dir/regions.geojson` -> `dir/regions.provenance.json`.
fn sidecar_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    output.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    from_env
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
