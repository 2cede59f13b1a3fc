//! Where the finished document goes, plus the audit log sink.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use irlearn_core::{AuditSink, OutputDocument};
use tracing::{debug, info, warn};

/// Target for the finished document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Resolve the destination before any work starts, so a learning session
    /// is never lost to an unwritable path at the end.
    pub fn prepare(path: Option<PathBuf>, force: bool) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Destination::Stdout);
        };

        if path.is_dir() {
            bail!("Output path {} is a directory", path.display());
        }
        if path.exists() && !force {
            bail!(
                "Output file {} already exists (use --force to overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("Output directory {} does not exist", parent.display());
            }
        }

        Ok(Destination::File(path))
    }

    pub fn write(&self, document: &OutputDocument) -> Result<()> {
        let json = document
            .to_json_pretty()
            .context("Failed to serialize document")?;

        match self {
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", json).context("Failed to write document to stdout")?;
            }
            Destination::File(path) => {
                fs::write(path, format!("{}\n", json))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {} commands to {}", document.filled_count(), path.display());
            }
        }
        Ok(())
    }
}

/// Logs the whole document at debug level after every accepted command.
#[derive(Debug, Default)]
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn record(&mut self, document: &OutputDocument) {
        match document.to_json_pretty() {
            Ok(json) => debug!(
                target: "irlearn::audit",
                filled = document.filled_count(),
                total = document.leaf_count(),
                "{}",
                json
            ),
            Err(e) => warn!(target: "irlearn::audit", "Failed to serialize document: {}", e),
        }
    }
}
