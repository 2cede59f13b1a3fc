//! Capture through an external learning program.
//!
//! The configured command line is run through the platform shell once per
//! capture. It is expected to put the blaster in learning mode, wait for a
//! button press and print the learned code. For python-broadlink that is:
//!
//! ```text
//! broadlink_cli --device @living.device --learn
//! ```
//!
//! together with `--token-pattern "Base64: b'([^']+)'"` to pick the base64
//! form out of its output.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use irlearn_core::{Capture, CaptureError, CommandToken, Leaf};
use regex::Regex;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tokio::time::timeout;
use tracing::{debug, info};

/// Environment variable carrying the slot being learned to the command.
pub const LEAF_ENV: &str = "IRLEARN_LEAF";

/// Runs a shell command per capture and extracts the token from its stdout.
pub struct CommandCapture {
    command: String,
    timeout: Duration,
    pattern: Option<Regex>,
    runtime: Runtime,
}

impl CommandCapture {
    pub fn new(command: impl Into<String>, timeout: Duration, pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern
            .map(|p| Regex::new(p).with_context(|| format!("Invalid --token-pattern '{}'", p)))
            .transpose()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create runtime for the capture command")?;

        Ok(Self {
            command: command.into(),
            timeout,
            pattern,
            runtime,
        })
    }

    async fn run(&self, leaf: &Leaf) -> Result<CommandToken, CaptureError> {
        let child = shell(&self.command)
            .env(LEAF_ENV, leaf.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CaptureError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        debug!("Spawned capture command (pid {:?})", child.id());

        // Dropping the child on timeout kills it.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(|e| CaptureError::Failed {
                message: format!("failed to collect capture output: {}", e),
            })?,
            Err(_) => return Err(CaptureError::Timeout(self.timeout)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("Capture command exited with {}", output.status);

        if !output.status.success() {
            return Err(CaptureError::failed_with_stderr(
                format!("capture command exited with {}", output.status),
                Some(&stderr),
            ));
        }

        extract_token(&stdout, self.pattern.as_ref()).ok_or(CaptureError::NoSignal)
    }
}

impl Capture for CommandCapture {
    fn capture(&mut self, leaf: &Leaf) -> Result<CommandToken, CaptureError> {
        info!("Waiting for a signal for {}", leaf);
        self.runtime.block_on(self.run(leaf))
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Pull the command token out of a capture program's output.
///
/// With a pattern, the first match wins: its first capture group if the
/// pattern has one, the whole match otherwise. Without a pattern the last
/// non-empty line is used. Blank results count as no signal.
pub fn extract_token(stdout: &str, pattern: Option<&Regex>) -> Option<CommandToken> {
    let raw = match pattern {
        Some(pattern) => {
            let captures = pattern.captures(stdout)?;
            captures.get(1).or_else(|| captures.get(0))?.as_str()
        }
        None => stdout.lines().rev().map(str::trim).find(|line| !line.is_empty())?,
    };

    let raw = raw.trim();
    (!raw.is_empty()).then(|| CommandToken::from(raw))
}
