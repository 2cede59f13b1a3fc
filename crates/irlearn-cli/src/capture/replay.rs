//! Capture from a file of previously recorded codes.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use irlearn_core::{Capture, CaptureError, CommandToken, Leaf};
use tracing::debug;

/// Hands out recorded tokens one per capture, in file order.
///
/// Blank lines and lines starting with `#` are skipped. A rejected token
/// is consumed, so the next capture for the same slot gets the next line.
#[derive(Debug, Default)]
pub struct ReplayCapture {
    tokens: VecDeque<CommandToken>,
}

impl ReplayCapture {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay file {}", path.display()))?;
        let replay = Self::parse(&contents);
        debug!("Loaded {} recorded codes from {}", replay.remaining(), path.display());
        Ok(replay)
    }

    pub fn parse(contents: &str) -> Self {
        let tokens = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(CommandToken::from)
            .collect();
        Self { tokens }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl Capture for ReplayCapture {
    fn capture(&mut self, _leaf: &Leaf) -> Result<CommandToken, CaptureError> {
        self.tokens.pop_front().ok_or(CaptureError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut replay = ReplayCapture::parse("# off\nJgAAAA==\n\n  JgBBBB==  \n# cool 16\n");
        assert_eq!(replay.remaining(), 2);
        assert_eq!(replay.capture(&Leaf::Off).unwrap().as_str(), "JgAAAA==");
        assert_eq!(replay.capture(&Leaf::Off).unwrap().as_str(), "JgBBBB==");
        assert!(matches!(replay.capture(&Leaf::Off), Err(CaptureError::Exhausted)));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "T0\nT1").unwrap();

        let replay = ReplayCapture::from_path(file.path()).unwrap();
        assert_eq!(replay.remaining(), 2);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ReplayCapture::from_path(Path::new("/nonexistent/codes.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/codes.txt"));
    }
}
