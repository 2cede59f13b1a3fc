//! Error types with operator-facing hints.
//!
//! Every error can produce a short hint telling the operator what to do
//! next. The CLI prints the hint under the error message.

use std::io;
use std::time::Duration;

use crate::document::Leaf;
use crate::temperature::Temperature;

/// Failure of the capture backend to deliver a command token.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no signal received within {0:?}")]
    Timeout(Duration),

    #[error("capture finished without producing a command")]
    NoSignal,

    #[error("no more recorded commands to replay")]
    Exhausted,

    #[error("failed to start capture command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("capture failed: {message}")]
    Failed { message: String },
}

impl CaptureError {
    /// Create a failure with stderr output folded into the message.
    pub fn failed_with_stderr(message: impl Into<String>, stderr: Option<&str>) -> Self {
        let message = message.into();
        let message = match stderr {
            Some(err) if !err.trim().is_empty() => format!("{}\nstderr: {}", message, err.trim()),
            _ => message,
        };
        Self::Failed { message }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            CaptureError::Timeout(_) => {
                "Point the remote at the blaster and press the button sooner, or raise --capture-timeout"
            }
            CaptureError::NoSignal => {
                "Check that the capture command prints the learned code, or adjust --token-pattern"
            }
            CaptureError::Exhausted => {
                "The replay file has fewer codes than the selected modes need"
            }
            CaptureError::Spawn { .. } => {
                "Verify the capture command exists and is executable. Try running it directly first."
            }
            CaptureError::Failed { .. } => {
                "Check that the blaster is reachable and in learning range"
            }
        }
    }
}

/// Invalid device profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("'off' cannot be selected as an operation mode")]
    OffNotSelectable,

    #[error("{kind} '{mode}' selected more than once")]
    DuplicateMode { kind: &'static str, mode: String },

    #[error("{bound} temperature must be a finite number")]
    NonFiniteTemperature { bound: &'static str },

    #[error("{bound} temperature {value} has more than one decimal")]
    TemperatureTooPrecise { bound: &'static str, value: f64 },

    #[error("temperature range {min}..{max} needs more than {limit} setpoints")]
    TemperatureRangeTooLarge {
        min: Temperature,
        max: Temperature,
        limit: usize,
    },
}

impl ProfileError {
    pub fn hint(&self) -> &'static str {
        match self {
            ProfileError::OffNotSelectable => {
                "The off command is always learned; leave it out of the operation modes"
            }
            ProfileError::DuplicateMode { .. } => "List each mode only once",
            ProfileError::NonFiniteTemperature { .. } => "Enter a plain number such as 16 or 30",
            ProfileError::TemperatureTooPrecise { .. } => {
                "Use whole degrees or a single decimal, such as 16 or 16.5"
            }
            ProfileError::TemperatureRangeTooLarge { .. } => {
                "Check the minimum and maximum; use the range printed on the remote, such as 16 to 30"
            }
        }
    }
}

/// Attempt to address a slot that the document does not contain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("document has no slot for {0}")]
    UnknownLeaf(Leaf),
}

impl DocumentError {
    pub fn hint(&self) -> &'static str {
        match self {
            DocumentError::UnknownLeaf(_) => {
                "Slots are fixed when the document is built; learn only the leaves it lists"
            }
        }
    }
}

/// Failure of the learn/confirm traversal.
#[derive(Debug, thiserror::Error)]
pub enum LearnError {
    #[error("learning aborted at {leaf}: {source}")]
    Aborted {
        leaf: Leaf,
        #[source]
        source: CaptureError,
    },

    #[error("operator input failed: {0}")]
    Operator(#[from] io::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl LearnError {
    pub fn hint(&self) -> &'static str {
        match self {
            LearnError::Aborted { source, .. } => source.hint(),
            LearnError::Operator(_) => {
                "Run irlearn from an interactive terminal; learned codes are only saved at the end"
            }
            LearnError::Document(err) => err.hint(),
        }
    }
}
