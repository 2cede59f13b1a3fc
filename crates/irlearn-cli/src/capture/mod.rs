//! Capture backends.

pub mod command;
pub mod replay;

use irlearn_core::{Capture, CaptureError, CommandToken, Leaf};

pub use command::CommandCapture;
pub use replay::ReplayCapture;

/// Backend chosen on the command line.
pub enum CaptureBackend {
    Command(CommandCapture),
    Replay(ReplayCapture),
}

impl Capture for CaptureBackend {
    fn capture(&mut self, leaf: &Leaf) -> Result<CommandToken, CaptureError> {
        match self {
            CaptureBackend::Command(capture) => capture.capture(leaf),
            CaptureBackend::Replay(capture) => capture.capture(leaf),
        }
    }
}
