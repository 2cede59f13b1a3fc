//! Learn/confirm traversal.
//!
//! Walks every slot of a document in order, captures one signal per slot,
//! and asks the operator to accept or reject it. Rejected captures are
//! retried for the same slot until the operator accepts one. A slot is only
//! written after an accept.
//!
//! The capture backend, the operator and the audit log are collaborators
//! supplied by the caller, so the traversal itself performs no I/O.

use std::io;

use crate::document::{CommandToken, Leaf, OutputDocument};
use crate::error::{CaptureError, LearnError};

/// Blocking source of learned commands.
pub trait Capture {
    /// Wait for one signal for `leaf` and return it as an opaque token.
    fn capture(&mut self, leaf: &Leaf) -> Result<CommandToken, CaptureError>;
}

/// Human in the loop.
pub trait Operator {
    /// Tell the operator which button to press next. `position` is 1-based.
    fn announce(&mut self, leaf: &Leaf, position: usize, total: usize) -> io::Result<()>;

    /// Show a captured token and ask whether to keep it.
    fn confirm(&mut self, leaf: &Leaf, token: &CommandToken) -> io::Result<Confirmation>;

    /// Report a capture failure and ask whether to try again.
    fn capture_failed(&mut self, leaf: &Leaf, error: &CaptureError) -> io::Result<FailureChoice>;
}

/// Receives a snapshot of the document after every accepted slot.
pub trait AuditSink {
    fn record(&mut self, document: &OutputDocument);
}

impl<T: Capture + ?Sized> Capture for &mut T {
    fn capture(&mut self, leaf: &Leaf) -> Result<CommandToken, CaptureError> {
        (**self).capture(leaf)
    }
}

impl<T: Operator + ?Sized> Operator for &mut T {
    fn announce(&mut self, leaf: &Leaf, position: usize, total: usize) -> io::Result<()> {
        (**self).announce(leaf, position, total)
    }

    fn confirm(&mut self, leaf: &Leaf, token: &CommandToken) -> io::Result<Confirmation> {
        (**self).confirm(leaf, token)
    }

    fn capture_failed(&mut self, leaf: &Leaf, error: &CaptureError) -> io::Result<FailureChoice> {
        (**self).capture_failed(leaf, error)
    }
}

impl<F: FnMut(&OutputDocument)> AuditSink for F {
    fn record(&mut self, document: &OutputDocument) {
        self(document);
    }
}

/// Operator verdict on a captured token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accept,
    Reject,
}

impl Confirmation {
    /// Empty input, `y` or `yes` accept (any case). Anything else rejects.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "y" | "yes" => Confirmation::Accept,
            _ => Confirmation::Reject,
        }
    }
}

/// Operator decision after a failed capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureChoice {
    Retry,
    Abort,
}

/// Counters for a completed traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearnSummary {
    /// Slots written.
    pub learned: usize,
    /// Captures rejected by the operator.
    pub rejected: usize,
    /// Captures that failed and were retried.
    pub failed: usize,
}

/// Drives the traversal over a document.
pub struct Learner<C, O, A> {
    capture: C,
    operator: O,
    audit: A,
}

impl<C: Capture, O: Operator, A: AuditSink> Learner<C, O, A> {
    pub fn new(capture: C, operator: O, audit: A) -> Self {
        Self {
            capture,
            operator,
            audit,
        }
    }

    /// Learn every slot of `document`, `off` first.
    ///
    /// There is no skip or resume: the traversal ends when every slot is
    /// filled or when the operator aborts after a capture failure.
    pub fn learn(&mut self, document: &mut OutputDocument) -> Result<LearnSummary, LearnError> {
        let leaves = document.leaves();
        let total = leaves.len();
        let mut summary = LearnSummary::default();

        for (index, leaf) in leaves.iter().enumerate() {
            self.learn_leaf(document, leaf, index + 1, total, &mut summary)?;
        }

        Ok(summary)
    }

    fn learn_leaf(
        &mut self,
        document: &mut OutputDocument,
        leaf: &Leaf,
        position: usize,
        total: usize,
        summary: &mut LearnSummary,
    ) -> Result<(), LearnError> {
        loop {
            self.operator.announce(leaf, position, total)?;

            let token = match self.capture.capture(leaf) {
                Ok(token) => token,
                Err(error) => match self.operator.capture_failed(leaf, &error)? {
                    FailureChoice::Retry => {
                        summary.failed += 1;
                        continue;
                    }
                    FailureChoice::Abort => {
                        return Err(LearnError::Aborted {
                            leaf: *leaf,
                            source: error,
                        });
                    }
                },
            };

            match self.operator.confirm(leaf, &token)? {
                Confirmation::Accept => {
                    document.set(leaf, token)?;
                    summary.learned += 1;
                    self.audit.record(document);
                    return Ok(());
                }
                Confirmation::Reject => summary.rejected += 1,
            }
        }
    }

    /// Give back the collaborators.
    pub fn into_parts(self) -> (C, O, A) {
        (self.capture, self.operator, self.audit)
    }
}
