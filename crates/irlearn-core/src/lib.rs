//! Core types and logic for irlearn.
//!
//! This crate builds the climate code document consumed by the SmartIR
//! integration and drives the learn/confirm loop that fills it. It performs
//! no terminal or device I/O; those are supplied by the caller through the
//! traits in [`learn`].
//!
//! # Modules
//!
//! - [`catalog`]: operation, preset, fan and swing mode catalogs
//! - [`temperature`]: temperatures, precision and the temperature ladder
//! - [`profile`]: the validated device profile
//! - [`document`]: the ordered code document and its slots
//! - [`builder`]: expands a profile into an empty document
//! - [`learn`]: the learn/confirm traversal
//! - [`error`]: error types with operator hints
//!
//! # Document shape
//!
//! | Level | Key |
//! |-------|-----|
//! | 1 | operation mode, plus the flat `off` slot |
//! | 2 | preset mode |
//! | 3 | fan mode |
//! | 4 | swing mode |
//! | 5 | temperature, rendered `16` or `16.5` |

pub mod builder;
pub mod catalog;
pub mod document;
pub mod error;
pub mod learn;
pub mod profile;
pub mod temperature;

pub use builder::build;
pub use catalog::{Catalog, FanMode, OperationMode, PresetMode, SwingMode};
pub use document::{CommandKey, CommandToken, Leaf, OutputDocument, Slot};
pub use error::{CaptureError, DocumentError, LearnError, ProfileError};
pub use learn::{AuditSink, Capture, Confirmation, FailureChoice, LearnSummary, Learner, Operator};
pub use profile::{DeviceInfo, DeviceProfile, ModeSelection};
pub use temperature::{temperature_ladder, Precision, Temperature};
