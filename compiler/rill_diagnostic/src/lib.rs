//! Diagnostic system for the Rill compiler.
//!
//! - Severity levels (what kind of problem)
//! - Positions (where it went wrong)
//! - A shared [`SemanticRecorder`] that the semantic-analysis pass threads
//!   through every function body, so one compilation produces one ordered
//!   diagnostic stream.

mod diagnostic;
mod recorder;

pub use diagnostic::{Diagnostic, Severity};
pub use recorder::SemanticRecorder;
