//! Common infrastructure shared by the frontend, checker and driver

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::{Location, Span};
