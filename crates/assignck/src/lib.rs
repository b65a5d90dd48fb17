//! assignck - static type checking for assignment statements
//!
//! Given a set of declared variables and an assignment `target = expr`, the
//! checker resolves the type of `expr`, tests it against the declared type of
//! `target` under a fixed widening lattice, and reports either success or a
//! categorised rejection.
//!
//! ## Architecture
//!
//! - **Types** (`types/`): primitive types and the implicit conversion lattice
//! - **Sema** (`sema/`): symbol table, expression model, assignment checker
//! - **Frontend** (`frontend/`): lexer and parser for session scripts
//! - **Driver** (`driver/`): declaration/checking phases over a script
//! - **Common** (`common/`): spans, errors, diagnostic rendering

pub mod common;
pub mod types;
pub mod sema;
pub mod frontend;
pub mod driver;

use std::sync::Once;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Location, Span};
pub use driver::{Session, SessionConfig, SessionReport};
pub use sema::{Accepted, CheckResult, Expr, Literal, Rejection, SymbolTable, TypeChecker, UndeclaredName};
pub use types::{Conversion, Type, is_implicitly_convertible};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` is used (for
/// example `"assign_checker=debug"`). Safe to call multiple times.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}
