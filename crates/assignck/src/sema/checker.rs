//! Assignment type checker

use crate::common::Location;
use crate::sema::{Expr, SymbolTable, UndeclaredName};
use crate::types::{Conversion, Type};
use thiserror::Error;
use tracing::{debug, trace};

/// Outcome of checking one assignment
pub type CheckResult = Result<Accepted, Rejection>;

/// A well-typed assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    /// Declared type of the target variable
    pub declared: Type,
    /// Resolved type of the right-hand side
    pub resolved: Type,
}

impl Accepted {
    /// Conversion applied to the value; `None` only for a hand-built pair
    /// the lattice does not allow
    pub fn conversion(&self) -> Option<Conversion> {
        self.resolved.conversion_to(self.declared)
    }

    /// Check if the value is widened on its way into the target
    pub fn is_widening(&self) -> bool {
        self.conversion() == Some(Conversion::Widening)
    }
}

/// Why an assignment was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("assignment to undeclared variable '{name}'")]
    UndeclaredTarget { name: String },

    #[error("use of undeclared variable '{name}'")]
    UndeclaredSource { name: String },

    #[error("cannot assign a value of type '{from}' to a variable of type '{to}'")]
    TypeMismatch { from: Type, to: Type },
}

impl Rejection {
    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::UndeclaredTarget { .. } => "E0001",
            Rejection::UndeclaredSource { .. } => "E0002",
            Rejection::TypeMismatch { .. } => "E0003",
        }
    }

    /// Short headline for the diagnostic
    pub fn title(&self) -> &'static str {
        match self {
            Rejection::UndeclaredTarget { .. } => "unknown assignment target",
            Rejection::UndeclaredSource { .. } => "unknown variable in expression",
            Rejection::TypeMismatch { .. } => "incompatible types",
        }
    }
}

impl From<UndeclaredName> for Rejection {
    fn from(err: UndeclaredName) -> Self {
        Rejection::UndeclaredSource { name: err.0 }
    }
}

/// Type checker for assignments against a fixed set of declarations
///
/// The checker only borrows the table, so no declaration can be added while
/// it is alive. Every call is independent: the same inputs always give the
/// same result.
#[derive(Debug, Clone, Copy)]
pub struct TypeChecker<'a> {
    table: &'a SymbolTable,
}

impl<'a> TypeChecker<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Check `target = expr`
    pub fn check_assignment(&self, target: &str, expr: &Expr) -> CheckResult {
        self.check_logged(target, expr, None)
    }

    /// Check `target = expr`, labelling log records with `location`
    pub fn check_assignment_at(&self, target: &str, expr: &Expr, location: Location) -> CheckResult {
        self.check_logged(target, expr, Some(location))
    }

    fn check_logged(&self, target: &str, expr: &Expr, location: Option<Location>) -> CheckResult {
        let result = self.check(target, expr);
        let location = location.map(tracing::field::display);
        match &result {
            Ok(ok) => debug!(location, target_var = target, %expr, declared = %ok.declared, resolved = %ok.resolved, "assignment ok"),
            Err(err) => debug!(location, target_var = target, %expr, code = err.code(), "{err}"),
        }
        result
    }

    fn check(&self, target: &str, expr: &Expr) -> CheckResult {
        let declared = self.table.lookup(target).ok_or_else(|| Rejection::UndeclaredTarget {
            name: target.to_string(),
        })?;

        let resolved = expr.resolve_type(self.table)?;
        trace!(target_var = target, %declared, %resolved, "resolved assignment types");

        if !resolved.converts_to(declared) {
            return Err(Rejection::TypeMismatch {
                from: resolved,
                to: declared,
            });
        }

        Ok(Accepted { declared, resolved })
    }
}
