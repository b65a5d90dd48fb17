//! Semantic analysis module
//!
//! This module resolves expression types against declared variables and
//! validates assignments.

mod checker;
mod expr;
mod scope;

pub use checker::{Accepted, CheckResult, Rejection, TypeChecker};
pub use expr::{Expr, Literal, UndeclaredName};
pub use scope::SymbolTable;
