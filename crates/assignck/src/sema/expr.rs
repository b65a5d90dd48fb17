//! Expression model
//!
//! Expressions are immutable once built. Resolving one against a
//! [`SymbolTable`] yields its type, or names the first undeclared variable it
//! refers to.

use crate::sema::SymbolTable;
use crate::types::Type;
use std::fmt;
use thiserror::Error;

/// Constant value written in the source
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Character literal: 'a', '\n'
    Char(char),
    /// Integer literal: 42, 0xFF
    Int(i64),
    /// Float literal: 3.14
    Float(f64),
    /// String literal: "hello"
    Str(String),
}

impl Literal {
    /// Type of this literal, derived from its variant
    pub fn ty(&self) -> Type {
        match self {
            Literal::Char(_) => Type::Char,
            Literal::Int(_) => Type::Int,
            Literal::Float(_) => Type::Float,
            Literal::Str(_) => Type::String,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Char(c) => write!(f, "{:?}", c),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// Expression on the right-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant value
    Literal(Literal),
    /// Reference to a declared variable
    Variable(String),
}

impl Expr {
    pub fn literal(literal: Literal) -> Self {
        Self::Literal(literal)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Resolve the type this expression produces
    pub fn resolve_type(&self, table: &SymbolTable) -> Result<Type, UndeclaredName> {
        match self {
            Expr::Literal(lit) => Ok(lit.ty()),
            Expr::Variable(name) => table
                .lookup(name)
                .ok_or_else(|| UndeclaredName(name.clone())),
        }
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Variable(name) => f.write_str(name),
        }
    }
}

/// A variable was referenced before being declared
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("undeclared variable '{0}'")]
pub struct UndeclaredName(pub String);

impl UndeclaredName {
    pub fn name(&self) -> &str {
        &self.0
    }
}
