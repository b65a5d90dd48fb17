//! Statement AST for session scripts

use crate::common::Span;
use crate::sema::Expr;
use crate::types::Type;

/// A parsed session script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub statements: Vec<Stmt>,
}

impl Script {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Stmt> {
        self.statements.iter().filter(|s| s.is_declaration())
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Stmt> {
        self.statements.iter().filter(|s| !s.is_declaration())
    }
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    /// Whole statement, including the trailing ';'
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self.kind, StmtKind::Declaration { .. })
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable declaration: int x;
    Declaration {
        ty: Type,
        name: String,
        name_span: Span,
    },

    /// Assignment: x = 42;
    Assignment {
        target: String,
        target_span: Span,
        value: Expr,
        value_span: Span,
    },
}
