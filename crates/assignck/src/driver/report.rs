//! Per-statement outcomes of a checking session

use crate::common::{Location, Span};
use crate::sema::{CheckResult, Rejection};
use crate::types::Type;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::fmt;

/// What happened to one statement
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeKind {
    /// An assignment went through the checker
    Checked { target: String, result: CheckResult },
    /// A name was declared a second time; the first declaration stands
    DuplicateDeclaration { name: String, previous: Type },
    /// A declaration followed the first assignment and was ignored
    LateDeclaration { name: String, ty: Type },
}

/// Outcome of one statement, with where it happened
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub span: Span,
    pub location: Location,
    /// Assignment target and value, when the statement was an assignment
    pub operands: Option<(Span, Span)>,
}

impl Outcome {
    pub fn new(kind: OutcomeKind, span: Span, location: Location) -> Self {
        Self {
            kind,
            span,
            location,
            operands: None,
        }
    }

    pub fn with_operand_spans(mut self, target: Span, value: Span) -> Self {
        self.operands = Some((target, value));
        self
    }

    pub fn is_error(&self) -> bool {
        !matches!(self.kind, OutcomeKind::Checked { result: Ok(_), .. })
    }

    /// Stable diagnostic code, `None` for accepted assignments
    pub fn code(&self) -> Option<&'static str> {
        match &self.kind {
            OutcomeKind::Checked { result: Ok(_), .. } => None,
            OutcomeKind::Checked { result: Err(rejection), .. } => Some(rejection.code()),
            OutcomeKind::DuplicateDeclaration { .. } => Some("E0004"),
            OutcomeKind::LateDeclaration { .. } => Some("E0005"),
        }
    }

    /// Build a diagnostic for an error outcome
    pub fn to_diagnostic(&self, file_id: usize) -> Option<Diagnostic<usize>> {
        let (target_span, value_span) = self.operands.unwrap_or((self.span, self.span));

        let diagnostic = match &self.kind {
            OutcomeKind::Checked { result: Ok(_), .. } => return None,

            OutcomeKind::Checked { result: Err(rejection), target } => {
                let base = Diagnostic::error()
                    .with_message(rejection.title())
                    .with_code(rejection.code());
                match rejection {
                    Rejection::UndeclaredTarget { name } => base
                        .with_labels(vec![
                            Label::primary(file_id, target_span.range())
                                .with_message(format!("`{}` is not declared", name)),
                        ])
                        .with_notes(vec![
                            "variables must be declared before they are assigned".to_string(),
                        ]),
                    Rejection::UndeclaredSource { name } => base.with_labels(vec![
                        Label::primary(file_id, value_span.range())
                            .with_message(format!("`{}` is not declared", name)),
                    ]),
                    Rejection::TypeMismatch { from, to } => base
                        .with_labels(vec![
                            Label::primary(file_id, value_span.range())
                                .with_message(format!("this has type `{}`", from)),
                            Label::secondary(file_id, target_span.range())
                                .with_message(format!("`{}` is declared as `{}`", target, to)),
                        ])
                        .with_notes(vec![
                            format!("`{}` does not implicitly convert to `{}`", from, to),
                            "implicit conversions only widen: char -> int -> float".to_string(),
                        ]),
                }
            }

            OutcomeKind::DuplicateDeclaration { name, previous } => Diagnostic::error()
                .with_message("duplicate declaration")
                .with_code("E0004")
                .with_labels(vec![
                    Label::primary(file_id, self.span.range())
                        .with_message(format!("`{}` is already declared as `{}`", name, previous)),
                ]),

            OutcomeKind::LateDeclaration { name, ty } => Diagnostic::error()
                .with_message("declaration after checking began")
                .with_code("E0005")
                .with_labels(vec![
                    Label::primary(file_id, self.span.range())
                        .with_message(format!("`{}: {}` is ignored", name, ty)),
                ])
                .with_notes(vec![
                    "all declarations must come before the first assignment".to_string(),
                ]),
        };

        Some(diagnostic)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.location.line)?;
        match &self.kind {
            OutcomeKind::Checked { target, result: Ok(ok) } => {
                write!(f, "assignment OK: {}: {} <- {}", target, ok.declared, ok.resolved)?;
                if ok.is_widening() {
                    f.write_str(" (widening)")?;
                }
                Ok(())
            }
            OutcomeKind::Checked { result: Err(rejection), .. } => {
                write!(f, "error[{}]: {}", rejection.code(), rejection)
            }
            OutcomeKind::DuplicateDeclaration { name, previous } => {
                write!(f, "error[E0004]: '{}' is already declared as '{}'", name, previous)
            }
            OutcomeKind::LateDeclaration { name, .. } => {
                write!(f, "error[E0005]: '{}' declared after checking began", name)
            }
        }
    }
}

/// All outcomes of a session, in statement order
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    outcomes: Vec<Outcome>,
    symbols: usize,
}

impl SessionReport {
    pub fn new(outcomes: Vec<Outcome>, symbols: usize) -> Self {
        Self { outcomes, symbols }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn accepted(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_error())
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Number of variables declared when the session finished
    pub fn symbol_count(&self) -> usize {
        self.symbols
    }
}
