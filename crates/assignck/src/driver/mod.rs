//! Checking session orchestration
//!
//! A session owns the symbol table. Leading declarations populate it; the
//! first assignment closes the declaration phase, after which the table is
//! only ever borrowed by a [`TypeChecker`].

mod report;

pub use report::{Outcome, OutcomeKind, SessionReport};

use crate::common::{CompileResult, DiagnosticReporter, Location};
use crate::frontend::{self, Script, StmtKind};
use crate::sema::{CheckResult, Expr, SymbolTable, TypeChecker};
use crate::types::Type;
use tracing::debug;

/// Options for running a session
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub verbose: bool,
}

/// Phase of a checking session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Declarations may still be added
    Declaring,
    /// The table is frozen and assignments are being checked
    Checking,
}

/// A checking session over one symbol table
#[derive(Debug)]
pub struct Session {
    table: SymbolTable,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            phase: Phase::Declaring,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Declare a variable during the declaration phase
    pub fn declare(&mut self, name: &str, ty: Type) -> Option<OutcomeKind> {
        if self.phase == Phase::Checking {
            debug!(name, %ty, "declaration after checking began");
            return Some(OutcomeKind::LateDeclaration { name: name.to_string(), ty });
        }

        if self.table.declare(name, ty) {
            debug!(name, %ty, "declared");
            None
        } else {
            let previous = self.table.lookup(name).unwrap_or(ty);
            debug!(name, %ty, %previous, "duplicate declaration");
            Some(OutcomeKind::DuplicateDeclaration { name: name.to_string(), previous })
        }
    }

    /// Close the declaration phase
    pub fn begin_checking(&mut self) {
        if self.phase == Phase::Declaring {
            debug!(symbols = self.table.len(), "declaration phase closed");
            self.phase = Phase::Checking;
        }
    }

    /// Check one assignment, closing the declaration phase if still open
    pub fn check(&mut self, target: &str, value: &Expr, location: Location) -> CheckResult {
        self.begin_checking();
        TypeChecker::new(&self.table).check_assignment_at(target, value, location)
    }

    /// Run every statement of a parsed script in order
    pub fn run_script(&mut self, script: &Script, source: &str) -> SessionReport {
        let mut outcomes = Vec::with_capacity(script.statements.len());

        for stmt in &script.statements {
            match &stmt.kind {
                StmtKind::Declaration { ty, name, name_span } => {
                    if let Some(kind) = self.declare(name, *ty) {
                        outcomes.push(Outcome::new(kind, *name_span, name_span.location_in(source)));
                    }
                }
                StmtKind::Assignment { target, target_span, value, value_span } => {
                    let location = stmt.span.location_in(source);
                    let result = self.check(target, value, location);
                    let kind = OutcomeKind::Checked { target: target.clone(), result };
                    outcomes.push(
                        Outcome::new(kind, stmt.span, location)
                            .with_operand_spans(*target_span, *value_span),
                    );
                }
            }
        }

        SessionReport::new(outcomes, self.table.len())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and check a whole script in a fresh session
///
/// Parse failures are reported through `reporter` and returned.
pub fn check_source(
    source: &str,
    file_id: usize,
    reporter: &DiagnosticReporter,
    config: &SessionConfig,
) -> CompileResult<SessionReport> {
    if config.dump_tokens {
        match frontend::dump_tokens(source) {
            Ok(tokens) => {
                eprintln!("=== Tokens ===");
                eprint!("{}", tokens);
                eprintln!("=== End Tokens ===\n");
            }
            Err(e) => {
                reporter.report_error(file_id, &e);
                return Err(e);
            }
        }
    }

    if config.verbose {
        eprintln!("Parsing script...");
    }
    let script = match frontend::parse_script(source) {
        Ok(script) => script,
        Err(e) => {
            reporter.report_error(file_id, &e);
            return Err(e);
        }
    };

    if config.dump_ast {
        eprintln!("=== AST ===");
        eprintln!("{:#?}", script);
        eprintln!("=== End AST ===\n");
    }

    if config.verbose {
        eprintln!("Checking {} statement(s)...", script.statements.len());
    }
    let report = Session::new().run_script(&script, source);

    for outcome in report.errors() {
        if let Some(diagnostic) = outcome.to_diagnostic(file_id) {
            reporter.report(&diagnostic);
        }
    }

    Ok(report)
}
