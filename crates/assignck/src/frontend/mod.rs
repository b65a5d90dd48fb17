//! Session script frontend
//!
//! Turns the text of a checking session into declarations and assignments:
//!
//! ```text
//! int x;
//! float y;
//! y = x;      // widening, accepted
//! ```
//!
//! The checker itself never sees source text; this module exists so the
//! command-line harness can feed it.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Script, Stmt, StmtKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::common::CompileResult;

/// Parse a complete session script
pub fn parse_script(source: &str) -> CompileResult<Script> {
    Parser::new(source)?.parse()
}

/// Render the token stream of `source`, one token per line
pub fn dump_tokens(source: &str) -> CompileResult<String> {
    let tokens = Lexer::new(source).tokenize_all()?;
    let mut output = String::new();
    for token in &tokens {
        output.push_str(&format!("{:?}\n", token));
    }
    Ok(output)
}
