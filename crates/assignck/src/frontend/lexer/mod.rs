//! Lexer module for tokenizing session scripts

mod token;
mod scanner;

pub use token::{Token, TokenKind};
pub use scanner::Lexer;
