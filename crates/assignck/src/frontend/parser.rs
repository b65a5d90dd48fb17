//! Recursive descent parser for session scripts

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::{Script, Stmt, StmtKind};
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::sema::{Expr, Literal};

/// Recursive descent parser for session scripts
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete script
    pub fn parse(&mut self) -> CompileResult<Script> {
        let mut statements = Vec::new();

        while !self.at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Script::new(statements))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> CompileResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(CompileError::parser(
                format!("expected {}, found {}", kind, self.current.kind),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<(String, Span)> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let span = self.advance()?.span;
                Ok((name, span))
            }
            other => Err(CompileError::parser(
                format!("expected identifier, found {}", other),
                self.current.span,
            )),
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> CompileResult<Stmt> {
        let start = self.current.span;

        let kind = if let Some(ty) = self.current.kind.as_type() {
            self.advance()?;
            let (name, name_span) = self.expect_identifier()?;
            StmtKind::Declaration { ty, name, name_span }
        } else if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let (target, target_span) = self.expect_identifier()?;
            self.expect(TokenKind::Eq)?;
            let (value, value_span) = self.parse_expression()?;
            StmtKind::Assignment { target, target_span, value, value_span }
        } else {
            return Err(CompileError::parser(
                format!("expected declaration or assignment, found {}", self.current.kind),
                start,
            ));
        };

        let semi = self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(kind, start.to(semi.span)))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> CompileResult<(Expr, Span)> {
        let span = self.current.span;

        if self.check(&TokenKind::Minus) {
            self.advance()?;
            return self.parse_negated_literal(span);
        }

        match &self.current.kind {
            TokenKind::IntLiteral(s) => {
                let value = self.parse_int_literal(s)?;
                self.advance()?;
                Ok((Expr::literal(Literal::Int(value)), span))
            }
            TokenKind::HexLiteral(s) => {
                let value = self.parse_hex_literal(s)?;
                self.advance()?;
                Ok((Expr::literal(Literal::Int(value)), span))
            }
            TokenKind::FloatLiteral(s) => {
                let value = self.parse_float_literal(s)?;
                self.advance()?;
                Ok((Expr::literal(Literal::Float(value)), span))
            }
            TokenKind::CharLiteral(s) => {
                let value = self.parse_char_literal(s)?;
                self.advance()?;
                Ok((Expr::literal(Literal::Char(value)), span))
            }
            TokenKind::StringLiteral(s) => {
                let value = self.parse_string_literal(s)?;
                self.advance()?;
                Ok((Expr::literal(Literal::Str(value)), span))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok((Expr::variable(name), span))
            }
            _ => Err(CompileError::parser(
                format!("unexpected token in expression: {}", self.current.kind),
                span,
            )),
        }
    }

    /// Numeric literal after a leading '-'
    fn parse_negated_literal(&mut self, minus: Span) -> CompileResult<(Expr, Span)> {
        let span = minus.to(self.current.span);

        let literal = match &self.current.kind {
            TokenKind::IntLiteral(s) => Literal::Int(self.parse_int_literal(&format!("-{s}"))?),
            TokenKind::HexLiteral(s) => {
                let magnitude = self.parse_hex_digits(s)?;
                let value = 0i64.checked_sub_unsigned(magnitude).ok_or_else(|| {
                    CompileError::parser(format!("hex literal out of range: -{}", s), self.current.span)
                })?;
                Literal::Int(value)
            }
            TokenKind::FloatLiteral(s) => Literal::Float(-self.parse_float_literal(s)?),
            other => {
                return Err(CompileError::parser(
                    format!("expected numeric literal after '-', found {}", other),
                    self.current.span,
                ));
            }
        };
        self.advance()?;

        Ok((Expr::literal(literal), span))
    }

    // =========================================================================
    // Literal parsing helpers
    // =========================================================================

    fn parse_int_literal(&self, s: &str) -> CompileResult<i64> {
        s.parse().map_err(|_| {
            CompileError::parser(format!("integer literal out of range: {}", s), self.current.span)
        })
    }

    fn parse_hex_literal(&self, s: &str) -> CompileResult<i64> {
        let magnitude = self.parse_hex_digits(s)?;
        i64::try_from(magnitude).map_err(|_| {
            CompileError::parser(format!("hex literal out of range: {}", s), self.current.span)
        })
    }

    /// Unsigned value of a hex literal, sign applied by the caller
    fn parse_hex_digits(&self, s: &str) -> CompileResult<u64> {
        let digits = s.trim_start_matches("0x").trim_start_matches("0X");
        u64::from_str_radix(digits, 16).map_err(|_| {
            CompileError::parser(format!("hex literal out of range: {}", s), self.current.span)
        })
    }

    fn parse_float_literal(&self, s: &str) -> CompileResult<f64> {
        let value: f64 = s.parse().map_err(|_| {
            CompileError::parser(format!("invalid float literal: {}", s), self.current.span)
        })?;
        if !value.is_finite() {
            return Err(CompileError::parser(
                format!("float literal out of range: {}", s),
                self.current.span,
            ));
        }
        Ok(value)
    }

    fn parse_char_literal(&self, s: &str) -> CompileResult<char> {
        let inner = &s[1..s.len() - 1]; // Remove quotes
        let mut chars = inner.chars();
        let value = match chars.next() {
            Some('\\') => self.parse_escape_sequence(&mut chars)?,
            Some(c) => c,
            None => {
                return Err(CompileError::parser("empty character literal", self.current.span));
            }
        };
        if chars.next().is_some() {
            return Err(CompileError::parser(
                format!("character literal holds more than one character: {}", s),
                self.current.span,
            ));
        }
        Ok(value)
    }

    fn parse_string_literal(&self, s: &str) -> CompileResult<String> {
        let inner = &s[1..s.len() - 1]; // Remove quotes
        let mut result = String::new();
        let mut chars = inner.chars();

        while let Some(c) = chars.next() {
            if c == '\\' {
                result.push(self.parse_escape_sequence(&mut chars)?);
            } else {
                result.push(c);
            }
        }

        Ok(result)
    }

    /// Parse an escape sequence after the backslash
    fn parse_escape_sequence(&self, chars: &mut std::str::Chars) -> CompileResult<char> {
        match chars.next() {
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('0') => Ok('\0'),
            Some(c @ ('\\' | '\'' | '"')) => Ok(c),
            Some(c) => Err(CompileError::parser(
                format!("unknown escape sequence: \\{}", c),
                self.current.span,
            )),
            None => Err(CompileError::parser("incomplete escape sequence", self.current.span)),
        }
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").field("current", &self.current).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Script {
        Parser::new(source).unwrap().parse().unwrap()
    }

    fn parse_value(source: &str) -> Expr {
        let script = parse(source);
        match &script.statements[0].kind {
            StmtKind::Assignment { value, .. } => value.clone(),
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    fn parse_err(source: &str) -> CompileError {
        match Parser::new(source).and_then(|mut p| p.parse()) {
            Ok(script) => panic!("expected error, parsed {:?}", script),
            Err(e) => e,
        }
    }

    #[test]
    fn test_parse_declaration() {
        let script = parse("int x;");
        assert_eq!(
            script.statements,
            vec![Stmt::new(
                StmtKind::Declaration {
                    ty: Type::Int,
                    name: "x".into(),
                    name_span: Span::new(4, 5),
                },
                Span::new(0, 6),
            )]
        );
    }

    #[test]
    fn test_parse_assignment() {
        let script = parse("y = x;");
        assert_eq!(
            script.statements,
            vec![Stmt::new(
                StmtKind::Assignment {
                    target: "y".into(),
                    target_span: Span::new(0, 1),
                    value: Expr::variable("x"),
                    value_span: Span::new(4, 5),
                },
                Span::new(0, 6),
            )]
        );
    }

    #[test]
    fn test_parse_session() {
        let script = parse(
            "int x;\nfloat y;\nchar c;\nstring msg;\n\nx = 42;\ny = x; // widen\n",
        );
        assert_eq!(script.statements.len(), 6);
        assert_eq!(script.declarations().count(), 4);
        assert_eq!(script.assignments().count(), 2);
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_value("x = 42;"), Expr::literal(Literal::Int(42)));
        assert_eq!(parse_value("x = 0x1F;"), Expr::literal(Literal::Int(31)));
        assert_eq!(parse_value("x = 2.5;"), Expr::literal(Literal::Float(2.5)));
        assert_eq!(parse_value("x = 1e2;"), Expr::literal(Literal::Float(100.0)));
        assert_eq!(parse_value("x = 'A';"), Expr::literal(Literal::Char('A')));
        assert_eq!(parse_value(r"x = '\n';"), Expr::literal(Literal::Char('\n')));
        assert_eq!(parse_value(r"x = '\'';"), Expr::literal(Literal::Char('\'')));
        assert_eq!(
            parse_value(r#"x = "say \"hi\"\t";"#),
            Expr::literal(Literal::Str("say \"hi\"\t".into()))
        );
    }

    #[test]
    fn test_parse_negative_literals() {
        assert_eq!(parse_value("x = -7;"), Expr::literal(Literal::Int(-7)));
        assert_eq!(parse_value("x = -0.5;"), Expr::literal(Literal::Float(-0.5)));
        assert_eq!(
            parse_value("x = -9223372036854775808;"),
            Expr::literal(Literal::Int(i64::MIN))
        );
    }

    #[test]
    fn test_hex_bounds() {
        assert_eq!(
            parse_value("x = -0x8000000000000000;"),
            Expr::literal(Literal::Int(i64::MIN))
        );
        assert_eq!(
            parse_value("x = 0x7FFFFFFFFFFFFFFF;"),
            Expr::literal(Literal::Int(i64::MAX))
        );
        assert_eq!(parse_value("x = -0x10;"), Expr::literal(Literal::Int(-16)));

        let err = parse_err("x = 0x8000000000000000;");
        assert!(matches!(
            err,
            CompileError::Parser { ref message, .. } if message.starts_with("hex literal out of range")
        ));
        let err = parse_err("x = -0x8000000000000001;");
        assert!(matches!(
            err,
            CompileError::Parser { ref message, .. } if message.starts_with("hex literal out of range")
        ));
        assert!(matches!(parse_err("x = 0x10000000000000000;"), CompileError::Parser { .. }));
    }

    #[test]
    fn test_float_overflow() {
        let err = parse_err("y = 1e999;");
        assert!(matches!(
            err,
            CompileError::Parser { ref message, span } if message == "float literal out of range: 1e999"
                && span == Span::new(4, 9)
        ));
        assert!(matches!(parse_err("y = -1.5e400;"), CompileError::Parser { .. }));
        assert_eq!(parse_value("y = 1e308;"), Expr::literal(Literal::Float(1e308)));
    }

    #[test]
    fn test_negative_value_span() {
        let script = parse("x = - 3;");
        match &script.statements[0].kind {
            StmtKind::Assignment { value_span, .. } => assert_eq!(*value_span, Span::new(4, 7)),
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_err("int x");
        assert!(matches!(
            err,
            CompileError::Parser { ref message, .. } if message == "expected ';', found end of file"
        ));
    }

    #[test]
    fn test_keyword_is_not_a_name() {
        let err = parse_err("int float;");
        assert!(matches!(err, CompileError::Parser { span, .. } if span == Span::new(4, 9)));
    }

    #[test]
    fn test_integer_overflow() {
        let err = parse_err("x = 99999999999999999999;");
        assert!(matches!(
            err,
            CompileError::Parser { ref message, .. } if message.starts_with("integer literal out of range")
        ));
    }

    #[test]
    fn test_bad_char_literals() {
        assert!(matches!(parse_err("c = '';"), CompileError::Parser { .. }));
        assert!(matches!(parse_err("c = 'ab';"), CompileError::Parser { .. }));
        assert!(matches!(parse_err(r"c = '\q';"), CompileError::Parser { .. }));
    }

    #[test]
    fn test_minus_needs_number() {
        let err = parse_err("x = -y;");
        assert!(matches!(
            err,
            CompileError::Parser { ref message, .. } if message.starts_with("expected numeric literal")
        ));
    }

    #[test]
    fn test_stray_token() {
        let err = parse_err("= 3;");
        assert!(matches!(err, CompileError::Parser { span, .. } if span == Span::new(0, 1)));
    }
}
