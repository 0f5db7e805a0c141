//! Parser for the aaa language
//!
//! A recursive descent parser that produces an AST from a token stream.
//!
//! ```text
//! expr   := "set" IDENT "=" expr | term (("+" | "-") term)*
//! term   := factor (("*" | "/") factor)*
//! factor := ("+" | "-") factor | power
//! power  := atom ("^" factor)*
//! atom   := INT | FLOAT | IDENT | "(" expr ")"
//! ```

use crate::ast::{BinaryOp, Literal, Node, UnaryOp};
use crate::common::Span;
use crate::diagnostics::{Error, SourceFile};
use crate::lexer::{Token, TokenKind};

// Boxed so every recursive frame carries a pointer instead of a full error
type Result<T> = std::result::Result<T, Box<Error>>;

/// A grammar rule, passed to [`Parser::bin_op`] as an operand parser
type Rule<'a> = fn(&mut Parser<'a>) -> Result<Node>;

/// Nesting limit for the parse tree
///
/// Parentheses, unary operators, `set` right-hand sides and every
/// binary operator in a chain each add a level. At this depth parsing and
/// evaluation both fit in a 2 MiB thread stack.
pub const MAX_DEPTH: usize = 256;

/// Parse a token stream into a single expression
///
/// The stream must be fully consumed: anything but `Eof` after the
/// expression is a syntax error.
pub fn parse(tokens: &[Token], file: &SourceFile) -> std::result::Result<Node, Error> {
    if tokens.is_empty() {
        return Err(Error::invalid_syntax(
            file,
            Span::default(),
            "Unexpected end of input",
        ));
    }

    let mut parser = Parser::new(tokens, file);
    let node = parser.parse_expr().map_err(|e| *e)?;

    if !parser.at(TokenKind::Eof) {
        return Err(*parser.error(r#"Expected "+", "-", "*" or "/""#));
    }

    tracing::debug!("Parsed {} nodes", node.size());
    Ok(node)
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    file: &'a SourceFile,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], file: &'a SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            file,
        }
    }

    /// Current token; sticks on the last one once the stream is exhausted
    fn current(&self) -> &'a Token {
        match self.tokens.get(self.pos) {
            Some(tok) => tok,
            None => &self.tokens[self.tokens.len() - 1],
        }
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> &'a Token {
        let tok = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn span(&self) -> Span {
        self.current().span
    }

    /// Syntax error at the current token
    fn error(&self, details: &str) -> Box<Error> {
        self.error_at(self.span(), details)
    }

    fn error_at(&self, span: Span, details: &str) -> Box<Error> {
        Box::new(Error::invalid_syntax(self.file, span, details))
    }

    fn too_deep(&self) -> Box<Error> {
        self.error("Expression nested too deeply")
    }

    /// Run `rule` one nesting level deeper
    fn nested(&mut self, rule: Rule<'a>) -> Result<Node> {
        if self.depth >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expr(&mut self) -> Result<Node> {
        if self.current().is_keyword("set") {
            return self.parse_assign();
        }

        let start = self.pos;
        self.bin_op(
            Self::parse_term,
            &[BinaryOp::Add, BinaryOp::Sub],
            Self::parse_term,
        )
        .map_err(|err| {
            // Nothing matched at all: name every way an expression can start
            if self.pos == start {
                self.error(r#"Expected "set", int, float, identifier, "+", "-" or "(""#)
            } else {
                err
            }
        })
    }

    fn parse_assign(&mut self) -> Result<Node> {
        self.advance();

        if !self.at(TokenKind::Identifier) {
            return Err(self.error("Expected identifier"));
        }
        let name = self.advance().clone();

        if !self.at(TokenKind::Eq) {
            return Err(self.error(r#"Expected "=""#));
        }
        self.advance();

        let value = self.nested(Self::parse_expr)?;
        Ok(Node::VarAssign {
            name,
            value: Box::new(value),
        })
    }

    fn parse_term(&mut self) -> Result<Node> {
        self.bin_op(
            Self::parse_factor,
            &[BinaryOp::Mul, BinaryOp::Div],
            Self::parse_factor,
        )
    }

    fn parse_factor(&mut self) -> Result<Node> {
        if let Some(op) = UnaryOp::from_token(self.peek()) {
            let op_span = self.advance().span;
            let operand = self.nested(Self::parse_factor)?;
            return Ok(Node::UnaryOp {
                op,
                op_span,
                operand: Box::new(operand),
            });
        }

        self.parse_power()
    }

    /// `^` takes a factor on its right, which makes it right-associative and
    /// lets the exponent carry a sign: `2^3^2`, `2^-1`
    fn parse_power(&mut self) -> Result<Node> {
        self.bin_op(Self::parse_atom, &[BinaryOp::Pow], Self::parse_factor)
    }

    fn parse_atom(&mut self) -> Result<Node> {
        match self.peek() {
            TokenKind::Int => {
                let token = self.advance();
                let value = token
                    .text
                    .parse::<i64>()
                    .map_err(|_| self.error_at(token.span, "Integer literal too large"))?;
                Ok(Node::Number {
                    value: Literal::Int(value),
                    span: token.span,
                })
            }
            TokenKind::Float => {
                let token = self.advance();
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| self.error_at(token.span, "Invalid float literal"))?;
                Ok(Node::Number {
                    value: Literal::Float(value),
                    span: token.span,
                })
            }
            TokenKind::Identifier => Ok(Node::VarAccess {
                name: self.advance().clone(),
            }),
            TokenKind::LParen => {
                self.advance();
                let expr = self.nested(Self::parse_expr)?;
                if self.at(TokenKind::RParen) {
                    self.advance();
                    Ok(expr)
                } else {
                    Err(self.error(r#"Expected ")""#))
                }
            }
            _ => Err(self.error(r#"Expected int, float, identifier, "+", "-" or "(""#)),
        }
    }

    // ==================== HELPERS ====================

    /// Left-fold `left (op right)*` into a chain of `BinOp` nodes
    ///
    /// Every fold step deepens the tree by one level and counts against
    /// [`MAX_DEPTH`] until the chain ends.
    fn bin_op(&mut self, left: Rule<'a>, ops: &[BinaryOp], right: Rule<'a>) -> Result<Node> {
        let mut node = left(self)?;
        let depth = self.depth;

        let result = loop {
            let Some(op) = BinaryOp::from_token(self.peek()).filter(|op| ops.contains(op)) else {
                break Ok(node);
            };
            if self.depth >= MAX_DEPTH {
                break Err(self.too_deep());
            }
            self.depth += 1;
            self.advance();

            match right(self) {
                Ok(rhs) => {
                    node = Node::BinOp {
                        left: Box::new(node),
                        op,
                        right: Box::new(rhs),
                    }
                }
                Err(err) => break Err(err),
            }
        };

        self.depth = depth;
        result
    }
}
