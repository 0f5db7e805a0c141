//! Abstract Syntax Tree for the aaa language
//!
//! This module defines the AST types produced by the parser. Literals and
//! operators are decoded while parsing; nodes keep the spans they were
//! built from, so every node can report its source span.

use crate::common::Span;
use crate::lexer::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Integer or float literal
    Number { value: Literal, span: Span },
    /// Variable read: `x`
    VarAccess { name: Token },
    /// Assignment: `set x = value`
    VarAssign { name: Token, value: Box<Node> },
    /// Prefix operator: `-x`, `+x`
    UnaryOp {
        op: UnaryOp,
        op_span: Span,
        operand: Box<Node>,
    },
    /// Infix operator: `a + b`
    BinOp {
        left: Box<Node>,
        op: BinaryOp,
        right: Box<Node>,
    },
}

impl Node {
    /// Span from the leftmost to the rightmost token of this node
    ///
    /// An assignment's span starts at its identifier, matching the position
    /// the `set` keyword is dropped at.
    pub fn span(&self) -> Span {
        match self {
            Node::Number { span, .. } => *span,
            Node::VarAccess { name } => name.span,
            Node::VarAssign { name, value } => name.span.merge(value.span()),
            Node::UnaryOp {
                op_span, operand, ..
            } => op_span.merge(operand.span()),
            Node::BinOp { left, right, .. } => left.span().merge(right.span()),
        }
    }

    /// Number of nodes in this tree
    pub fn size(&self) -> usize {
        match self {
            Node::Number { .. } | Node::VarAccess { .. } => 1,
            Node::VarAssign { value, .. } => 1 + value.size(),
            Node::UnaryOp { operand, .. } => 1 + operand.size(),
            Node::BinOp { left, right, .. } => 1 + left.size() + right.size(),
        }
    }
}

/// Numeric literal, decoded from its token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{:?}", n),
        }
    }
}

/// Binary operators, keyed by token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Caret => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Plus,
    Neg,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
        }
    }
}

/// Fully parenthesized rendering, handy for checking tree shape
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number { value, .. } => write!(f, "{}", value),
            Node::VarAccess { name } => write!(f, "{}", name.text),
            Node::VarAssign { name, value } => write!(f, "(set {} = {})", name.text, value),
            Node::UnaryOp { op, operand, .. } => write!(f, "({}{})", op.as_str(), operand),
            Node::BinOp { left, op, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
        }
    }
}
