//! Tree-walking evaluator

use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::common::Span;
use crate::diagnostics::{Error, SourceFile};

use super::context::Context;
use super::value::{ArithError, Value};

type Result<T> = std::result::Result<T, Error>;

/// Tree-walking interpreter
///
/// Holds only the source file the tree came from, for error reporting;
/// all mutable state lives in the context's symbol table.
pub struct Interpreter<'a> {
    file: &'a SourceFile,
}

impl<'a> Interpreter<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self { file }
    }

    /// Evaluate a node; the first error aborts the whole evaluation
    pub fn visit(&self, node: &Node, context: &Context) -> Result<Value> {
        match node {
            Node::Number { value, .. } => Ok(Value::from(*value)),

            Node::VarAccess { name } => {
                let value = context.symbol_table.borrow().get(&name.text);
                value.ok_or_else(|| {
                    self.runtime_error(name.span, format!("'{}' is not defined", name.text), context)
                })
            }

            Node::VarAssign { name, value } => {
                let value = self.visit(value, context)?;
                tracing::trace!("set {} = {}", name.text, value);
                context
                    .symbol_table
                    .borrow_mut()
                    .set(name.text.clone(), value);
                Ok(value)
            }

            Node::UnaryOp { op, operand, .. } => {
                let val = self.visit(operand, context)?;
                match op {
                    UnaryOp::Plus => Ok(val),
                    UnaryOp::Neg => val
                        .checked_neg()
                        .map_err(|e| self.runtime_error(node.span(), e.message(), context)),
                }
            }

            Node::BinOp { left, op, right } => {
                let lhs = self.visit(left, context)?;
                let rhs = self.visit(right, context)?;

                let result = match op {
                    BinaryOp::Add => lhs.checked_add(rhs),
                    BinaryOp::Sub => lhs.checked_sub(rhs),
                    BinaryOp::Mul => lhs.checked_mul(rhs),
                    BinaryOp::Div => lhs.checked_div(rhs),
                    BinaryOp::Pow => lhs.checked_pow(rhs),
                };

                result.map_err(|e| {
                    // A zero divisor is blamed on the right operand alone
                    let span = match e {
                        ArithError::DivisionByZero => right.span(),
                        ArithError::Overflow | ArithError::NotReal => node.span(),
                    };
                    self.runtime_error(span, e.message(), context)
                })
            }
        }
    }

    fn runtime_error(&self, span: Span, details: impl Into<String>, context: &Context) -> Error {
        Error::runtime(
            self.file,
            span,
            details,
            context.traceback(&self.file.name, span.start),
        )
    }
}
