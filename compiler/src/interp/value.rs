//! Runtime values for the interpreter

use std::fmt;

use crate::ast::Literal;

/// Runtime value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
}

/// Why an arithmetic operation produced no value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    DivisionByZero,
    Overflow,
    NotReal,
}

impl ArithError {
    pub fn message(&self) -> &'static str {
        match self {
            ArithError::DivisionByZero => "Division by zero",
            ArithError::Overflow => "Integer overflow",
            ArithError::NotReal => "Result is not a real number",
        }
    }
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
        }
    }

    /// Get as float, widening integers
    pub fn as_float(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(f) => *f,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
        }
    }

    pub fn checked_add(self, rhs: Value) -> Result<Value, ArithError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                a.checked_add(b).map(Value::Int).ok_or(ArithError::Overflow)
            }
            (a, b) => Ok(Value::Float(a.as_float() + b.as_float())),
        }
    }

    pub fn checked_sub(self, rhs: Value) -> Result<Value, ArithError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                a.checked_sub(b).map(Value::Int).ok_or(ArithError::Overflow)
            }
            (a, b) => Ok(Value::Float(a.as_float() - b.as_float())),
        }
    }

    pub fn checked_mul(self, rhs: Value) -> Result<Value, ArithError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                a.checked_mul(b).map(Value::Int).ok_or(ArithError::Overflow)
            }
            (a, b) => Ok(Value::Float(a.as_float() * b.as_float())),
        }
    }

    /// Division always yields a float
    pub fn checked_div(self, rhs: Value) -> Result<Value, ArithError> {
        if rhs.is_zero() {
            return Err(ArithError::DivisionByZero);
        }
        Ok(Value::Float(self.as_float() / rhs.as_float()))
    }

    /// Integer result only for an integer base with a non-negative integer
    /// exponent
    pub fn checked_pow(self, exp: Value) -> Result<Value, ArithError> {
        match (self, exp) {
            (Value::Int(base), Value::Int(e)) if e >= 0 => match u32::try_from(e) {
                Ok(e) => base.checked_pow(e).map(Value::Int).ok_or(ArithError::Overflow),
                Err(_) => match base {
                    0 | 1 => Ok(Value::Int(base)),
                    -1 => Ok(Value::Int(if e % 2 == 0 { 1 } else { -1 })),
                    _ => Err(ArithError::Overflow),
                },
            },
            (base, e) => {
                let (base, e) = (base.as_float(), e.as_float());
                if base == 0.0 && e < 0.0 {
                    return Err(ArithError::DivisionByZero);
                }
                let result = base.powf(e);
                if result.is_nan() && !base.is_nan() && !e.is_nan() {
                    Err(ArithError::NotReal)
                } else {
                    Ok(Value::Float(result))
                }
            }
        }
    }

    pub fn checked_neg(self) -> Result<Value, ArithError> {
        match self {
            Value::Int(n) => n.checked_neg().map(Value::Int).ok_or(ArithError::Overflow),
            Value::Float(f) => Ok(Value::Float(-f)),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(n) => Value::Int(n),
            Literal::Float(f) => Value::Float(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            // Debug keeps the trailing `.0` on integral floats
            Value::Float(n) => write!(f, "{:?}", n),
        }
    }
}
