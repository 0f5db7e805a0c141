//! Tree-walking interpreter for the AST
//!
//! Evaluates a parsed expression against the symbol table held by a
//! [`Context`].

pub mod context;
pub mod eval;
pub mod value;

pub use context::{Context, SharedSymbolTable, SymbolTable};
pub use eval::Interpreter;
pub use value::Value;
