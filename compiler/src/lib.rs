//! aaa: a minimal expression language
//!
//! Integer and float arithmetic, parentheses, exponentiation and global
//! variables assigned with `set`.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Interpreter → Value
//! ```
//!
//! Each stage stops at its first error.
//!
//! # Example
//!
//! ```
//! use aaa::interp::{SymbolTable, Value};
//!
//! let globals = SymbolTable::new().shared();
//! aaa::run("<doc>", "set x = 2 ^ 3 ^ 2", &globals).unwrap();
//! assert_eq!(aaa::run("<doc>", "x + 1", &globals).unwrap(), Value::Int(513));
//! ```

pub mod ast;
pub mod common;
pub mod config;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-export diagnostics for convenience
pub use diagnostics::{Error, ErrorKind, SourceFile};

// Re-exports for convenience
pub use ast::Node;
pub use interp::{Context, SharedSymbolTable, SymbolTable, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name of the top-level context
pub const PROGRAM_CONTEXT: &str = "<program>";

/// Lex, parse and evaluate `source` against `globals`
///
/// Assignments made by `source` stay in `globals`, so later calls see them.
pub fn run(file_name: &str, source: &str, globals: &SharedSymbolTable) -> Result<Value, Error> {
    let file = SourceFile::new(file_name, source);
    let tokens = lexer::lex(&file)?;
    let ast = parser::parse(&tokens, &file)?;

    let context = Context::new(PROGRAM_CONTEXT, globals.clone());
    let value = interp::Interpreter::new(&file).visit(&ast, &context)?;
    tracing::debug!("{} evaluated to {}", file_name, value);
    Ok(value)
}

/// Lex source code into tokens
pub fn tokenize(file_name: &str, source: &str) -> Result<Vec<lexer::Token>, Error> {
    lexer::lex(&SourceFile::new(file_name, source))
}

/// Parse source code to an AST
pub fn parse_source(file_name: &str, source: &str) -> Result<Node, Error> {
    let file = SourceFile::new(file_name, source);
    let tokens = lexer::lex(&file)?;
    parser::parse(&tokens, &file)
}
