//! Interactive read-eval-print loop
//!
//! Every line is evaluated against the same symbol table, so variables set
//! on one line are visible on the next.

use miette::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::{Config, ReplConfig};
use crate::diagnostics::Error;
use crate::interp::{SharedSymbolTable, Value};

/// File name reported for REPL input
pub const REPL_FILE: &str = "<stdin>";

/// Result of handling one line of input
#[derive(Debug)]
pub enum Outcome {
    /// Blank line
    Empty,
    /// An expression evaluated
    Value(Value),
    /// Lexing, parsing or evaluation failed
    Error(Error),
    /// Text produced by a REPL command
    Output(String),
    /// The user asked to leave
    Quit,
}

pub struct Repl {
    config: ReplConfig,
    globals: SharedSymbolTable,
}

impl Repl {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.repl.clone(),
            globals: config.globals_table(),
        }
    }

    /// The table shared by all lines
    pub fn globals(&self) -> &SharedSymbolTable {
        &self.globals
    }

    /// Handle one line: a `:command` or an expression
    pub fn handle(&mut self, line: &str) -> Outcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Outcome::Empty;
        }

        match trimmed {
            ":quit" | ":q" => Outcome::Quit,
            ":help" | ":h" => Outcome::Output(HELP.trim_end().to_string()),
            ":vars" => Outcome::Output(self.list_vars()),
            _ if trimmed.starts_with(":ast ") => {
                let expr = &trimmed[5..];
                match crate::parse_source(REPL_FILE, expr) {
                    Ok(ast) => match serde_json::to_string_pretty(&ast) {
                        Ok(json) => Outcome::Output(json),
                        Err(e) => Outcome::Output(format!("Failed to serialize AST: {}", e)),
                    },
                    Err(e) => Outcome::Error(e),
                }
            }
            _ if trimmed.starts_with(":tokens ") => {
                let expr = &trimmed[8..];
                match crate::tokenize(REPL_FILE, expr) {
                    Ok(tokens) => Outcome::Output(
                        tokens
                            .iter()
                            .map(|t| format!("{} {:?} @ {}", t.kind, t.text, t.span))
                            .collect::<Vec<_>>()
                            .join("\n"),
                    ),
                    Err(e) => Outcome::Error(e),
                }
            }
            _ if trimmed.starts_with(':') => {
                Outcome::Output(format!("Unknown command '{}', try :help", trimmed))
            }
            _ => match crate::run(REPL_FILE, trimmed, &self.globals) {
                Ok(value) => Outcome::Value(value),
                Err(e) => Outcome::Error(e),
            },
        }
    }

    fn list_vars(&self) -> String {
        let table = self.globals.borrow();
        if table.is_empty() {
            return "No variables defined".to_string();
        }
        table
            .iter()
            .map(|(name, value)| format!("{} = {} ({})", name, value, value.type_name()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run the loop on the terminal until `:quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        let mut editor =
            DefaultEditor::new().map_err(|e| miette::miette!("Failed to start line editor: {}", e))?;

        if let Some(path) = &self.config.history_file {
            if let Err(e) = editor.load_history(path) {
                tracing::debug!("No history loaded from {}: {}", path.display(), e);
            }
        }

        println!("aaa REPL v{}", crate::VERSION);
        println!("Type :help for help, :quit to exit");
        println!();

        let prompt = self.config.prompt.clone();
        loop {
            let line = match editor.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(miette::miette!("Failed to read input: {}", e)),
            };

            if !line.trim().is_empty() {
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    tracing::debug!("Failed to add history entry: {}", e);
                }
            }

            match self.handle(&line) {
                Outcome::Empty => {}
                Outcome::Value(value) => println!("{}", value),
                Outcome::Output(text) => println!("{}", text),
                Outcome::Error(e) => eprintln!("{:?}", miette::Report::new(e)),
                Outcome::Quit => break,
            }
        }

        if let Some(path) = &self.config.history_file {
            if let Err(e) = editor.save_history(path) {
                tracing::warn!("Failed to save history to {}: {}", path.display(), e);
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

const HELP: &str = "\
Commands:
  :help, :h        Show this help
  :quit, :q        Exit the REPL
  :vars            List defined variables
  :ast <expr>      Show the parsed AST as JSON
  :tokens <expr>   Show the tokens of an expression

Expressions:
  1 + 2 * 3        arithmetic with + - * / and ^
  set x = 5        assign a variable, usable on later lines
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    fn repl() -> Repl {
        Repl::new(&Config::default())
    }

    #[test]
    fn test_variables_persist_between_lines() {
        let mut repl = repl();
        assert!(matches!(repl.handle("set x = 5"), Outcome::Value(Value::Int(5))));
        assert!(matches!(repl.handle("x + 1"), Outcome::Value(Value::Int(6))));
    }

    #[test]
    fn test_error_does_not_end_session() {
        let mut repl = repl();
        match repl.handle("1 / 0") {
            Outcome::Error(e) => assert_eq!(e.kind(), ErrorKind::Runtime),
            other => panic!("Expected error, got {:?}", other),
        }
        assert!(matches!(repl.handle("2"), Outcome::Value(Value::Int(2))));
    }

    #[test]
    fn test_commands() {
        let mut repl = repl();
        assert!(matches!(repl.handle("   "), Outcome::Empty));
        assert!(matches!(repl.handle(":q"), Outcome::Quit));

        match repl.handle(":vars") {
            Outcome::Output(text) => assert_eq!(text, "No variables defined"),
            other => panic!("Expected output, got {:?}", other),
        }
        repl.handle("set y = 2.5");
        match repl.handle(":vars") {
            Outcome::Output(text) => assert_eq!(text, "y = 2.5 (float)"),
            other => panic!("Expected output, got {:?}", other),
        }

        match repl.handle(":ast 1 + 2") {
            Outcome::Output(text) => assert!(text.contains("BinOp")),
            other => panic!("Expected output, got {:?}", other),
        }
        assert!(matches!(repl.handle(":nope"), Outcome::Output(_)));
    }

    #[test]
    fn test_tokens_command() {
        let mut repl = repl();
        match repl.handle(":tokens 1 + x") {
            Outcome::Output(text) => assert_eq!(
                text,
                "<int> \"1\" @ 1:1-1:2\n\
                 + \"+\" @ 1:3-1:4\n\
                 <ident> \"x\" @ 1:5-1:6\n\
                 <eof> \"\" @ 1:6-1:6"
            ),
            other => panic!("Expected output, got {:?}", other),
        }

        match repl.handle(":tokens 1 $") {
            Outcome::Error(e) => assert_eq!(e.kind(), ErrorKind::IllegalCharacter),
            other => panic!("Expected error, got {:?}", other),
        }
        // Listing tokens never evaluates
        assert!(repl.globals().borrow().is_empty());
    }

    #[test]
    fn test_configured_globals_visible() {
        let config = Config::parse("[globals]\nanswer = 42").unwrap();
        let mut repl = Repl::new(&config);
        assert!(matches!(repl.handle("answer * 2"), Outcome::Value(Value::Int(84))));
    }
}
