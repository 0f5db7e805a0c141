//! Diagnostic reporting with source locations
//!
//! Every stage reports at most one error, built here. Errors render through
//! miette with the offending span labelled in the source.

use crate::common::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Source file for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }

    /// Text covered by `span`, empty if the span is out of range
    pub fn slice(&self, span: Span) -> &str {
        self.content
            .get(span.start.index..span.end.index)
            .unwrap_or("")
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.index.into(), span.len())
    }
}

/// One frame of a runtime traceback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    pub line: usize,
    pub context: String,
}

/// Context chain captured when a runtime error is raised, innermost last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traceback {
    pub frames: Vec<Frame>,
}

impl fmt::Display for Traceback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Traceback (most recent call last):")?;
        for frame in &self.frames {
            write!(
                f,
                "\n  File {}, line {}, in {}",
                frame.file, frame.line, frame.context
            )?;
        }
        Ok(())
    }
}

/// Which stage produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IllegalCharacter,
    InvalidSyntax,
    Runtime,
}

/// Pipeline diagnostic
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("Illegal Character: '{details}'")]
    #[diagnostic(code(lex::illegal_character))]
    IllegalCharacter {
        details: String,
        location: Span,
        #[label("not the start of any token")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Invalid Syntax: {details}")]
    #[diagnostic(code(parse::invalid_syntax))]
    InvalidSyntax {
        details: String,
        location: Span,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Runtime Error: {details}")]
    #[diagnostic(code(runtime::error))]
    Runtime {
        details: String,
        location: Span,
        traceback: Traceback,
        #[label("{details}")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
        #[help]
        help: Option<String>,
    },
}

impl Error {
    pub fn illegal_character(file: &SourceFile, location: Span, ch: impl Into<String>) -> Self {
        Error::IllegalCharacter {
            details: ch.into(),
            location,
            span: location.into(),
            src: file.to_named_source(),
        }
    }

    pub fn invalid_syntax(file: &SourceFile, location: Span, details: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            details: details.into(),
            location,
            span: location.into(),
            src: file.to_named_source(),
        }
    }

    pub fn runtime(
        file: &SourceFile,
        location: Span,
        details: impl Into<String>,
        traceback: Traceback,
    ) -> Self {
        let help = (!traceback.frames.is_empty()).then(|| traceback.to_string());
        Error::Runtime {
            details: details.into(),
            location,
            traceback,
            span: location.into(),
            src: file.to_named_source(),
            help,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IllegalCharacter { .. } => ErrorKind::IllegalCharacter,
            Error::InvalidSyntax { .. } => ErrorKind::InvalidSyntax,
            Error::Runtime { .. } => ErrorKind::Runtime,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            Error::IllegalCharacter { details, .. }
            | Error::InvalidSyntax { details, .. }
            | Error::Runtime { details, .. } => details,
        }
    }

    /// Source range the error points at
    pub fn location(&self) -> Span {
        match self {
            Error::IllegalCharacter { location, .. }
            | Error::InvalidSyntax { location, .. }
            | Error::Runtime { location, .. } => *location,
        }
    }

    /// Traceback of a runtime error
    pub fn traceback(&self) -> Option<&Traceback> {
        match self {
            Error::Runtime { traceback, .. } => Some(traceback),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Position;

    #[test]
    fn test_error_message() {
        let file = SourceFile::new("<test>", "1 $ 2");
        let start = Position::start().advance('1').advance(' ');
        let err = Error::illegal_character(&file, Span::new(start, start.advance('$')), "$");
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter);
        assert_eq!(err.to_string(), "Illegal Character: '$'");
        assert_eq!(file.slice(err.location()), "$");
    }

    #[test]
    fn test_traceback_display() {
        let tb = Traceback {
            frames: vec![Frame {
                file: "<stdin>".into(),
                line: 1,
                context: "<program>".into(),
            }],
        };
        assert_eq!(
            tb.to_string(),
            "Traceback (most recent call last):\n  File <stdin>, line 1, in <program>"
        );
    }

    #[test]
    fn test_runtime_error_help() {
        let file = SourceFile::new("<test>", "x");
        let err = Error::runtime(&file, Span::default(), "'x' is not defined", Traceback::default());
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.to_string(), "Runtime Error: 'x' is not defined");
        assert!(err.help().is_none());
    }
}
