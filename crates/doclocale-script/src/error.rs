//! Error types for configuration module evaluation.

use thiserror::Error;

/// Errors raised while parsing or evaluating a configuration module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScriptError {
    /// Failed to initialise the Tree-sitter parser.
    #[error("failed to initialise parser: {message}")]
    ParserInit {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter did not produce a syntax tree.
    #[error("failed to parse configuration module: {message}")]
    Parse {
        /// Description of the failure.
        message: String,
    },

    /// The module contains a syntax error.
    #[error("syntax error at {line}:{column} near '{context}'")]
    Syntax {
        /// One-based line of the first error.
        line: u32,
        /// One-based column of the first error.
        column: u32,
        /// Source snippet around the error.
        context: String,
    },

    /// An expression referenced a name that no earlier statement bound.
    #[error("'{name}' is not defined (line {line})")]
    UnknownIdentifier {
        /// The unbound identifier.
        name: String,
        /// One-based line of the reference.
        line: u32,
    },

    /// Nothing was assigned to the module's export surface.
    #[error("configuration module does not export a value")]
    MissingExport,

    /// Literals were nested deeper than the evaluator allows.
    #[error("configuration value nests deeper than {limit} levels")]
    TooDeep {
        /// Maximum permitted nesting depth.
        limit: usize,
    },

    /// Internal error indicating a bug or unexpected tree shape.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl ScriptError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInit {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(line: u32, column: u32, context: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            context: context.into(),
        }
    }

    /// Creates an unknown identifier error.
    #[must_use]
    pub fn unknown_identifier(name: impl Into<String>, line: u32) -> Self {
        Self::UnknownIdentifier {
            name: name.into(),
            line,
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
