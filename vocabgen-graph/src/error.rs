//! Error types for document loading and parsing

/// Error type for graph loading operations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Lexer error (invalid token)
    #[error("lexer error at line {line}: {message}")]
    Lexer { line: usize, message: String },

    /// Parser error (unexpected token or invalid structure)
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Prefix not defined
    #[error("undefined prefix: {0}")]
    UndefinedPrefix(String),

    /// Relative IRI with no base in scope
    #[error("cannot resolve relative IRI without a base: {0}")]
    NoBase(String),

    /// Failure to read the document itself
    #[error("cannot read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    /// Create a lexer error
    pub fn lexer(line: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            line,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
