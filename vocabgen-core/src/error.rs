//! Error types for the generator core.
//!
//! Everything here is a fatal configuration or I/O failure; data-shape
//! anomalies in the source document (terms with no local name, terms with no
//! category) are not errors — the classifier filter silently skips them.

use vocabgen_graph::GraphError;

/// Error type for vocabulary generation
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// No input document was named on the command line or in the config
    #[error("no input document specified")]
    NoInput,

    /// An explicitly named configuration document could not be read
    #[error("failed to read configuration from {uri}")]
    ConfigRead {
        uri: String,
        #[source]
        source: GraphError,
    },

    /// The input document could not be read or parsed
    #[error("failed to read input source {uri}")]
    InputRead {
        uri: String,
        #[source]
        source: GraphError,
    },

    /// No base IRI option and no ontology header in the source
    #[error("could not determine the base IRI for the input vocabulary")]
    NoBaseIri,

    /// A module name could not be derived from the input IRI
    #[error("could not derive a module name from {uri}")]
    NoModuleName { uri: String },

    /// A flag that expects a value was the last argument
    #[error("value for parameter {flag} not set")]
    MissingValue { flag: &'static str },

    /// The marker produced an uncompilable substitution pattern
    #[error("malformed substitution pattern {pattern}")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The output destination could not be opened
    #[error("cannot open output {path} for writing")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Write failure while emitting
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenError>;
