//! Vocabulary compiler core for vocabgen.
//!
//! Consumes an ontology or other vocabulary document and generates a Rust
//! module with the vocabulary's terms compiled in as constants, driven by a
//! configuration that merges command-line options with an RDF configuration
//! document. Designed to be highly flexible: templates, markers, section
//! banners and naming are all configurable.
//!
//! The document engine behind the generation is the narrow
//! [`vocabgen_graph::SchemaSource`] interface — this crate never touches
//! graph storage or parsing directly.
//!
//! # Components
//!
//! - [`options`] - dual-source option resolution (command line over config graph)
//! - [`template`] - scoped placeholder substitution
//! - [`names`] - unique legal identifier synthesis
//! - [`comment`] - documentation-block formatting
//! - [`emit`] - the output sequencer, classifier and base-IRI resolution

pub mod comment;
pub mod emit;
pub mod error;
pub mod names;
pub mod options;
pub mod template;

pub use emit::{derive_module_name, run, Generator};
pub use error::{GenError, Result};
pub use names::{IdentifierGrammar, NameAllocator};
pub use options::{Config, OptionKey};
pub use template::TemplateScope;
