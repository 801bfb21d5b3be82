//! Document engine for vocabgen.
//!
//! This crate is the generator's external collaborator: it loads vocabulary
//! and configuration documents (Turtle), holds them as plain statement
//! graphs, and answers the narrow set of schema queries the generator core
//! asks through [`SchemaSource`]. The core never reaches past that trait, so
//! a different storage or parsing engine can be swapped in behind it.
//!
//! # Example
//!
//! ```
//! use vocabgen_graph::{OntologyModel, SchemaSource, PropertyKind, source};
//!
//! let ttl = r#"
//!     @prefix owl: <http://www.w3.org/2002/07/owl#> .
//!     <http://example.org/v#> a owl:Ontology .
//!     <http://example.org/v#hasName> a owl:DatatypeProperty .
//! "#;
//!
//! let model = OntologyModel::from_turtle(ttl, source::OWL).unwrap();
//! assert_eq!(model.list_properties(PropertyKind::Datatype).len(), 1);
//! assert_eq!(model.ontology_header().as_deref(), Some("http://example.org/v#"));
//! ```

pub mod error;
pub mod graph;
pub mod source;
pub mod term;
pub mod turtle;

pub use error::{GraphError, Result};
pub use graph::{Graph, Statement};
pub use source::{comment_text, OntologyModel, Profile, PropertyKind, SchemaSource};
pub use term::{BlankId, Term};
