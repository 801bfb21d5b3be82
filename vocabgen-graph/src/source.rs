//! Schema-aware views over a loaded vocabulary document.
//!
//! The generator core consumes only the narrow [`SchemaSource`] interface;
//! the storage and parsing behind it are swappable. [`OntologyModel`] is the
//! provided implementation: a [`Graph`] paired with an ontology-language
//! [`Profile`] that tells it which IRIs mark the schema categories.

use crate::error::Result;
use crate::{turtle, Graph, Statement, Term};
use std::path::Path;
use vocabgen_vocab::{daml, owl, rdf, rdfs};

/// The schema-level property categories a source can enumerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// Properties relating two resources
    Object,
    /// Properties relating a resource to a literal
    Datatype,
    /// Annotation properties (absent from the DAML+OIL profile)
    Annotation,
}

/// An ontology-language profile: the IRIs that mark schema categories.
///
/// Two profiles are supported: OWL (the default) and the legacy DAML+OIL
/// language. A profile field of `None` means the language has no such
/// category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Short language name, used in generated output
    pub name: &'static str,
    /// Namespace of the ontology language itself
    pub namespace: &'static str,
    /// Class of the ontology header node
    pub ontology: &'static str,
    /// Class of classes
    pub class: &'static str,
    /// Class of object properties
    pub object_property: &'static str,
    /// Class of datatype properties
    pub datatype_property: &'static str,
    /// Class of annotation properties, when the language has them
    pub annotation_property: Option<&'static str>,
    /// Language-specific comment property, when the language has one
    pub comment: Option<&'static str>,
}

/// The OWL profile (default).
pub const OWL: Profile = Profile {
    name: "owl",
    namespace: owl::NS,
    ontology: owl::ONTOLOGY,
    class: owl::CLASS,
    object_property: owl::OBJECT_PROPERTY,
    datatype_property: owl::DATATYPE_PROPERTY,
    annotation_property: Some(owl::ANNOTATION_PROPERTY),
    comment: None,
};

/// The legacy DAML+OIL profile.
pub const DAML: Profile = Profile {
    name: "daml",
    namespace: daml::NS,
    ontology: daml::ONTOLOGY,
    class: daml::CLASS,
    object_property: daml::OBJECT_PROPERTY,
    datatype_property: daml::DATATYPE_PROPERTY,
    annotation_property: None,
    comment: Some(daml::COMMENT),
};

/// Narrow interface between the generator core and the document engine.
///
/// Everything the core needs from a loaded vocabulary document: category
/// enumerations, raw statement pattern matching, and the ontology header.
/// All enumerations follow document order.
pub trait SchemaSource {
    /// Enumerate properties of the given schema category.
    fn list_properties(&self, kind: PropertyKind) -> Vec<Term>;

    /// Enumerate declared classes.
    fn list_classes(&self) -> Vec<Term>;

    /// Enumerate subjects typed by a declared class.
    fn list_individuals(&self) -> Vec<Term>;

    /// Enumerate statements matching a pattern (`None` matches anything).
    fn statements(
        &self,
        subject: Option<&Term>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Vec<Statement>;

    /// IRI of the document's ontology header node, when one is declared.
    fn ontology_header(&self) -> Option<String>;
}

/// A loaded vocabulary document: graph plus ontology-language profile.
///
/// Cross-document import resolution is deliberately not performed; the model
/// holds exactly the statements of the one document it was loaded from.
#[derive(Clone, Debug)]
pub struct OntologyModel {
    graph: Graph,
    profile: Profile,
}

impl OntologyModel {
    /// Wrap an already-loaded graph.
    pub fn new(graph: Graph, profile: Profile) -> Self {
        Self { graph, profile }
    }

    /// Parse a Turtle document.
    pub fn from_turtle(input: &str, profile: Profile) -> Result<Self> {
        Ok(Self::new(turtle::parse(input)?, profile))
    }

    /// Read and parse a Turtle document from a file.
    pub fn load_file(path: impl AsRef<Path>, profile: Profile) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_turtle(&input, profile)
    }

    /// The profile this model was loaded under.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl SchemaSource for OntologyModel {
    fn list_properties(&self, kind: PropertyKind) -> Vec<Term> {
        let class = match kind {
            PropertyKind::Object => self.profile.object_property,
            PropertyKind::Datatype => self.profile.datatype_property,
            PropertyKind::Annotation => match self.profile.annotation_property {
                Some(iri) => iri,
                None => return Vec::new(),
            },
        };
        self.graph.subjects_of_type(class)
    }

    fn list_classes(&self) -> Vec<Term> {
        self.graph.subjects_of_type(self.profile.class)
    }

    fn list_individuals(&self) -> Vec<Term> {
        let classes = self.list_classes();
        self.graph
            .statements(None, Some(rdf::TYPE), None)
            .filter(|st| classes.contains(&st.object))
            .map(|st| st.subject.clone())
            .collect()
    }

    fn statements(
        &self,
        subject: Option<&Term>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Vec<Statement> {
        self.graph
            .statements(subject, predicate, object)
            .cloned()
            .collect()
    }

    fn ontology_header(&self) -> Option<String> {
        self.graph
            .subjects_of_type(self.profile.ontology)
            .iter()
            .find_map(|term| term.as_iri().map(String::from))
    }
}

/// Comment text attached to a term: every rdfs:comment plus, when the
/// profile has its own comment property, every value of that too, trimmed
/// and concatenated in document order.
pub fn comment_text(source: &dyn SchemaSource, term: &Term, profile: &Profile) -> String {
    let mut text = String::new();
    let mut collect = |predicate: &str| {
        for st in source.statements(Some(term), Some(predicate), None) {
            if let Some(lexical) = st.object.as_lexical() {
                text.push_str(lexical.trim());
            }
        }
    };
    collect(rdfs::COMMENT);
    if let Some(extra) = profile.comment {
        collect(extra);
    }
    text
}
