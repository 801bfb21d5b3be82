//! RDF graph - an ordered collection of statements
//!
//! The `Graph` type uses `Vec<Statement>` so iteration follows document
//! order, which keeps generation output deterministic for a given input.

use crate::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single RDF statement (triple)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// Subject term (IRI or blank node)
    pub subject: Term,
    /// Predicate IRI
    pub predicate: Term,
    /// Object term
    pub object: Term,
}

impl Statement {
    /// Create a new statement
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// An ordered collection of RDF statements
///
/// # Design Decisions
///
/// - **Vec storage**: preserves document order, so every enumeration the
///   compiler performs is deterministic for a given input document.
/// - **Linear matching**: `statements()` scans; vocabulary documents are
///   small enough that index structures would be noise.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    statements: Vec<Statement>,
    /// Prefix mappings from parsing (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
    /// Base IRI from parsing
    pub base: Option<String>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement to the graph
    pub fn add(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Add a statement by components
    pub fn add_statement(&mut self, s: Term, p: Term, o: Term) {
        self.add(Statement::new(s, p, o));
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Get the number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over statements in document order
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Enumerate statements matching the given pattern, in document order
    ///
    /// `None` in a position matches any term; the predicate is matched by
    /// IRI string since predicates are always IRIs.
    pub fn statements<'a>(
        &'a self,
        subject: Option<&'a Term>,
        predicate: Option<&'a str>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Statement> {
        self.statements.iter().filter(move |st| {
            subject.is_none_or(|s| st.subject == *s)
                && predicate.is_none_or(|p| st.predicate.as_iri() == Some(p))
                && object.is_none_or(|o| st.object == *o)
        })
    }

    /// Subjects of `?s rdf:type <type_iri>`, in document order
    pub fn subjects_of_type(&self, type_iri: &str) -> Vec<Term> {
        let object = Term::iri(type_iri);
        self.statements(None, Some(vocabgen_vocab::rdf::TYPE), Some(&object))
            .map(|st| st.subject.clone())
            .collect()
    }

    /// Objects of `<subject> <predicate> ?o`, in document order
    pub fn objects_of<'a>(&'a self, subject: &'a Term, predicate: &'a str) -> Vec<&'a Term> {
        self.statements(Some(subject), Some(predicate), None)
            .map(|st| &st.object)
            .collect()
    }

    /// Check whether the subject carries at least one value for the predicate
    pub fn has_property(&self, subject: &Term, predicate: &str) -> bool {
        self.statements(Some(subject), Some(predicate), None)
            .next()
            .is_some()
    }
}

impl FromIterator<Statement> for Graph {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Graph {
            statements: iter.into_iter().collect(),
            prefixes: BTreeMap::new(),
            base: None,
        }
    }
}
