//! RDF term types: IRI, blank node, and literal
//!
//! Terms are the building blocks of statements. A term can be:
//! - An IRI (always expanded, never prefixed)
//! - A blank node (with stable identifier)
//! - A literal (lexical form + optional datatype + optional language tag)

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a document but have no global meaning.
/// The label does NOT include the `_:` prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - The predicate position of a statement can only be `Term::Iri`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://www.w3.org/2002/07/owl#Class")
    Iri(Arc<str>),

    /// Blank node with stable identifier
    Blank(BlankId),

    /// Literal value
    Literal {
        /// The lexical form
        lexical: Arc<str>,
        /// Datatype IRI, when one was given (`None` means xsd:string)
        datatype: Option<Arc<str>>,
        /// Language tag, when one was given
        language: Option<Arc<str>>,
    },
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::Blank(BlankId::new(label))
    }

    /// Create a plain string literal
    pub fn string(value: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: None,
            language: None,
        }
    }

    /// Create a boolean literal (xsd:boolean)
    pub fn boolean(value: bool) -> Self {
        Term::typed(if value { "true" } else { "false" }, vocabgen_vocab::xsd::BOOLEAN)
    }

    /// Create a typed literal with an explicit datatype IRI
    pub fn typed(value: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: Some(Arc::from(datatype.as_ref())),
            language: None,
        }
    }

    /// Create a language-tagged string literal
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: Some(Arc::from(vocabgen_vocab::rdf::LANG_STRING)),
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get the lexical form of a literal
    pub fn as_lexical(&self) -> Option<&str> {
        match self {
            Term::Literal { lexical, .. } => Some(lexical),
            _ => None,
        }
    }

    /// Try to interpret this term as a boolean literal
    ///
    /// Only the canonical xsd:boolean lexical forms `true` and `false`
    /// are recognized.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_lexical()? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(id) => write!(f, "{}", id),
            Term::Literal {
                lexical,
                datatype,
                language,
            } => {
                write!(f, "\"{}\"", lexical)?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}
