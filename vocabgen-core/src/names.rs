//! Identifier synthesis: deterministic, collision-resistant, write-once.
//!
//! Names are derived from a term IRI's local name, optionally folded to
//! UPPER_SNAKE_CASE, sanitized against an identifier grammar, and
//! disambiguated with a category suffix on collision. An IRI is allocated a
//! name exactly once per run; the mapping is never overwritten.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Legality predicates for one target language's identifiers.
///
/// The allocator itself is target-neutral; swapping the grammar serves a
/// different output language.
#[derive(Clone, Copy)]
pub struct IdentifierGrammar {
    /// May the character start an identifier?
    pub is_start: fn(char) -> bool,
    /// May the character continue an identifier?
    pub is_continue: fn(char) -> bool,
}

impl IdentifierGrammar {
    /// The grammar for Rust identifiers.
    pub fn rust() -> Self {
        Self {
            is_start: |c| c.is_alphabetic() || c == '_',
            is_continue: |c| c.is_alphanumeric() || c == '_',
        }
    }

    /// Sanitize `raw` into a legal identifier.
    ///
    /// Skips leading characters until one that may start an identifier
    /// (optionally capitalizing it), then maps every illegal continuation
    /// character to `_`. Returns `None` when no legal start exists.
    pub fn legalize(&self, raw: &str, capitalize: bool) -> Option<String> {
        let mut chars = raw.chars().skip_while(|&c| !(self.is_start)(c));
        let first = chars.next()?;
        let mut name = String::with_capacity(raw.len());
        if capitalize {
            name.extend(first.to_uppercase());
        } else {
            name.push(first);
        }
        for c in chars {
            name.push(if (self.is_continue)(c) { c } else { '_' });
        }
        Some(name)
    }
}

impl std::fmt::Debug for IdentifierGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierGrammar").finish_non_exhaustive()
    }
}

/// The local name of an IRI: the fragment, or the final path segment.
/// `None` when the IRI has no usable local part.
pub fn local_name(iri: &str) -> Option<&str> {
    let local = match iri.rsplit_once('#') {
        Some((_, frag)) => frag,
        None => iri.rsplit('/').next().unwrap_or(""),
    };
    (!local.is_empty()).then_some(local)
}

/// Fold a camelCase local name to UPPER_SNAKE_CASE: a `_` is inserted before
/// any uppercase letter immediately preceded by a lowercase one, then the
/// whole name is uppercased.
pub fn upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut last: char = '\0';
    for c in name.chars() {
        if last.is_lowercase() && c.is_uppercase() {
            out.push('_');
        }
        out.extend(c.to_uppercase());
        last = c;
    }
    out
}

/// Allocates unique legal identifiers for term IRIs.
#[derive(Debug)]
pub struct NameAllocator {
    grammar: IdentifierGrammar,
    uppercase: bool,
    used: FxHashSet<String>,
    by_iri: FxHashMap<String, String>,
}

impl NameAllocator {
    /// Create an allocator over the given grammar.
    pub fn new(grammar: IdentifierGrammar, uppercase: bool) -> Self {
        Self {
            grammar,
            uppercase,
            used: FxHashSet::default(),
            by_iri: FxHashMap::default(),
        }
    }

    /// True if the IRI has already been allocated a name this run.
    pub fn contains(&self, iri: &str) -> bool {
        self.by_iri.contains_key(iri)
    }

    /// The name previously allocated for the IRI, if any.
    pub fn name_for(&self, iri: &str) -> Option<&str> {
        self.by_iri.get(iri).map(String::as_str)
    }

    /// Allocate a name for the IRI, disambiguated with `suffix` on collision.
    ///
    /// The collision sequence is `name`, `name<suffix>`, `name<suffix>1`,
    /// `name<suffix>2`, … — the first unique candidate wins and is recorded
    /// permanently. Returns the existing name if the IRI was already
    /// allocated, and `None` when the IRI yields no legal identifier (a
    /// data-shape anomaly, silently skipped by the caller).
    pub fn allocate(&mut self, iri: &str, suffix: &str) -> Option<String> {
        if let Some(existing) = self.by_iri.get(iri) {
            return Some(existing.clone());
        }

        let local = local_name(iri)?;
        let folded;
        let local = if self.uppercase {
            folded = upper_snake(local);
            folded.as_str()
        } else {
            local
        };
        let base = self.grammar.legalize(local, false)?;

        let mut name = base.clone();
        let mut attempt = 0;
        while self.used.contains(&name) {
            name = if attempt == 0 {
                format!("{base}{suffix}")
            } else {
                format!("{base}{suffix}{attempt}")
            };
            attempt += 1;
        }

        debug!(iri, name = name.as_str(), "allocated identifier");
        self.used.insert(name.clone());
        self.by_iri.insert(iri.to_string(), name.clone());
        Some(name)
    }
}
