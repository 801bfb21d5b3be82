//! Scoped placeholder substitution.
//!
//! A [`TemplateScope`] holds an ordered stack of compiled
//! (pattern, substitution) bindings. Rendering applies every binding in push
//! order, so a later push for the same key wins — shadowing is purely by
//! traversal order, and bindings are never deduplicated. Callers push a
//! term's local bindings before rendering its line and pop them right after,
//! so bindings never leak across terms; global bindings are pushed once and
//! never popped.

use crate::error::{GenError, Result};
use regex::{NoExpand, Regex};

/// Marker string used when no `marker` option is set.
pub const DEFAULT_MARKER: &str = "%";

/// An ordered stack of (compiled pattern, substitution) bindings.
#[derive(Debug, Default)]
pub struct TemplateScope {
    marker: String,
    bindings: Vec<(Regex, String)>,
}

impl TemplateScope {
    /// Create a scope with the given marker, or the default `%`.
    pub fn new(marker: Option<&str>) -> Self {
        Self {
            marker: marker.unwrap_or(DEFAULT_MARKER).to_string(),
            bindings: Vec::new(),
        }
    }

    /// Push a binding for `marker + key + marker`.
    ///
    /// A `None` value is a silent no-op — absent option values simply leave
    /// their placeholder unbound. A marker that produces an uncompilable
    /// pattern is a fatal configuration error.
    pub fn push_binding(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };
        let pattern = format!("{}{}{}", self.marker, key, self.marker);
        let regex = Regex::new(&pattern).map_err(|source| GenError::BadPattern {
            pattern,
            source,
        })?;
        self.bindings.push((regex, value.to_string()));
        Ok(())
    }

    /// Pop the `n` most recently pushed bindings.
    pub fn pop(&mut self, n: usize) {
        for _ in 0..n {
            self.bindings.pop();
        }
    }

    /// Number of bindings currently in scope.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no bindings are in scope.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Apply every active binding's find/replace-all, in push order.
    /// Substitution is literal: replacement text is never re-interpreted.
    pub fn render(&self, template: &str) -> String {
        let mut out = template.to_string();
        for (pattern, value) in &self.bindings {
            out = pattern.replace_all(&out, NoExpand(value.as_str())).into_owned();
        }
        out
    }
}
