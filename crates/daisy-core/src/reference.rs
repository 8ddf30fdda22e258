//! ReferenceIndex — instant local suggestions over a catalog's static list.

use crate::{catalog::Catalog, types::ReferenceTerm};

/// A fixed, ordered list of [`ReferenceTerm`]s with substring lookup.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    terms: Vec<ReferenceTerm>,
}

impl ReferenceIndex {
    pub fn new(terms: Vec<ReferenceTerm>) -> Self {
        Self { terms }
    }

    pub fn for_catalog(catalog: Catalog) -> Self {
        Self::new(catalog.reference_terms())
    }

    pub fn terms(&self) -> &[ReferenceTerm] {
        &self.terms
    }

    /// Terms whose label contains `query`, ignoring case, in list order.
    ///
    /// A blank query returns the whole list rather than scanning for the
    /// empty string.
    pub fn matches(&self, query: &str) -> Vec<ReferenceTerm> {
        if query.trim().is_empty() {
            return self.terms.clone();
        }
        let needle = query.to_lowercase();
        self.terms
            .iter()
            .filter(|term| term.label.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
