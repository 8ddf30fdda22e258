//! The provider seam: where plant records come from.
//!
//! The HTTP implementation lives in `daisy-provider`; tests substitute their
//! own implementations.

use async_trait::async_trait;

use crate::{catalog::Catalog, error::ProviderError, types::PlantRecord};

/// Source of synthesized plant records.
///
/// Both operations are all-or-nothing: either the full ordered list is
/// produced or an error is returned. Implementations must not panic on
/// malformed upstream data.
#[async_trait]
pub trait PlantDataProvider: Send + Sync {
    /// Records relevant to `term` (a symptom for remedies, a plant for care).
    async fn fetch_by_query(
        &self,
        catalog: Catalog,
        term: &str,
    ) -> Result<Vec<PlantRecord>, ProviderError>;

    /// A default list of common plants for the catalog's landing view.
    async fn fetch_common(&self, catalog: Catalog) -> Result<Vec<PlantRecord>, ProviderError>;
}
