//! Shared application state for axum handlers.

use std::sync::Arc;

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::problem::RequestPolicy;

/// State shared by every handler and every connection.
///
/// The catalog is immutable once built, so connections only ever clone the
/// `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<ScriptCatalog>,
    pub policy: RequestPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: ScriptCatalog, policy: RequestPolicy) -> Self {
        Self::from_arc(Arc::new(catalog), policy)
    }

    /// Use this when the catalog is already shared elsewhere.
    #[must_use]
    pub fn from_arc(catalog: Arc<ScriptCatalog>, policy: RequestPolicy) -> Self {
        Self { catalog, policy }
    }
}
