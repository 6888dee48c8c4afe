use std::sync::Arc;

use crate::recommend::catalog::CatalogIndex;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built before the listener binds; never mutated afterwards.
    pub catalog: Arc<CatalogIndex>,
}
