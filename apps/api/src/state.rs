use std::sync::Arc;

use crate::intake::extractor::ProfileExtractor;
use crate::matching::catalog::Catalog;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Applicant id → latest profile. Memory or PostgreSQL, chosen at startup.
    pub store: Arc<dyn ProfileStore>,
    /// `None` when no model API key is configured.
    pub extractor: Option<Arc<dyn ProfileExtractor>>,
    /// Loaded once at startup and never modified.
    pub catalog: Arc<Catalog>,
}
