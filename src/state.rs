use crate::db::MappingStore;
use crate::services::ShortenerService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Wrapped in `Arc` and handed to every handler through Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    /// Storage backing the shortener, used directly for health checks
    pub store: Arc<dyn MappingStore>,

    /// Create/resolve operations
    pub shortener: ShortenerService,
}
