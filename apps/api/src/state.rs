use std::sync::Arc;

use crate::matching::ResumeMatcher;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    /// Pluggable engine. Default: KeywordMatcher.
    pub matcher: Arc<dyn ResumeMatcher>,
}
