use std::sync::Arc;

use crate::career::catalog::JobCatalog;
use crate::career::embedder::TextEmbedder;
use crate::career::ingest::CvParser;
use crate::career::memory::MemoryStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable CV parser. Default: StubCvParser. Swap via CV_PARSER env.
    pub cv_parser: Arc<dyn CvParser>,
    /// Live search with static fallback; offline when JOB_SEARCH_URL is unset.
    pub catalog: JobCatalog,
    /// Pluggable embedder. Default: SeededEmbedder (placeholder vectors).
    pub embedder: Arc<dyn TextEmbedder>,
    /// Single-writer JSON document. Not safe for concurrent sessions.
    pub memory: Arc<MemoryStore>,
}
