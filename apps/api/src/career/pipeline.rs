//! Career Match pipeline — orchestrates one upload end-to-end.
//!
//! Flow: ingest → remember → job search (with fallback) → match_jobs → advice.
//! Parsing and the memory file are blocking work and run via `spawn_blocking`.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::career::catalog::{JobCatalog, JobSourceKind};
use crate::career::documents::{advice, TemplateProfile};
use crate::career::embedder::TextEmbedder;
use crate::career::ingest::{ingest, CvParser, CvRecord};
use crate::career::memory::MemoryStore;
use crate::career::ranker::{match_jobs, RankedJob};
use crate::errors::AppError;

/// Everything the caller sees after an upload.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub cv: CvRecord,
    pub matches: Vec<RankedJob>,
    pub advice: String,
    pub job_source: JobSourceKind,
    /// Set when live search was unavailable and the static catalog was used.
    pub notice: Option<String>,
}

/// Collaborators for one pipeline run.
pub struct MatchContext<'a> {
    pub parser: Arc<dyn CvParser>,
    pub catalog: &'a JobCatalog,
    pub embedder: &'a dyn TextEmbedder,
    pub memory: &'a MemoryStore,
    pub profile: &'a TemplateProfile,
    pub top_k: usize,
}

/// Runs `work` on the blocking thread pool.
pub async fn run_blocking<T, F>(label: &'static str, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {label}: {e}"))
    })?
}

pub async fn run_match(
    ctx: MatchContext<'_>,
    file_bytes: Bytes,
    filename: String,
) -> Result<MatchResponse, AppError> {
    let MatchContext {
        parser,
        catalog,
        embedder,
        memory,
        profile,
        top_k,
    } = ctx;

    // Steps 1-2: Parse CV and persist it as the latest CV (CPU and file I/O)
    let store = memory.clone();
    let cv = run_blocking("cv ingestion", move || {
        let cv = ingest(parser.as_ref(), &file_bytes, &filename)?;
        info!(
            "Parsed CV {} ({}) with {} skills via {} parser",
            cv.id,
            cv.display_name,
            cv.skills.len(),
            parser.name()
        );
        store.remember_cv(&cv)?;
        Ok(cv)
    })
    .await?;

    // Step 3: Job search, degrading to the static catalog
    let outcome = catalog.search(&cv.skills).await;

    // Step 4: Rank
    let matches = match_jobs(embedder, &cv, &outcome.jobs, top_k)?;
    info!(
        "Ranked {} of {} jobs with {} embedder",
        matches.len(),
        outcome.jobs.len(),
        embedder.name()
    );

    // Step 5: Career advice
    let advice = advice(&cv, &matches, profile)?;

    Ok(MatchResponse {
        cv,
        matches,
        advice,
        job_source: outcome.source,
        notice: outcome.notice,
    })
}
