//! Axum route handlers for the Career Match API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::career::catalog::JobPosting;
use crate::career::documents::{cover_letter, intro_email};
use crate::career::ingest::CvRecord;
use crate::career::pipeline::{run_blocking, run_match, MatchContext, MatchResponse};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub job_id: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub cv_id: uuid::Uuid,
    pub job: JobPosting,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv
///
/// Multipart upload with a `file` field. Parses the CV, stores it as the latest
/// CV, and returns ranked jobs plus career advice.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;

    let response = run_match(
        MatchContext {
            parser: state.cv_parser.clone(),
            catalog: &state.catalog,
            embedder: state.embedder.as_ref(),
            memory: &state.memory,
            profile: &state.config.profile,
            top_k: state.config.top_k,
        },
        bytes,
        filename,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/cv/latest
pub async fn handle_latest_cv(State(state): State<AppState>) -> Result<Json<CvRecord>, AppError> {
    latest_cv(&state).await.map(Json)
}

/// POST /api/v1/documents/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    let (cv, job) = resolve(&state, &request).await?;
    let text = cover_letter(&cv, &job, &state.config.profile);
    Ok(Json(DocumentResponse {
        cv_id: cv.id,
        job,
        text,
    }))
}

/// POST /api/v1/documents/intro-email
pub async fn handle_intro_email(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    let (cv, job) = resolve(&state, &request).await?;
    let text = intro_email(&cv, &job, &state.config.profile);
    Ok(Json(DocumentResponse {
        cv_id: cv.id,
        job,
        text,
    }))
}

async fn latest_cv(state: &AppState) -> Result<CvRecord, AppError> {
    let memory = state.memory.clone();
    run_blocking("memory read", move || Ok(memory.latest_cv()?))
        .await?
        .ok_or_else(|| AppError::NotFound("No CV uploaded yet".to_string()))
}

/// Latest CV plus the requested job from the current search results.
async fn resolve(
    state: &AppState,
    request: &DocumentRequest,
) -> Result<(CvRecord, JobPosting), AppError> {
    if request.job_id.trim().is_empty() {
        return Err(AppError::Validation("job_id cannot be empty".to_string()));
    }
    let cv = latest_cv(state).await?;
    let job = state
        .catalog
        .find(&cv.skills, &request.job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", request.job_id)))?;
    Ok((cv, job))
}
