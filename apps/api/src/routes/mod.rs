pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::career::handlers as career;
use crate::glucose::handlers as glucose;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Career Match API
        .route("/api/v1/cv", post(career::handle_upload_cv))
        .route("/api/v1/cv/latest", get(career::handle_latest_cv))
        .route(
            "/api/v1/documents/cover-letter",
            post(career::handle_cover_letter),
        )
        .route(
            "/api/v1/documents/intro-email",
            post(career::handle_intro_email),
        )
        // Glucose API
        .route("/api/v1/glucose/sample", get(glucose::handle_sample_csv))
        .route("/api/v1/glucose/series", post(glucose::handle_series))
        .route("/api/v1/glucose/dashboard", get(glucose::handle_dashboard))
        .with_state(state)
}
