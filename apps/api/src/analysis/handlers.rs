//! Axum route handlers for the Analysis API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::analyzer::analyze_within;
use crate::analysis::controller::{validate_input, ControllerSnapshot, Phase, RequestController};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::render::{render_sections, RatingTier, Section};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub rating_tier: RatingTier,
    pub sections: Vec<Section>,
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub snapshot: ControllerSnapshot,
    pub sections: Vec<Section>,
}

impl SessionView {
    fn new(session_id: Uuid, snapshot: ControllerSnapshot) -> Self {
        let sections = match (&snapshot.phase, &snapshot.result) {
            (Phase::Succeeded, Some(result)) => render_sections(result),
            _ => Vec::new(),
        };
        Self {
            session_id,
            snapshot,
            sections,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Direct collaborator endpoints
// ────────────────────────────────────────────────────────────────────────────

async fn run_analysis(state: &AppState, text: &str) -> Result<AnalysisResult, AppError> {
    let limits = state.limits();
    validate_input(text, limits.max_chars).map_err(AppError::Validation)?;
    let result = analyze_within(state.analyzer.as_ref(), text, limits.timeout).await?;
    Ok(result)
}

/// POST /api/v1/analyze
///
/// Runs one analysis and returns the raw `AnalysisResult`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = run_analysis(&state, &request.resume_text).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/report
///
/// Runs one analysis and returns it together with its rendered sections.
pub async fn handle_analyze_report(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let result = run_analysis(&state, &request.resume_text).await?;
    Ok(Json(AnalysisReport {
        rating_tier: RatingTier::from_rating(&result.analysis.resume_rating),
        sections: render_sections(&result),
        result,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Session endpoints
// ────────────────────────────────────────────────────────────────────────────

fn find_session(state: &AppState, id: Uuid) -> Result<Arc<RequestController>, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let (id, controller) = state.sessions.create()?;
    Ok((
        StatusCode::CREATED,
        Json(SessionView::new(id, controller.snapshot())),
    ))
}

/// GET /api/v1/sessions/:id
///
/// Current lifecycle phase; `sections` is filled once the analysis succeeded.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let controller = find_session(&state, id)?;
    Ok(Json(SessionView::new(id, controller.snapshot())))
}

/// POST /api/v1/sessions/:id/submit
///
/// Starts an analysis in the background and answers immediately with the
/// in-flight snapshot. Poll the session to observe completion.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<ControllerSnapshot>), AppError> {
    let controller = find_session(&state, id)?;
    // Detached: the request settles into the controller on its own.
    drop(controller.submit(request.resume_text)?);
    Ok((StatusCode::ACCEPTED, Json(controller.snapshot())))
}

/// POST /api/v1/sessions/:id/retry
///
/// Resubmits the input kept from the last request, typically after a failure.
pub async fn handle_retry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ControllerSnapshot>), AppError> {
    let controller = find_session(&state, id)?;
    drop(controller.retry()?);
    Ok((StatusCode::ACCEPTED, Json(controller.snapshot())))
}

/// POST /api/v1/sessions/:id/clear
pub async fn handle_clear(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ControllerSnapshot>, AppError> {
    let controller = find_session(&state, id)?;
    Ok(Json(controller.clear()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}
