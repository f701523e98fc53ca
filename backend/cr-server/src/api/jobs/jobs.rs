//! Job submission handlers
//!
//! Both routes validate, enqueue and return 202 without waiting for the
//! result. Results arrive later over the WebSocket topic.

use crate::{AnalyzeRequest, ApiError, ApiResult, JobAcceptedResponse, SubmitJobRequest};

use cr_core::{JobKind, JobRecord};
use cr_ws::AppState;

use axum::{Json, extract::State, http::StatusCode};
use log::info;

pub const ANALYSIS_STARTED_MESSAGE: &str = "Analysis has been started!";
pub const FIX_STARTED_MESSAGE: &str = "Fix has been started!";

/// POST /api/v1/jobs
pub async fn submit_job(
    State(state): State<AppState>,
    Json(request): Json<SubmitJobRequest>,
) -> ApiResult<(StatusCode, Json<JobAcceptedResponse>)> {
    let Some(kind) = request.kind else {
        return Err(ApiError::validation(
            "No job kind provided, expected 'analyze' or 'fix'",
            "kind",
        ));
    };

    let kind: JobKind = kind.parse()?;
    accept(&state, kind, request.content.unwrap_or_default()).await
}

/// POST /api/analyze/
///
/// Analyze-only route kept for existing front ends
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<(StatusCode, Json<JobAcceptedResponse>)> {
    accept(
        &state,
        JobKind::Analyze,
        request.content.unwrap_or_default(),
    )
    .await
}

async fn accept(
    state: &AppState,
    kind: JobKind,
    content: String,
) -> ApiResult<(StatusCode, Json<JobAcceptedResponse>)> {
    let job = JobRecord::new(kind, content)?;
    let preview = job.preview(50);

    let handle = state.queue.enqueue(job).await?;
    info!("Accepted {} job {}: {}", handle.kind, handle.job_id, preview);

    let message = match kind {
        JobKind::Analyze => ANALYSIS_STARTED_MESSAGE,
        JobKind::Fix => FIX_STARTED_MESSAGE,
    };

    Ok((
        StatusCode::ACCEPTED,
        Json(JobAcceptedResponse::from_handle(&handle, message)),
    ))
}
