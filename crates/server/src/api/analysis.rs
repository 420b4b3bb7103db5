//! Analysis and report download endpoints.

use super::SharedState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
};
use crew_core::analysis::{
    run_analysis, run_analysis_streamed, AnalysisReport, TROUBLESHOOTING_TIPS,
};
use crew_core::crew::{AnalysisMode, CrewEvent};
use crew_core::CrewError;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Mode id (e.g. `comprehensive`) or menu label
    pub mode: String,
    /// Free-text business task
    pub task: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskSection {
    pub agent: String,
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusLine {
    pub agent: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub mode: String,
    pub label: String,
    pub content: String,
    pub file_name: String,
    pub agents_used: usize,
    pub tasks_completed: usize,
    pub sections: Vec<TaskSection>,
    pub status: Vec<StatusLine>,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            mode: report.mode.id().to_string(),
            label: report.mode.label().to_string(),
            content: report.content,
            file_name: report.file_name,
            agents_used: report.agents_used,
            tasks_completed: report.tasks_completed,
            sections: report
                .tasks
                .into_iter()
                .map(|t| TaskSection {
                    agent: t.agent_id.to_string(),
                    role: t.role.to_string(),
                    content: t.raw,
                })
                .collect(),
            status: report.events.into_iter().map(StatusLine::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Troubleshooting hints (empty for input errors)
    pub tips: Vec<String>,
    /// Raw error text for the collapsed details panel
    pub details: Option<String>,
}

impl ErrorResponse {
    fn from_crew_error(err: &CrewError) -> (StatusCode, Self) {
        if err.is_user_error() {
            return (
                StatusCode::BAD_REQUEST,
                Self {
                    message: err.to_string(),
                    tips: Vec::new(),
                    details: None,
                },
            );
        }
        (StatusCode::BAD_GATEWAY, Self::analysis_failed(err.to_string()))
    }

    fn analysis_failed(details: String) -> Self {
        Self {
            message: "Error during analysis".to_string(),
            tips: TROUBLESHOOTING_TIPS.iter().map(|t| t.to_string()).collect(),
            details: Some(details),
        }
    }
}

impl From<CrewEvent> for StatusLine {
    fn from(event: CrewEvent) -> Self {
        Self {
            agent: event.agent,
            message: event.message,
        }
    }
}

fn parse_mode(raw: &str) -> Result<AnalysisMode, Response> {
    raw.parse::<AnalysisMode>().map_err(|e| {
        let (status, body) = ErrorResponse::from_crew_error(&e);
        (status, Json(body)).into_response()
    })
}

/// Run the crew for the selected mode
#[utoipa::path(
    post,
    path = "/api/v1/analysis",
    tag = "analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Analysis complete", body = AnalysisResponse),
        (status = 400, description = "Empty task or unknown mode", body = ErrorResponse),
        (status = 502, description = "The LLM call failed", body = ErrorResponse)
    )
)]
pub async fn analyze(
    State(state): State<SharedState>,
    Json(req): Json<AnalysisRequest>,
) -> Response {
    let mode = match parse_mode(&req.mode) {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    match run_analysis(mode, &req.task, state.backend.as_ref()).await {
        Ok(report) => {
            tracing::info!(
                mode = mode.id(),
                tasks = report.tasks_completed,
                "Analysis complete"
            );
            Json(AnalysisResponse::from(report)).into_response()
        }
        Err(e) => {
            if !e.is_user_error() {
                tracing::error!(mode = mode.id(), "Analysis failed: {}", e);
            }
            let (status, body) = ErrorResponse::from_crew_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// Run the crew and stream its status lines as server-sent events
///
/// Emits one `status` event per status line while the agents work, then a
/// single `result` (an `AnalysisResponse`) or `error` (an `ErrorResponse`).
#[utoipa::path(
    post,
    path = "/api/v1/analysis/stream",
    tag = "analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Status, then result or error events", body = String, content_type = "text/event-stream"),
        (status = 400, description = "Empty task or unknown mode", body = ErrorResponse)
    )
)]
pub async fn analyze_stream(
    State(state): State<SharedState>,
    Json(req): Json<AnalysisRequest>,
) -> Response {
    let mode = match parse_mode(&req.mode) {
        Ok(mode) => mode,
        Err(response) => return response,
    };
    if req.task.trim().is_empty() {
        let (status, body) = ErrorResponse::from_crew_error(&CrewError::EmptyTask);
        return (status, Json(body)).into_response();
    }

    let (tx, rx) = mpsc::channel::<Event>(32);
    tokio::spawn(forward_analysis(state, mode, req.task, tx));

    let stream = ReceiverStream::new(rx).map(Ok::<_, Infallible>);
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Relay crew events to `out`, then the outcome. Returns once the last event is sent.
async fn forward_analysis(
    state: SharedState,
    mode: AnalysisMode,
    task: String,
    out: mpsc::Sender<Event>,
) {
    let (crew_tx, mut crew_rx) = mpsc::channel::<CrewEvent>(32);
    let backend = state.backend.clone();
    let run = tokio::spawn(async move {
        run_analysis_streamed(mode, &task, backend.as_ref(), crew_tx).await
    });

    // Closes when the crew is dropped, i.e. when the run has ended.
    while let Some(event) = crew_rx.recv().await {
        if out
            .send(sse_event("status", &StatusLine::from(event)))
            .await
            .is_err()
        {
            tracing::info!(mode = mode.id(), "Client disconnected, stopping analysis");
            run.abort();
            return;
        }
    }

    let last = match run.await {
        Ok(Ok(report)) => {
            tracing::info!(
                mode = mode.id(),
                tasks = report.tasks_completed,
                "Analysis complete"
            );
            sse_event("result", &AnalysisResponse::from(report))
        }
        Ok(Err(e)) => {
            if !e.is_user_error() {
                tracing::error!(mode = mode.id(), "Analysis failed: {}", e);
            }
            sse_event("error", &ErrorResponse::from_crew_error(&e).1)
        }
        Err(e) => {
            tracing::error!(mode = mode.id(), "Analysis task aborted: {}", e);
            sse_event("error", &ErrorResponse::analysis_failed(e.to_string()))
        }
    };
    let _ = out.send(last).await;
}

fn sse_event<T: Serialize>(name: &str, payload: &T) -> Event {
    let json = serde_json::to_string(payload).unwrap_or_default();
    Event::default().event(name).data(json)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DownloadRequest {
    pub mode: String,
    pub content: String,
}

/// Download a report as plain text
#[utoipa::path(
    post,
    path = "/api/v1/report/download",
    tag = "analysis",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Plain-text attachment named after the mode", body = String, content_type = "text/plain"),
        (status = 400, description = "Unknown mode", body = ErrorResponse)
    )
)]
pub async fn download_report(Json(req): Json<DownloadRequest>) -> Response {
    let mode = match parse_mode(&req.mode) {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    let disposition = format!("attachment; filename=\"{}\"", mode.download_file_name());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        req.content,
    )
        .into_response()
}
