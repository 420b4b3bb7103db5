//! # HTTP API
//!
//! JSON endpoints behind the single-page UI. `/analysis` awaits the whole crew
//! run before responding; `/analysis/stream` sends status lines as they happen.

pub mod analysis;
pub mod catalog;
pub mod settings;

use axum::{
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use crew_core::llm::CompletionBackend;
use crew_core::models::ModelConfig;
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::OpenApi;

/// Application state
pub struct AppState {
    pub backend: Arc<dyn CompletionBackend>,
    pub model: ModelConfig,
    /// Where `/config` reads and writes the persisted settings
    pub config_path: PathBuf,
}

pub type SharedState = Arc<AppState>;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Business Crew API",
        version = "1.0.0",
        description = "Multi-agent business analysis: market research, sales strategy, customer analytics and executive reporting"
    ),
    paths(
        catalog::get_status,
        catalog::list_agents,
        catalog::list_modes,
        catalog::list_providers,
        analysis::analyze,
        analysis::analyze_stream,
        analysis::download_report,
        settings::get_config,
        settings::update_config
    ),
    components(
        schemas(
            catalog::StatusResponse,
            catalog::AgentInfo,
            catalog::ModeInfo,
            catalog::ProviderInfo,
            analysis::AnalysisRequest,
            analysis::AnalysisResponse,
            analysis::TaskSection,
            analysis::StatusLine,
            analysis::ErrorResponse,
            analysis::DownloadRequest,
            settings::ConfigUpdate,
            settings::ConfigResponse,
            settings::ModelSelection
        )
    ),
    tags(
        (name = "catalog", description = "Agents, modes and provider discovery"),
        (name = "analysis", description = "Run the crew and download reports"),
        (name = "config", description = "Persisted model settings")
    )
)]
pub struct ApiDoc;

async fn serve_openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// v1 API routes
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/status", get(catalog::get_status))
        .route("/agents", get(catalog::list_agents))
        .route("/modes", get(catalog::list_modes))
        .route("/providers", get(catalog::list_providers))
        .route("/analysis", post(analysis::analyze))
        .route("/analysis/stream", post(analysis::analyze_stream))
        .route("/report/download", post(analysis::download_report))
        .route(
            "/config",
            get(settings::get_config).patch(settings::update_config),
        )
        .route("/openapi.json", get(serve_openapi))
}
