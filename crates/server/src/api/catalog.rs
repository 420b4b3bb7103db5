//! Read-only endpoints describing the agents, modes and configured model.

use super::SharedState;
use axum::{extract::State, response::Json};
use crew_core::crew::{all_agents, AnalysisMode};
use crew_core::models::LlmProvider;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub ready: bool,
    pub api_key_configured: bool,
    pub provider: String,
    pub model: String,
    pub backend: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentInfo {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub caption: String,
    pub role: String,
    pub goal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModeInfo {
    pub id: String,
    pub label: String,
    /// Agent ids in execution order
    pub agents: Vec<String>,
    pub steps: Vec<String>,
    pub estimated_time: String,
    pub file_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub default_model: String,
    pub supports_base_url: bool,
    pub env_var: String,
}

/// Model and key status
///
/// The server refuses to start without an API key, so a running server always
/// reports the key as configured.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "catalog",
    responses(
        (status = 200, description = "Configured model", body = StatusResponse)
    )
)]
pub async fn get_status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: true,
        api_key_configured: true,
        provider: state.model.provider.display_name().to_string(),
        model: state.model.model.clone(),
        backend: state.backend.describe(),
    })
}

/// The four personas
#[utoipa::path(
    get,
    path = "/api/v1/agents",
    tag = "catalog",
    responses(
        (status = 200, description = "Active agents", body = [AgentInfo])
    )
)]
pub async fn list_agents() -> Json<Vec<AgentInfo>> {
    Json(
        all_agents()
            .iter()
            .map(|a| AgentInfo {
                id: a.id.to_string(),
                icon: a.icon.to_string(),
                name: a.display_name.to_string(),
                caption: a.caption.to_string(),
                role: a.role.to_string(),
                goal: a.goal.to_string(),
            })
            .collect(),
    )
}

/// The five analysis modes in menu order
#[utoipa::path(
    get,
    path = "/api/v1/modes",
    tag = "catalog",
    responses(
        (status = 200, description = "Analysis modes", body = [ModeInfo])
    )
)]
pub async fn list_modes() -> Json<Vec<ModeInfo>> {
    Json(
        AnalysisMode::all()
            .iter()
            .map(|m| ModeInfo {
                id: m.id().to_string(),
                label: m.label().to_string(),
                agents: m.agents().iter().map(|a| a.id.to_string()).collect(),
                steps: m.process_steps().into_iter().map(String::from).collect(),
                estimated_time: m.estimated_time().to_string(),
                file_name: m.download_file_name(),
            })
            .collect(),
    )
}

/// Supported LLM providers
#[utoipa::path(
    get,
    path = "/api/v1/providers",
    tag = "catalog",
    responses(
        (status = 200, description = "Supported providers", body = [ProviderInfo])
    )
)]
pub async fn list_providers() -> Json<Vec<ProviderInfo>> {
    Json(
        LlmProvider::all()
            .into_iter()
            .map(|p| ProviderInfo {
                id: p.id().to_string(),
                name: p.display_name().to_string(),
                default_model: p.default_model().to_string(),
                supports_base_url: p.supports_base_url(),
                env_var: p.env_var().to_string(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{state_with, EchoBackend};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_status_reports_model() {
        let Json(status) = get_status(State(state_with(Arc::new(EchoBackend::default())))).await;
        assert!(status.api_key_configured);
        assert_eq!(status.provider, "OpenAI");
        assert_eq!(status.model, "gpt-4");
        assert_eq!(status.backend, "echo");
    }

    #[tokio::test]
    async fn test_modes_in_menu_order() {
        let Json(modes) = list_modes().await;
        let ids: Vec<_> = modes.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "comprehensive",
                "market_research",
                "sales_strategy",
                "customer_analysis",
                "executive_report"
            ]
        );
        assert_eq!(modes[0].agents.len(), 4);
        assert_eq!(modes[4].agents, ["content_writer"]);
    }

    #[tokio::test]
    async fn test_agents_listed() {
        let Json(agents) = list_agents().await;
        assert_eq!(agents.len(), 4);
        assert_eq!(agents[1].name, "Sales Strategy Agent");
    }

    #[tokio::test]
    async fn test_providers_listed() {
        let Json(providers) = list_providers().await;
        let openai = providers.iter().find(|p| p.id == "openai").unwrap();
        assert_eq!(openai.env_var, "OPENAI_API_KEY");
        assert!(openai.supports_base_url);
    }
}
