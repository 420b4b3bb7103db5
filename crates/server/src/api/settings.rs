//! Persisted model settings.
//!
//! Saved changes apply the next time the server starts: the running backend
//! keeps the model and key it was created with.

use super::analysis::ErrorResponse;
use super::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use crew_core::config::PersistedConfig;
use crew_core::models::{LlmProvider, ModelConfig};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Partial settings update. Fields left out keep their saved value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ConfigUpdate {
    /// Provider id, e.g. `openai` or `anthropic`
    pub provider: Option<String>,
    pub model: Option<String>,
    /// OpenAI-compatible endpoint
    pub base_url: Option<String>,
}

impl ConfigUpdate {
    fn into_persisted(self) -> Result<PersistedConfig, String> {
        let provider = self
            .provider
            .map(|p| p.parse::<LlmProvider>())
            .transpose()?;
        Ok(PersistedConfig {
            provider,
            model: self.model,
            base_url: self.base_url,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelSelection {
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl From<&ModelConfig> for ModelSelection {
    fn from(config: &ModelConfig) -> Self {
        Self {
            provider: config.provider.id().to_string(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    /// What the saved settings resolve to
    pub saved: ModelSelection,
    /// What the running server uses
    pub active: ModelSelection,
    pub restart_required: bool,
}

impl ConfigResponse {
    fn new(saved: &PersistedConfig, active: &ModelConfig) -> Self {
        let resolved = saved.model_config();
        Self {
            restart_required: resolved != *active,
            saved: ModelSelection::from(&resolved),
            active: ModelSelection::from(active),
        }
    }
}

/// Saved and active model settings
#[utoipa::path(
    get,
    path = "/api/v1/config",
    tag = "config",
    responses(
        (status = 200, description = "Saved and active settings", body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    let saved = PersistedConfig::load_from(&state.config_path).await;
    Json(ConfigResponse::new(&saved, &state.model))
}

/// Update the saved settings (partial merge)
#[utoipa::path(
    patch,
    path = "/api/v1/config",
    tag = "config",
    request_body = ConfigUpdate,
    responses(
        (status = 200, description = "Updated settings", body = ConfigResponse),
        (status = 400, description = "Unknown provider", body = ErrorResponse),
        (status = 500, description = "The settings file could not be written", body = ErrorResponse)
    )
)]
pub async fn update_config(
    State(state): State<SharedState>,
    Json(update): Json<ConfigUpdate>,
) -> Response {
    let updates = match update.into_persisted() {
        Ok(updates) => updates,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message, None),
    };

    let mut config = PersistedConfig::load_from(&state.config_path).await;
    config.merge(updates);

    if let Err(e) = config.save_to(&state.config_path).await {
        tracing::error!(path = %state.config_path.display(), "Failed to save config: {}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save config".to_string(),
            Some(e.to_string()),
        );
    }

    let response = ConfigResponse::new(&config, &state.model);
    tracing::info!(
        provider = %response.saved.provider,
        model = %response.saved.model,
        restart_required = response.restart_required,
        "Config saved"
    );
    Json(response).into_response()
}

fn error_response(status: StatusCode, message: String, details: Option<String>) -> Response {
    let body = ErrorResponse {
        message,
        tips: Vec::new(),
        details,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{body_json, state_with, EchoBackend};
    use std::sync::Arc;

    fn update(provider: Option<&str>, model: Option<&str>) -> Json<ConfigUpdate> {
        Json(ConfigUpdate {
            provider: provider.map(String::from),
            model: model.map(String::from),
            base_url: None,
        })
    }

    #[tokio::test]
    async fn test_get_config_defaults_without_file() {
        let state = state_with(Arc::new(EchoBackend::default()));
        let Json(config) = get_config(State(state)).await;

        assert_eq!(config.saved.provider, "openai");
        assert_eq!(config.saved.model, "gpt-4");
        assert!(!config.restart_required);
    }

    #[tokio::test]
    async fn test_patch_merges_and_persists() {
        let state = state_with(Arc::new(EchoBackend::default()));

        let response = update_config(State(state.clone()), update(None, Some("gpt-4o"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["saved"]["model"], "gpt-4o");
        assert_eq!(body["active"]["model"], "gpt-4");
        assert_eq!(body["restart_required"], true);

        // A second patch keeps the model saved by the first one.
        let response =
            update_config(State(state.clone()), update(Some("openai"), None)).await;
        assert_eq!(body_json(response).await["saved"]["model"], "gpt-4o");

        let on_disk = PersistedConfig::load_from(&state.config_path).await;
        assert_eq!(on_disk.provider, Some(LlmProvider::OpenAI));
        assert_eq!(on_disk.model.as_deref(), Some("gpt-4o"));
    }

    #[tokio::test]
    async fn test_patch_rejects_unknown_provider() {
        let state = state_with(Arc::new(EchoBackend::default()));
        let response = update_config(State(state.clone()), update(Some("watson"), None)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("watson"));
        assert!(!state.config_path.exists());
    }
}
