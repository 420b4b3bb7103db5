//! # Configuration
//!
//! Two files live under `.bizcrew/`:
//!
//! - `config.json` - provider, model and base URL (all optional)
//! - `secrets.json` - API keys keyed by env var name, e.g. `{"OPENAI_API_KEY": "sk-..."}`
//!
//! Keys are resolved secrets file first, then the environment. `BIZCREW_PROVIDER`,
//! `BIZCREW_MODEL` and `BIZCREW_BASE_URL` override the persisted settings.

use crate::error::{CrewError, CrewResult};
use crate::models::{LlmProvider, ModelConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_PATH: &str = ".bizcrew/config.json";
pub const SECRETS_PATH: &str = ".bizcrew/secrets.json";

/// Persisted model settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersistedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<LlmProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl PersistedConfig {
    pub async fn load() -> Self {
        Self::load_from(CONFIG_PATH).await
    }

    /// Missing or unreadable files fall back to defaults.
    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "Ignoring unparsable config: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub async fn save_to(&self, path: impl AsRef<Path>) -> CrewResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Overwrite only the fields that `other` sets.
    pub fn merge(&mut self, other: PersistedConfig) {
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
    }

    /// Apply `BIZCREW_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(p) = non_blank("BIZCREW_PROVIDER") {
            match p.parse::<LlmProvider>() {
                Ok(provider) => self.provider = Some(provider),
                Err(e) => tracing::warn!("BIZCREW_PROVIDER ignored: {}", e),
            }
        }
        if let Some(m) = non_blank("BIZCREW_MODEL") {
            self.model = Some(m);
        }
        if let Some(url) = non_blank("BIZCREW_BASE_URL") {
            self.base_url = Some(url);
        }
    }

    /// Resolve into a concrete model selection, filling in provider defaults.
    pub fn model_config(&self) -> ModelConfig {
        let provider = self.provider.unwrap_or_default();
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());
        let config = ModelConfig::with_provider(provider, model);
        match &self.base_url {
            Some(url) if provider.supports_base_url() => config.with_base_url(url.clone()),
            _ => config,
        }
    }
}

/// API keys read from the secrets file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Secrets {
    keys: HashMap<String, String>,
}

impl Secrets {
    pub async fn load() -> Self {
        Self::load_from(SECRETS_PATH).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unparsable secrets file: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.keys
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Find the key for `provider`: secrets file, then `env_lookup`.
    pub fn resolve(
        &self,
        provider: LlmProvider,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> CrewResult<String> {
        let env_var = provider.env_var();
        self.get(env_var)
            .map(str::to_string)
            .or_else(|| env_lookup(env_var).filter(|v| !v.trim().is_empty()))
            .ok_or(CrewError::MissingApiKey {
                provider: provider.display_name(),
                env_var,
                secrets_path: SECRETS_PATH.to_string(),
            })
    }

    /// Resolve the key and export it so the provider client's `from_env()` sees it.
    pub fn export(&self, provider: LlmProvider) -> CrewResult<()> {
        let key = self.resolve(provider, |name| std::env::var(name).ok())?;
        std::env::set_var(provider.env_var(), key);
        Ok(())
    }
}
