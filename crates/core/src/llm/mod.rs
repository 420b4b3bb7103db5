//! # Completion Backend
//!
//! The seam between the crew runner and the LLM. [`RadkitBackend`] calls the
//! configured provider through radkit; tests script their own backend.

use crate::crew::agents::Agent;
use crate::models::{LlmProvider, ModelConfig};
use async_trait::async_trait;
use radkit::agent::LlmFunction;
use radkit::macros::LLMOutput;
use radkit::models::providers::{
    AnthropicLlm, DeepSeekLlm, GeminiLlm, GrokLlm, OpenAILlm, OpenRouterLlm,
};
use radkit::models::BaseLlm;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Produces one agent's answer to one prompt
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, agent: &Agent, prompt: &str) -> anyhow::Result<String>;

    /// Label for logs and the status endpoint
    fn describe(&self) -> String {
        "custom backend".to_string()
    }
}

/// The final answer of a task
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct TaskAnswer {
    /// The complete final answer, formatted as markdown
    pub content: String,
}

/// Backend that calls the configured provider via radkit's `LlmFunction`
#[derive(Debug, Clone, Default)]
pub struct RadkitBackend {
    config: ModelConfig,
}

impl RadkitBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Create the client for the configured provider and ask it for one answer.
    ///
    /// `LlmFunction` needs a concrete `BaseLlm`, so each arm builds its own type.
    async fn answer(&self, system: String, input: String) -> anyhow::Result<TaskAnswer> {
        let model = &self.config.model;
        match self.config.provider {
            LlmProvider::Anthropic => {
                answer_with(AnthropicLlm::from_env(model)?, system, input).await
            }
            LlmProvider::OpenAI => {
                let mut llm = OpenAILlm::from_env(model)?;
                if let Some(base_url) = &self.config.base_url {
                    llm = llm.with_base_url(base_url);
                }
                answer_with(llm, system, input).await
            }
            LlmProvider::Gemini => answer_with(GeminiLlm::from_env(model)?, system, input).await,
            LlmProvider::OpenRouter => {
                answer_with(OpenRouterLlm::from_env(model)?, system, input).await
            }
            LlmProvider::Grok => answer_with(GrokLlm::from_env(model)?, system, input).await,
            LlmProvider::DeepSeek => {
                answer_with(DeepSeekLlm::from_env(model)?, system, input).await
            }
        }
    }
}

async fn answer_with<L: BaseLlm + 'static>(
    llm: L,
    system: String,
    input: String,
) -> anyhow::Result<TaskAnswer> {
    let func = LlmFunction::<TaskAnswer>::new_with_system_instructions(llm, system);
    Ok(func.run(input).await?)
}

#[async_trait]
impl CompletionBackend for RadkitBackend {
    #[tracing::instrument(
        skip(self, agent, prompt),
        fields(agent = agent.id, provider = %self.config.provider, model = %self.config.model)
    )]
    async fn complete(&self, agent: &Agent, prompt: &str) -> anyhow::Result<String> {
        let answer = self
            .answer(agent.system_instructions(), prompt.to_string())
            .await?;
        tracing::debug!(chars = answer.content.len(), "Answer received");
        Ok(answer.content)
    }

    fn describe(&self) -> String {
        format!(
            "{} {}",
            self.config.provider.display_name(),
            self.config.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crew::agents;

    #[test]
    fn test_radkit_backend_describe() {
        let backend = RadkitBackend::new(ModelConfig::default());
        assert_eq!(backend.describe(), "OpenAI gpt-4");

        let backend = RadkitBackend::new(ModelConfig::with_provider(
            LlmProvider::DeepSeek,
            "deepseek-chat",
        ));
        assert_eq!(backend.config().provider, LlmProvider::DeepSeek);
    }

    #[test]
    fn test_task_answer_deserializes() {
        let answer: TaskAnswer = serde_json::from_str(r##"{"content": "# Report"}"##).unwrap();
        assert_eq!(answer.content, "# Report");
    }

    #[tokio::test]
    async fn test_missing_provider_key_is_an_error() {
        // Only meaningful where no DeepSeek key is exported.
        if std::env::var("DEEPSEEK_API_KEY").is_ok() {
            return;
        }
        let backend = RadkitBackend::new(ModelConfig::with_provider(
            LlmProvider::DeepSeek,
            LlmProvider::DeepSeek.default_model(),
        ));
        let result = backend.complete(&agents::MARKET_RESEARCH, "hello").await;
        assert!(result.is_err());
    }
}
