//! Error types for the crew runtime.

use thiserror::Error;

/// Errors surfaced to the UI and the CLI.
#[derive(Debug, Error)]
pub enum CrewError {
    /// The user submitted an empty prompt. No agent is invoked.
    #[error("Please enter a task description")]
    EmptyTask,

    #[error("{provider} API Key not found! Please add {env_var} to {secrets_path} or the environment")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
        secrets_path: String,
    },

    #[error("unknown analysis mode '{0}'")]
    UnknownMode(String),

    /// A task failed inside the completion backend.
    #[error("{role} failed: {source:#}")]
    Agent {
        role: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrewError {
    /// Whether the error comes from bad user input rather than the backend.
    pub fn is_user_error(&self) -> bool {
        matches!(self, CrewError::EmptyTask | CrewError::UnknownMode(_))
    }
}

pub type CrewResult<T> = Result<T, CrewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_task_message() {
        assert_eq!(
            CrewError::EmptyTask.to_string(),
            "Please enter a task description"
        );
        assert!(CrewError::EmptyTask.is_user_error());
    }

    #[test]
    fn test_agent_error_includes_cause() {
        let err = CrewError::Agent {
            role: "Market Research Analyst".to_string(),
            source: anyhow::anyhow!("401 Unauthorized"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Market Research Analyst failed"));
        assert!(msg.contains("401 Unauthorized"));
        assert!(!err.is_user_error());
    }
}
