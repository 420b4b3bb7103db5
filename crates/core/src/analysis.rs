//! # Analysis Requests
//!
//! One click of the run button: validate the prompt, run the crew for the
//! selected mode, and package the report for display and download.

use crate::crew::{AnalysisMode, Crew, CrewEvent, TaskOutput};
use crate::error::{CrewError, CrewResult};
use crate::llm::CompletionBackend;
use serde::Serialize;
use tokio::sync::mpsc;

/// Generic hints shown next to any failed run
pub const TROUBLESHOOTING_TIPS: [&str; 4] = [
    "Verify your API key is valid",
    "Check that you have API credits available",
    "Try with a shorter/simpler task description",
    "Ensure you have internet connectivity",
];

/// Everything the results panel shows
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    /// Combined text of all task answers
    pub content: String,
    pub file_name: String,
    pub agents_used: usize,
    pub tasks_completed: usize,
    pub tasks: Vec<TaskOutput>,
    pub events: Vec<CrewEvent>,
}

/// Run `mode` on `input`.
///
/// Blank input is rejected before any agent is invoked.
pub async fn run_analysis(
    mode: AnalysisMode,
    input: &str,
    backend: &dyn CompletionBackend,
) -> CrewResult<AnalysisReport> {
    execute(mode, input, backend, None).await
}

/// Like [`run_analysis`], but also sends each [`CrewEvent`] to `events` as it
/// happens. The sender is dropped once the run ends, which closes the channel.
pub async fn run_analysis_streamed(
    mode: AnalysisMode,
    input: &str,
    backend: &dyn CompletionBackend,
    events: mpsc::Sender<CrewEvent>,
) -> CrewResult<AnalysisReport> {
    execute(mode, input, backend, Some(events)).await
}

#[tracing::instrument(skip(input, backend, events), fields(input_chars = input.chars().count()))]
async fn execute(
    mode: AnalysisMode,
    input: &str,
    backend: &dyn CompletionBackend,
    events: Option<mpsc::Sender<CrewEvent>>,
) -> CrewResult<AnalysisReport> {
    if input.trim().is_empty() {
        return Err(CrewError::EmptyTask);
    }

    let mut crew = Crew::for_mode(mode, input);
    if let Some(tx) = events {
        crew = crew.with_event_channel(tx);
    }
    tracing::info!(
        mode = mode.id(),
        agents = crew.agents().len(),
        "Starting analysis"
    );
    let output = crew.kickoff(backend).await?;

    Ok(AnalysisReport {
        mode,
        content: output.report(),
        file_name: mode.download_file_name(),
        agents_used: output.agents_used,
        tasks_completed: output.tasks_completed(),
        tasks: output.tasks_output,
        events: output.events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crew::runner::tests::ScriptedBackend;

    #[tokio::test]
    async fn test_empty_input_skips_backend() {
        let backend = ScriptedBackend::default();
        for input in ["", "   \n\t"] {
            let err = run_analysis(AnalysisMode::Comprehensive, input, &backend)
                .await
                .unwrap_err();
            assert!(matches!(err, CrewError::EmptyTask));
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_each_mode_runs_its_subset() {
        let expected: [(AnalysisMode, &[&str]); 5] = [
            (
                AnalysisMode::Comprehensive,
                &[
                    "market_research",
                    "sales_strategy",
                    "customer_analytics",
                    "content_writer",
                ],
            ),
            (AnalysisMode::MarketResearch, &["market_research"]),
            (AnalysisMode::SalesStrategy, &["sales_strategy"]),
            (AnalysisMode::CustomerAnalysis, &["customer_analytics"]),
            (AnalysisMode::ExecutiveReport, &["content_writer"]),
        ];

        for (mode, agents) in expected {
            let backend = ScriptedBackend::default();
            let report = run_analysis(mode, "boutique gyms", &backend).await.unwrap();

            let calls = backend.calls.lock().unwrap();
            let called: Vec<_> = calls.iter().map(|(a, _)| a.as_str()).collect();
            assert_eq!(called, agents, "mode {}", mode.id());
            assert!(calls.iter().all(|(_, prompt)| prompt.contains("boutique gyms")));
            assert_eq!(report.tasks_completed, agents.len());
            assert_eq!(report.agents_used, agents.len());
            assert_eq!(report.file_name, mode.download_file_name());
        }
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = ScriptedBackend::failing_on("market_research");
        let err = run_analysis(AnalysisMode::MarketResearch, "x", &backend)
            .await
            .unwrap_err();
        assert!(matches!(err, CrewError::Agent { .. }));
        assert!(err.to_string().contains("insufficient_quota"));
    }

    #[tokio::test]
    async fn test_streamed_events_arrive_in_order() {
        let backend = ScriptedBackend::default();
        let (tx, mut rx) = mpsc::channel(32);
        let report = run_analysis_streamed(AnalysisMode::SalesStrategy, "x", &backend, tx)
            .await
            .unwrap();

        let mut streamed = Vec::new();
        while let Some(event) = rx.recv().await {
            streamed.push(event.message);
        }
        let recorded: Vec<_> = report.events.iter().map(|e| e.message.clone()).collect();
        assert_eq!(streamed, recorded);
        assert_eq!(
            &streamed[..2],
            ["Initializing agents...", "Processing 1 task(s)..."]
        );
    }

    #[tokio::test]
    async fn test_streamed_empty_input_closes_channel() {
        let backend = ScriptedBackend::default();
        let (tx, mut rx) = mpsc::channel(8);
        let err = run_analysis_streamed(AnalysisMode::Comprehensive, " ", &backend, tx)
            .await
            .unwrap_err();

        assert!(matches!(err, CrewError::EmptyTask));
        assert!(rx.recv().await.is_none());
        assert_eq!(backend.call_count(), 0);
    }
}
