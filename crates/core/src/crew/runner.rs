//! # Crew Runner
//!
//! Runs a crew's tasks strictly in order. Every task after the first sees the
//! outputs of all earlier tasks as context.

use super::agents::Agent;
use super::events::{CrewEvent, CrewEventKind};
use super::mode::AnalysisMode;
use super::tasks::Task;
use crate::error::{CrewError, CrewResult};
use crate::llm::CompletionBackend;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::sync::mpsc;

/// Execution order for a crew's tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Process {
    #[default]
    Sequential,
}

/// The answer of a single task
#[derive(Debug, Clone, Serialize)]
pub struct TaskOutput {
    pub agent_id: &'static str,
    pub role: &'static str,
    pub expected_output: &'static str,
    pub raw: String,
}

/// Result of a completed crew run
#[derive(Debug, Clone, Serialize)]
pub struct CrewOutput {
    pub tasks_output: Vec<TaskOutput>,
    pub agents_used: usize,
    pub events: Vec<CrewEvent>,
}

impl CrewOutput {
    /// Combined report text: the single answer, or one section per task.
    pub fn report(&self) -> String {
        match self.tasks_output.as_slice() {
            [only] => only.raw.clone(),
            outputs => outputs
                .iter()
                .map(|t| format!("## {}\n\n{}", t.role, t.raw.trim()))
                .collect::<Vec<_>>()
                .join("\n\n---\n\n"),
        }
    }

    pub fn tasks_completed(&self) -> usize {
        self.tasks_output.len()
    }
}

/// A set of agents and the tasks they execute
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
    events: Vec<CrewEvent>,
    event_tx: Option<mpsc::Sender<CrewEvent>>,
}

impl Crew {
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Self {
        Self {
            agents,
            tasks,
            process: Process::Sequential,
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// The crew for one menu choice
    pub fn for_mode(mode: AnalysisMode, topic: &str) -> Self {
        Self::new(mode.agents(), mode.tasks(topic))
    }

    /// Stream events to a listener as well as recording them
    pub fn with_event_channel(mut self, tx: mpsc::Sender<CrewEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    async fn emit(&mut self, event: CrewEvent) {
        tracing::debug!(kind = ?event.kind, agent = %event.agent, "{}", event.message);
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Run every task in order and collect their answers.
    ///
    /// The first backend failure aborts the run.
    #[tracing::instrument(skip_all, fields(tasks = self.tasks.len(), backend = %backend.describe()))]
    pub async fn kickoff(&mut self, backend: &dyn CompletionBackend) -> CrewResult<CrewOutput> {
        self.emit(CrewEvent::new(
            CrewEventKind::CrewStarted,
            "crew",
            "Initializing agents...",
        ))
        .await;
        let count = self.tasks.len();
        self.emit(
            CrewEvent::new(
                CrewEventKind::TasksQueued,
                "crew",
                format!("Processing {} task(s)...", count),
            )
            .with_data(serde_json::json!({ "tasks": count })),
        )
        .await;

        let tasks = self.tasks.clone();
        let mut context: Vec<String> = Vec::with_capacity(count);
        let mut outputs = Vec::with_capacity(count);

        for (index, task) in tasks.iter().enumerate() {
            let agent = task.agent;
            self.emit(
                CrewEvent::new(
                    CrewEventKind::TaskStarted,
                    agent.id,
                    format!("{} is working...", agent.role),
                )
                .with_data(serde_json::json!({ "task": index + 1, "of": count })),
            )
            .await;

            let started = Instant::now();
            let prompt = task.prompt(&context);
            match backend.complete(&agent, &prompt).await {
                Ok(raw) => {
                    tracing::info!(
                        agent = agent.id,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        chars = raw.len(),
                        "Task completed"
                    );
                    self.emit(CrewEvent::new(
                        CrewEventKind::TaskCompleted,
                        agent.id,
                        format!("{} finished", agent.role),
                    ))
                    .await;
                    context.push(raw.clone());
                    outputs.push(TaskOutput {
                        agent_id: agent.id,
                        role: agent.role,
                        expected_output: task.expected_output,
                        raw,
                    });
                }
                Err(source) => {
                    tracing::warn!(agent = agent.id, "Task failed: {:#}", source);
                    self.emit(CrewEvent::new(
                        CrewEventKind::TaskFailed,
                        agent.id,
                        format!("{} failed: {}", agent.role, source),
                    ))
                    .await;
                    self.emit(CrewEvent::new(
                        CrewEventKind::CrewFailed,
                        "crew",
                        "Analysis failed",
                    ))
                    .await;
                    return Err(CrewError::Agent {
                        role: agent.role.to_string(),
                        source,
                    });
                }
            }
        }

        self.emit(CrewEvent::new(
            CrewEventKind::CrewCompleted,
            "crew",
            "Analysis complete!",
        ))
        .await;

        Ok(CrewOutput {
            tasks_output: outputs,
            agents_used: self.agents.len(),
            events: std::mem::take(&mut self.events),
        })
    }
}
