//! # Analysis Modes
//!
//! The five menu choices and the fixed subset of tasks each one runs.

use super::agents::Agent;
use super::tasks::{Task, TaskTemplate};
use crate::error::CrewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// All four agents, sequentially
    #[default]
    Comprehensive,
    MarketResearch,
    SalesStrategy,
    CustomerAnalysis,
    ExecutiveReport,
}

impl AnalysisMode {
    /// Menu order
    pub fn all() -> [AnalysisMode; 5] {
        [
            AnalysisMode::Comprehensive,
            AnalysisMode::MarketResearch,
            AnalysisMode::SalesStrategy,
            AnalysisMode::CustomerAnalysis,
            AnalysisMode::ExecutiveReport,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            AnalysisMode::Comprehensive => "comprehensive",
            AnalysisMode::MarketResearch => "market_research",
            AnalysisMode::SalesStrategy => "sales_strategy",
            AnalysisMode::CustomerAnalysis => "customer_analysis",
            AnalysisMode::ExecutiveReport => "executive_report",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Comprehensive => "Comprehensive Business Analysis (All 4 Agents)",
            AnalysisMode::MarketResearch => "Market Research Only",
            AnalysisMode::SalesStrategy => "Sales Strategy Only",
            AnalysisMode::CustomerAnalysis => "Customer Analysis Only",
            AnalysisMode::ExecutiveReport => "Executive Report Only",
        }
    }

    /// Templates this mode runs, in execution order
    pub fn templates(&self) -> &'static [TaskTemplate] {
        match self {
            AnalysisMode::Comprehensive => &[
                TaskTemplate::MarketResearch,
                TaskTemplate::SalesStrategy,
                TaskTemplate::CustomerAnalysis,
                TaskTemplate::ExecutiveReport,
            ],
            AnalysisMode::MarketResearch => &[TaskTemplate::MarketResearch],
            AnalysisMode::SalesStrategy => &[TaskTemplate::SalesStrategy],
            AnalysisMode::CustomerAnalysis => &[TaskTemplate::CustomerAnalysis],
            AnalysisMode::ExecutiveReport => &[TaskTemplate::ExecutiveReport],
        }
    }

    /// Render this mode's tasks for `topic`
    pub fn tasks(&self, topic: &str) -> Vec<Task> {
        self.templates().iter().map(|t| t.render(topic)).collect()
    }

    /// Agents taking part, in execution order
    pub fn agents(&self) -> Vec<Agent> {
        self.templates().iter().map(TaskTemplate::agent).collect()
    }

    pub fn is_comprehensive(&self) -> bool {
        *self == AnalysisMode::Comprehensive
    }

    /// Steps shown in the process info panel
    pub fn process_steps(&self) -> Vec<&'static str> {
        if self.is_comprehensive() {
            vec![
                "🔍 Market Research",
                "💼 Sales Strategy",
                "👥 Customer Analysis",
                "📝 Final Report",
            ]
        } else {
            vec!["Single Agent Analysis"]
        }
    }

    pub fn estimated_time(&self) -> &'static str {
        if self.is_comprehensive() {
            "3-5 minutes"
        } else {
            "45-90 seconds"
        }
    }

    /// Name of the plain-text download
    pub fn download_file_name(&self) -> String {
        format!(
            "business_analysis_{}.txt",
            self.label().to_lowercase().replace(' ', "_")
        )
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnalysisMode {
    type Err = CrewError;

    /// Accepts the id (`market_research`, `market-research`) or the menu label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        let as_id = needle.replace('-', "_");
        AnalysisMode::all()
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(&as_id) || m.label() == needle)
            .ok_or_else(|| CrewError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crew::agents;

    #[test]
    fn test_mode_task_subsets() {
        use TaskTemplate::*;
        assert_eq!(
            AnalysisMode::Comprehensive.templates(),
            [MarketResearch, SalesStrategy, CustomerAnalysis, ExecutiveReport]
        );
        assert_eq!(AnalysisMode::MarketResearch.templates(), [MarketResearch]);
        assert_eq!(AnalysisMode::SalesStrategy.templates(), [SalesStrategy]);
        assert_eq!(AnalysisMode::CustomerAnalysis.templates(), [CustomerAnalysis]);
        assert_eq!(AnalysisMode::ExecutiveReport.templates(), [ExecutiveReport]);
    }

    #[test]
    fn test_mode_agents() {
        assert_eq!(
            AnalysisMode::Comprehensive.agents(),
            agents::all_agents().to_vec()
        );
        assert_eq!(
            AnalysisMode::CustomerAnalysis.agents(),
            vec![agents::CUSTOMER_ANALYTICS]
        );
        assert_eq!(
            AnalysisMode::ExecutiveReport.agents(),
            vec![agents::CONTENT_WRITER]
        );
    }

    #[test]
    fn test_tasks_match_agents() {
        for mode in AnalysisMode::all() {
            let tasks = mode.tasks("topic");
            assert_eq!(tasks.len(), mode.templates().len());
            let owners: Vec<_> = tasks.iter().map(|t| t.agent).collect();
            assert_eq!(owners, mode.agents());
        }
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            AnalysisMode::MarketResearch.download_file_name(),
            "business_analysis_market_research_only.txt"
        );
        assert_eq!(
            AnalysisMode::Comprehensive.download_file_name(),
            "business_analysis_comprehensive_business_analysis_(all_4_agents).txt"
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            "sales-strategy".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::SalesStrategy
        );
        assert_eq!(
            "Executive Report Only".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::ExecutiveReport
        );
        assert!(matches!(
            "everything".parse::<AnalysisMode>(),
            Err(CrewError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_mode_serde_ids() {
        let json = serde_json::to_string(&AnalysisMode::CustomerAnalysis).unwrap();
        assert_eq!(json, "\"customer_analysis\"");
        for mode in AnalysisMode::all() {
            let parsed: AnalysisMode =
                serde_json::from_str(&format!("\"{}\"", mode.id())).unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_process_info() {
        assert_eq!(AnalysisMode::Comprehensive.process_steps().len(), 4);
        assert_eq!(AnalysisMode::Comprehensive.estimated_time(), "3-5 minutes");
        assert_eq!(AnalysisMode::SalesStrategy.estimated_time(), "45-90 seconds");
    }
}
