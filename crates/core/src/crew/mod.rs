//! # Business Crew
//!
//! Personas, prompt templates, the mode selector and the sequential runner.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Topic → Market Research → Sales Strategy → Customer Analysis → Executive Report
//! ```
//!
//! Single-agent modes run exactly one of the four steps.

pub mod agents;
pub mod events;
pub mod mode;
pub mod prompts;
pub mod runner;
pub mod tasks;

pub use agents::{all_agents, Agent};
pub use events::{CrewEvent, CrewEventKind};
pub use mode::AnalysisMode;
pub use runner::{Crew, CrewOutput, Process, TaskOutput};
pub use tasks::{
    customer_analysis_task, executive_report_task, market_research_task, sales_strategy_task, Task,
    TaskTemplate,
};
