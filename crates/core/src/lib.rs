//! # Crew Core
//!
//! Business logic for the multi-agent business analysis app.
//!
//! ## Architecture
//!
//! - `crew/` - Agent personas, prompt templates, analysis modes, sequential runner
//! - `llm/` - Completion backend seam and the radkit-backed implementation
//! - `models` - LLM provider configuration
//! - `config` - Persisted settings and API key resolution
//! - `analysis` - One request: validate, run the crew, package the report
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crew_core::analysis::run_analysis;
//! use crew_core::crew::AnalysisMode;
//! use crew_core::llm::RadkitBackend;
//!
//! let backend = RadkitBackend::default();
//! let report = run_analysis(AnalysisMode::Comprehensive, "Pet insurance in Canada", &backend).await?;
//! println!("{}", report.content);
//! ```

pub mod analysis;
pub mod config;
pub mod crew;
pub mod error;
pub mod llm;
pub mod models;

pub use error::{CrewError, CrewResult};
