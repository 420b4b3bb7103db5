//! # Tasks
//!
//! A task pairs a rendered prompt with the description of the answer the
//! agent is expected to produce.

use super::agents::{self, Agent};
use super::prompts;
use serde::Serialize;

/// A fixed prompt template rendered for one topic, owned by one agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub description: String,
    pub expected_output: &'static str,
    pub agent: Agent,
}

impl Task {
    /// Full prompt sent to the backend. `context` holds the outputs of the
    /// tasks that ran before this one, oldest first.
    pub fn prompt(&self, context: &[String]) -> String {
        let mut prompt = format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        );
        if !context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&context.join("\n\n"));
        }
        prompt
    }
}

/// The four fixed templates, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskTemplate {
    MarketResearch,
    SalesStrategy,
    CustomerAnalysis,
    ExecutiveReport,
}

impl TaskTemplate {
    /// Agent that owns this template
    pub fn agent(&self) -> Agent {
        match self {
            TaskTemplate::MarketResearch => agents::MARKET_RESEARCH,
            TaskTemplate::SalesStrategy => agents::SALES_STRATEGY,
            TaskTemplate::CustomerAnalysis => agents::CUSTOMER_ANALYTICS,
            TaskTemplate::ExecutiveReport => agents::CONTENT_WRITER,
        }
    }

    pub fn render(&self, topic: &str) -> Task {
        match self {
            TaskTemplate::MarketResearch => market_research_task(topic),
            TaskTemplate::SalesStrategy => sales_strategy_task(topic),
            TaskTemplate::CustomerAnalysis => customer_analysis_task(topic),
            TaskTemplate::ExecutiveReport => executive_report_task(topic),
        }
    }
}

pub fn market_research_task(topic: &str) -> Task {
    Task {
        description: prompts::render(prompts::MARKET_RESEARCH, topic),
        expected_output: "A detailed market research report with specific insights, data points, \
                          and actionable recommendations",
        agent: agents::MARKET_RESEARCH,
    }
}

pub fn sales_strategy_task(topic: &str) -> Task {
    Task {
        description: prompts::render(prompts::SALES_STRATEGY, topic),
        expected_output: "A comprehensive sales strategy document with clear action steps, \
                          timelines, and measurable goals",
        agent: agents::SALES_STRATEGY,
    }
}

pub fn customer_analysis_task(topic: &str) -> Task {
    Task {
        description: prompts::render(prompts::CUSTOMER_ANALYSIS, topic),
        expected_output: "A customer analytics report with detailed segmentation, insights, and \
                          retention strategies",
        agent: agents::CUSTOMER_ANALYTICS,
    }
}

pub fn executive_report_task(topic: &str) -> Task {
    Task {
        description: prompts::render(prompts::EXECUTIVE_REPORT, topic),
        expected_output: "A polished business report ready for executive presentation with clear \
                          structure and actionable insights",
        agent: agents::CONTENT_WRITER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: &str = "an AI-powered customer service platform for small e-commerce shops";

    #[test]
    fn test_templates_interpolate_topic() {
        let builders: [fn(&str) -> Task; 4] = [
            market_research_task,
            sales_strategy_task,
            customer_analysis_task,
            executive_report_task,
        ];
        for build in builders {
            let task = build(TOPIC);
            assert!(!task.description.is_empty());
            assert!(task.description.contains(TOPIC));
            assert!(!task.expected_output.is_empty());
        }
    }

    #[test]
    fn test_template_headlines() {
        assert!(sales_strategy_task("X")
            .description
            .starts_with("Develop a comprehensive sales strategy for: X\n"));
        assert!(customer_analysis_task("X")
            .description
            .contains("Customer segmentation (identify 3-5 key segments)"));
        assert!(executive_report_task("X")
            .description
            .contains("Next Steps and Action Plan (30/60/90 days)"));
    }

    #[test]
    fn test_task_owner() {
        assert_eq!(market_research_task(TOPIC).agent, agents::MARKET_RESEARCH);
        assert_eq!(executive_report_task(TOPIC).agent, agents::CONTENT_WRITER);
    }

    #[test]
    fn test_template_agent_matches_rendered_task() {
        let templates = [
            TaskTemplate::MarketResearch,
            TaskTemplate::SalesStrategy,
            TaskTemplate::CustomerAnalysis,
            TaskTemplate::ExecutiveReport,
        ];
        for template in templates {
            assert_eq!(template.render(TOPIC).agent, template.agent());
        }
    }

    #[test]
    fn test_prompt_without_context() {
        let task = market_research_task(TOPIC);
        let prompt = task.prompt(&[]);
        assert!(prompt.starts_with(&task.description));
        assert!(prompt.contains(task.expected_output));
        assert!(!prompt.contains("context you're working with"));
    }

    #[test]
    fn test_prompt_threads_context() {
        let task = executive_report_task(TOPIC);
        let prompt = task.prompt(&["market notes".to_string(), "sales notes".to_string()]);
        let ctx = prompt.find("context you're working with").unwrap();
        let market = prompt.find("market notes").unwrap();
        let sales = prompt.find("sales notes").unwrap();
        assert!(ctx < market && market < sales);
    }
}
