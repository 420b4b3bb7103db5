//! # Agent Personas
//!
//! The four business personas. Agents are pure configuration: a role, a goal
//! and a backstory that become the system instructions of every LLM call the
//! agent makes.

use serde::Serialize;

/// A named persona submitted to the completion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agent {
    /// Stable identifier (used in events and the API)
    pub id: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    /// Sidebar icon
    pub icon: &'static str,
    /// Sidebar name
    pub display_name: &'static str,
    /// One-line sidebar caption
    pub caption: &'static str,
    pub allow_delegation: bool,
}

impl Agent {
    /// System instructions for this persona
    pub fn system_instructions(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour personal goal is: {goal}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal
        )
    }
}

pub const MARKET_RESEARCH: Agent = Agent {
    id: "market_research",
    role: "Market Research Analyst",
    goal: "Conduct comprehensive market research and identify opportunities",
    backstory: "You are an experienced market research analyst with 15 years of experience in \
                analyzing market trends, competitor strategies, and identifying growth \
                opportunities. You provide data-driven insights with specific numbers and \
                actionable recommendations.",
    icon: "📊",
    display_name: "Market Research Agent",
    caption: "Analyzes markets and trends",
    allow_delegation: false,
};

pub const SALES_STRATEGY: Agent = Agent {
    id: "sales_strategy",
    role: "Sales Strategy Consultant",
    goal: "Develop effective sales strategies and action plans",
    backstory: "You are a seasoned sales strategist who has helped hundreds of companies scale \
                their revenue through innovative sales approaches and strategic planning. You \
                focus on practical, immediately actionable strategies with clear implementation \
                steps.",
    icon: "💼",
    display_name: "Sales Strategy Agent",
    caption: "Develops sales strategies",
    allow_delegation: false,
};

pub const CUSTOMER_ANALYTICS: Agent = Agent {
    id: "customer_analytics",
    role: "Customer Analytics Specialist",
    goal: "Analyze customer behavior and generate actionable insights",
    backstory: "You are a data-driven customer analytics expert specializing in customer \
                segmentation, behavior analysis, and retention strategies. You turn data into \
                actionable business intelligence with clear metrics and KPIs.",
    icon: "👥",
    display_name: "Customer Analytics Agent",
    caption: "Analyzes customer behavior",
    allow_delegation: false,
};

pub const CONTENT_WRITER: Agent = Agent {
    id: "content_writer",
    role: "Business Content Writer",
    goal: "Create professional business reports and documentation",
    backstory: "You are a skilled business writer who transforms complex data and insights into \
                clear, compelling reports and presentations. You excel at synthesizing \
                information from multiple sources into executive-ready documents.",
    icon: "📝",
    display_name: "Content Writer Agent",
    caption: "Creates business reports",
    allow_delegation: false,
};

/// All agents in pipeline order
pub fn all_agents() -> [Agent; 4] {
    [MARKET_RESEARCH, SALES_STRATEGY, CUSTOMER_ANALYTICS, CONTENT_WRITER]
}
