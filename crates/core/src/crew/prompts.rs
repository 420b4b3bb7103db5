//! Prompt templates bundled at compile time.
//!
//! Each template carries a single `{topic}` placeholder.

pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Market research brief
pub const MARKET_RESEARCH: &str = include_str!("defaults/market_research.md");

/// Sales strategy brief
pub const SALES_STRATEGY: &str = include_str!("defaults/sales_strategy.md");

/// Customer landscape brief
pub const CUSTOMER_ANALYSIS: &str = include_str!("defaults/customer_analysis.md");

/// Executive report brief
pub const EXECUTIVE_REPORT: &str = include_str!("defaults/executive_report.md");

/// All templates with their slugs
pub fn all_defaults() -> Vec<(&'static str, &'static str)> {
    vec![
        ("market_research", MARKET_RESEARCH),
        ("sales_strategy", SALES_STRATEGY),
        ("customer_analysis", CUSTOMER_ANALYSIS),
        ("executive_report", EXECUTIVE_REPORT),
    ]
}

/// Interpolate `topic` verbatim into `template`.
pub fn render(template: &str, topic: &str) -> String {
    template.trim_end().replace(TOPIC_PLACEHOLDER, topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prompts_have_one_placeholder() {
        for (slug, content) in all_defaults() {
            assert!(content.len() > 50, "Prompt '{}' seems too short", slug);
            assert_eq!(
                content.matches(TOPIC_PLACEHOLDER).count(),
                1,
                "Prompt '{}' should carry exactly one placeholder",
                slug
            );
        }
    }

    #[test]
    fn test_render_is_verbatim() {
        let topic = "Café {chains} & \"bakeries\"\nin Montréal";
        let rendered = render(MARKET_RESEARCH, topic);
        assert!(rendered.starts_with("Conduct comprehensive market research on: Café {chains}"));
        assert!(rendered.contains(topic));
        assert!(!rendered.contains(TOPIC_PLACEHOLDER));
    }
}
