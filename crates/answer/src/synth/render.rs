//! Handlebars rendering of answer layouts.

use handlebars::Handlebars;
use serde::Serialize;
use wikiqa_core::{AppError, AppResult};

const ANSWER_TEMPLATE_NAME: &str = "answer";
const NO_RESULTS_TEMPLATE_NAME: &str = "no_results";

const ANSWER_TEMPLATE: &str = "{{intro}}\n\n{{body}}\n\n{{closing}}\n\n{{sources_header}}\n{{#each sources}}- [{{title}}]({{url}})\n{{/each}}{{#if related}}\n{{related_label}} {{related}}\n{{/if}}";

const NO_RESULTS_TEMPLATE: &str = "I couldn't find any articles matching \"{{question}}\". {{encouragement}}\n\n{{tips_header}}\n{{#each tips}}- {{this}}\n{{/each}}";

/// A cited article: markdown link text and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

/// Values for the answer layout.
#[derive(Debug, Serialize)]
pub struct AnswerView<'a> {
    pub intro: &'a str,
    pub body: &'a str,
    pub closing: &'a str,
    pub sources_header: &'a str,
    pub sources: &'a [SourceLink],
    pub related_label: &'a str,
    /// Comma-separated related titles; empty hides the line
    pub related: String,
}

/// Values for the no-result layout.
#[derive(Debug, Serialize)]
pub struct NoResultsView<'a> {
    pub question: &'a str,
    pub encouragement: &'a str,
    pub tips_header: &'a str,
    pub tips: &'a [&'a str],
}

/// Renders answers from pre-registered templates.
pub struct AnswerRenderer {
    registry: Handlebars<'static>,
}

impl AnswerRenderer {
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Answers are markdown, not HTML
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string(ANSWER_TEMPLATE_NAME, ANSWER_TEMPLATE)
            .map_err(|e| AppError::Template(format!("Failed to register answer template: {}", e)))?;
        registry
            .register_template_string(NO_RESULTS_TEMPLATE_NAME, NO_RESULTS_TEMPLATE)
            .map_err(|e| {
                AppError::Template(format!("Failed to register no-results template: {}", e))
            })?;

        Ok(Self { registry })
    }

    pub fn render_answer(&self, view: &AnswerView<'_>) -> AppResult<String> {
        self.render(ANSWER_TEMPLATE_NAME, view)
    }

    pub fn render_no_results(&self, view: &NoResultsView<'_>) -> AppResult<String> {
        self.render(NO_RESULTS_TEMPLATE_NAME, view)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<String> {
        let rendered = self
            .registry
            .render(name, data)
            .map_err(|e| AppError::Template(format!("Failed to render {} template: {}", name, e)))?;

        Ok(rendered.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(title: &str) -> SourceLink {
        SourceLink {
            title: title.to_string(),
            url: format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
        }
    }

    #[test]
    fn test_render_answer_layout() {
        let renderer = AnswerRenderer::new().unwrap();
        let sources = vec![link("Quantum computing")];
        let view = AnswerView {
            intro: "Great question!",
            body: "Qubits & gates <matter>.",
            closing: "I hope this helps!",
            sources_header: "**Sources:**",
            sources: &sources,
            related_label: "**Related topics:**",
            related: "Qubit, Quantum supremacy".to_string(),
        };

        let rendered = renderer.render_answer(&view).unwrap();
        assert!(rendered.starts_with("Great question!\n\nQubits & gates <matter>."));
        assert!(rendered.contains(
            "**Sources:**\n- [Quantum computing](https://en.wikipedia.org/wiki/Quantum_computing)"
        ));
        assert!(rendered.ends_with("**Related topics:** Qubit, Quantum supremacy"));
    }

    #[test]
    fn test_render_answer_without_related() {
        let renderer = AnswerRenderer::new().unwrap();
        let sources = vec![link("Paris")];
        let view = AnswerView {
            intro: "Let me explain.",
            body: "Paris is the capital of France.",
            closing: "Want to know more? Just ask!",
            sources_header: "**Sources:**",
            sources: &sources,
            related_label: "**Related topics:**",
            related: String::new(),
        };

        let rendered = renderer.render_answer(&view).unwrap();
        assert!(!rendered.contains("Related topics"));
        assert!(rendered.ends_with("- [Paris](https://en.wikipedia.org/wiki/Paris)"));
    }

    #[test]
    fn test_render_no_results_quotes_question() {
        let renderer = AnswerRenderer::new().unwrap();
        let view = NoResultsView {
            question: "asdkjaslkdj",
            encouragement: "No luck this time.",
            tips_header: "Try this:",
            tips: &["Check the spelling", "Use fewer words"],
        };

        let rendered = renderer.render_no_results(&view).unwrap();
        assert!(rendered.contains("\"asdkjaslkdj\""));
        assert!(rendered.contains("Try this:\n- Check the spelling\n- Use fewer words"));
    }
}
