//! Prompt templates and decoding parameters for each remote capability.

use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::{InsightsError, InsightsResult};

use super::provider::{AIMessage, GenerateOptions};

/// A fixed system instruction, user template and decoding parameters.
#[derive(Debug, Clone, Copy)]
pub struct PromptSpec {
    /// Template name
    pub name: &'static str,
    /// System instruction
    pub system: &'static str,
    /// Handlebars template for the user message
    pub user_template: &'static str,
    /// Output bound
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl PromptSpec {
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}

pub const SUMMARIZE: PromptSpec = PromptSpec {
    name: "summarize",
    system: "You are a helpful assistant that creates concise summaries of tasks and cards. Keep summaries under 100 words.",
    user_template: "Summarize this task:\n\n{{text}}",
    max_tokens: 150,
    temperature: 0.7,
};

pub const EXTRACT_TASKS: PromptSpec = PromptSpec {
    name: "extract_tasks",
    system: "You are a task extraction assistant. Extract clear, actionable tasks from the provided text. Return a list of tasks, one per line.",
    user_template: "Extract tasks from this text:\n\n{{text}}",
    max_tokens: 300,
    temperature: 0.5,
};

pub const PRIORITY: PromptSpec = PromptSpec {
    name: "priority",
    system: "You are a task priority analyzer. Analyze the task and respond with only one word: 'high', 'medium', or 'low'.",
    user_template: "Analyze priority for this task:\nTitle: {{title}}\nDescription: {{#if description}}{{description}}{{else}}not provided{{/if}}\nDue Date: {{#if due_date}}{{due_date}}{{else}}not provided{{/if}}",
    max_tokens: 10,
    temperature: 0.3,
};

const ALL_PROMPTS: [PromptSpec; 3] = [SUMMARIZE, EXTRACT_TASKS, PRIORITY];

/// Renders the user messages for each [`PromptSpec`].
pub struct PromptManager {
    handlebars: Handlebars<'static>,
}

impl PromptManager {
    /// Create a new prompt manager with the embedded templates.
    pub fn new() -> InsightsResult<Self> {
        let mut handlebars = Handlebars::new();
        // Card text is sent to the model verbatim, not HTML-escaped.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        for spec in ALL_PROMPTS {
            handlebars
                .register_template_string(spec.name, spec.user_template)
                .map_err(|e| InsightsError::Prompt {
                    template: spec.name.to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Build the system + user messages for `spec`.
    pub fn messages<T: Serialize>(&self, spec: &PromptSpec, data: &T) -> InsightsResult<Vec<AIMessage>> {
        let user = self
            .handlebars
            .render(spec.name, data)
            .map_err(|e| InsightsError::Prompt {
                template: spec.name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(vec![AIMessage::system(spec.system), AIMessage::user(user)])
    }
}
