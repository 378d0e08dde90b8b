//! Engine backed by a remote language model.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::ai::prompts::{PromptSpec, EXTRACT_TASKS, PRIORITY, SUMMARIZE};
use crate::ai::{AIProvider, PromptManager};
use crate::config::EngineMode;
use crate::entities::{Card, PriorityAssessment, PriorityLabel, MAX_TASKS};
use crate::errors::InsightsResult;

use super::AnalysisEngine;

/// Fixed confidence reported for model-based priorities.
pub const REMOTE_CONFIDENCE: f64 = 0.85;

/// Label used when the model answers with something other than a label.
const FALLBACK_PRIORITY: PriorityLabel = PriorityLabel::Medium;

/// Analyzes text by prompting an [`AIProvider`]. Errors are never retried.
pub struct RemoteEngine {
    provider: Arc<dyn AIProvider>,
    prompts: PromptManager,
    model: String,
}

impl RemoteEngine {
    /// Create a new engine with the given AI provider.
    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> InsightsResult<Self> {
        Ok(Self {
            provider,
            prompts: PromptManager::new()?,
            model: model.into(),
        })
    }

    async fn complete(&self, spec: &PromptSpec, data: &serde_json::Value) -> InsightsResult<String> {
        let messages = self.prompts.messages(spec, data)?;
        let response = self
            .provider
            .generate_text(&self.model, &messages, &spec.options())
            .await?;

        debug!(
            prompt = spec.name,
            provider = %response.provider,
            output_tokens = response.usage.output_tokens,
            "Remote completion received"
        );

        Ok(response.text)
    }
}

#[async_trait]
impl AnalysisEngine for RemoteEngine {
    fn mode(&self) -> EngineMode {
        EngineMode::Remote
    }

    async fn summarize(&self, text: &str) -> InsightsResult<String> {
        let output = self.complete(&SUMMARIZE, &json!({ "text": text })).await?;
        Ok(output.trim().to_string())
    }

    async fn extract_tasks(&self, text: &str) -> InsightsResult<Vec<String>> {
        let output = self
            .complete(&EXTRACT_TASKS, &json!({ "text": text }))
            .await?;
        Ok(parse_task_lines(&output))
    }

    async fn classify_priority(&self, card: &Card) -> InsightsResult<PriorityAssessment> {
        let data = json!({
            "title": card.name,
            "description": card.description,
            "due_date": card.due_date_text(),
        });
        let output = self.complete(&PRIORITY, &data).await?;
        Ok(PriorityAssessment::new(
            parse_priority(&output),
            REMOTE_CONFIDENCE,
        ))
    }
}

/// One task per non-empty line, bullet markers removed.
pub(crate) fn parse_task_lines(output: &str) -> Vec<String> {
    let mut tasks: Vec<String> = output
        .lines()
        .map(|line| {
            line.trim_start_matches(|c: char| matches!(c, '-' | '•') || c.is_whitespace())
                .trim()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    tasks.truncate(MAX_TASKS);
    tasks
}

/// Read a priority label from model output, defaulting to medium.
pub(crate) fn parse_priority(output: &str) -> PriorityLabel {
    let answer = output.trim().to_lowercase();
    PriorityLabel::parse(&answer).unwrap_or_else(|| {
        warn!(answer = %answer, "Model returned an unknown priority, using medium");
        FALLBACK_PRIORITY
    })
}
