//! Dual-path analysis: a remote language model or local heuristics.
//!
//! [`AnalysisEngine`] is implemented twice, by [`RemoteEngine`] and
//! [`HeuristicEngine`]. The [`Analyzer`] picks one when it is built (from the
//! resolved [`EngineMode`]) and afterwards only shapes results and failures.
//! A remote failure is reported as the capability's failure; it never falls
//! back to the heuristics.

pub mod heuristic;
pub mod remote;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::ai::{AIProvider, OpenAIProvider};
use crate::analytics;
use crate::config::{Config, EngineMode};
use crate::entities::{AnalysisResult, Card, CardInsights, PriorityAssessment};
use crate::errors::{InsightsError, InsightsResult};
use crate::heuristics;

pub use heuristic::{HeuristicEngine, HEURISTIC_CONFIDENCE};
pub use remote::{RemoteEngine, REMOTE_CONFIDENCE};

/// The operations a request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Summarize,
    ExtractTasks,
    AnalyzePriority,
    GenerateAnalytics,
    GenerateInsights,
}

impl Capability {
    /// Name used in failure messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Summarize => "Summarization",
            Self::ExtractTasks => "Task extraction",
            Self::AnalyzePriority => "Priority analysis",
            Self::GenerateAnalytics => "Analytics generation",
            Self::GenerateInsights => "Insight generation",
        }
    }

    /// Wrap `err` as this capability's failure.
    pub fn failed(self, err: impl fmt::Display) -> InsightsError {
        InsightsError::analysis_failed(self.label(), err)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One implementation of the text capabilities.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Which path this engine represents.
    fn mode(&self) -> EngineMode;

    async fn summarize(&self, text: &str) -> InsightsResult<String>;

    async fn extract_tasks(&self, text: &str) -> InsightsResult<Vec<String>>;

    async fn classify_priority(&self, card: &Card) -> InsightsResult<PriorityAssessment>;
}

/// Entry point used by the request handlers.
#[derive(Clone)]
pub struct Analyzer {
    engine: Arc<dyn AnalysisEngine>,
}

impl Analyzer {
    /// Use the given engine for every request.
    pub fn with_engine(engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { engine }
    }

    /// Rule-based analyzer.
    pub fn heuristic() -> Self {
        Self::with_engine(Arc::new(HeuristicEngine))
    }

    /// Analyzer calling `provider` with `model`.
    pub fn remote(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> InsightsResult<Self> {
        Ok(Self::with_engine(Arc::new(RemoteEngine::new(provider, model)?)))
    }

    /// Build the analyzer the configuration's mode calls for.
    pub fn from_config(config: &Config) -> InsightsResult<Self> {
        match (config.engine_mode(), config.api_key.as_deref()) {
            (EngineMode::Remote, Some(key)) => {
                let provider = OpenAIProvider::new(key).with_base_url(&config.api_base_url);
                Self::remote(Arc::new(provider), &config.model)
            }
            (EngineMode::Remote, None) => Err(InsightsError::Config {
                reason: "remote mode selected without an API key".to_string(),
            }),
            (EngineMode::Heuristic, _) => Ok(Self::heuristic()),
        }
    }

    pub fn mode(&self) -> EngineMode {
        self.engine.mode()
    }

    /// `{summary}` for `text`.
    pub async fn summarize(&self, text: &str) -> InsightsResult<AnalysisResult> {
        let capability = Capability::Summarize;
        self.log_start(capability);
        let summary = self
            .engine
            .summarize(text)
            .await
            .map_err(|e| self.fail(capability, &e))?;
        Ok(AnalysisResult::summary(summary))
    }

    /// `{tasks}` found in `text`, at most ten.
    pub async fn extract_tasks(&self, text: &str) -> InsightsResult<AnalysisResult> {
        let capability = Capability::ExtractTasks;
        self.log_start(capability);
        let tasks = self
            .engine
            .extract_tasks(text)
            .await
            .map_err(|e| self.fail(capability, &e))?;
        Ok(AnalysisResult::task_list(tasks))
    }

    /// `{priority, confidence}` for `card`.
    pub async fn analyze_priority(&self, card: &Card) -> InsightsResult<AnalysisResult> {
        let capability = Capability::AnalyzePriority;
        self.log_start(capability);
        let assessment = self
            .engine
            .classify_priority(card)
            .await
            .map_err(|e| self.fail(capability, &e))?;
        Ok(AnalysisResult::priority(assessment))
    }

    /// `{analytics}` over `cards`. Always computed locally.
    pub fn generate_analytics(&self, cards: &[Card]) -> AnalysisResult {
        info!(
            capability = %Capability::GenerateAnalytics,
            cards = cards.len(),
            "Running analysis"
        );
        AnalysisResult::analytics(analytics::aggregate(cards))
    }

    /// `{insights}` for `card`: summary and priority through the engine,
    /// sentiment and tags from keywords.
    pub async fn generate_insights(&self, card: &Card) -> InsightsResult<AnalysisResult> {
        let capability = Capability::GenerateInsights;
        self.log_start(capability);

        let source = if card.description.is_empty() {
            &card.name
        } else {
            &card.description
        };
        let (summary, assessment) = tokio::try_join!(
            self.engine.summarize(source),
            self.engine.classify_priority(card),
        )
        .map_err(|e| self.fail(capability, &e))?;

        Ok(AnalysisResult::insights(CardInsights {
            summary,
            priority: assessment.priority,
            confidence: assessment.confidence,
            sentiment: heuristics::analyze_sentiment(card),
            tags: heuristics::extract_tags(card),
        }))
    }

    fn log_start(&self, capability: Capability) {
        info!(capability = %capability, mode = %self.mode(), "Running analysis");
    }

    fn fail(&self, capability: Capability, err: &InsightsError) -> InsightsError {
        error!(capability = %capability, mode = %self.mode(), error = %err, "Analysis failed");
        capability.failed(err)
    }
}
