//! Rule-based engine.

use async_trait::async_trait;

use crate::config::EngineMode;
use crate::entities::{Card, PriorityAssessment};
use crate::errors::InsightsResult;
use crate::heuristics;

use super::AnalysisEngine;

/// Fixed confidence reported for rule-based priorities.
pub const HEURISTIC_CONFIDENCE: f64 = 0.7;

/// Engine backed by [`crate::heuristics`]. Never fails and never suspends.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEngine;

#[async_trait]
impl AnalysisEngine for HeuristicEngine {
    fn mode(&self) -> EngineMode {
        EngineMode::Heuristic
    }

    async fn summarize(&self, text: &str) -> InsightsResult<String> {
        Ok(heuristics::summarize(text))
    }

    async fn extract_tasks(&self, text: &str) -> InsightsResult<Vec<String>> {
        Ok(heuristics::extract_tasks(text))
    }

    async fn classify_priority(&self, card: &Card) -> InsightsResult<PriorityAssessment> {
        Ok(PriorityAssessment::new(
            heuristics::classify_priority(card),
            HEURISTIC_CONFIDENCE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PriorityLabel;

    #[tokio::test]
    async fn test_priority_confidence() {
        let assessment = HeuristicEngine
            .classify_priority(&Card::named("critical outage"))
            .await
            .unwrap();
        assert_eq!(assessment.priority, PriorityLabel::High);
        assert!((assessment.confidence - HEURISTIC_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_delegates_to_heuristics() {
        assert_eq!(
            HeuristicEngine.extract_tasks("TODO: buy milk").await.unwrap(),
            vec!["buy milk"]
        );
        assert_eq!(HeuristicEngine.summarize("").await.unwrap(), "");
    }
}
