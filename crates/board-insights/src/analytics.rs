//! Aggregate productivity statistics over a set of cards.
//!
//! The bucketing here is deliberately independent of
//! [`crate::heuristics::classify_priority`]: it reads only the card name and
//! uses narrower keyword sets, so a card can land in a different bucket here
//! than the per-card priority endpoint reports.

use crate::entities::{AnalyticsReport, Card, PriorityDistribution, PriorityLabel};
use crate::heuristics::keywords::contains_any;

/// High-severity keywords for name-only bucketing.
pub const HIGH_NAME_KEYWORDS: &[&str] = &["urgent", "critical", "asap", "important"];

/// Medium-severity keywords for name-only bucketing.
pub const MEDIUM_NAME_KEYWORDS: &[&str] = &["bug", "error", "issue", "fix"];

/// Weight of urgent-card density in the productivity score.
const URGENCY_WEIGHT: f64 = 20.0;

/// Bucket a card by its lower-cased name only.
pub fn classify_by_name(card: &Card) -> PriorityLabel {
    let name = card.name.to_lowercase();

    if contains_any(&name, HIGH_NAME_KEYWORDS) {
        PriorityLabel::High
    } else if contains_any(&name, MEDIUM_NAME_KEYWORDS) {
        PriorityLabel::Medium
    } else {
        PriorityLabel::Low
    }
}

/// Compute the analytics report for `cards`.
pub fn aggregate(cards: &[Card]) -> AnalyticsReport {
    let total_cards = cards.len();
    let mut completed = 0;
    let mut urgent_tasks = 0;
    let mut priority_distribution = PriorityDistribution::default();

    for card in cards {
        if card.closed {
            completed += 1;
        }
        if card.name.to_lowercase().contains("urgent") {
            urgent_tasks += 1;
        }
        priority_distribution.record(classify_by_name(card));
    }

    let completion_rate = if total_cards > 0 {
        completed as f64 / total_cards as f64 * 100.0
    } else {
        0.0
    };
    let urgency = urgent_tasks as f64 / total_cards.max(1) as f64 * URGENCY_WEIGHT;
    let productivity_score = (completion_rate + urgency).min(100.0);

    AnalyticsReport {
        total_cards,
        completed,
        in_progress: total_cards - completed,
        urgent_tasks,
        completion_rate: round2(completion_rate.clamp(0.0, 100.0)),
        priority_distribution,
        productivity_score: round2(productivity_score.clamp(0.0, 100.0)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(&[]);
        assert_eq!(report.total_cards, 0);
        assert_eq!(report.completed, 0);
        assert_eq!(report.in_progress, 0);
        assert!(approx(report.completion_rate, 0.0));
        assert!(approx(report.productivity_score, 0.0));
        assert_eq!(report.priority_distribution.total(), 0);
    }

    #[test]
    fn test_completion_counts() {
        let cards = vec![Card::default().with_closed(true), Card::default()];
        let report = aggregate(&cards);
        assert_eq!(report.completed, 1);
        assert_eq!(report.in_progress, 1);
        assert!(approx(report.completion_rate, 50.0));
    }

    #[test]
    fn test_productivity_score_formula() {
        // 1 of 3 closed, 1 of 3 urgent: 33.33.. + 6.66.. = 40.0
        let cards = vec![
            Card::named("Urgent: payroll").with_closed(true),
            Card::named("Write docs"),
            Card::named("Plan sprint"),
        ];
        let report = aggregate(&cards);
        assert_eq!(report.urgent_tasks, 1);
        assert!(approx(report.completion_rate, 33.33));
        assert!(approx(report.productivity_score, 40.0));
    }

    #[test]
    fn test_productivity_score_capped() {
        let cards: Vec<Card> = (0..4)
            .map(|i| Card::named(format!("urgent item {i}")).with_closed(true))
            .collect();
        let report = aggregate(&cards);
        assert!(approx(report.completion_rate, 100.0));
        assert!(approx(report.productivity_score, 100.0));
    }

    #[test]
    fn test_distribution_sums_to_total() {
        let cards = vec![
            Card::named("CRITICAL outage"),
            Card::named("Fix typo"),
            Card::named("Refactor module"),
            Card::named("asap invoice"),
            Card::default(),
        ];
        let report = aggregate(&cards);
        assert_eq!(report.priority_distribution.total(), report.total_cards);
        assert_eq!(report.priority_distribution.high, 2);
        assert_eq!(report.priority_distribution.medium, 1);
        assert_eq!(report.priority_distribution.low, 2);
    }

    #[test]
    fn test_name_only_bucketing_ignores_description() {
        let card = Card::named("Checkout page").with_description("urgent bug");
        assert_eq!(classify_by_name(&card), PriorityLabel::Low);
    }

    #[test]
    fn test_name_bucketing_uses_narrower_sets() {
        // "blocker" and "problem" only count for the per-card classifier.
        assert_eq!(classify_by_name(&Card::named("Release blocker")), PriorityLabel::Low);
        assert_eq!(classify_by_name(&Card::named("Printer problem")), PriorityLabel::Low);
    }

    #[test]
    fn test_urgent_count_is_case_insensitive() {
        let cards = vec![Card::named("URGENT"), Card::named("not urgent-ish"), Card::named("calm")];
        assert_eq!(aggregate(&cards).urgent_tasks, 2);
    }
}
