//! Keyword-driven classification of individual cards.

use crate::entities::{Card, PriorityLabel, Sentiment};

/// Keywords that make a card high priority.
pub const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "urgent",
    "critical",
    "asap",
    "important",
    "emergency",
    "blocker",
];

/// Keywords that make a card medium priority.
pub const MEDIUM_PRIORITY_KEYWORDS: &[&str] = &["bug", "error", "issue", "fix", "problem"];

const URGENT_SENTIMENT: &[&str] = &["urgent", "critical", "asap", "important"];
const NEGATIVE_SENTIMENT: &[&str] = &["bug", "error", "issue", "problem", "fix"];
const POSITIVE_SENTIMENT: &[&str] = &["feature", "improve", "enhance", "add"];

/// Tag rules, in output order.
const TAG_RULES: &[(&str, &[&str])] = &[
    ("bug", &["bug", "error", "issue"]),
    ("feature", &["feature", "enhancement"]),
    ("urgent", &["urgent", "critical", "asap"]),
    ("design", &["design", "ui", "ux"]),
    ("backend", &["backend", "api", "server"]),
    ("frontend", &["frontend", "client"]),
];

pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Classify a card by keywords in its name and description.
///
/// High-severity keywords are checked first, so a card mentioning both
/// "urgent" and "bug" is `High`. Matching is by substring.
pub fn classify_priority(card: &Card) -> PriorityLabel {
    let text = card.search_text();

    if contains_any(&text, HIGH_PRIORITY_KEYWORDS) {
        PriorityLabel::High
    } else if contains_any(&text, MEDIUM_PRIORITY_KEYWORDS) {
        PriorityLabel::Medium
    } else {
        PriorityLabel::Low
    }
}

/// Classify the tone of a card's wording.
pub fn analyze_sentiment(card: &Card) -> Sentiment {
    let text = card.search_text();

    if contains_any(&text, URGENT_SENTIMENT) {
        Sentiment::Urgent
    } else if contains_any(&text, NEGATIVE_SENTIMENT) {
        Sentiment::Negative
    } else if contains_any(&text, POSITIVE_SENTIMENT) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// Topic tags for a card, each at most once, in a fixed order.
pub fn extract_tags(card: &Card) -> Vec<String> {
    let text = card.search_text();

    TAG_RULES
        .iter()
        .filter(|(_, keywords)| contains_any(&text, keywords))
        .map(|(tag, _)| (*tag).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_takes_precedence_over_medium() {
        assert_eq!(
            classify_priority(&Card::named("URGENT fix now")),
            PriorityLabel::High
        );
    }

    #[test]
    fn test_medium_priority() {
        assert_eq!(classify_priority(&Card::named("minor bug")), PriorityLabel::Medium);
    }

    #[test]
    fn test_low_priority() {
        assert_eq!(classify_priority(&Card::named("update docs")), PriorityLabel::Low);
    }

    #[test]
    fn test_description_is_considered() {
        let card = Card::named("Checkout page").with_description("Customer reported a blocker");
        assert_eq!(classify_priority(&card), PriorityLabel::High);

        let card = Card::named("Checkout page").with_description("Small layout problem");
        assert_eq!(classify_priority(&card), PriorityLabel::Medium);
    }

    #[test]
    fn test_substring_matching() {
        // "prefix" contains "fix"
        assert_eq!(classify_priority(&Card::named("prefix routes")), PriorityLabel::Medium);
    }

    #[test]
    fn test_empty_card_is_low() {
        assert_eq!(classify_priority(&Card::default()), PriorityLabel::Low);
    }

    #[test]
    fn test_sentiment() {
        let cases = vec![
            ("ASAP: renew certificate", Sentiment::Urgent),
            ("Error on signup", Sentiment::Negative),
            ("Improve onboarding", Sentiment::Positive),
            ("Weekly sync", Sentiment::Neutral),
        ];

        for (name, expected) in cases {
            assert_eq!(analyze_sentiment(&Card::named(name)), expected, "Failed for: {name}");
        }
    }

    #[test]
    fn test_tags_in_rule_order() {
        let card = Card::named("Critical API bug").with_description("Server returns 500");
        assert_eq!(extract_tags(&card), vec!["bug", "urgent", "backend"]);
    }

    #[test]
    fn test_tags_empty_when_nothing_matches() {
        assert!(extract_tags(&Card::named("Weekly sync")).is_empty());
    }
}
