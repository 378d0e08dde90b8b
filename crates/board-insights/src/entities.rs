//! Core entities consumed and produced by the analysis engines.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Maximum number of entries in a task list.
pub const MAX_TASKS: usize = 10;

/// A task-board item.
///
/// Only the attributes the engines read are typed; everything else a board
/// sends along is kept in `extra` and ignored. Decoding never rejects a card
/// for the shape of its values: missing or `null` values fall back to empty
/// strings and `false`, other non-string text fields are kept as their JSON
/// text, and `closed` follows JSON truthiness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCard")]
pub struct Card {
    /// Card title
    pub name: String,
    /// Card body (Trello sends this as `desc`)
    pub description: String,
    /// Due date, passed through to the remote prompt untouched
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Value>,
    /// Whether the card is archived/completed
    pub closed: bool,
    /// Attributes the engines do not use
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Card as it arrives on the wire, before normalization.
#[derive(Deserialize)]
struct RawCard {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    desc: Option<Value>,
    #[serde(default, rename = "dueDate")]
    due_date: Option<Value>,
    #[serde(default)]
    due: Option<Value>,
    #[serde(default)]
    closed: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawCard> for Card {
    fn from(raw: RawCard) -> Self {
        Self {
            name: raw.name.map(value_text).unwrap_or_default(),
            description: raw
                .description
                .or(raw.desc)
                .map(value_text)
                .unwrap_or_default(),
            due_date: raw.due_date.or(raw.due),
            closed: raw.closed.is_some_and(|v| is_truthy(&v)),
            extra: raw.extra,
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

impl Card {
    /// Create a card with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the closed flag.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Lower-cased `name` and `description` joined by a space.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }

    /// Due date rendered as plain text, if any.
    pub fn due_date_text(&self) -> Option<String> {
        match self.due_date.as_ref()? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Priority of a card. Ordered by severity: `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLabel {
    Low,
    Medium,
    High,
}

impl PriorityLabel {
    /// Parse an exact lower-case label.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priority label with the confidence of the engine that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityAssessment {
    pub priority: PriorityLabel,
    /// Always within `[0, 1]`
    pub confidence: f64,
}

impl PriorityAssessment {
    pub fn new(priority: PriorityLabel, confidence: f64) -> Self {
        Self {
            priority,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Card counts per priority bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityDistribution {
    /// Count one card in the bucket for `label`.
    pub fn record(&mut self, label: PriorityLabel) {
        match label {
            PriorityLabel::High => self.high += 1,
            PriorityLabel::Medium => self.medium += 1,
            PriorityLabel::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Aggregate statistics over a set of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_cards: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub urgent_tasks: usize,
    /// Percentage in `[0, 100]`, two decimals
    pub completion_rate: f64,
    pub priority_distribution: PriorityDistribution,
    /// Percentage in `[0, 100]`, two decimals
    pub productivity_score: f64,
}

/// Tone of a card, derived from its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Urgent,
    Negative,
    Positive,
    Neutral,
}

/// Combined per-card analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInsights {
    pub summary: String,
    pub priority: PriorityLabel,
    pub confidence: f64,
    pub sentiment: Sentiment,
    pub tags: Vec<String>,
}

/// The response shapes a capability may produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Summary {
        summary: String,
    },
    TaskList {
        tasks: Vec<String>,
    },
    PriorityAssessment {
        priority: PriorityLabel,
        confidence: f64,
    },
    AnalyticsReport {
        analytics: AnalyticsReport,
    },
    Insights {
        insights: CardInsights,
    },
}

impl AnalysisResult {
    pub fn summary(summary: impl Into<String>) -> Self {
        Self::Summary {
            summary: summary.into(),
        }
    }

    /// Build a task list, keeping at most [`MAX_TASKS`] entries.
    pub fn task_list(mut tasks: Vec<String>) -> Self {
        tasks.truncate(MAX_TASKS);
        Self::TaskList { tasks }
    }

    pub fn priority(assessment: PriorityAssessment) -> Self {
        Self::PriorityAssessment {
            priority: assessment.priority,
            confidence: assessment.confidence,
        }
    }

    pub fn analytics(analytics: AnalyticsReport) -> Self {
        Self::AnalyticsReport { analytics }
    }

    pub fn insights(insights: CardInsights) -> Self {
        Self::Insights { insights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_defaults_for_missing_fields() {
        let card: Card = serde_json::from_value(json!({})).unwrap();
        assert_eq!(card.name, "");
        assert_eq!(card.description, "");
        assert!(card.due_date.is_none());
        assert!(!card.closed);
    }

    #[test]
    fn test_card_null_fields_are_defaults() {
        let card: Card =
            serde_json::from_value(json!({"name": null, "description": null, "closed": null}))
                .unwrap();
        assert_eq!(card.name, "");
        assert_eq!(card.description, "");
        assert!(!card.closed);
    }

    #[test]
    fn test_card_trello_aliases() {
        let card: Card = serde_json::from_value(json!({
            "name": "Ship release",
            "desc": "Tag and publish",
            "due": "2024-06-01T12:00:00.000Z",
            "idList": "abc123"
        }))
        .unwrap();
        assert_eq!(card.description, "Tag and publish");
        assert_eq!(
            card.due_date_text().as_deref(),
            Some("2024-06-01T12:00:00.000Z")
        );
        assert_eq!(card.extra.get("idList"), Some(&json!("abc123")));
    }

    #[test]
    fn test_card_description_preferred_over_desc() {
        let card: Card = serde_json::from_value(json!({
            "name": "x",
            "desc": "a",
            "description": "b"
        }))
        .unwrap();
        assert_eq!(card.description, "b");
        assert!(!card.extra.contains_key("desc"));

        let card: Card =
            serde_json::from_value(json!({"description": null, "desc": "fallback"})).unwrap();
        assert_eq!(card.description, "fallback");
    }

    #[test]
    fn test_card_loose_value_types() {
        let card: Card = serde_json::from_value(json!({
            "name": 123,
            "description": ["a", "b"],
            "closed": 1
        }))
        .unwrap();
        assert_eq!(card.name, "123");
        assert_eq!(card.description, r#"["a","b"]"#);
        assert!(card.closed);

        let cases = vec![
            (json!(0), false),
            (json!(0.5), true),
            (json!(""), false),
            (json!("no"), true),
            (json!([]), false),
            (json!({"at": "2024"}), true),
        ];
        for (closed, expected) in cases {
            let card: Card = serde_json::from_value(json!({ "closed": closed })).unwrap();
            assert_eq!(card.closed, expected, "Failed for: {closed}");
        }
    }

    #[test]
    fn test_card_search_text() {
        let card = Card::named("URGENT Fix").with_description("Login Page");
        assert_eq!(card.search_text(), "urgent fix login page");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(PriorityLabel::High > PriorityLabel::Medium);
        assert!(PriorityLabel::Medium > PriorityLabel::Low);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(PriorityLabel::parse("high"), Some(PriorityLabel::High));
        assert_eq!(PriorityLabel::parse("low"), Some(PriorityLabel::Low));
        assert_eq!(PriorityLabel::parse("High"), None);
        assert_eq!(PriorityLabel::parse("urgent"), None);
    }

    #[test]
    fn test_confidence_clamped() {
        assert!((PriorityAssessment::new(PriorityLabel::Low, 1.7).confidence - 1.0).abs() < f64::EPSILON);
        assert!(PriorityAssessment::new(PriorityLabel::Low, -0.2).confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_task_list_truncated() {
        let tasks = (0..15).map(|i| format!("task {i}")).collect();
        let AnalysisResult::TaskList { tasks } = AnalysisResult::task_list(tasks) else {
            panic!("expected task list");
        };
        assert_eq!(tasks.len(), MAX_TASKS);
        assert_eq!(tasks[0], "task 0");
    }

    #[test]
    fn test_result_serialization_shapes() {
        let value = serde_json::to_value(AnalysisResult::priority(PriorityAssessment::new(
            PriorityLabel::Medium,
            0.7,
        )))
        .unwrap();
        assert_eq!(value, json!({"priority": "medium", "confidence": 0.7}));

        let value = serde_json::to_value(AnalysisResult::summary("short")).unwrap();
        assert_eq!(value, json!({"summary": "short"}));
    }
}
