//! Pattern-based extraction of actionable tasks from free text.

use regex::Regex;
use std::sync::LazyLock;

use crate::entities::MAX_TASKS;

/// Sentences taken when no pattern matches.
const FALLBACK_SENTENCES: usize = 3;

/// Task patterns, applied in order. Each captures the rest of the line.
static TASK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "TODO: ...", "To do: ...", "Task: ..."
        Regex::new(r"(?im)^[ \t]*(?:todo|to do|task):[ \t]*(.+)$").unwrap(),
        // "Need to ...", "Should ...", "Must ..."
        Regex::new(r"(?im)^[ \t]*(?:need to|should|must)[ \t]+(.+)$").unwrap(),
        // "- ...", "• ..."
        Regex::new(r"(?m)^[ \t]*[-•][ \t]*(.+)$").unwrap(),
    ]
});

/// Extract up to [`MAX_TASKS`] actionable items from `text`.
///
/// Matches are grouped by pattern (all label matches, then all keyword
/// matches, then all bullets), not by their position in the text. When
/// nothing matches, the first three non-empty sentences are used instead.
pub fn extract_tasks(text: &str) -> Vec<String> {
    let mut tasks: Vec<String> = TASK_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_segment(m.as_str()))
        .filter(|task| !task.is_empty())
        .map(str::to_string)
        .collect();

    if tasks.is_empty() {
        tasks = text
            .split('.')
            .map(clean_segment)
            .filter(|sentence| !sentence.is_empty())
            .take(FALLBACK_SENTENCES)
            .map(str::to_string)
            .collect();
    }

    tasks.truncate(MAX_TASKS);
    tasks
}

/// Strip surrounding whitespace and a leading `"- "` marker.
pub(crate) fn clean_segment(segment: &str) -> &str {
    let trimmed = segment.trim();
    trimmed.strip_prefix("- ").unwrap_or(trimmed).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_label() {
        assert_eq!(extract_tasks("TODO: buy milk"), vec!["buy milk"]);
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let text = "todo: water plants\nTO DO: call mom\ntask:   file taxes";
        assert_eq!(
            extract_tasks(text),
            vec!["water plants", "call mom", "file taxes"]
        );
    }

    #[test]
    fn test_keyword_lines() {
        let text = "Need to update the changelog\nshould review PR #12\nMust rotate keys";
        assert_eq!(
            extract_tasks(text),
            vec!["update the changelog", "review PR #12", "rotate keys"]
        );
    }

    #[test]
    fn test_bullets() {
        let text = "Sprint notes\n- write tests\n  • fix CI";
        assert_eq!(extract_tasks(text), vec!["write tests", "fix CI"]);
    }

    #[test]
    fn test_markdown_emphasis_is_not_a_bullet() {
        let text = "**Note**\n***\n- ship it";
        assert_eq!(extract_tasks(text), vec!["ship it"]);
    }

    #[test]
    fn test_matches_grouped_by_pattern_not_position() {
        let text = "- first bullet\nMust do the keyword thing\nTODO: the label";
        assert_eq!(
            extract_tasks(text),
            vec!["the label", "do the keyword thing", "first bullet"]
        );
    }

    #[test]
    fn test_leading_dash_stripped_from_capture() {
        assert_eq!(extract_tasks("Task: - prepare demo "), vec!["prepare demo"]);
    }

    #[test]
    fn test_keyword_inside_sentence_is_not_a_task() {
        let text = "We should probably meet. Nothing else.";
        // Keyword is mid-line, so the sentence fallback applies.
        assert_eq!(extract_tasks(text), vec!["We should probably meet", "Nothing else"]);
    }

    #[test]
    fn test_sentence_fallback_takes_three() {
        let text = "Plan the offsite. Book rooms.  . Send invites. Collect feedback.";
        assert_eq!(
            extract_tasks(text),
            vec!["Plan the offsite", "Book rooms", "Send invites"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_tasks("").is_empty());
        assert!(extract_tasks("   ").is_empty());
    }

    #[test]
    fn test_never_more_than_ten() {
        let text: String = (0..25).map(|i| format!("- item {i}\n")).collect();
        let tasks = extract_tasks(&text);
        assert_eq!(tasks.len(), MAX_TASKS);
        assert_eq!(tasks[9], "item 9");
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(
            extract_tasks("TODO: one\r\nTODO: two\r\n"),
            vec!["one", "two"]
        );
    }
}
