//! Sentence-based summarization.

/// Number of characters kept when the text has no more than two sentences.
pub const SUMMARY_CHAR_LIMIT: usize = 200;

/// Summarize `text` without any language model.
///
/// The text is split on `.`. With more than two segments the first two are
/// re-joined with `". "` and a closing period is added. Otherwise the text is
/// cut at [`SUMMARY_CHAR_LIMIT`] characters, with `...` appended only when
/// something was actually cut.
pub fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = text.split('.').collect();
    if sentences.len() > 2 {
        return format!("{}.", sentences[..2].join(". "));
    }

    let mut summary: String = text.chars().take(SUMMARY_CHAR_LIMIT).collect();
    if text.chars().nth(SUMMARY_CHAR_LIMIT).is_some() {
        summary.push_str("...");
    }
    summary
}
