//! Rule-based analysis used when no AI provider is configured.
//!
//! Everything here is a pure, synchronous function of its input:
//! - [`summarize`]: first two sentences, or the first 200 characters
//! - [`extract_tasks`]: label/keyword/bullet patterns with a sentence fallback
//! - [`classify_priority`]: severity keywords over name and description
//! - [`analyze_sentiment`] and [`extract_tags`]: keyword tagging for insights

pub mod keywords;
pub mod summarize;
pub mod tasks;

pub use keywords::{analyze_sentiment, classify_priority, extract_tags};
pub use summarize::summarize;
pub use tasks::extract_tasks;
