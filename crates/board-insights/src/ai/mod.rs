//! AI integration for card analysis.
//!
//! This module provides:
//! - AI provider abstraction ([`AIProvider`])
//! - OpenAI chat-completions provider
//! - Fixed prompts and decoding parameters per capability

pub mod openai;
pub mod prompts;
pub mod provider;

// Re-exports
pub use openai::OpenAIProvider;
pub use prompts::{PromptManager, PromptSpec};
pub use provider::{AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, TokenUsage};
