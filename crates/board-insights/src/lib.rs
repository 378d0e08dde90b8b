//! # Board Insights
//!
//! Text analysis for task boards, served over HTTP.
//!
//! This crate provides:
//! - Summaries of card text
//! - Extraction of actionable tasks from free text
//! - Per-card priority classification
//! - Productivity analytics over a set of cards
//!
//! Each text capability runs either against a remote language model (when an
//! `sk-` prefixed `AI_API_KEY` is configured) or against deterministic
//! rule-based heuristics. The choice is made once at startup.
//!
//! ## Example
//!
//! ```rust,ignore
//! use board_insights::{Analyzer, Card};
//!
//! let analyzer = Analyzer::heuristic();
//! let result = analyzer.analyze_priority(&Card::named("URGENT fix now")).await?;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Configuration and mode selection
pub mod config;

// Rule-based analysis
pub mod analytics;
pub mod heuristics;

// AI integration
pub mod ai;

// Engine selection and result shaping
pub mod engine;

// HTTP surface
pub mod server;

// Re-export key types for convenience
pub use config::{Config, EngineMode};
pub use engine::{AnalysisEngine, Analyzer, Capability, HeuristicEngine, RemoteEngine};
pub use entities::{
    AnalysisResult, AnalyticsReport, Card, CardInsights, PriorityAssessment, PriorityDistribution,
    PriorityLabel, Sentiment,
};
pub use errors::{InsightsError, InsightsResult};
pub use server::{build_router, run_server, AppState};
