//! Review Lens - Review Dataset Analysis
//!
//! A Rust library for loading, analyzing, and annotating CSV review datasets.
//!
//! # Features
//!
//! - Load delimited review data with column type inference
//! - Average rating with missing-value-aware semantics
//! - Sentiment polarity annotation via a pluggable scorer
//! - Keyword frequency extraction per sentiment bucket
//! - Size-reduction and review-similarity reporting
//! - Write the annotated table back to CSV

/// The analysis pipeline functions
pub mod analysis;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Data models and structures
pub mod models;
/// Sentiment polarity scoring
pub mod sentiment;
/// Session orchestration: load, analyze, save
pub mod session;
/// CSV loading and writing
pub mod table;

// Re-export key components for easier access
pub use error::{ReviewLensError, Result};
pub use models::{AnalysisReport, KeywordCount, LoadMetadata, ReviewTable, Value};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use session::ReviewSession;
