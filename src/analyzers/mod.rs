//! Sentiment scoring, text normalization and pain-point extraction over the
//! cleaned review table.
//!
//! [`analyzer::analyze`] is the stage entry point; the other modules are the
//! pieces it composes and can be used on their own.

pub mod analyzer;
pub mod pain_points;
pub mod summary;
pub mod tfidf;

pub use analyzer::{AnalysisReport, ReviewAnalyzer, analyze};
pub use pain_points::{BankPainPoints, PainPoints};
pub use summary::SentimentSummary;
