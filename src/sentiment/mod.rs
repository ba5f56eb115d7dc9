//! Review polarity scoring and labelling.

pub mod lexicon;
pub mod scorer;

pub use lexicon::PolarityLexicon;
pub use scorer::{LexiconScorer, PolarityScorer};

use std::fmt;

/// Scores strictly above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores strictly below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Maps a polarity score to its label. Boundary values are neutral, as is NaN.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Positive" => Some(SentimentLabel::Positive),
            "Negative" => Some(SentimentLabel::Negative),
            "Neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }

    /// Negative and neutral reviews are the ones mined for pain points.
    pub fn is_pain_point_candidate(&self) -> bool {
        !matches!(self, SentimentLabel::Positive)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
