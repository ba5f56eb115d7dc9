use std::fmt;

use super::tfidf::top_bigrams;
use crate::sentiment::SentimentLabel;

/// Number of phrases reported per bank.
pub const TOP_PHRASES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum PainPoints {
    Phrases(Vec<String>),
    /// No negative or neutral reviews, or none with a usable bigram.
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankPainPoints {
    pub bank: String,
    pub pain_points: PainPoints,
}

impl fmt::Display for BankPainPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pain_points {
            PainPoints::Phrases(phrases) => {
                write!(f, "{} Pain Points:", self.bank)?;
                for phrase in phrases {
                    write!(f, "\n  - {}", phrase)?;
                }
                Ok(())
            }
            PainPoints::InsufficientData => {
                write!(f, "{}: Not enough data for keyword extraction.", self.bank)
            }
        }
    }
}

/// One analyzed review as seen by the extractor.
#[derive(Debug, Clone, Copy)]
pub struct LabeledText<'a> {
    pub bank: &'a str,
    pub label: SentimentLabel,
    pub lemmatized: &'a str,
}

/// Top bigrams of each bank's negative and neutral reviews.
///
/// Banks are reported in order of first appearance, including banks with no
/// qualifying reviews.
pub fn extract_pain_points<'a, I>(rows: I, top_k: usize) -> Vec<BankPainPoints>
where
    I: IntoIterator<Item = LabeledText<'a>>,
{
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

    for row in rows {
        let idx = match groups.iter().position(|(bank, _)| *bank == row.bank) {
            Some(idx) => idx,
            None => {
                groups.push((row.bank, Vec::new()));
                groups.len() - 1
            }
        };
        if row.label.is_pain_point_candidate() {
            groups[idx].1.push(row.lemmatized);
        }
    }

    groups
        .into_iter()
        .map(|(bank, texts)| {
            let phrases: Vec<String> = top_bigrams(texts.as_slice(), top_k)
                .into_iter()
                .map(|(phrase, _)| phrase)
                .collect();
            let pain_points = if phrases.is_empty() {
                PainPoints::InsufficientData
            } else {
                PainPoints::Phrases(phrases)
            };
            BankPainPoints {
                bank: bank.to_string(),
                pain_points,
            }
        })
        .collect()
}
