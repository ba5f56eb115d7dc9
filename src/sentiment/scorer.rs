use super::lexicon::PolarityLexicon;
use crate::nlp::word_tokenize;

const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_BOOST: f64 = 1.25;
const CLAUSE_BREAKS: &[&str] = &[".", ",", ";", ":", "?"];

/// Maps free text to a polarity in [-1, 1].
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Averages the polarity of lexicon words, with modifiers applied.
///
/// - an intensifier scales the next scored word; it survives short words in
///   between ("really is a good")
/// - a negation multiplies the next scored word by -0.5; it survives
///   single-character tokens ("not a good")
/// - each `!` boosts the last scored word of its clause by 25% ("great app!");
///   a clause ends at `.`, `,`, `;`, `:` or `?`
///
/// Text with no lexicon words scores 0.0.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: PolarityLexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: PolarityLexicon) -> Self {
        Self { lexicon }
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let mut scores: Vec<f64> = Vec::new();
        let mut intensity: Option<f64> = None;
        let mut negated = false;
        let mut clause_scored = false;

        for token in word_tokenize(&text.to_lowercase()) {
            if token == "!" {
                if clause_scored {
                    if let Some(last) = scores.last_mut() {
                        *last *= EXCLAMATION_BOOST;
                    }
                }
                continue;
            }
            if CLAUSE_BREAKS.contains(&token.as_str()) {
                clause_scored = false;
            }

            if self.lexicon.is_negation(&token) {
                negated = true;
                continue;
            }

            if let Some(m) = self.lexicon.intensity(&token) {
                intensity = Some(m);
                continue;
            }

            if let Some(p) = self.lexicon.polarity(&token) {
                let mut score = p * intensity.take().unwrap_or(1.0);
                if negated {
                    score *= NEGATION_FACTOR;
                    negated = false;
                }
                scores.push(score);
                clause_scored = true;
                continue;
            }

            let len = token.trim_matches('\'').chars().count();
            if len > 1 {
                negated = false;
            }
            if len > 2 {
                intensity = None;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
