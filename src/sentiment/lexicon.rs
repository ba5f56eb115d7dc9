//! Polarity word lists.
//!
//! Polarities are in [-1, 1] and lean on adjectives, the way general-purpose
//! review lexicons do. Intensifiers scale the next scored word; negations
//! flip and dampen it.

use std::collections::{HashMap, HashSet};

const POLARITY: &[(&str, f64)] = &[
    // strongly positive
    ("excellent", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("wonderful", 1.0),
    ("awesome", 1.0),
    ("outstanding", 0.5),
    ("superb", 1.0),
    ("brilliant", 0.9),
    ("great", 0.8),
    ("happy", 0.8),
    ("impressive", 1.0),
    ("good", 0.7),
    ("love", 0.5),
    ("loved", 0.7),
    ("amazing", 0.6),
    ("nice", 0.6),
    ("fantastic", 0.4),
    ("smooth", 0.4),
    ("beautiful", 0.85),
    ("satisfied", 0.5),
    ("helpful", 0.5),
    ("reliable", 0.5),
    ("convenient", 0.5),
    ("secure", 0.4),
    ("safe", 0.5),
    ("easy", 0.43),
    ("better", 0.5),
    ("fast", 0.2),
    ("quick", 0.33),
    ("friendly", 0.38),
    ("cool", 0.35),
    ("fine", 0.42),
    ("efficient", 0.3),
    ("useful", 0.3),
    ("simple", 0.0),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("wow", 0.1),
    ("interesting", 0.5),
    ("clean", 0.37),
    ("fun", 0.3),
    ("glad", 0.5),
    ("recommend", 0.3),
    ("improved", 0.3),
    ("working", 0.1),
    ("ok", 0.5),
    ("okay", 0.5),
    // negative
    ("bad", -0.7),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("horrible", -1.0),
    ("awful", -1.0),
    ("pathetic", -1.0),
    ("disgusting", -1.0),
    ("useless", -0.5),
    ("poor", -0.4),
    ("slow", -0.3),
    ("worse", -0.4),
    ("annoying", -0.8),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("confusing", -0.3),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("broken", -0.4),
    ("stupid", -0.8),
    ("boring", -1.0),
    ("wrong", -0.5),
    ("fake", -0.5),
    ("unreliable", -0.5),
    ("unable", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("crash", -0.4),
    ("crashes", -0.4),
    ("crashing", -0.4),
    ("error", -0.4),
    ("errors", -0.4),
    ("bug", -0.3),
    ("buggy", -0.5),
    ("problem", -0.3),
    ("issue", -0.2),
    ("stuck", -0.4),
    ("lag", -0.3),
    ("laggy", -0.4),
    ("waste", -0.2),
    ("scam", -0.8),
    ("hate", -0.8),
    ("angry", -0.5),
    ("sad", -0.5),
    ("sorry", -0.5),
    ("unfortunately", -0.5),
    ("late", -0.3),
    ("expensive", -0.5),
    ("nonsense", -0.5),
    ("rubbish", -0.8),
    ("ridiculous", -0.33),
    ("unacceptable", -0.8),
    ("impossible", -0.67),
    ("incorrect", -0.5),
    ("invalid", -0.5),
    ("complicated", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("super", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("totally", 1.3),
    ("absolutely", 1.5),
    ("highly", 1.4),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("completely", 1.4),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "n't", "n\u{2019}t", "cannot", "without"];

#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for PolarityLexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl PolarityLexicon {
    pub fn english() -> Self {
        Self {
            polarity: POLARITY.iter().map(|(w, p)| (w.to_string(), *p)).collect(),
            intensifiers: INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.polarity.get(word).copied()
    }

    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }
}
