//! Bigram TF-IDF over normalized review text.
//!
//! Terms are contiguous pairs of tokens, where a token is a run of two or more
//! word characters. IDF is smoothed (`ln((1 + n) / (1 + df)) + 1`) and each
//! document row is L2-normalized before weights are summed across the corpus.

use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Contiguous token pairs of `text`, in order, joined by a single space.
pub fn bigrams(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BigramTfIdf {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl BigramTfIdf {
    /// Learns the vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let docs: Vec<Vec<String>> = documents.iter().map(|d| bigrams(d.as_ref())).collect();

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in &docs {
            let unique: HashSet<&String> = doc.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut terms = Vec::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());

        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.clone(), idx);
            terms.push(term);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self {
            vocabulary,
            terms,
            idf,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Vocabulary in alphabetical order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    /// L2-normalized TF-IDF row for one document. Unknown bigrams are ignored.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.terms.len()];
        for term in bigrams(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                row[idx] += 1.0;
            }
        }
        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }
}

/// Fits on `documents` and returns up to `top_k` bigrams ranked by summed
/// TF-IDF weight, ties broken alphabetically.
///
/// Returns an empty list when no document contains a bigram.
pub fn top_bigrams<S: AsRef<str>>(documents: &[S], top_k: usize) -> Vec<(String, f64)> {
    let model = BigramTfIdf::fit(documents);
    if model.is_empty() {
        return Vec::new();
    }

    let mut totals = vec![0.0; model.terms.len()];
    for doc in documents {
        for (total, weight) in totals.iter_mut().zip(model.transform(doc.as_ref())) {
            *total += weight;
        }
    }

    let mut ranked: Vec<(String, f64)> = model.terms.iter().cloned().zip(totals).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(top_k);
    ranked
}
