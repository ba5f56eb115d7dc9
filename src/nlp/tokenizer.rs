//! Treebank-style word tokenization.
//!
//! Words are split on Unicode word boundaries, punctuation becomes its own
//! token, and contractions are split the way the Penn Treebank does
//! (`don't` → `do` + `n't`, `it's` → `it` + `'s`).

use unicode_segmentation::UnicodeSegmentation;

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn push_with_contraction(word: &str, tokens: &mut Vec<String>) {
    let lower = word.to_lowercase();
    for suffix in ["n't", "n\u{2019}t"] {
        if lower.ends_with(suffix) && lower.len() > suffix.len() {
            let cut = word.len() - suffix.len();
            tokens.push(word[..cut].to_string());
            tokens.push(word[cut..].to_string());
            return;
        }
    }

    match word.char_indices().find(|(_, c)| is_apostrophe(*c)) {
        Some((idx, _)) if idx > 0 => {
            tokens.push(word[..idx].to_string());
            tokens.push(word[idx..].to_string());
        }
        _ => tokens.push(word.to_string()),
    }
}

/// Splits `text` into word and punctuation tokens. Whitespace is dropped.
pub fn word_tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for segment in text.split_word_bounds() {
        if segment.trim().is_empty() {
            continue;
        }
        push_with_contraction(segment, &mut tokens);
    }

    tokens
}
