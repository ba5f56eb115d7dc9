use super::{Lemmatizer, StopWords, word_tokenize};

/// Turns a review into a space-joined string of lemmas with stop words and
/// punctuation removed.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stop_words: StopWords,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    pub fn new(stop_words: StopWords, lemmatizer: Lemmatizer) -> Self {
        Self {
            stop_words,
            lemmatizer,
        }
    }

    /// English stop words plus the given domain words.
    pub fn with_domain_stop_words<I, S>(domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(StopWords::english().with_extra(domain), Lemmatizer::new())
    }

    fn keep(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().all(char::is_alphanumeric)
            && !self.stop_words.contains(token)
    }

    /// Lemmas are filtered again, so `banks` is dropped like `bank` is.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        word_tokenize(&text.to_lowercase())
            .into_iter()
            .filter(|t| self.keep(t))
            .map(|t| self.lemmatizer.lemmatize(&t))
            .filter(|lemma| self.keep(lemma))
            .collect()
    }

    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}
