//! Review text normalization.
//!
//! The pipeline is lowercase → tokenize → stop-word filter → lemmatize. It is
//! pure: a [`TextNormalizer`] only reads its word lists.

pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
pub use stopwords::StopWords;
pub use tokenizer::word_tokenize;
