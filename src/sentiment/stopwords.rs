//! Stopword filtering for the top-word tables.
//!
//! Combines a standard English stopword list with configurable domain terms
//! (app/brand/platform names and similar review boilerplate).

use std::collections::HashSet;

/// Standard English stopwords (NLTK-style list).
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
    "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of",
    "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "s", "t", "can", "will", "just", "don", "dont", "should", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn", "im",
    "ive", "cant", "would", "could", "also", "one", "two", "even", "still",
    "much", "many", "like", "really", "every", "always",
];

/// Extra terms filtered by default on top of the language list.
pub const DEFAULT_DOMAIN_TERMS: &[&str] = &["app", "use", "get"];

#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// English stopwords plus the given domain terms (brand names,
    /// platform names, review boilerplate).
    pub fn english_with(domain_terms: &[String]) -> Self {
        let mut words: HashSet<String> = ENGLISH_STOP_WORDS
            .iter()
            .map(|w| w.to_string())
            .collect();
        words.extend(DEFAULT_DOMAIN_TERMS.iter().map(|w| w.to_string()));
        words.extend(domain_terms.iter().map(|w| w.to_lowercase()));
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Sorted copy for embedding in the report payload.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort();
        words
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english_with(&[])
    }
}
