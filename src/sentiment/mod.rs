//! Lexicon-based sentiment classification.
//!
//! Maps free review text to a polarity in [-1, 1]. Scores are the average of
//! matched lexicon words after applying intensity modifiers and a short
//! negation window, clamped to the polarity range. Classification is pure
//! and synchronous per record.

mod lexicon;
pub mod stopwords;

pub use lexicon::Lexicon;
pub use stopwords::Stopwords;

/// Negated sentiment words invert with slight damping.
const NEGATION_DAMPING: f64 = 0.8;
/// Words scanned after a negation before it stops applying.
const NEGATION_WINDOW: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    lexicon: Lexicon,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::new(),
        }
    }

    /// Polarity of `text`, or None when the text is empty or whitespace.
    /// Text with no lexicon hits scores 0.0 (neutral).
    pub fn polarity(&self, text: &str) -> Option<f64> {
        if text.trim().is_empty() {
            return None;
        }

        let tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.chars().filter(|c| c.is_ascii_alphabetic()).collect())
            .filter(|t: &String| !t.is_empty())
            .collect();

        let mut total = 0.0;
        let mut hits = 0usize;
        let mut modifier = 1.0;
        let mut negated = false;
        let mut since_negation = 0usize;

        for token in &tokens {
            if self.lexicon.is_negation(token) {
                negated = true;
                since_negation = 0;
                continue;
            }

            if let Some(m) = self.lexicon.modifier(token) {
                modifier = m;
                continue;
            }

            if let Some(base) = self.lexicon.score(token) {
                let mut score = base * modifier;
                if negated && since_negation < NEGATION_WINDOW {
                    score = -score * NEGATION_DAMPING;
                }
                total += score;
                hits += 1;
                modifier = 1.0;
            }

            if negated {
                since_negation += 1;
                if since_negation >= NEGATION_WINDOW {
                    negated = false;
                }
            }
        }

        if hits == 0 {
            return Some(0.0);
        }
        Some((total / hits as f64).clamp(-1.0, 1.0))
    }
}
