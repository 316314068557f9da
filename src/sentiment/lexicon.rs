//! Weighted word tables for the review-domain polarity lexicon.

use std::collections::HashMap;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    // strong praise
    ("excellent", 0.9),
    ("amazing", 0.85),
    ("fantastic", 0.85),
    ("perfect", 0.9),
    ("wonderful", 0.8),
    ("awesome", 0.8),
    ("incredible", 0.8),
    ("love", 0.75),
    ("loved", 0.75),
    ("best", 0.8),
    ("great", 0.7),
    ("brilliant", 0.75),
    ("outstanding", 0.85),
    ("superb", 0.85),
    ("flawless", 0.85),
    // ordinary satisfaction
    ("good", 0.5),
    ("nice", 0.45),
    ("happy", 0.55),
    ("satisfied", 0.55),
    ("pleased", 0.5),
    ("smooth", 0.45),
    ("easy", 0.4),
    ("fast", 0.45),
    ("quick", 0.4),
    ("reliable", 0.5),
    ("helpful", 0.5),
    ("friendly", 0.45),
    ("convenient", 0.45),
    ("recommend", 0.6),
    ("recommended", 0.6),
    ("works", 0.3),
    ("useful", 0.4),
    ("quality", 0.35),
    ("cheap", 0.3),
    ("bargain", 0.5),
    ("deal", 0.3),
    ("deals", 0.3),
    ("thanks", 0.4),
    ("thank", 0.4),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    // strong complaints
    ("terrible", -0.85),
    ("horrible", -0.85),
    ("awful", -0.8),
    ("worst", -0.9),
    ("disgusting", -0.8),
    ("scam", -0.9),
    ("fraud", -0.9),
    ("unusable", -0.8),
    ("useless", -0.75),
    ("hate", -0.75),
    ("garbage", -0.8),
    ("nightmare", -0.8),
    // ordinary complaints
    ("bad", -0.5),
    ("poor", -0.5),
    ("slow", -0.45),
    ("broken", -0.6),
    ("crash", -0.6),
    ("crashes", -0.6),
    ("crashed", -0.6),
    ("bug", -0.5),
    ("bugs", -0.5),
    ("buggy", -0.6),
    ("error", -0.45),
    ("errors", -0.45),
    ("problem", -0.45),
    ("problems", -0.45),
    ("issue", -0.4),
    ("issues", -0.4),
    ("disappointed", -0.6),
    ("disappointing", -0.6),
    ("annoying", -0.5),
    ("frustrating", -0.6),
    ("confusing", -0.45),
    ("expensive", -0.35),
    ("overpriced", -0.5),
    ("late", -0.4),
    ("delayed", -0.45),
    ("delay", -0.4),
    ("missing", -0.5),
    ("wrong", -0.45),
    ("refund", -0.4),
    ("cancelled", -0.4),
    ("unreliable", -0.6),
    ("waste", -0.6),
    ("fail", -0.55),
    ("fails", -0.55),
    ("failed", -0.55),
    ("stuck", -0.45),
];

/// Intensity modifiers applied to the next lexicon word.
const MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.4),
    ("really", 1.3),
    ("extremely", 1.7),
    ("absolutely", 1.6),
    ("totally", 1.4),
    ("so", 1.2),
    ("too", 1.2),
    ("quite", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "dont", "cant", "wont", "didnt", "doesnt", "isnt", "wasnt"];

/// Review-domain sentiment lexicon with O(1) word lookup.
#[derive(Debug, Clone)]
pub struct Lexicon {
    scores: HashMap<&'static str, f64>,
    modifiers: HashMap<&'static str, f64>,
}

impl Lexicon {
    pub fn new() -> Self {
        let mut scores = HashMap::new();
        scores.extend(POSITIVE_WORDS.iter().copied());
        scores.extend(NEGATIVE_WORDS.iter().copied());
        Self {
            scores,
            modifiers: MODIFIERS.iter().copied().collect(),
        }
    }

    pub fn score(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    pub fn modifier(&self, word: &str) -> Option<f64> {
        self.modifiers.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        NEGATIONS.contains(&word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}
