//! Sentiment polarity scoring.
//!
//! The pipeline treats the scorer as an injected capability so its correctness
//! does not depend on one particular model: anything that maps text to a
//! polarity in [-1.0, 1.0] satisfies the contract. [`LexiconScorer`] is the
//! default, a weighted word lexicon with intensifier and negation handling.

use std::collections::{HashMap, HashSet};

/// A polarity scorer: maps text to a signed score in [-1.0, 1.0].
///
/// Positive means favorable, negative unfavorable, zero neutral. Empty input
/// must score exactly 0.0.
pub trait SentimentScorer {
    /// Score a single review text
    fn score(&self, text: &str) -> f64;
}

/// Default lexicon-based scorer.
///
/// Looks up lowercased tokens in a weighted sentiment lexicon, scales by a
/// preceding intensifier, flips (and dampens) when a negation appears within
/// the two preceding tokens, then normalizes by the number of sentiment
/// words found and clamps into [-1.0, 1.0].
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Build the scorer with its built-in review vocabulary
    #[must_use]
    pub fn new() -> Self {
        let lexicon: HashMap<&'static str, f64> = [
            // Favorable
            ("good", 1.0),
            ("great", 1.5),
            ("excellent", 2.0),
            ("amazing", 2.0),
            ("wonderful", 1.8),
            ("fantastic", 1.8),
            ("love", 2.0),
            ("loved", 2.0),
            ("like", 1.0),
            ("liked", 1.0),
            ("best", 1.5),
            ("better", 1.2),
            ("awesome", 1.8),
            ("perfect", 2.0),
            ("outstanding", 1.8),
            ("superb", 1.8),
            ("delightful", 1.5),
            ("pleased", 1.2),
            ("satisfied", 1.0),
            ("happy", 1.2),
            ("recommend", 1.5),
            ("recommended", 1.5),
            ("friendly", 1.2),
            ("helpful", 1.2),
            ("fast", 1.0),
            ("fresh", 1.0),
            ("tasty", 1.5),
            ("delicious", 1.8),
            ("comfortable", 1.2),
            ("reliable", 1.2),
            ("quality", 1.0),
            // Unfavorable
            ("bad", -1.0),
            ("terrible", -2.0),
            ("awful", -2.0),
            ("horrible", -2.0),
            ("worst", -2.0),
            ("hate", -2.0),
            ("hated", -2.0),
            ("dislike", -1.0),
            ("poor", -1.2),
            ("disappointing", -1.5),
            ("disappointed", -1.5),
            ("sad", -1.2),
            ("angry", -1.5),
            ("upset", -1.2),
            ("frustrating", -1.5),
            ("frustrated", -1.5),
            ("annoying", -1.2),
            ("disgusting", -1.8),
            ("useless", -1.5),
            ("worthless", -1.8),
            ("broken", -1.5),
            ("slow", -1.0),
            ("rude", -1.5),
            ("dirty", -1.5),
            ("overpriced", -1.2),
            ("stale", -1.2),
            ("defective", -1.8),
            ("refund", -1.0),
            ("waste", -1.5),
            ("mediocre", -0.8),
        ]
        .into_iter()
        .collect();

        let intensifiers: HashMap<&'static str, f64> = [
            ("very", 1.5),
            ("extremely", 2.0),
            ("incredibly", 2.0),
            ("absolutely", 2.0),
            ("completely", 1.8),
            ("totally", 1.8),
            ("really", 1.3),
            ("so", 1.2),
            ("quite", 1.2),
            ("rather", 1.1),
            ("somewhat", 0.8),
            ("slightly", 0.7),
            ("barely", 0.5),
            ("hardly", 0.5),
        ]
        .into_iter()
        .collect();

        let negations: HashSet<&'static str> = [
            "not", "no", "never", "none", "nothing", "nobody", "nowhere", "neither", "nor",
        ]
        .into_iter()
        .collect();

        Self {
            lexicon,
            intensifiers,
            negations,
        }
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .collect();

        let mut total = 0.0;
        let mut hits = 0.0;

        for (i, word) in words.iter().enumerate() {
            let Some(weight) = self.lexicon.get(word.as_str()) else {
                continue;
            };
            let mut sentiment = *weight;

            // Intensifier immediately before the sentiment word
            if i > 0 {
                if let Some(intensity) = self.intensifiers.get(words[i - 1].as_str()) {
                    sentiment *= intensity;
                }
            }

            // Negation within the two preceding words flips and dampens
            let negated = (i >= 1 && self.is_negation(&words[i - 1]))
                || (i >= 2 && self.is_negation(&words[i - 2]));
            if negated {
                sentiment = -sentiment * 0.8;
            }

            total += sentiment;
            hits += 1.0;
        }

        if hits == 0.0 {
            0.0
        } else {
            (total / hits).clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text_scores_positive() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("Great service and excellent food, loved it");
        assert!(score > 0.0);
    }

    #[test]
    fn test_negative_text_scores_negative() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("Terrible experience, the staff was rude");
        assert!(score < 0.0);
    }

    #[test]
    fn test_neutral_text_scores_zero() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("The package arrived on a Tuesday");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   "), 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("good product");
        let negated = scorer.score("not good product");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_intensifier_strengthens_score() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("a good product overall but slow shipping");
        let intense = scorer.score("a very good product overall but slow shipping");
        assert!(intense > plain);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = LexiconScorer::new();
        let extreme = scorer.score("absolutely amazing perfect excellent love love love");
        assert!(extreme <= 1.0);
        let awful = scorer.score("absolutely horrible worst terrible hate hate hate");
        assert!(awful >= -1.0);
    }
}
