//! Rule-based valence scorer.
//!
//! Each known word carries a valence on a `[-4, 4]` scale. Valences are
//! adjusted by nearby booster words, preceding negations, ALL-CAPS
//! emphasis and a contrastive "but", then summed. The sum is squashed
//! into `[-1, 1]` with `s / sqrt(s² + 15)` to give the compound score,
//! and the positive, negative and neutral shares of the text make up the
//! other three axes.

use super::{SentimentScore, SentimentScorer};
use std::collections::{HashMap, HashSet};

/// Valence added or removed by a booster word.
const BOOSTER_STEP: f64 = 0.293;
/// Valence added for an ALL-CAPS word in mixed-case text.
const CAPS_STEP: f64 = 0.733;
/// Multiplier applied to a valence following a negation.
const NEGATION_SCALAR: f64 = -0.74;
/// Emphasis added per exclamation mark, counted up to four.
const EXCLAMATION_STEP: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Normalisation constant for the compound score.
const ALPHA: f64 = 15.0;
/// How far back boosters and negations reach, with their decay.
const LOOKBACK_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("attentive", 1.6),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("cheerful", 2.5),
    ("clean", 1.7),
    ("comfortable", 1.5),
    ("cool", 1.3),
    ("delicious", 2.7),
    ("easy", 1.9),
    ("efficient", 1.7),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressive", 2.3),
    ("kind", 2.4),
    ("like", 1.5),
    ("love", 3.2),
    ("loved", 2.9),
    ("nice", 1.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("polite", 1.5),
    ("professional", 1.3),
    ("quick", 1.0),
    ("recommend", 1.5),
    ("reliable", 1.3),
    ("satisfied", 1.8),
    ("super", 2.9),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("welcoming", 1.7),
    ("wonderful", 2.7),
    ("worth", 0.9),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("angry", -2.3),
    ("annoying", -1.5),
    ("avoid", -1.2),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -1.5),
    ("dirty", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("expensive", -0.8),
    ("fail", -2.3),
    ("failed", -2.3),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("ignored", -1.3),
    ("lousy", -2.5),
    ("mediocre", -0.3),
    ("nasty", -2.6),
    ("noisy", -0.7),
    ("overpriced", -1.3),
    ("pathetic", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scam", -2.9),
    ("slow", -0.5),
    ("terrible", -2.1),
    ("unacceptable", -2.0),
    ("unfriendly", -1.5),
    ("unhelpful", -1.8),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nobody", "nothing", "nowhere", "none", "cannot",
    "cant", "dont", "doesnt", "didnt", "wont", "wouldnt", "shouldnt", "couldnt", "isnt", "arent",
    "wasnt", "werent", "aint", "without",
];

const INCREMENTS: &[&str] = &[
    "absolutely", "amazingly", "completely", "especially", "extremely", "highly", "incredibly",
    "most", "quite", "really", "so", "totally", "truly", "very",
];

const DECREMENTS: &[&str] = &[
    "barely", "hardly", "kinda", "marginally", "occasionally", "partly", "scarcely", "slightly",
    "somewhat",
];

/// Built-in text scorer used when no other scorer is configured.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    boosters: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

struct Token {
    word: String,
    shouting: bool,
}

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|(w, v)| (w.to_string(), *v))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        let boosters = INCREMENTS
            .iter()
            .map(|w| (w.to_string(), BOOSTER_STEP))
            .chain(DECREMENTS.iter().map(|w| (w.to_string(), -BOOSTER_STEP)))
            .collect();
        Self {
            words,
            negations,
            boosters,
        }
    }

    /// Add or override a lexicon entry.
    #[must_use]
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.words.insert(word.to_lowercase(), valence);
        self
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    /// Score `text` on all four axes.
    #[must_use]
    pub fn polarity_scores(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScore::default();
        }
        let mixed_case = tokens.iter().any(|t| t.shouting) && !tokens.iter().all(|t| t.shouting);

        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.token_valence(&tokens, i, token, mixed_case))
            .collect();

        if let Some(pivot) = tokens.iter().position(|t| t.word == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        let emphasis = exclamations as f64 * EXCLAMATION_STEP;

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neutral_count = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neutral_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neutral_count;
        if total == 0.0 {
            return SentimentScore::default();
        }

        SentimentScore {
            negative: round_to(neg_sum.abs() / total, 3),
            neutral: round_to(neutral_count / total, 3),
            positive: round_to(pos_sum / total, 3),
            compound: round_to(compound, 4),
        }
    }

    fn token_valence(
        &self,
        tokens: &[Token],
        index: usize,
        token: &Token,
        mixed_case: bool,
    ) -> f64 {
        let Some(&base) = self.words.get(&token.word) else {
            return 0.0;
        };
        let mut valence = base;
        if token.shouting && mixed_case {
            valence += CAPS_STEP.copysign(valence);
        }

        let mut negated = false;
        for (distance, decay) in LOOKBACK_DECAY.iter().enumerate() {
            let Some(prev_index) = index.checked_sub(distance + 1) else {
                break;
            };
            let prev = &tokens[prev_index];
            if let Some(&step) = self.boosters.get(&prev.word) {
                // boosters push away from zero, dampeners toward it
                let mut scalar = if valence < 0.0 { -step } else { step };
                if prev.shouting && mixed_case {
                    scalar += CAPS_STEP.copysign(valence);
                }
                valence += scalar * decay;
            }
            if self.is_negation(&prev.word) {
                negated = true;
            }
        }
        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> anyhow::Result<SentimentScore> {
        Ok(self.polarity_scores(text))
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            let trimmed = trimmed.trim_matches('\'');
            if trimmed.is_empty() {
                return None;
            }
            let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
            let shouting = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
            Some(Token {
                word: trimmed.to_lowercase(),
                shouting,
            })
        })
        .collect()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
