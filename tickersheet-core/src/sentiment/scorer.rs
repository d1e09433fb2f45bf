//! Lexicon- and rule-based compound sentiment scorer.
//!
//! Per-word valences are adjusted by intensifiers, negation, ALL-CAPS
//! emphasis and a contrastive "but", summed, boosted by `!`/`?` emphasis and
//! normalized into [-1, 1].

use super::lexicon::{build_boosters, build_negations, build_valences, C_INCR, N_SCALAR};
use super::TextScorer;
use std::collections::{HashMap, HashSet};

/// Normalization constant: approximates the max expected raw score.
const ALPHA: f64 = 15.0;

/// Distance weights for boosters one, two and three tokens back.
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

const EXCLAMATION_STEP: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_STEP: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: build_valences(),
            boosters: build_boosters(),
            negations: build_negations(),
        }
    }

    fn is_negation(&self, lower: &str) -> bool {
        self.negations.contains(lower.replace('\'', "").as_str()) || lower.contains("n't")
    }

    /// Booster contribution of `lower` toward a word of the given valence.
    fn booster_scalar(&self, token: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
        let Some(&step) = self.boosters.get(lower) else {
            return 0.0;
        };
        let mut scalar = if valence < 0.0 { -step } else { step };
        if cap_diff && is_all_caps(token) {
            scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
        }
        scalar
    }

    fn word_valence(&self, tokens: &[&str], lowers: &[String], i: usize, cap_diff: bool) -> f64 {
        let lower = lowers[i].as_str();
        if self.boosters.contains_key(lower) {
            return 0.0;
        }
        let Some(&base) = self.valences.get(lower) else {
            return 0.0;
        };

        let mut valence = base;
        if cap_diff && is_all_caps(tokens[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for (back, decay) in BOOSTER_DECAY.iter().enumerate() {
            let Some(j) = i.checked_sub(back + 1) else {
                break;
            };
            let prev = lowers[j].as_str();
            if !self.valences.contains_key(prev) {
                valence += decay * self.booster_scalar(tokens[j], prev, valence, cap_diff);
            }
            if self.is_negation(prev) {
                valence *= N_SCALAR;
            }
        }
        valence
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let normalized = text.replace('\u{2019}', "'");
        let tokens: Vec<&str> = normalized
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return 0.0;
        }
        let lowers: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_diff = caps_differential(&tokens);

        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|i| self.word_valence(&tokens, &lowers, i, cap_diff))
            .collect();

        if let Some(but) = lowers.iter().position(|w| w == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but {
                    *s *= 0.5;
                } else if i > but {
                    *s *= 1.5;
                }
            }
        }

        let mut sum: f64 = sentiments.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }

        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else {
            sum -= emphasis;
        }
        normalize(sum)
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some, but not all, tokens are ALL CAPS.
fn caps_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_STEP,
        _ => QUESTION_CAP,
    };
    exclamations as f64 * EXCLAMATION_STEP + question_amp
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
