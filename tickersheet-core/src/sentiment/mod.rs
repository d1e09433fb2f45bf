//! Sentiment scoring for news text.
//!
//! A scorer is a stateless service: construct it once and pass it by
//! reference to whatever needs it.

pub mod lexicon;
pub mod scorer;

pub use scorer::LexiconScorer;

use crate::domain::Article;

/// Trait for text sentiment scorers.
///
/// `score` is a pure function of its input: no network, no state, same
/// output for the same text. Results lie in [-1, 1]; text without any
/// sentiment-bearing token scores exactly 0.
pub trait TextScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Arithmetic mean of a day's scores, or 0 when there are none.
///
/// No weighting by article length or recency.
pub fn daily_average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Score each article's "title description" text and average the results.
pub fn score_articles(scorer: &dyn TextScorer, articles: &[Article]) -> f64 {
    let scores: Vec<f64> = articles.iter().map(|a| scorer.score(&a.text())).collect();
    daily_average(&scores)
}
