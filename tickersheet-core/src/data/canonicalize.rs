//! Canonicalize a raw bar series: drop void/insane bars, sort ascending by
//! date, keep the first bar of any duplicated date.

use crate::domain::Bar;
use tracing::debug;

pub fn canonicalize(mut bars: Vec<Bar>) -> Vec<Bar> {
    let before = bars.len();
    bars.retain(Bar::is_sane);
    let dropped_insane = before - bars.len();

    // Stable sort keeps upstream order among equal dates, so dedup keeps the first.
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    let dropped_duplicates = before - dropped_insane - bars.len();

    if dropped_insane > 0 || dropped_duplicates > 0 {
        debug!(
            dropped_insane,
            dropped_duplicates,
            kept = bars.len(),
            "canonicalized bar series"
        );
    }
    bars
}
