//! Word lists for the lexicon scorer.
//!
//! Valences use a -4..=4 scale. Booster words carry no valence of their own;
//! they scale the next sentiment-bearing word.

use std::collections::{HashMap, HashSet};

/// Booster step added (or subtracted) by an intensifier/dampener.
pub const B_INCR: f64 = 0.293;
pub const B_DECR: f64 = -0.293;

/// Emphasis added to an ALL-CAPS word in otherwise mixed-case text.
pub const C_INCR: f64 = 0.733;

/// Multiplier applied to a negated word's valence.
pub const N_SCALAR: f64 = -0.74;

pub fn build_valences() -> HashMap<&'static str, f64> {
    [
        // General positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 2.7),
        ("outstanding", 3.0),
        ("amazing", 2.8),
        ("awesome", 3.1),
        ("wonderful", 2.7),
        ("fantastic", 2.6),
        ("superb", 2.9),
        ("best", 3.2),
        ("better", 1.9),
        ("nice", 1.8),
        ("happy", 2.7),
        ("glad", 2.0),
        ("love", 3.2),
        ("like", 1.5),
        ("win", 2.8),
        ("wins", 2.7),
        ("won", 2.7),
        ("winning", 2.4),
        ("success", 2.7),
        ("successful", 2.8),
        ("positive", 2.6),
        ("optimistic", 2.2),
        ("optimism", 2.5),
        ("confident", 2.2),
        ("confidence", 2.3),
        ("strong", 2.3),
        ("stronger", 1.9),
        ("strongest", 2.2),
        ("strength", 2.2),
        ("robust", 1.5),
        ("solid", 1.4),
        ("healthy", 1.7),
        ("impressive", 2.3),
        ("pleased", 1.9),
        ("encouraging", 2.4),
        ("favorable", 2.1),
        ("benefit", 2.0),
        ("benefits", 1.6),
        ("opportunity", 1.8),
        ("opportunities", 1.7),
        ("promising", 1.7),
        ("improve", 1.9),
        ("improved", 2.1),
        ("improvement", 2.0),
        ("improving", 1.8),
        ("innovative", 1.9),
        ("exciting", 2.2),
        ("excited", 1.4),
        ("thrilled", 2.5),
        ("win-win", 2.6),
        ("recommend", 1.5),
        ("safe", 1.9),
        ("secure", 1.4),
        ("stable", 1.2),
        ("reward", 2.0),
        ("rewarding", 2.4),
        ("agree", 1.5),
        ("approve", 2.2),
        ("approved", 1.8),
        ("approval", 2.1),
        ("boost", 1.7),
        ("boosted", 1.5),
        ("boosts", 1.3),
        ("celebrate", 2.7),
        ("upbeat", 2.0),
        // Markets and earnings, positive
        ("gain", 2.4),
        ("gains", 1.8),
        ("gained", 1.6),
        ("profit", 1.9),
        ("profits", 1.9),
        ("profitable", 1.9),
        ("growth", 1.6),
        ("grow", 1.3),
        ("grows", 1.2),
        ("growing", 1.3),
        ("rally", 1.8),
        ("rallies", 1.6),
        ("rallied", 1.7),
        ("surge", 1.6),
        ("surges", 1.6),
        ("surged", 1.6),
        ("soar", 2.1),
        ("soars", 2.1),
        ("soared", 2.0),
        ("jump", 1.0),
        ("jumps", 1.0),
        ("jumped", 1.0),
        ("climb", 1.0),
        ("climbs", 1.0),
        ("rebound", 1.5),
        ("rebounds", 1.5),
        ("recovery", 1.6),
        ("recover", 1.3),
        ("recovered", 1.4),
        ("beat", 1.2),
        ("beats", 1.2),
        ("outperform", 1.9),
        ("outperformed", 1.9),
        ("outperforms", 1.8),
        ("upgrade", 1.8),
        ("upgraded", 1.8),
        ("bullish", 2.0),
        ("record", 0.9),
        ("dividend", 0.8),
        ("upside", 1.5),
        ("breakthrough", 2.2),
        ("expand", 1.3),
        ("expansion", 1.2),
        ("exceed", 1.6),
        ("exceeded", 1.6),
        ("exceeds", 1.5),
        // General negative
        ("bad", -2.5),
        ("worse", -2.1),
        ("worst", -3.1),
        ("terrible", -2.1),
        ("horrible", -2.5),
        ("awful", -2.0),
        ("poor", -2.1),
        ("sad", -2.1),
        ("angry", -2.3),
        ("hate", -2.7),
        ("fear", -2.2),
        ("fears", -1.8),
        ("afraid", -2.0),
        ("worry", -1.9),
        ("worried", -1.2),
        ("worries", -1.8),
        ("concern", -1.4),
        ("concerns", -1.3),
        ("concerned", -1.3),
        ("problem", -1.7),
        ("problems", -1.7),
        ("trouble", -1.7),
        ("troubled", -2.0),
        ("fail", -2.5),
        ("fails", -1.8),
        ("failed", -2.3),
        ("failure", -2.3),
        ("lose", -1.8),
        ("loses", -1.8),
        ("losing", -1.6),
        ("lost", -1.3),
        ("negative", -2.7),
        ("pessimistic", -1.5),
        ("weak", -1.9),
        ("weaker", -1.9),
        ("weakness", -1.8),
        ("risk", -1.1),
        ("risks", -1.1),
        ("risky", -1.4),
        ("danger", -2.4),
        ("dangerous", -2.1),
        ("threat", -2.4),
        ("threatens", -2.1),
        ("crisis", -3.1),
        ("disaster", -3.1),
        ("scandal", -2.4),
        ("fraud", -2.8),
        ("lawsuit", -1.8),
        ("sued", -1.5),
        ("penalty", -1.6),
        ("fine", 0.8),
        ("fined", -1.5),
        ("warning", -1.4),
        ("warns", -1.6),
        ("warned", -1.3),
        ("disappointing", -2.2),
        ("disappointed", -1.9),
        ("disappoints", -1.6),
        ("uncertain", -1.2),
        ("uncertainty", -1.4),
        ("volatile", -1.0),
        ("panic", -2.3),
        ("struggle", -1.8),
        ("struggles", -1.6),
        ("struggling", -1.8),
        ("hurt", -2.4),
        ("hurts", -2.1),
        ("damage", -2.2),
        ("damaged", -1.9),
        ("bankrupt", -2.6),
        ("bankruptcy", -2.6),
        ("collapse", -2.2),
        ("collapsed", -2.2),
        ("wrong", -2.1),
        ("reject", -1.7),
        ("rejected", -2.2),
        ("delay", -1.3),
        ("delayed", -1.2),
        ("cut", -1.1),
        ("cuts", -1.2),
        ("layoffs", -1.6),
        ("downgrade", -1.8),
        ("downgraded", -1.8),
        // Markets and earnings, negative
        ("loss", -1.3),
        ("losses", -1.7),
        ("decline", -1.5),
        ("declines", -1.3),
        ("declined", -1.3),
        ("declining", -1.5),
        ("drop", -1.1),
        ("drops", -1.1),
        ("dropped", -1.1),
        ("fall", -1.2),
        ("falls", -1.2),
        ("fell", -1.2),
        ("falling", -1.4),
        ("plunge", -2.1),
        ("plunges", -2.1),
        ("plunged", -2.1),
        ("tumble", -1.6),
        ("tumbles", -1.6),
        ("tumbled", -1.6),
        ("slump", -1.7),
        ("slumps", -1.7),
        ("slide", -0.9),
        ("slides", -0.9),
        ("sink", -1.1),
        ("sinks", -1.1),
        ("crash", -2.3),
        ("crashed", -2.3),
        ("selloff", -1.6),
        ("sell-off", -1.6),
        ("miss", -0.6),
        ("misses", -1.2),
        ("missed", -1.3),
        ("bearish", -2.0),
        ("recession", -2.4),
        ("downturn", -1.8),
        ("slowdown", -1.3),
        ("downside", -1.3),
        ("debt", -1.5),
        ("default", -1.6),
        ("inflation", -0.8),
        ("underperform", -1.8),
        ("underperformed", -1.8),
        ("shortfall", -1.5),
        ("headwind", -1.1),
        ("headwinds", -1.2),
        ("volatility", -0.8),
        ("investigation", -1.3),
        ("probe", -1.2),
    ]
    .into_iter()
    .collect()
}

pub fn build_boosters() -> HashMap<&'static str, f64> {
    let incr = [
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
        "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
        "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
        "particularly", "purely", "quite", "really", "remarkably", "sharply", "significantly",
        "so", "strongly", "substantially", "thoroughly", "totally", "tremendously",
        "unbelievably", "unusually", "utterly", "very",
    ];
    let decr = [
        "almost", "barely", "hardly", "less", "little", "marginally", "modestly",
        "occasionally", "partly", "scarcely", "slightly", "somewhat",
    ];
    incr.into_iter()
        .map(|w| (w, B_INCR))
        .chain(decr.into_iter().map(|w| (w, B_DECR)))
        .collect()
}

pub fn build_negations() -> HashSet<&'static str> {
    [
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont",
        "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never",
        "none", "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt",
        "wasnt", "werent", "without", "wont", "wouldnt", "rarely", "seldom", "despite",
    ]
    .into_iter()
    .collect()
}
