// Word weights are in [-1, 1]. Entries are lower-case and matched per token.
pub(crate) const WORDS: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("strong", 0.43),
    ("stronger", 0.5),
    ("positive", 0.23),
    ("optimistic", 0.6),
    ("bullish", 0.8),
    ("gain", 0.5),
    ("gains", 0.5),
    ("surge", 0.7),
    ("surges", 0.7),
    ("soar", 0.8),
    ("soars", 0.8),
    ("rally", 0.6),
    ("rallies", 0.6),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("rise", 0.4),
    ("rises", 0.4),
    ("growth", 0.5),
    ("profit", 0.5),
    ("profits", 0.5),
    ("profitable", 0.6),
    ("record", 0.4),
    ("beat", 0.5),
    ("beats", 0.5),
    ("outperform", 0.6),
    ("outperforms", 0.6),
    ("upgrade", 0.6),
    ("upgraded", 0.6),
    ("win", 0.8),
    ("wins", 0.8),
    ("success", 0.6),
    ("successful", 0.75),
    ("boost", 0.5),
    ("boosts", 0.5),
    ("recovery", 0.4),
    ("rebound", 0.4),
    ("expand", 0.3),
    ("expands", 0.3),
    ("innovative", 0.5),
    ("excellent", 1.0),
    ("impressive", 1.0),
    ("robust", 0.5),
    ("high", 0.16),
    ("higher", 0.25),
    ("new", 0.14),
    ("top", 0.5),
    ("happy", 0.8),
    ("confident", 0.5),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("negative", -0.3),
    ("pessimistic", -0.6),
    ("bearish", -0.8),
    ("loss", -0.5),
    ("losses", -0.5),
    ("fall", -0.4),
    ("falls", -0.4),
    ("drop", -0.4),
    ("drops", -0.4),
    ("decline", -0.5),
    ("declines", -0.5),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("crash", -0.9),
    ("slump", -0.6),
    ("slumps", -0.6),
    ("miss", -0.5),
    ("misses", -0.5),
    ("downgrade", -0.6),
    ("downgraded", -0.6),
    ("underperform", -0.6),
    ("lawsuit", -0.5),
    ("fraud", -0.9),
    ("probe", -0.3),
    ("risk", -0.3),
    ("risky", -0.5),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("fear", -0.6),
    ("fears", -0.6),
    ("warning", -0.5),
    ("crisis", -0.8),
    ("layoffs", -0.6),
    ("cut", -0.3),
    ("cuts", -0.3),
    ("low", -0.2),
    ("lower", -0.2),
    ("volatile", -0.3),
    ("uncertain", -0.4),
    ("uncertainty", -0.4),
    ("sad", -0.5),
    ("terrible", -1.0),
    ("poor", -0.4),
    ("fail", -0.6),
    ("fails", -0.6),
    ("failure", -0.6),
];

pub(crate) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "cannot", "can't", "cant", "don't", "dont",
    "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "aren't", "arent", "wasn't",
    "wasnt", "won't", "wont", "hardly",
];

pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("really", 1.2),
    ("significantly", 1.3),
    ("sharply", 1.4),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("marginally", 0.5),
];
