//! Lexicon-based text polarity, reduced to a three-valued sign.

use std::collections::HashMap;
use std::sync::OnceLock;

mod lexicon;

// A negated word keeps half its weight with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

struct Lexicon {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

fn lexicon() -> &'static Lexicon {
    static LEXICON: OnceLock<Lexicon> = OnceLock::new();
    LEXICON.get_or_init(|| Lexicon {
        words: lexicon::WORDS.iter().copied().collect(),
        intensifiers: lexicon::INTENSIFIERS.iter().copied().collect(),
    })
}

fn is_negation(token: &str) -> bool {
    lexicon::NEGATIONS.contains(&token)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
}

/// Mean weight of the sentiment-bearing words in `text`, clamped to [-1, 1].
/// Exactly 0.0 when no word in the text carries sentiment.
pub fn polarity(text: &str) -> f64 {
    let lex = lexicon();
    let mut total = 0.0;
    let mut hits = 0usize;
    let mut negate = false;
    let mut scale = 1.0;

    for token in tokenize(text) {
        if is_negation(&token) {
            negate = true;
            continue;
        }
        if let Some(mult) = lex.intensifiers.get(token.as_str()) {
            scale *= mult;
            continue;
        }
        let Some(weight) = lex.words.get(token.as_str()) else {
            continue;
        };

        let mut w = weight * scale;
        if negate {
            w *= NEGATION_FACTOR;
        }
        total += w;
        hits += 1;
        negate = false;
        scale = 1.0;
    }

    if hits == 0 {
        return 0.0;
    }
    (total / hits as f64).clamp(-1.0, 1.0)
}

/// Sign of [`polarity`]: +1, -1, or 0 when the polarity is exactly zero.
pub fn score(text: &str) -> i8 {
    let p = polarity(text);
    if p > 0.0 {
        1
    } else if p < 0.0 {
        -1
    } else {
        0
    }
}
