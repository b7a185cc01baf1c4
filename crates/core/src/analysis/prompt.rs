use crate::domain::recommendation::SentimentAnalysis;

pub fn build_prompt(symbol: &str, sentiment: &SentimentAnalysis) -> String {
    format!(
        "Analyze {symbol} based on news sentiment and suggest whether to buy, hold, or sell. \
         News Sentiment Score: {}. Headlines: {}. \
         Provide a brief analysis with potential risks and sector-wide trends.",
        sentiment.sentiment_score,
        render_list(&sentiment.headlines)
    )
}

// Bracketed list of quoted strings: ['a', "it's"].
fn render_list(items: &[String]) -> String {
    let rendered: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]", rendered.join(", "))
}

fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

// Control characters plus the invisible space, separator and format characters.
fn is_printable(c: char) -> bool {
    !(c.is_control()
        || matches!(
            c,
            '\u{a0}'
                | '\u{ad}'
                | '\u{1680}'
                | '\u{2000}'..='\u{200f}'
                | '\u{2028}'..='\u{202f}'
                | '\u{205f}'..='\u{206f}'
                | '\u{3000}'
                | '\u{feff}'
        ))
}

fn escape_code_point(c: char) -> String {
    match c as u32 {
        n @ 0..=0xff => format!("\\x{n:02x}"),
        n @ 0x100..=0xffff => format!("\\u{n:04x}"),
        n => format!("\\U{n:08x}"),
    }
}
