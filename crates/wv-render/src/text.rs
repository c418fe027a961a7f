//! Label measurement and ellipsis truncation.
//!
//! Real glyph shaping happens in the embedding's font stack; layout here
//! only needs advance widths, so we carry a per-class approximation of the
//! UI font's metrics. The approximation errs slightly wide, which keeps
//! truncated labels inside their boxes.

/// Approximate advance of one char as a fraction of the font size.
fn advance_ratio(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '!' | '\'' | '|' | '.' | ',' | ':' | ';' => 0.30,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.42,
        'm' | 'w' => 0.85,
        'M' | 'W' | '@' => 0.95,
        ' ' => 0.33,
        c if c.is_ascii_uppercase() => 0.72,
        c if c.is_ascii_digit() => 0.60,
        _ => 0.55,
    }
}

const ELLIPSIS: char = '\u{2026}';

/// Approximate rendered width of `text` at `font_size`, in world units.
pub fn measure(text: &str, font_size: f32) -> f32 {
    text.chars().map(|c| advance_ratio(c) * font_size).sum()
}

/// Truncate `text` so it fits in `max_width`, appending `…` when anything
/// was cut. Returns the input unchanged when it already fits.
pub fn truncate(text: &str, font_size: f32, max_width: f32) -> String {
    if measure(text, font_size) <= max_width {
        return text.to_owned();
    }

    let ellipsis_w = advance_ratio(ELLIPSIS) * font_size;
    let budget = max_width - ellipsis_w;
    if budget <= 0.0 {
        return ELLIPSIS.to_string();
    }

    let mut out = String::new();
    let mut used = 0.0;
    for c in text.chars() {
        let w = advance_ratio(c) * font_size;
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    // Don't leave a trailing space before the ellipsis.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push(ELLIPSIS);
    out
}
