use crate::canvas::Font;
use crate::text_metrics;

/// PowerPoint-style single spacing: one line is 1.2 em tall.
pub const SINGLE_LINE_HEIGHT: f32 = 1.2;

/// Extra width bold glyphs take over regular ones in the fallback metrics.
const BOLD_WIDTH_FACTOR: f32 = 1.06;

/// Splits `text` into the lines it occupies at `max_width` points.
///
/// Explicit newlines always break. A single word wider than `max_width`
/// stays on its own line instead of being split.
pub fn wrap_text(text: &str, font: &Font, max_width: f32, fast_metrics: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let raw = raw.trim();
        if text_width(raw, font, fast_metrics) <= max_width {
            lines.push(raw.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && text_width(&candidate, font, fast_metrics) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Width of `text` in points.
pub fn text_width(text: &str, font: &Font, fast_metrics: bool) -> f32 {
    if fast_metrics {
        return fallback_text_width(text, font);
    }
    text_metrics::measure_text_width(text, font.size, &font.family, font.bold)
        .unwrap_or_else(|| fallback_text_width(text, font))
}

fn fallback_text_width(text: &str, font: &Font) -> f32 {
    let width = text.chars().map(char_width_factor).sum::<f32>() * font.size;
    if font.bold {
        width * BOLD_WIDTH_FACTOR
    } else {
        width
    }
}

/// Advance widths of Arial (Helvetica metrics) in em.
pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' => 0.222,
        '|' => 0.260,
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'I' | 'f' | 't' => 0.278,
        '\'' => 0.191,
        '"' => 0.355,
        '(' | ')' | '-' | '`' | 'r' => 0.333,
        '{' | '}' => 0.334,
        '*' => 0.389,
        '^' => 0.469,
        'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.500,
        'L' | '_' | '#' | '$' | '?' | '0'..='9' => 0.556,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 0.556,
        '+' | '<' | '=' | '>' | '~' => 0.584,
        'F' | 'T' | 'Z' => 0.611,
        '&' | 'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 0.667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 0.722,
        'G' | 'O' | 'Q' => 0.778,
        'M' | 'm' => 0.833,
        '%' => 0.889,
        'W' => 0.944,
        '@' => 1.015,
        _ => 0.556,
    }
}
