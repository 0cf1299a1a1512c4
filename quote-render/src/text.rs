//! Text handling for the built-in Helvetica faces.
//!
//! The PDF built-in fonts only cover the WinAnsi range, so everything that
//! goes onto a page passes through [`sanitize`] first: unsupported characters
//! are lossily substituted, never allowed to abort a document. Line breaking
//! works on an estimated advance width per character; the estimate does not
//! need to be exact, only conservative enough that wrapped lines stay inside
//! the content box.

/// Replaces characters outside the WinAnsi/Latin-1 range with `?` and
/// normalizes whitespace the page procedure cannot represent.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\n' => '\n',
            '\t' => ' ',
            '\r' => ' ',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Approximate advance width of one character in thousandths of an em,
/// loosely following the Helvetica metrics.
fn char_width_milli(c: char) -> u32 {
    match c {
        'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ';' | ':' => 278,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | ' ' => 333,
        'm' | 'M' | 'W' => 889,
        'w' => 722,
        'A'..='Z' => 700,
        '0'..='9' => 556,
        _ => 556,
    }
}

/// Estimated width of `text` in millimetres at the given font size (points).
pub fn text_width_mm(
    text: &str,
    font_size_pt: f32,
) -> f32 {
    let milli: u32 = text.chars().map(char_width_milli).sum();
    // 1 pt = 0.352778 mm
    milli as f32 / 1000.0 * font_size_pt * 0.352_778
}

/// Greedy word wrap against an estimated line width. Words longer than the
/// whole line are hard-split so a single token can never overflow the box.
/// Explicit newlines in the input are honored; a trailing newline does not
/// produce a phantom empty line.
pub fn wrap(
    text: &str,
    font_size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            if !text.trim().is_empty() {
                lines.push(String::new());
            }
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();

            // Hard-split oversized tokens.
            while text_width_mm(&word, font_size_pt) > max_width_mm {
                let mut head = String::new();
                for c in word.chars() {
                    if text_width_mm(&format!("{head}{c}"), font_size_pt) > max_width_mm {
                        break;
                    }
                    head.push(c);
                }
                if head.is_empty() {
                    break;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                word = word[head.len()..].to_string();
                lines.push(head);
            }
            if word.is_empty() {
                continue;
            }

            let candidate = if current.is_empty() {
                word.clone()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, font_size_pt) <= max_width_mm {
                current = candidate;
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = word;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    // Drop trailing blank lines introduced by terminal newlines.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Truncates a table cell to a fixed character budget, marking the cut.
pub fn truncate_cell(
    text: &str,
    budget: usize,
) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let head: String = text.chars().take(budget.saturating_sub(3)).collect();
    format!("{head}...")
}
