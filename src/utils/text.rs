use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns taken by `s`; wide glyphs count double.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Greedy word wrap by display width. Blank lines are preserved and a word
/// wider than `max_width` is split across lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            if line_width > 0 && line_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width > max_width {
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if line_width > 0 && line_width + ch_width > max_width {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(ch);
                    line_width += ch_width;
                }
                continue;
            }

            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }

        lines.push(line);
    }

    lines
}

/// `label` centred in a rule of `width` columns, e.g. `─── label ───`.
pub fn centered_rule(label: &str, width: usize) -> String {
    let spare = width.saturating_sub(display_width(label) + 2);
    let left = (spare / 2).max(3);
    let right = (spare - spare / 2).max(3);
    format!("{} {} {}", "─".repeat(left), label, "─".repeat(right))
}
