//! Shared rendering utilities.
//!
//! Cursor positioning, match highlighting, and width-aware text fitting. All
//! width calculations use terminal display columns (`unicode-width`), so wide
//! CJK titles and accented characters line up in the grid.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Moves the cursor to a 1-indexed `(row, col)`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in terminal columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max_width` columns, ending in `…` when cut.
///
/// # Examples
///
/// ```
/// use marquee::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Thing", 20), "The Thing");
/// assert_eq!(truncate("Alien: Resurrection", 8), "Alien: …");
/// ```
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pads `text` with spaces to exactly `width` columns, truncating if longer.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let pad = width.saturating_sub(display_width(&text));
    format!("{text}{}", " ".repeat(pad))
}

/// Greedy word wrap to `width` columns.
///
/// Words wider than a full line are split. Blank input yields no lines.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let word_width = display_width(&word);
            let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };

            if needed <= width {
                if !line.is_empty() {
                    line.push(' ');
                    line_width += 1;
                }
                line.push_str(&word);
                line_width += word_width;
                break;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
                continue;
            }

            // Overlong word on an empty line: split at the width boundary.
            let mut head = String::new();
            let mut head_width = 0;
            let mut split_at = word.len();
            for (idx, c) in word.char_indices() {
                let w = c.width().unwrap_or(0);
                if head_width + w > width && !head.is_empty() {
                    split_at = idx;
                    break;
                }
                head_width += w;
                head.push(c);
            }
            lines.push(head);
            word = word[split_at..].to_string();
            if word.is_empty() {
                break;
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Fuzzy-match `pattern` against `text` and coalesce the matched character
/// indices into `(start, end)` ranges, end exclusive.
///
/// Ranges are clipped to the first `visible_chars` characters so they stay
/// valid after truncation.
#[must_use]
pub fn highlight_ranges(
    matcher: &SkimMatcherV2,
    text: &str,
    pattern: &str,
    visible_chars: usize,
) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices.into_iter().filter(|&i| i < visible_chars) {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end += 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges are character indices, `(start, end)` with `end` exclusive, and must
/// be sorted. When `is_selected` is set, highlighting is skipped so the
/// selection colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len()).max(start);

        let normal: String = chars[current_pos..start].iter().collect();
        print!("{normal}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_wide_characters() {
        // Each kanji is two columns wide.
        assert_eq!(truncate("千と千尋の神隠し", 7), "千と千…");
        assert_eq!(display_width(&truncate("千と千尋の神隠し", 7)), 7);
        assert_eq!(truncate("Heat", 0), "");
    }

    #[test]
    fn test_fit_pads_to_width() {
        assert_eq!(fit("Heat", 6), "Heat  ");
        assert_eq!(display_width(&fit("Amélie", 10)), 10);
        assert_eq!(fit("Blade Runner", 6), "Blade…");
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap("In space no one can hear you scream.", 12);
        assert_eq!(lines, vec!["In space no", "one can hear", "you scream."]);
        assert!(lines.iter().all(|l| display_width(l) <= 12));
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        assert_eq!(wrap("Supercalifragilistic", 8), vec!["Supercal", "ifragili", "stic"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_highlight_ranges_coalesce_and_clip() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges(&matcher, "Alien", "ali", 5), vec![(0, 3)]);
        assert_eq!(highlight_ranges(&matcher, "Alien", "ali", 2), vec![(0, 2)]);
        assert!(highlight_ranges(&matcher, "Heat", "zzz", 4).is_empty());
    }
}
