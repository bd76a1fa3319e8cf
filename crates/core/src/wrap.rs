//! Greedy word wrapping against a character budget.
//!
//! Lengths are counted in `char`s, not glyph widths. A word longer than the
//! budget is emitted on its own line and never split.

/// One physical line produced by [`wrap_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    text: String,
}

impl WrappedLine {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The line as it will be drawn.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Words of the line, split on single spaces.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

impl AsRef<str> for WrappedLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Split a logical line into lines of at most `budget` characters.
///
/// A line within budget, including the empty line, is returned as-is so
/// that it still occupies a row.
pub fn wrap_line(line: &str, budget: usize) -> Vec<WrappedLine> {
    if char_len(line) <= budget {
        return vec![WrappedLine::new(line)];
    }

    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for word in line.split(' ') {
        current = Some(match current.take() {
            None => word.to_string(),
            Some(mut candidate) => {
                if char_len(&candidate) + 1 + char_len(word) > budget {
                    push_non_empty(&mut lines, candidate);
                    word.to_string()
                } else {
                    candidate.push(' ');
                    candidate.push_str(word);
                    candidate
                }
            }
        });
    }

    if let Some(candidate) = current {
        push_non_empty(&mut lines, candidate);
    }

    lines
}

fn push_non_empty(lines: &mut Vec<WrappedLine>, candidate: String) {
    if !candidate.is_empty() {
        lines.push(WrappedLine::new(candidate));
    }
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[WrappedLine]) -> Vec<&str> {
        lines.iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn test_short_line_unchanged() {
        let line = "Amazing grace how sweet the sound";
        assert_eq!(texts(&wrap_line(line, 50)), vec![line]);

        let exact = "x".repeat(50);
        assert_eq!(texts(&wrap_line(&exact, 50)), vec![exact.as_str()]);
    }

    #[test]
    fn test_empty_line_keeps_its_row() {
        let lines = wrap_line("", 50);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "");
        assert_eq!(lines[0].char_len(), 0);
    }

    #[test]
    fn test_greedy_packing() {
        let lines = wrap_line("aaa bbb ccc ddd", 7);
        assert_eq!(texts(&lines), vec!["aaa bbb", "ccc ddd"]);

        let lines = wrap_line("aaa bbb ccc ddd", 8);
        assert_eq!(texts(&lines), vec!["aaa bbb", "ccc ddd"]);

        let lines = wrap_line("aaa bbb ccc ddd", 11);
        assert_eq!(texts(&lines), vec!["aaa bbb ccc", "ddd"]);
    }

    #[test]
    fn test_oversized_word_kept_whole() {
        let word = "w".repeat(51);
        let lines = wrap_line(&word, 50);
        assert_eq!(texts(&lines), vec![word.as_str()]);

        let line = format!("short {} tail", word);
        let lines = wrap_line(&line, 50);
        assert_eq!(texts(&lines), vec!["short", word.as_str(), "tail"]);
    }

    #[test]
    fn test_words_preserved_in_order() {
        let line = "the quick brown fox jumps over the lazy dog and keeps running \
                    far beyond the fifty character budget of a single line";
        let lines = wrap_line(line, 50);
        assert!(lines.len() > 1);
        for l in &lines {
            assert!(l.char_len() <= 50);
        }

        let rejoined = texts(&lines).join(" ");
        assert_eq!(rejoined, line);

        let words: Vec<&str> = lines.iter().flat_map(|l| l.words()).collect();
        let original: Vec<&str> = line.split(' ').collect();
        assert_eq!(words, original);
    }

    #[test]
    fn test_budget_counts_chars_not_bytes() {
        // 10 Hangul syllables are 30 bytes but 10 chars
        let line = "가나다라마 바사아자차";
        assert_eq!(texts(&wrap_line(line, 11)), vec![line]);
        assert_eq!(texts(&wrap_line(line, 9)), vec!["가나다라마", "바사아자차"]);
    }
}
