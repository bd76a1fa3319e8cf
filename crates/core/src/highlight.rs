//! Keyword highlighting: per-word color selection.

use crate::color::Color;

/// Colors handed out to keywords, cycling in list order.
pub const KEYWORD_PALETTE: [Color; 5] = [
    Color::RED,
    Color::BLUE,
    Color::ORANGE,
    Color::PURPLE,
    Color::GREEN,
];

/// Matches words against an ordered keyword list.
///
/// Built once per render. A word matches a keyword when the lowercased
/// keyword is a substring of the lowercased word, so `key` also matches
/// `Keywords`. The first keyword in list order wins.
#[derive(Debug, Clone, Default)]
pub struct KeywordHighlighter {
    entries: Vec<KeywordEntry>,
}

#[derive(Debug, Clone)]
struct KeywordEntry {
    needle: String,
    color: Color,
}

impl KeywordHighlighter {
    /// Build the keyword to color mapping. Keyword `i` gets palette color `i % 5`.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let entries = keywords
            .iter()
            .enumerate()
            .map(|(i, k)| KeywordEntry {
                needle: k.as_ref().to_lowercase(),
                color: KEYWORD_PALETTE[i % KEYWORD_PALETTE.len()],
            })
            .collect();
        Self { entries }
    }

    /// Number of keywords, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Palette color assigned to the keyword at `index`.
    pub fn keyword_color(&self, index: usize) -> Option<Color> {
        self.entries.get(index).map(|e| e.color)
    }

    /// Color for `word`: the first matching keyword's color, else `default`.
    pub fn color_for(&self, word: &str, default: Color) -> Color {
        if self.entries.is_empty() {
            return default;
        }

        let word = word.to_lowercase();
        self.entries
            .iter()
            .find(|e| word.contains(&e.needle))
            .map(|e| e.color)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_by_index() {
        let keywords: Vec<String> = (0..12).map(|i| format!("kw{}", i)).collect();
        let highlighter = KeywordHighlighter::new(&keywords);

        for i in 0..keywords.len() {
            assert_eq!(highlighter.keyword_color(i), Some(KEYWORD_PALETTE[i % 5]));
        }
        assert_eq!(highlighter.keyword_color(0), Some(Color::RED));
        assert_eq!(highlighter.keyword_color(5), Some(Color::RED));
        assert_eq!(highlighter.keyword_color(7), Some(Color::ORANGE));
    }

    #[test]
    fn test_substring_case_insensitive_match() {
        let highlighter = KeywordHighlighter::new(&["Keyword"]);
        assert_eq!(highlighter.color_for("keywords,", Color::BLACK), Color::RED);
        assert_eq!(highlighter.color_for("KEYWORD", Color::BLACK), Color::RED);
        assert_eq!(highlighter.color_for("key", Color::BLACK), Color::BLACK);
    }

    #[test]
    fn test_first_keyword_in_list_order_wins() {
        // "grace" appears later in the word but earlier in the list.
        let highlighter = KeywordHighlighter::new(&["amazing", "grace", "amazinggrace"]);
        assert_eq!(highlighter.color_for("AmazingGrace", Color::BLACK), Color::RED);

        let highlighter = KeywordHighlighter::new(&["grace", "amazing"]);
        assert_eq!(highlighter.color_for("AmazingGrace", Color::BLACK), Color::RED);
        assert_eq!(highlighter.color_for("amazing", Color::BLACK), Color::BLUE);
    }

    #[test]
    fn test_duplicate_keywords_keep_first_color() {
        let highlighter = KeywordHighlighter::new(&["rust", "rust"]);
        assert_eq!(highlighter.len(), 2);
        assert_eq!(highlighter.keyword_color(1), Some(Color::BLUE));
        assert_eq!(highlighter.color_for("Rusty", Color::BLACK), Color::RED);
    }

    #[test]
    fn test_keywords_match_literally() {
        // surrounding spaces are part of the needle
        let highlighter = KeywordHighlighter::new(&[" grace"]);
        assert_eq!(highlighter.color_for("grace", Color::BLACK), Color::BLACK);

        // the empty string is a substring of every word
        let highlighter = KeywordHighlighter::new(&["", "rust"]);
        assert_eq!(highlighter.color_for("hello", Color::BLACK), Color::RED);
        assert_eq!(highlighter.color_for("Rusty", Color::BLACK), Color::RED);
    }

    #[test]
    fn test_no_keywords_uses_default() {
        let highlighter = KeywordHighlighter::new::<&str>(&[]);
        assert!(highlighter.is_empty());
        assert_eq!(highlighter.color_for("anything", Color::GRAY), Color::GRAY);
    }
}
