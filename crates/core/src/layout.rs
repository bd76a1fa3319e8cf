//! Word placement: turns slide text into positioned, colored words.
//!
//! Placement uses a fixed per-character advance instead of glyph metrics,
//! which keeps wrap points and positions independent of the font in use.

use crate::color::Color;
use crate::config::RenderConfig;
use crate::highlight::KeywordHighlighter;
use crate::wrap::{char_len, wrap_line};

/// A word ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub text: String,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    pub color: Color,
}

/// Lay out `text` top to bottom, wrapping and highlighting as configured.
///
/// Lines that would start at or beyond `config.max_y` are dropped.
pub fn layout_text(
    text: &str,
    config: &RenderConfig,
    highlighter: &KeywordHighlighter,
) -> Vec<PlacedWord> {
    layout_with(text, config, |word| {
        highlighter.color_for(word, config.text_color)
    })
}

/// Layout of the "Slide N" marker for a slide without text.
/// `slide_index` is zero-based; the marker shows it one-based.
pub fn layout_placeholder(slide_index: usize, config: &RenderConfig) -> Vec<PlacedWord> {
    let marker = placeholder_text(slide_index);
    layout_with(&marker, config, |_| config.placeholder_color)
}

pub fn placeholder_text(slide_index: usize) -> String {
    format!("Slide {}", slide_index + 1)
}

fn layout_with<F>(text: &str, config: &RenderConfig, color_for: F) -> Vec<PlacedWord>
where
    F: Fn(&str) -> Color,
{
    let mut placed = Vec::new();
    let mut y = config.margin_top as i64;
    let max_y = config.max_y as i64;
    let char_width = config.char_width as i64;

    'logical: for line in logical_lines(text) {
        if y >= max_y {
            break;
        }

        for wrapped in wrap_line(line, config.char_budget) {
            if y >= max_y {
                break 'logical;
            }

            let mut x = config.margin_left as i64;
            for word in wrapped.words() {
                if !word.is_empty() {
                    placed.push(PlacedWord {
                        text: word.to_string(),
                        x: x as i32,
                        y: y as i32,
                        color: color_for(word),
                    });
                }
                x += (char_len(word) as i64 + 1) * char_width;
            }

            y += config.line_height as i64;
        }
    }

    placed
}

/// Split on line breaks, treating CRLF and vertical tab as breaks too.
fn logical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == '\n' || c == '\u{b}')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
