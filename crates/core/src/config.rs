//! Render configuration.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Everything the renderer needs to lay out and paint one slide.
///
/// Built once per request and handed to
/// [`SlideRenderer`](crate::SlideRenderer) by value, so it cannot change
/// while a render is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub background: Color,
    pub text_color: Color,
    /// Color of the "Slide N" marker drawn on slides without text.
    pub placeholder_color: Color,
    /// Keywords to highlight, in priority order.
    pub keywords: Vec<String>,
    /// Font size in points.
    pub font_size: f32,
    pub margin_left: u32,
    pub margin_top: u32,
    /// Vertical advance per wrapped line.
    pub line_height: u32,
    /// No line starts at or below this y coordinate.
    pub max_y: u32,
    /// Maximum characters per wrapped line.
    pub char_budget: usize,
    /// Approximate horizontal advance per character.
    pub char_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: Color::WHITE,
            text_color: Color::BLACK,
            placeholder_color: Color::GRAY,
            keywords: Vec::new(),
            font_size: 40.0,
            margin_left: 50,
            margin_top: 50,
            line_height: 60,
            max_y: 650,
            char_budget: 50,
            char_width: 20,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with the default 1280x720 layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size. Zero dimensions are raised to 1.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_placeholder_color(mut self, color: Color) -> Self {
        self.placeholder_color = color;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_margins(mut self, left: u32, top: u32) -> Self {
        self.margin_left = left;
        self.margin_top = top;
        self
    }

    pub fn with_line_height(mut self, height: u32) -> Self {
        self.line_height = height.max(1); // zero would never reach max_y
        self
    }

    pub fn with_max_y(mut self, max_y: u32) -> Self {
        self.max_y = max_y;
        self
    }

    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.char_budget = budget;
        self
    }

    pub fn with_char_width(mut self, width: u32) -> Self {
        self.char_width = width;
        self
    }
}
