//! Request and response shapes for the caller-facing operations.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use slideshot_core::{Color, Error, RenderConfig, Result};

/// Color and keyword options shared by the render operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Background color as hex, default `#ffffff`.
    pub background_color: String,
    /// Text color as hex, default `#000000`.
    pub text_color: String,
    /// Keywords to highlight, in priority order.
    pub keywords: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            keywords: Vec::new(),
        }
    }
}

impl RenderOptions {
    /// Resolve into a render configuration. Malformed colors become white.
    ///
    /// Blank keywords are dropped here, since an empty needle would match
    /// every word.
    pub fn to_config(&self) -> RenderConfig {
        let keywords = self
            .keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .cloned();

        RenderConfig::default()
            .with_background(Color::parse_hex(&self.background_color))
            .with_text_color(Color::parse_hex(&self.text_color))
            .with_keywords(keywords)
    }
}

/// Response of the slide-info operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideInfo {
    pub slide_count: usize,
    pub filename: String,
}

/// A single rendered slide.
#[derive(Debug, Clone)]
pub struct SlideImage {
    /// Zero-based slide index.
    pub slide_index: usize,
    pub width: u32,
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// JSON body returned for a single slide: `{"image": "<base64 png>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideImageBody {
    pub image: String,
}

impl SlideImage {
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.png)
    }

    pub fn body(&self) -> SlideImageBody {
        SlideImageBody {
            image: self.to_base64(),
        }
    }
}

/// Parse a JSON array of slide indices, e.g. `[2, 0, 1]`.
pub fn parse_selections(json: &str) -> Result<Vec<i64>> {
    serde_json::from_str(json)
        .map_err(|e| Error::InvalidRequest(format!("slide indices must be a JSON array of integers: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let options: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RenderOptions::default());

        let config = options.to_config();
        assert_eq!(config.background, Color::WHITE);
        assert_eq!(config.text_color, Color::BLACK);
        assert!(config.keywords.is_empty());
    }

    #[test]
    fn test_options_resolve_colors_and_keywords() {
        let options: RenderOptions = serde_json::from_str(
            r##"{"background_color": "#000", "text_color": "oops", "keywords": ["grace", "love"]}"##,
        )
        .unwrap();
        let config = options.to_config();

        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.text_color, Color::WHITE);
        assert_eq!(config.keywords, vec!["grace", "love"]);
        assert_eq!((config.width, config.height), (1280, 720));
    }

    #[test]
    fn test_blank_keywords_are_dropped() {
        let options = RenderOptions {
            keywords: vec![
                "".to_string(),
                "  ".to_string(),
                "grace".to_string(),
                " love".to_string(),
            ],
            ..RenderOptions::default()
        };
        let config = options.to_config();
        assert_eq!(config.keywords, vec!["grace", " love"]);

        let highlighter = slideshot_core::KeywordHighlighter::new(&config.keywords);
        assert_eq!(highlighter.keyword_color(0), Some(Color::RED));
        assert_eq!(highlighter.color_for("hello", Color::BLACK), Color::BLACK);
    }

    #[test]
    fn test_parse_selections() {
        assert_eq!(parse_selections("[2, 0, 1]").unwrap(), vec![2, 0, 1]);
        assert_eq!(parse_selections("[5,-1,0]").unwrap(), vec![5, -1, 0]);
        assert_eq!(parse_selections("[]").unwrap(), Vec::<i64>::new());

        let err = parse_selections("[1, \"two\"]").unwrap_err();
        assert!(err.is_client_error());
        assert!(parse_selections("not json").is_err());
    }

    #[test]
    fn test_image_body_is_base64() {
        let image = SlideImage {
            slide_index: 0,
            width: 1,
            height: 1,
            png: b"png".to_vec(),
        };
        assert_eq!(image.to_base64(), "cG5n");
        let json = serde_json::to_string(&image.body()).unwrap();
        assert_eq!(json, r#"{"image":"cG5n"}"#);
    }
}
