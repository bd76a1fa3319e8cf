//! RGB colors and hex color parsing.

use serde::{Deserialize, Serialize};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const GRAY: Color = Color::new(128, 128, 128);

    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const PURPLE: Color = Color::new(128, 0, 128);
    pub const GREEN: Color = Color::new(0, 128, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` or `#rgb` color, falling back to white.
    ///
    /// The leading `#` is optional. Any other length or a non-hex digit
    /// yields [`Color::WHITE`]; this never fails.
    pub fn parse_hex(input: &str) -> Self {
        match parse_hex_digits(input) {
            Some(color) => color,
            None => {
                log::warn!("Malformed color {:?}, using white", input);
                Color::WHITE
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}

fn parse_hex_digits(input: &str) -> Option<Color> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| -> Option<u8> { u8::from_str_radix(&hex[i..i + 1], 16).ok() };
    let byte = |i: usize| -> Option<u8> { u8::from_str_radix(&hex[i..i + 2], 16).ok() };

    match hex.len() {
        6 => Some(Color::new(byte(0)?, byte(2)?, byte(4)?)),
        // #f0a -> #ff00aa
        3 => Some(Color::new(
            nibble(0)? * 0x11,
            nibble(1)? * 0x11,
            nibble(2)? * 0x11,
        )),
        _ => None,
    }
}
