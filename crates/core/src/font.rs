//! Font selection and text drawing.
//!
//! [`FontResolver`] walks an ordered list of font files and returns the
//! first one that loads. When none does, it hands back the `font8x8`
//! bitmap face instead of failing. Resolved handles are cached process-wide per
//! (candidate list, size) and are never replaced once cached.

use crate::color::Color;
use font8x8::{
    UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS,
    MISC_FONTS,
};
use image::RgbImage;
use rusttype::{point, Font, Scale};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, RwLock};

/// Font files tried by default, CJK-capable faces first.
#[cfg(target_os = "macos")]
const PLATFORM_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/System/Library/Fonts/Supplemental/AppleGothic.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

#[cfg(target_os = "windows")]
const PLATFORM_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\malgun.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const PLATFORM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

#[derive(Hash, PartialEq, Eq)]
struct FontKey {
    candidates: Vec<PathBuf>,
    size_bits: u32,
}

static FONT_CACHE: LazyLock<RwLock<HashMap<FontKey, FontHandle>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Picks a usable font from an ordered list of candidate files.
#[derive(Debug, Clone)]
pub struct FontResolver {
    candidates: Vec<PathBuf>,
    /// Number of caller-supplied candidates at the front of the list.
    preferred: usize,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver {
    /// Resolver over the platform's default font locations.
    pub fn new() -> Self {
        Self {
            candidates: PLATFORM_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            preferred: 0,
        }
    }

    /// Resolver with no candidates; always yields the built-in face.
    pub fn builtin_only() -> Self {
        Self {
            candidates: Vec::new(),
            preferred: 0,
        }
    }

    /// Try `path` before the platform defaults, after earlier preferred paths.
    pub fn with_preferred(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(self.preferred, path.into());
        self.preferred += 1;
        self
    }

    /// Candidate files in the order they are tried.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Resolve a font at `size` points. Always succeeds.
    pub fn resolve(&self, size: f32) -> FontHandle {
        let key = FontKey {
            candidates: self.candidates.clone(),
            size_bits: size.to_bits(),
        };

        if let Ok(cache) = FONT_CACHE.read() {
            if let Some(handle) = cache.get(&key) {
                return handle.clone();
            }
        }

        let handle = self.load(size);

        match FONT_CACHE.write() {
            Ok(mut cache) => cache.entry(key).or_insert(handle).clone(),
            Err(_) => handle,
        }
    }

    /// Load without consulting the cache.
    fn load(&self, size: f32) -> FontHandle {
        for path in &self.candidates {
            match load_font_file(path) {
                Some(font) => {
                    log::debug!("Using font {} at {}pt", path.display(), size);
                    return FontHandle {
                        face: Face::Outline {
                            font: Arc::new(font),
                            source: path.clone(),
                        },
                        size,
                    };
                }
                None => log::trace!("Font candidate unavailable: {}", path.display()),
            }
        }

        log::warn!(
            "No usable font among {} candidates, using built-in bitmap font",
            self.candidates.len()
        );
        FontHandle::builtin(size)
    }
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let data = std::fs::read(path).ok()?;
    Font::try_from_vec_and_index(data, 0)
}

/// A resolved font at a fixed size, cheap to clone.
#[derive(Clone)]
pub struct FontHandle {
    face: Face,
    size: f32,
}

#[derive(Clone)]
enum Face {
    Outline {
        font: Arc<Font<'static>>,
        source: PathBuf,
    },
    Builtin,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("source", &self.source())
            .field("size", &self.size)
            .finish()
    }
}

impl FontHandle {
    /// The `font8x8` bitmap face. Sizes are rounded to an integer scale.
    pub fn builtin(size: f32) -> Self {
        Self {
            face: Face::Builtin,
            size,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// File the font was loaded from, `None` for the built-in face.
    pub fn source(&self) -> Option<&Path> {
        match &self.face {
            Face::Outline { source, .. } => Some(source),
            Face::Builtin => None,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Draw `text` with its top-left corner at (`x`, `y`). Pixels outside
    /// the canvas are clipped.
    pub fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Color) {
        match &self.face {
            Face::Outline { font, .. } => draw_outline(canvas, font, self.size, x, y, text, color),
            Face::Builtin => draw_builtin(canvas, self.size, x, y, text, color),
        }
    }
}

fn draw_outline(
    canvas: &mut RgbImage,
    font: &Font<'static>,
    size: f32,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let origin = point(x as f32, y as f32 + v_metrics.ascent);

    for glyph in font.layout(text, scale, origin) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                blend_pixel(
                    canvas,
                    gx as i64 + bb.min.x as i64,
                    gy as i64 + bb.min.y as i64,
                    color,
                    coverage,
                );
            });
        }
    }
}

/// Edge length of a `font8x8` glyph cell, in unscaled pixels.
const BITMAP_CELL: u32 = 8;

/// Integer magnification of the bitmap face for `size` points.
/// 40pt gives 2, a 16px cell that stays inside the 20px word advance.
fn bitmap_scale(size: f32) -> u32 {
    ((size / 20.0).round() as u32).max(1)
}

fn bitmap_glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| HIRAGANA_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_builtin(canvas: &mut RgbImage, size: f32, x: i32, y: i32, text: &str, color: Color) {
    let scale = bitmap_scale(size) as i64;
    let advance = BITMAP_CELL as i64 * scale;
    let mut caret = x as i64;

    for ch in text.chars() {
        if !ch.is_whitespace() {
            for (row, bits) in bitmap_glyph(ch).iter().enumerate() {
                for col in 0..BITMAP_CELL {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let px = caret + col as i64 * scale;
                    let py = y as i64 + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend_pixel(canvas, px + dx, py + dy, color, 1.0);
                        }
                    }
                }
            }
        }
        caret += advance;
    }
}

fn blend_pixel(canvas: &mut RgbImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let src = [color.r, color.g, color.b];
    let inv = 1.0 - alpha;
    for (d, s) in dst.0.iter_mut().zip(src) {
        *d = (s as f32 * alpha + *d as f32 * inv).round() as u8;
    }
}
