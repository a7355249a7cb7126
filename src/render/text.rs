//! Text measurement.
//!
//! Extents follow the usual toy-text convention: y grows downwards, the
//! origin sits on the baseline at the start of the first glyph, and the
//! bearings give the offset from that origin to the top-left corner of the
//! ink bounding box.

use ab_glyph::{Font, FontVec, GlyphId};
use std::path::Path;
use std::sync::Arc;
use ttf_parser::name_id;

use crate::error::{RenderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtents {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

/// Measures the ink box of a string at a given font size.
pub trait TextMeasure {
    fn text_extents(&self, text: &str, font_size: f64) -> TextExtents;

    /// Font family written next to painted text
    fn family(&self) -> &str;
}

/// Ink box of one glyph in font units, y up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// One positioned glyph in font units: kerning against its predecessor,
/// optional ink box and horizontal advance.
struct GlyphPlacement {
    kern: f64,
    ink: Option<GlyphBox>,
    advance: f64,
}

fn layout_extents(glyphs: impl IntoIterator<Item = GlyphPlacement>, scale: f64) -> TextExtents {
    let mut pen = 0.0;
    let mut ink: Option<GlyphBox> = None;

    for glyph in glyphs {
        pen += glyph.kern;
        if let Some(b) = glyph.ink {
            let placed = GlyphBox {
                x_min: b.x_min + pen,
                y_min: b.y_min,
                x_max: b.x_max + pen,
                y_max: b.y_max,
            };
            ink = Some(match ink {
                None => placed,
                Some(acc) => GlyphBox {
                    x_min: acc.x_min.min(placed.x_min),
                    y_min: acc.y_min.min(placed.y_min),
                    x_max: acc.x_max.max(placed.x_max),
                    y_max: acc.y_max.max(placed.y_max),
                },
            });
        }
        pen += glyph.advance;
    }

    match ink {
        Some(b) => TextExtents {
            x_bearing: b.x_min * scale,
            y_bearing: -b.y_max * scale,
            width: (b.x_max - b.x_min) * scale,
            height: (b.y_max - b.y_min) * scale,
            x_advance: pen * scale,
            y_advance: 0.0,
        },
        None => TextExtents {
            x_advance: pen * scale,
            ..TextExtents::default()
        },
    }
}

/// Built-in sans-serif metrics, modelled on DejaVu Sans at 2048 units/em.
///
/// Labels only ever contain digits and commas; any other character is
/// measured with a digit-sized box so placement stays sensible.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSansMetrics;

impl BuiltinSansMetrics {
    pub const UNITS_PER_EM: f64 = 2048.0;
    const DIGIT_ADVANCE: f64 = 1303.0;
    const FALLBACK: GlyphBox = GlyphBox {
        x_min: 135.0,
        y_min: 0.0,
        x_max: 1167.0,
        y_max: 1493.0,
    };

    /// Ink box and advance of `c`, in font units
    pub fn glyph(c: char) -> (Option<GlyphBox>, f64) {
        let digit = |x_min: f64, y_min: f64, x_max: f64, y_max: f64| {
            (
                Some(GlyphBox {
                    x_min,
                    y_min,
                    x_max,
                    y_max,
                }),
                Self::DIGIT_ADVANCE,
            )
        };

        match c {
            '0' => digit(135.0, -29.0, 1167.0, 1520.0),
            '1' => digit(225.0, 0.0, 1114.0, 1493.0),
            '2' => digit(150.0, 0.0, 1098.0, 1520.0),
            '3' => digit(156.0, -29.0, 1127.0, 1520.0),
            '4' => digit(100.0, 0.0, 1178.0, 1493.0),
            '5' => digit(158.0, -29.0, 1124.0, 1493.0),
            '6' => digit(143.0, -29.0, 1178.0, 1520.0),
            '7' => digit(168.0, 0.0, 1128.0, 1493.0),
            '8' => digit(139.0, -29.0, 1163.0, 1520.0),
            '9' => digit(129.0, -29.0, 1163.0, 1520.0),
            ',' => (
                Some(GlyphBox {
                    x_min: 158.0,
                    y_min: -238.0,
                    x_max: 432.0,
                    y_max: 305.0,
                }),
                651.0,
            ),
            c if c.is_whitespace() || c.is_control() => (None, 651.0),
            _ => (Some(Self::FALLBACK), Self::DIGIT_ADVANCE),
        }
    }
}

impl TextMeasure for BuiltinSansMetrics {
    fn text_extents(&self, text: &str, font_size: f64) -> TextExtents {
        let glyphs = text.chars().map(|c| {
            let (ink, advance) = Self::glyph(c);
            GlyphPlacement {
                kern: 0.0,
                ink,
                advance,
            }
        });
        layout_extents(glyphs, font_size / Self::UNITS_PER_EM)
    }

    fn family(&self) -> &str {
        "sans-serif"
    }
}

/// Metrics read from a TrueType/OpenType font file
#[derive(Clone)]
pub struct FontFileMetrics {
    font: Arc<FontVec>,
    units_per_em: f64,
    family: String,
}

impl FontFileMetrics {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| RenderError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let family = family_name(&data)
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "sans-serif".to_string());
        Self::from_vec(data, family).map_err(|reason| RenderError::Font {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_vec(data: Vec<u8>, family: impl Into<String>) -> std::result::Result<Self, String> {
        let font = FontVec::try_from_vec(data).map_err(|e| e.to_string())?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| "font has no units-per-em".to_string())? as f64;
        Ok(Self {
            font: Arc::new(font),
            units_per_em,
            family: family.into(),
        })
    }

    /// Shared handle to the parsed face, for rasterizing glyphs
    pub fn font(&self) -> Arc<FontVec> {
        Arc::clone(&self.font)
    }

    fn ink(&self, id: GlyphId) -> Option<GlyphBox> {
        // Outline bounds are in font units but the y order of min/max is not
        // guaranteed, so normalise.
        self.font.outline(id).map(|outline| {
            let b = outline.bounds;
            GlyphBox {
                x_min: b.min.x.min(b.max.x) as f64,
                y_min: b.min.y.min(b.max.y) as f64,
                x_max: b.min.x.max(b.max.x) as f64,
                y_max: b.min.y.max(b.max.y) as f64,
            }
        })
    }
}

/// Family name from the `name` table, preferring the typographic family
fn family_name(data: &[u8]) -> Option<String> {
    let face = ttf_parser::Face::parse(data, 0).ok()?;
    [name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY].into_iter().find_map(|id| {
        face.names()
            .into_iter()
            .filter(|name| name.name_id == id)
            .find_map(|name| name.to_string())
            .filter(|family| !family.trim().is_empty())
    })
}

impl TextMeasure for FontFileMetrics {
    fn text_extents(&self, text: &str, font_size: f64) -> TextExtents {
        let mut previous: Option<GlyphId> = None;
        let glyphs: Vec<GlyphPlacement> = text
            .chars()
            .map(|c| {
                let id = self.font.glyph_id(c);
                let kern = previous
                    .map(|prev| self.font.kern_unscaled(prev, id) as f64)
                    .unwrap_or(0.0);
                previous = Some(id);
                GlyphPlacement {
                    kern,
                    ink: self.ink(id),
                    advance: self.font.h_advance_unscaled(id) as f64,
                }
            })
            .collect();
        layout_extents(glyphs, font_size / self.units_per_em)
    }

    fn family(&self) -> &str {
        &self.family
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn single_glyph_extents_scale_with_font_size() {
        let metrics = BuiltinSansMetrics;
        let ext = metrics.text_extents("1", 2048.0);
        assert!((ext.x_bearing - 225.0).abs() < EPS);
        assert!((ext.y_bearing + 1493.0).abs() < EPS);
        assert!((ext.width - 889.0).abs() < EPS);
        assert!((ext.height - 1493.0).abs() < EPS);
        assert!((ext.x_advance - 1303.0).abs() < EPS);

        let half = metrics.text_extents("1", 1024.0);
        assert!((half.width - 444.5).abs() < EPS);
    }

    #[test]
    fn label_ink_spans_first_to_last_glyph() {
        let metrics = BuiltinSansMetrics;
        let ext = metrics.text_extents("0,1", 2048.0);
        // '0' starts at 135, '1' is placed after 1303 + 651 units of advance
        assert!((ext.x_bearing - 135.0).abs() < EPS);
        let right = 1303.0 + 651.0 + 1114.0;
        assert!((ext.width - (right - 135.0)).abs() < EPS);
        // comma descends below the baseline, '0' reaches highest
        assert!((ext.y_bearing + 1520.0).abs() < EPS);
        assert!((ext.height - (1520.0 + 238.0)).abs() < EPS);
        assert!((ext.x_advance - (1303.0 * 2.0 + 651.0)).abs() < EPS);
    }

    #[test]
    fn empty_text_has_degenerate_extents() {
        let ext = BuiltinSansMetrics.text_extents("", 12.0);
        assert_eq!(ext, TextExtents::default());

        let blank = BuiltinSansMetrics.text_extents(" ", 12.0);
        assert_eq!(blank.width, 0.0);
        assert_eq!(blank.height, 0.0);
        assert!(blank.x_advance > 0.0);
    }

    #[test]
    fn unknown_characters_get_a_fallback_box() {
        let ext = BuiltinSansMetrics.text_extents("x", 2048.0);
        assert!(ext.width > 0.0 && ext.height > 0.0);
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        assert!(FontFileMetrics::from_vec(vec![0u8; 16], "broken").is_err());
    }

    const SYSTEM_SANS: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    #[test]
    fn font_file_reads_family_and_matches_builtin_metrics() -> anyhow::Result<()> {
        let path = Path::new(SYSTEM_SANS);
        if !path.exists() {
            return Ok(());
        }

        let metrics = FontFileMetrics::load(path)?;
        assert_eq!(metrics.family(), "DejaVu Sans");

        for label in ["1", "0,1", "12,7"] {
            let from_file = metrics.text_extents(label, 160.0);
            let builtin = BuiltinSansMetrics.text_extents(label, 160.0);
            assert!((from_file.x_bearing - builtin.x_bearing).abs() < 1e-6, "{label}");
            assert!((from_file.y_bearing - builtin.y_bearing).abs() < 1e-6, "{label}");
            assert!((from_file.width - builtin.width).abs() < 1e-6, "{label}");
            assert!((from_file.height - builtin.height).abs() < 1e-6, "{label}");
            assert!((from_file.x_advance - builtin.x_advance).abs() < 1e-6, "{label}");
        }
        Ok(())
    }

    #[test]
    fn family_name_needs_a_name_table() {
        assert_eq!(family_name(&[0u8; 64]), None);
    }

    #[test]
    fn missing_font_file_reports_path() {
        let err = match FontFileMetrics::load(Path::new("/nonexistent/font.ttf")) {
            Ok(_) => panic!("loaded a missing font"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
