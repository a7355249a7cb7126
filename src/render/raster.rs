//! Raster preview of a [`Canvas`] using `image` and `imageproc`.
//!
//! The unit square maps onto a `size`×`size` RGBA image. Grid strokes are
//! at least one pixel wide so fine grids stay visible at preview scale.
//! Labels need glyph outlines and are only drawn when a font is supplied.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{ImageFormat, Pixel, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as PixelRect;
use std::io::Cursor;
use std::path::Path;

use crate::error::{RenderError, Result};
use crate::models::{LineSegment, LinearGradient, Point, Rect, Rgba};
use crate::output;
use crate::render::canvas::{Canvas, DrawCommand, Paint};

pub struct Rasterizer<'a> {
    size: u32,
    font: Option<&'a FontVec>,
}

impl<'a> Rasterizer<'a> {
    pub fn new(size: u32) -> Self {
        Self { size, font: None }
    }

    pub fn with_font(mut self, font: Option<&'a FontVec>) -> Self {
        self.font = font;
        self
    }

    pub fn render(&self, canvas: &Canvas) -> RgbaImage {
        let mut img = RgbaImage::new(self.size, self.size);
        let mut skipped_text = 0usize;

        for command in canvas.commands() {
            match command {
                DrawCommand::FillRect { rect, paint } => self.fill_rect(&mut img, rect, paint),
                DrawCommand::StrokeLine {
                    segment,
                    width,
                    color,
                } => self.stroke_line(&mut img, segment, *width, color),
                DrawCommand::FillText {
                    origin,
                    text,
                    font_size,
                    color,
                } => match self.font {
                    Some(font) => self.fill_text(&mut img, font, *origin, text, *font_size, color),
                    None => skipped_text += 1,
                },
            }
        }

        if skipped_text > 0 {
            log::warn!(
                "No font available for the raster preview, skipped {} labels",
                skipped_text
            );
        }
        img
    }

    fn to_px(&self, v: f64) -> f64 {
        v * self.size as f64
    }

    fn pixel_span(&self, start: f64, len: f64) -> (u32, u32) {
        let max = self.size as f64;
        let lo = self.to_px(start).clamp(0.0, max).round() as u32;
        let hi = self.to_px(start + len).clamp(0.0, max).round() as u32;
        (lo, hi)
    }

    fn fill_rect(&self, img: &mut RgbaImage, rect: &Rect, paint: &Paint) {
        let (x0, x1) = self.pixel_span(rect.x, rect.width);
        let (y0, y1) = self.pixel_span(rect.y, rect.height);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        match paint {
            Paint::Solid(color) => {
                let area = PixelRect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0);
                draw_filled_rect_mut(img, area, color.to_pixel());
            }
            Paint::Gradient(gradient) => self.fill_gradient(img, gradient, (x0, x1), (y0, y1)),
        }
    }

    fn fill_gradient(
        &self,
        img: &mut RgbaImage,
        gradient: &LinearGradient,
        (x0, x1): (u32, u32),
        (y0, y1): (u32, u32),
    ) {
        let size = self.size as f64;
        for y in y0..y1 {
            for x in x0..x1 {
                // sample at the pixel center
                let p = Point::new((x as f64 + 0.5) / size, (y as f64 + 0.5) / size);
                let color = gradient.color_at(gradient.parameter_at(p));
                img.get_pixel_mut(x, y).blend(&color.to_pixel());
            }
        }
    }

    fn stroke_line(&self, img: &mut RgbaImage, segment: &LineSegment, width: f64, color: &Rgba) {
        let size = self.size as i64;
        let thickness = self.to_px(width).round().max(1.0) as i64;
        // keep boundary lines inside the image
        let place = |center: f64| -> i32 {
            let start = (self.to_px(center) - thickness as f64 / 2.0).round() as i64;
            start.clamp(0, (size - thickness).max(0)) as i32
        };

        let (from, to) = (segment.from, segment.to);
        if from.y == to.y {
            let (x0, x1) = self.pixel_span(from.x.min(to.x), (to.x - from.x).abs());
            if x1 > x0 {
                let area =
                    PixelRect::at(x0 as i32, place(from.y)).of_size(x1 - x0, thickness as u32);
                draw_filled_rect_mut(img, area, color.to_pixel());
            }
        } else if from.x == to.x {
            let (y0, y1) = self.pixel_span(from.y.min(to.y), (to.y - from.y).abs());
            if y1 > y0 {
                let area =
                    PixelRect::at(place(from.x), y0 as i32).of_size(thickness as u32, y1 - y0);
                draw_filled_rect_mut(img, area, color.to_pixel());
            }
        } else {
            draw_line_segment_mut(
                img,
                (self.to_px(from.x) as f32, self.to_px(from.y) as f32),
                (self.to_px(to.x) as f32, self.to_px(to.y) as f32),
                color.to_pixel(),
            );
        }
    }

    fn fill_text(
        &self,
        img: &mut RgbaImage,
        font: &FontVec,
        origin: Point,
        text: &str,
        font_size: f64,
        color: &Rgba,
    ) {
        let Some(units_per_em) = font.units_per_em() else {
            return;
        };
        // PxScale is ascent-to-descent height, not the em size
        let em_px = self.to_px(font_size) as f32;
        let scale = PxScale::from(em_px * font.height_unscaled() / units_per_em);
        let scaled = font.as_scaled(scale);

        let baseline = self.to_px(origin.y) as f32;
        let mut pen = self.to_px(origin.x) as f32;
        let mut previous = None;
        let base = color.to_pixel();
        let (width, height) = img.dimensions();

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                pen += scaled.kern(prev, id);
            }
            previous = Some(id);

            let glyph = id.with_scale_and_position(scale, point(pen, baseline));
            pen += scaled.h_advance(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    return;
                }
                let mut px = base;
                px[3] = (base[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
                img.get_pixel_mut(x as u32, y as u32).blend(&px);
            });
        }
    }
}

/// Rasterize `canvas` and write it as a PNG at `path`.
pub fn save_png(canvas: &Canvas, size: u32, font: Option<&FontVec>, path: &Path) -> Result<()> {
    let img = Rasterizer::new(size).with_font(font).render(canvas);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| RenderError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    output::write_bytes_atomic(path, &bytes)
}
