use std::fmt;

use crate::models::{LineSegment, LinearGradient, Point, Rect, Rgba};
use crate::render::text::{TextExtents, TextMeasure};

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient(LinearGradient),
}

/// A single paint operation in canvas unit space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    StrokeLine {
        segment: LineSegment,
        width: f64,
        color: Rgba,
    },
    FillText {
        origin: Point,
        text: String,
        font_size: f64,
        color: Rgba,
    },
}

/// Drawing surface in normalized (0,0)-(1,1) coordinates.
///
/// Commands are recorded in paint order; later commands cover earlier ones.
/// `side_length` is the physical extent the unit square maps onto.
pub struct Canvas {
    side_length: f64,
    commands: Vec<DrawCommand>,
    measurer: Box<dyn TextMeasure>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("side_length", &self.side_length)
            .field("commands", &self.commands.len())
            .field("family", &self.measurer.family())
            .finish()
    }
}

impl Canvas {
    pub fn new(side_length: f64, measurer: Box<dyn TextMeasure>) -> Self {
        Self {
            side_length,
            commands: Vec::new(),
            measurer,
        }
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn font_family(&self) -> &str {
        self.measurer.family()
    }

    pub fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(DrawCommand::FillRect { rect, paint });
    }

    pub fn stroke_line(&mut self, segment: LineSegment, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            segment,
            width,
            color,
        });
    }

    pub fn fill_text(
        &mut self,
        origin: Point,
        text: impl Into<String>,
        font_size: f64,
        color: Rgba,
    ) {
        self.commands.push(DrawCommand::FillText {
            origin,
            text: text.into(),
            font_size,
            color,
        });
    }

    /// Measure `text` in unit space.
    ///
    /// Glyph metrics are evaluated at the physical size and scaled back, so
    /// the result matches what the written document shows.
    pub fn text_extents(&self, text: &str, font_size: f64) -> TextExtents {
        let physical = self.measurer.text_extents(text, font_size * self.side_length);
        let s = 1.0 / self.side_length;
        TextExtents {
            x_bearing: physical.x_bearing * s,
            y_bearing: physical.y_bearing * s,
            width: physical.width * s,
            height: physical.height * s,
            x_advance: physical.x_advance * s,
            y_advance: physical.y_advance * s,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = (&LineSegment, f64, &Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeLine {
                segment,
                width,
                color,
            } => Some((segment, *width, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&Point, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { origin, text, .. } => Some((origin, text.as_str())),
            _ => None,
        })
    }
}
