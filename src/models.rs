use crate::error::{RenderError, Result};

/// Color with every channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation towards `other`, `t` in [0, 1]
    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to an 8-bit image pixel
    pub fn to_pixel(&self) -> image::Rgba<u8> {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        image::Rgba([channel(self.r), channel(self.g), channel(self.b), channel(self.a)])
    }
}

pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
pub const SUBGRID_GRAY: Rgba = Rgba::new(0.3, 0.3, 0.3, 1.0);

/// Background stops, dark blue through cyan and teal to yellow-green.
pub const BACKGROUND_STOPS: [GradientStop; 5] = [
    GradientStop::new(0.0, Rgba::new(0.059, 0.294, 0.643, 1.0)),
    GradientStop::new(0.25, Rgba::new(0.0, 0.502, 0.831, 1.0)),
    GradientStop::new(0.5, Rgba::new(0.0, 0.678, 0.769, 1.0)),
    GradientStop::new(0.75, Rgba::new(0.0, 0.827, 0.498, 1.0)),
    GradientStop::new(1.0, Rgba::new(0.659, 0.922, 0.071, 1.0)),
];

/// Point in canvas unit space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The whole canvas, (0,0)-(1,1)
    pub const UNIT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient between two points; stops are kept in increasing order
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Append a stop. Offsets must lie in [0, 1] and be strictly greater
    /// than the previous stop.
    pub fn add_stop(&mut self, offset: f64, color: Rgba) -> Result<()> {
        let in_range = (0.0..=1.0).contains(&offset);
        let increasing = self.stops.last().is_none_or(|last| offset > last.offset);
        if !in_range || !increasing {
            return Err(RenderError::InvalidGradientStop { offset });
        }
        self.stops.push(GradientStop::new(offset, color));
        Ok(())
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Gradient parameter of `p`: its projection onto start→end, clamped.
    pub fn parameter_at(&self, p: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return 0.0;
        }
        (((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0)
    }

    /// Color at gradient parameter `t`, padded with the end stops.
    pub fn color_at(&self, t: f64) -> Rgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgba::new(0.0, 0.0, 0.0, 0.0),
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                return lo.color.lerp(&hi.color, (t - lo.offset) / span);
            }
        }
        last.color
    }
}

/// A straight stroke between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

/// Square grid of `divisions` cells per side across the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub divisions: u32,
    pub line_width: f64,
    pub color: Rgba,
}

impl Grid {
    pub fn new(divisions: u32, line_width: f64, color: Rgba) -> Self {
        Self {
            divisions,
            line_width,
            color,
        }
    }

    /// Line positions `k / n` for `k` in `0..=n`, boundaries included.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        let step = 1.0 / self.divisions as f64;
        (0..=self.divisions).map(move |k| k as f64 * step)
    }

    /// Horizontal lines first, then vertical lines.
    pub fn segments(&self) -> Vec<LineSegment> {
        let horizontal = self.positions().map(|y| LineSegment {
            from: Point::new(0.0, y),
            to: Point::new(1.0, y),
        });
        let vertical = self.positions().map(|x| LineSegment {
            from: Point::new(x, 0.0),
            to: Point::new(x, 1.0),
        });
        horizontal.chain(vertical).collect()
    }
}

/// Index label of one coarse cell
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub row: u32,
    pub col: u32,
    pub center: Point,
}

impl Label {
    pub fn text(&self) -> String {
        format!("{},{}", self.row, self.col)
    }
}

/// One label per coarse cell, row-major: `(0,0), (0,1), ..., (d-1,d-1)`.
///
/// The cell `(i, j)` is centered at `((i + 0.5) / d, (j + 0.5) / d)`.
pub fn cell_labels(divisions: u32) -> Vec<Label> {
    let box_size = 1.0 / divisions as f64;
    let mut labels = Vec::with_capacity((divisions as usize).pow(2));
    for i in 0..divisions {
        for j in 0..divisions {
            labels.push(Label {
                row: i,
                col: j,
                center: Point::new(
                    i as f64 * box_size + box_size / 2.0,
                    j as f64 * box_size + box_size / 2.0,
                ),
            });
        }
    }
    labels
}
