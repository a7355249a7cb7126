pub mod background;
pub mod canvas;
pub mod grid;
pub mod labels;
pub mod raster;
pub mod steps;
pub mod svg;
pub mod text;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::models::{BLACK, Grid, SUBGRID_GRAY};
use crate::output;
use crate::pipeline::Pipeline;
use crate::render::canvas::Canvas;
use crate::render::steps::{BackgroundStep, GridStep, LabelStep};
use crate::render::text::{BuiltinSansMetrics, FontFileMetrics, TextMeasure};
use crate::validation::ensure_positive;

/// Physical edge length of the document in user units
pub const SIDE_LENGTH: f64 = 16000.0;
/// Main grid stroke, physical units
pub const DIVISIONS_LINE_WIDTH: f64 = 16.0;
/// Sub-grid stroke, physical units
pub const SUBDIVISIONS_LINE_WIDTH: f64 = DIVISIONS_LINE_WIDTH / 4.0;
/// Label size as a fraction of the edge length
pub const LABEL_FONT_SIZE: f64 = 0.01;

/// Validated grid parameters for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub divisions: u32,
    pub subdivisions: u32,
    pub side_length: f64,
}

impl RenderConfig {
    /// Both counts must be positive and their product must fit in a `u32`.
    pub fn new(divisions: u32, subdivisions: u32) -> crate::error::Result<Self> {
        let divisions = ensure_positive(divisions)?;
        let subdivisions = ensure_positive(subdivisions)?;
        divisions
            .checked_mul(subdivisions)
            .ok_or_else(|| RenderError::invalid_argument(subdivisions))?;

        Ok(Self {
            divisions,
            subdivisions,
            side_length: SIDE_LENGTH,
        })
    }

    /// Line count of the fine grid
    pub fn fine_divisions(&self) -> u32 {
        // checked in `new`
        self.divisions * self.subdivisions
    }

    pub fn sub_grid(&self) -> Grid {
        Grid::new(
            self.fine_divisions(),
            SUBDIVISIONS_LINE_WIDTH / self.side_length,
            SUBGRID_GRAY,
        )
    }

    pub fn main_grid(&self) -> Grid {
        Grid::new(self.divisions, DIVISIONS_LINE_WIDTH / self.side_length, BLACK)
    }
}

/// Background, sub-grid, main grid, then labels
pub fn build_standard_pipeline(config: &RenderConfig) -> Pipeline {
    Pipeline::new()
        .add_step(Box::new(BackgroundStep))
        .add_step(Box::new(GridStep {
            name: "Sub Grid",
            grid: config.sub_grid(),
        }))
        .add_step(Box::new(GridStep {
            name: "Main Grid",
            grid: config.main_grid(),
        }))
        .add_step(Box::new(LabelStep {
            divisions: config.divisions,
            font_size: LABEL_FONT_SIZE,
            color: BLACK,
        }))
}

/// Checkerboard orchestrator
pub struct CheckerboardRenderer {
    config: RenderConfig,
    font: Option<FontFileMetrics>,
    debug: Option<(PathBuf, u32)>,
}

impl CheckerboardRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            font: None,
            debug: None,
        }
    }

    /// Measure labels with a font file instead of the built-in metrics
    pub fn with_font(mut self, font: FontFileMetrics) -> Self {
        self.font = Some(font);
        self
    }

    /// Save a PNG snapshot after each layer into `dir`
    pub fn with_debug(mut self, dir: PathBuf, snapshot_size: u32) -> Self {
        self.debug = Some((dir, snapshot_size));
        self
    }

    fn measurer(&self) -> Box<dyn TextMeasure> {
        match &self.font {
            Some(font) => Box::new(font.clone()),
            None => Box::new(BuiltinSansMetrics),
        }
    }

    /// Draw every layer onto a fresh canvas
    pub fn render(&self) -> Result<Canvas> {
        log::info!(
            "Rendering {0}x{0} checkerboard with {1} subdivisions",
            self.config.divisions,
            self.config.subdivisions
        );

        let mut pipeline = build_standard_pipeline(&self.config)
            .with_font(self.font.as_ref().map(FontFileMetrics::font));
        if let Some((dir, size)) = &self.debug {
            pipeline = pipeline.with_debug(dir.clone(), *size)?;
        }

        let mut canvas = Canvas::new(self.config.side_length, self.measurer());
        pipeline.run(&mut canvas)?;
        Ok(canvas)
    }

    /// Render and write the SVG document to `path`
    pub fn write_svg(&self, path: &Path) -> Result<Canvas> {
        let canvas = self.render()?;
        save_svg(&canvas, path)?;
        Ok(canvas)
    }

    /// Write a raster preview of an already rendered canvas
    pub fn write_preview(&self, canvas: &Canvas, path: &Path, size: u32) -> Result<()> {
        let font = self.font.as_ref().map(FontFileMetrics::font);
        raster::save_png(canvas, size, font.as_deref(), path)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        log::info!("Wrote preview {}", path.display());
        Ok(())
    }
}

/// Serialize `canvas` to `path` atomically
pub fn save_svg(canvas: &Canvas, path: &Path) -> crate::error::Result<()> {
    output::write_atomic(path, |w| svg::write_svg(canvas, w))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
