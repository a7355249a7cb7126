use anyhow::Result;

use crate::models::{Grid, Rgba, cell_labels};
use crate::pipeline::{LayerStep, PipelineContext};
use crate::render::background::paint_background;
use crate::render::canvas::Canvas;
use crate::render::grid::draw_square_grid;
use crate::render::labels::draw_text_centered;

/// Paint the diagonal gradient background
pub struct BackgroundStep;

impl LayerStep for BackgroundStep {
    fn draw(&self, canvas: &mut Canvas, _context: &PipelineContext) -> Result<()> {
        paint_background(canvas)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "Background"
    }
}

/// Stroke one square grid
pub struct GridStep {
    pub name: &'static str,
    pub grid: Grid,
}

impl LayerStep for GridStep {
    fn draw(&self, canvas: &mut Canvas, _context: &PipelineContext) -> Result<()> {
        draw_square_grid(canvas, &self.grid);
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Label every coarse cell with its "row,col" index
pub struct LabelStep {
    pub divisions: u32,
    pub font_size: f64,
    pub color: Rgba,
}

impl LayerStep for LabelStep {
    fn draw(&self, canvas: &mut Canvas, _context: &PipelineContext) -> Result<()> {
        for label in cell_labels(self.divisions) {
            draw_text_centered(canvas, label.center, &label.text(), self.font_size, self.color);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Cell Labels"
    }
}
