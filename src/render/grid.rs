use crate::models::Grid;
use crate::render::canvas::Canvas;

/// Stroke every line of `grid` across the unit square, horizontals first.
pub fn draw_square_grid(canvas: &mut Canvas, grid: &Grid) {
    for segment in grid.segments() {
        canvas.stroke_line(segment, grid.line_width, grid.color);
    }
}
