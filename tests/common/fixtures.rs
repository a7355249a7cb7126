use checkerboard::{Canvas, CheckerboardRenderer, DrawCommand, RenderConfig};
use std::path::PathBuf;

/// Renders a checkerboard in memory with the built-in font metrics.
pub fn render(divisions: u32, subdivisions: u32) -> Canvas {
    let config = RenderConfig::new(divisions, subdivisions).expect("Invalid test config");
    CheckerboardRenderer::new(config)
        .render()
        .expect("Failed to render checkerboard")
}

/// Renders into a temporary directory and returns the SVG path.
/// The directory must be kept alive while the file is used.
pub fn render_to_file(divisions: u32, subdivisions: u32) -> (PathBuf, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("checkerboard.svg");
    let config = RenderConfig::new(divisions, subdivisions).expect("Invalid test config");
    CheckerboardRenderer::new(config)
        .write_svg(&path)
        .expect("Failed to write checkerboard");
    (path, dir)
}

/// Stroke widths and positions of every line, split into (horizontal, vertical)
pub fn line_positions(canvas: &Canvas, width: f64) -> (Vec<f64>, Vec<f64>) {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for (segment, w, _) in canvas.lines() {
        if (w - width).abs() > 1e-12 {
            continue;
        }
        if segment.from.y == segment.to.y {
            horizontal.push(segment.from.y);
        } else {
            vertical.push(segment.from.x);
        }
    }
    (horizontal, vertical)
}

/// Index of the first command of each kind: (rect, line, text)
pub fn first_indices(canvas: &Canvas) -> (Option<usize>, Option<usize>, Option<usize>) {
    let commands = canvas.commands();
    let find = |pred: fn(&DrawCommand) -> bool| commands.iter().position(pred);
    (
        find(|c| matches!(c, DrawCommand::FillRect { .. })),
        find(|c| matches!(c, DrawCommand::StrokeLine { .. })),
        find(|c| matches!(c, DrawCommand::FillText { .. })),
    )
}

pub const MAIN_WIDTH: f64 = 16.0 / 16000.0;
pub const SUB_WIDTH: f64 = 4.0 / 16000.0;
