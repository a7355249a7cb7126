mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from checkerboard for tests
pub use checkerboard::{
    Canvas, CheckerboardRenderer, DrawCommand, Paint, RenderConfig, RenderError,
};
