pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod validation;

pub use error::RenderError;
pub use models::{Grid, Label, LinearGradient, Point, Rgba, cell_labels};
pub use pipeline::{DebugConfig, LayerStep, Pipeline, PipelineContext};
pub use render::canvas::{Canvas, DrawCommand, Paint};
pub use render::text::{BuiltinSansMetrics, FontFileMetrics, TextExtents, TextMeasure};
pub use render::{CheckerboardRenderer, RenderConfig, build_standard_pipeline, save_svg};
pub use validation::{MAX_PREVIEW_SIZE, positive_integer, preview_size};
