use ab_glyph::FontVec;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::render::canvas::Canvas;
use crate::render::raster;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
    /// Edge length of each snapshot in pixels
    pub snapshot_size: u32,
}

/// Context available to all layer steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
    /// Glyph outlines for labels in debug snapshots
    pub font: Option<Arc<FontVec>>,
}

/// One drawing layer. Layers run in order and paint over earlier ones.
pub trait LayerStep {
    fn draw(&self, canvas: &mut Canvas, context: &PipelineContext) -> Result<()>;

    /// Human-readable name, used in logs and snapshot file names
    fn name(&self) -> &str;
}

/// Composable layer pipeline builder
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn LayerStep>>,
    context: PipelineContext,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable debug snapshots in `output_dir`, which must be empty or absent
    pub fn with_debug(mut self, output_dir: PathBuf, snapshot_size: u32) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir).with_context(|| {
                format!("Failed to read debug directory {}", output_dir.display())
            })?;
            if entries.count() > 0 {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir).with_context(|| {
                format!("Failed to create debug directory {}", output_dir.display())
            })?;
        }

        self.context.debug = Some(DebugConfig {
            output_dir,
            snapshot_size,
        });
        Ok(self)
    }

    pub fn with_font(mut self, font: Option<Arc<FontVec>>) -> Self {
        self.context.font = font;
        self
    }

    pub fn add_step(mut self, step: Box<dyn LayerStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every layer against `canvas`
    pub fn run(&self, canvas: &mut Canvas) -> Result<()> {
        self.run_partial(canvas, self.steps.len())
    }

    /// Run only the first `num_steps` layers
    pub fn run_partial(&self, canvas: &mut Canvas, num_steps: usize) -> Result<()> {
        for (idx, step) in self.steps.iter().take(num_steps).enumerate() {
            let before = canvas.commands().len();
            step.draw(canvas, &self.context)
                .with_context(|| format!("Layer '{}' failed", step.name()))?;
            log::debug!(
                "Layer {}: {} ({} draw commands)",
                idx + 1,
                step.name(),
                canvas.commands().len() - before
            );

            self.save_snapshot(canvas, idx, step.name())?;
        }
        Ok(())
    }

    fn save_snapshot(&self, canvas: &Canvas, idx: usize, name: &str) -> Result<()> {
        let Some(debug) = &self.context.debug else {
            return Ok(());
        };

        let filename = format!("{:02}_{}.png", idx + 1, name.to_lowercase().replace(' ', "_"));
        let path = debug.output_dir.join(&filename);
        raster::save_png(canvas, debug.snapshot_size, self.context.font.as_deref(), &path)?;
        log::debug!("  Debug: saved {}", filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BLACK, Point};
    use crate::render::text::BuiltinSansMetrics;

    struct Dot(&'static str);

    impl LayerStep for Dot {
        fn draw(&self, canvas: &mut Canvas, _context: &PipelineContext) -> Result<()> {
            canvas.fill_text(Point::new(0.5, 0.5), self.0, 0.01, BLACK);
            Ok(())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    struct Failing;

    impl LayerStep for Failing {
        fn draw(&self, _canvas: &mut Canvas, _context: &PipelineContext) -> Result<()> {
            anyhow::bail!("nope")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    fn canvas() -> Canvas {
        Canvas::new(16000.0, Box::new(BuiltinSansMetrics))
    }

    #[test]
    fn runs_steps_in_order() -> Result<()> {
        let pipeline = Pipeline::new()
            .add_step(Box::new(Dot("a")))
            .add_step(Box::new(Dot("b")));
        assert_eq!(pipeline.step_names(), vec!["a", "b"]);

        let mut c = canvas();
        pipeline.run(&mut c)?;
        let texts: Vec<&str> = c.texts().map(|(_, t)| t).collect();
        assert_eq!(texts, vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn run_partial_stops_early() -> Result<()> {
        let pipeline = Pipeline::new()
            .add_step(Box::new(Dot("a")))
            .add_step(Box::new(Dot("b")));
        let mut c = canvas();
        pipeline.run_partial(&mut c, 1)?;
        assert_eq!(c.texts().count(), 1);
        Ok(())
    }

    #[test]
    fn failure_names_the_layer() {
        let pipeline = Pipeline::new().add_step(Box::new(Failing));
        let err = pipeline.run(&mut canvas()).unwrap_err();
        assert!(format!("{:#}", err).contains("Layer 'Failing' failed"));
    }

    #[test]
    fn debug_snapshots_one_file_per_layer() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let debug_dir = dir.path().join("debug");
        let pipeline = Pipeline::new()
            .with_debug(debug_dir.clone(), 16)?
            .add_step(Box::new(Dot("First Layer")))
            .add_step(Box::new(Dot("Second")));
        pipeline.run(&mut canvas())?;

        assert!(debug_dir.join("01_first_layer.png").exists());
        assert!(debug_dir.join("02_second.png").exists());
        Ok(())
    }

    #[test]
    fn debug_directory_must_be_empty() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("stale.png"), b"x")?;
        assert!(Pipeline::new().with_debug(dir.path().to_path_buf(), 16).is_err());
        Ok(())
    }
}
