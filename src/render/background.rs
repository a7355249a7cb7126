use crate::error::Result;
use crate::models::{BACKGROUND_STOPS, LinearGradient, Point, Rect};
use crate::render::canvas::{Canvas, Paint};

/// Diagonal (0,0)→(1,1) gradient through the fixed background stops
pub fn background_gradient() -> Result<LinearGradient> {
    let mut gradient = LinearGradient::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    for stop in &BACKGROUND_STOPS {
        gradient.add_stop(stop.offset, stop.color)?;
    }
    Ok(gradient)
}

/// Fill the whole unit square with the background gradient
pub fn paint_background(canvas: &mut Canvas) -> Result<()> {
    let gradient = background_gradient()?;
    canvas.fill_rect(Rect::UNIT, Paint::Gradient(gradient));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::DrawCommand;
    use crate::render::text::BuiltinSansMetrics;

    #[test]
    fn fills_unit_square_with_five_stops() {
        let mut canvas = Canvas::new(16000.0, Box::new(BuiltinSansMetrics));
        paint_background(&mut canvas).unwrap();

        match &canvas.commands()[..] {
            [DrawCommand::FillRect { rect, paint: Paint::Gradient(g) }] => {
                assert_eq!(*rect, Rect::UNIT);
                assert_eq!(g.stops().len(), 5);
                assert_eq!(g.start, Point::new(0.0, 0.0));
                assert_eq!(g.end, Point::new(1.0, 1.0));
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn gradient_runs_dark_blue_to_yellow_green() {
        let g = background_gradient().unwrap();
        let start = g.color_at(0.0);
        let end = g.color_at(1.0);
        assert!(start.b > start.g && start.b > start.r);
        assert!(end.g > end.r && end.g > end.b);
    }
}
