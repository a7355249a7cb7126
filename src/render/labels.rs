use crate::models::{Point, Rgba};
use crate::render::canvas::Canvas;

/// Paint `text` so the center of its ink box lands on `center`.
///
/// Returns the origin the text was painted at.
pub fn draw_text_centered(
    canvas: &mut Canvas,
    center: Point,
    text: &str,
    font_size: f64,
    color: Rgba,
) -> Point {
    let extents = canvas.text_extents(text, font_size);
    let origin = Point::new(
        center.x - (extents.width / 2.0 + extents.x_bearing),
        center.y - (extents.height / 2.0 + extents.y_bearing),
    );
    canvas.fill_text(origin, text, font_size, color);
    origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BLACK;
    use crate::render::text::BuiltinSansMetrics;

    #[test]
    fn ink_center_lands_on_target() {
        let mut canvas = Canvas::new(16000.0, Box::new(BuiltinSansMetrics));
        let target = Point::new(0.25, 0.75);
        let origin = draw_text_centered(&mut canvas, target, "12,7", 0.01, BLACK);

        let ext = canvas.text_extents("12,7", 0.01);
        let ink_cx = origin.x + ext.x_bearing + ext.width / 2.0;
        let ink_cy = origin.y + ext.y_bearing + ext.height / 2.0;
        assert!((ink_cx - target.x).abs() < 1e-12);
        assert!((ink_cy - target.y).abs() < 1e-12);
        // baseline sits below the center, text starts left of it
        assert!(origin.y > target.y);
        assert!(origin.x < target.x);
    }

    #[test]
    fn empty_text_is_painted_at_target() {
        let mut canvas = Canvas::new(16000.0, Box::new(BuiltinSansMetrics));
        let origin = draw_text_centered(&mut canvas, Point::new(0.5, 0.5), "", 0.01, BLACK);
        assert_eq!(origin, Point::new(0.5, 0.5));
        assert_eq!(canvas.texts().count(), 1);
    }
}
