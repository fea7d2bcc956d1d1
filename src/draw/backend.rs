use crate::color::Color;
use crate::geom::{Position, PositionVector};

/// Drawing primitives provided by the GUI layer.
///
/// The model follows an immediate-mode scene graph: a current color, a
/// transformation stack and primitives drawn relative to it. Rotations are
/// in degrees, counter-clockwise. A box line starts at `beg` and extends
/// `length` units in the heading `rotation` (0 points to -y, 90 to +x),
/// `width` to either side and shifted sideways by `offset`.
pub trait DrawingBackend {
    fn set_color(&mut self, color: &Color);
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn translate(&mut self, x: f64, y: f64, z: f64);
    fn rotate(&mut self, degrees: f64);
    /// Filled circle around the current origin.
    fn draw_filled_circle(&mut self, radius: f64, steps: usize);
    fn draw_box_line(&mut self, beg: &Position, rotation: f64, length: f64, width: f64, offset: f64);
    /// Thin line through all positions.
    fn draw_line(&mut self, shape: &PositionVector);
    fn draw_text(&mut self, text: &str, pos: &Position, layer: f64, size: f64, color: &Color);
    /// Triangle whose tip sits on the segment `p1 -> p2`, `extra_offset` before `p2`.
    fn draw_triangle_at_end(&mut self, p1: &Position, p2: &Position, length: f64, width: f64, extra_offset: f64);

    /// Box lines for a shape with precomputed rotations and lengths.
    fn draw_box_lines(&mut self, shape: &PositionVector, rotations: &[f64], lengths: &[f64], width: f64) {
        for (idx, (rotation, length)) in rotations.iter().zip(lengths.iter()).enumerate() {
            if let Some(beg) = shape.get(idx) {
                self.draw_box_line(beg, *rotation, *length, width, 0.0);
            }
        }
    }

    /// Like `draw_box_lines`, with one color per piece. Pieces without a color
    /// of their own reuse the last one.
    fn draw_box_lines_colored(
        &mut self,
        shape: &PositionVector,
        rotations: &[f64],
        lengths: &[f64],
        colors: &[Color],
        width: f64,
    ) {
        for (idx, (rotation, length)) in rotations.iter().zip(lengths.iter()).enumerate() {
            if let Some(color) = colors.get(idx).or_else(|| colors.last()) {
                self.set_color(color);
            }
            if let Some(beg) = shape.get(idx) {
                self.draw_box_line(beg, *rotation, *length, width, 0.0);
            }
        }
    }

    /// Box lines along a shape, computing rotations and lengths on the fly.
    fn draw_box_lines_path(&mut self, shape: &PositionVector, width: f64) {
        for w in shape.windows(2) {
            self.draw_box_line(&w[0], heading(&w[0], &w[1]), w[0].distance_to_2d(&w[1]), width, 0.0);
        }
    }
}

/// Heading in degrees from `first` to `second`, in `(-180, 180]`, as used by box lines.
///
/// # Examples
/// ```
/// use netgeom::draw::heading;
/// use netgeom::geom::Position;
/// let origin = Position::new(0.0, 0.0);
/// assert_eq!(heading(&origin, &Position::new(10.0, 0.0)), 90.0);
/// assert_eq!(heading(&origin, &Position::new(0.0, -10.0)), 0.0);
/// assert_eq!(heading(&origin, &Position::new(0.0, 10.0)), 180.0);
/// ```
pub fn heading(first: &Position, second: &Position) -> f64 {
    // Adding +0.0 turns -0.0 into +0.0, otherwise straight up would come out as -180.
    let dx = (second.x - first.x) + 0.0;
    dx.atan2(first.y - second.y).to_degrees()
}
