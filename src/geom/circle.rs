use crate::geom::position::Position;
use crate::geom::position_vector::PositionVector;

use std::sync::OnceLock;

/// Lookup table entries per degree.
pub const CIRCLE_RESOLUTION: f64 = 10.0;

static CIRCLE_COORDS: OnceLock<Vec<Position>> = OnceLock::new();

/// Unit circle sampled every `1 / CIRCLE_RESOLUTION` degrees, starting at
/// (0, 1) and going clockwise. The last entry repeats the first one.
pub fn circle_coords() -> &'static [Position] {
    CIRCLE_COORDS.get_or_init(|| {
        let steps = (360.0 * CIRCLE_RESOLUTION) as usize;
        (0..=steps)
            .map(|idx| {
                let angle = (idx as f64 / CIRCLE_RESOLUTION).to_radians();
                Position::new(angle.sin(), angle.cos())
            })
            .collect()
    })
}

/// Index into `circle_coords()` for an angle in degrees (any sign, any turn count).
///
/// # Examples
/// ```
/// use netgeom::geom::angle_lookup;
/// assert_eq!(angle_lookup(0.0), 0);
/// assert_eq!(angle_lookup(90.0), 900);
/// assert_eq!(angle_lookup(360.0), 0);
/// assert_eq!(angle_lookup(-90.0), 2700);
/// ```
pub fn angle_lookup(angle_degrees: f64) -> usize {
    let coord_count = (circle_coords().len() - 1) as i64;
    let idx = (angle_degrees * CIRCLE_RESOLUTION + 0.5).floor() as i64;
    idx.rem_euclid(coord_count) as usize
}

/// Regular polygon of `steps` sides around `center`. The result has
/// `steps + 1` positions, the last one closing the ring.
pub fn vertex_circle(center: &Position, radius: f64, steps: usize) -> PositionVector {
    let coords = circle_coords();
    let steps = steps.max(1);
    let increment = 360.0 / steps as f64;

    let mut circle = (0..=steps)
        .map(|idx| {
            let vertex = coords[angle_lookup(idx as f64 * increment)];
            Position::new(vertex.x * radius, vertex.y * radius)
        })
        .collect::<PositionVector>();
    circle.add_position(center);
    circle
}
