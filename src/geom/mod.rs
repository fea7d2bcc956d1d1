pub mod circle;
pub mod position;
pub mod position_vector;
pub mod smooth;

pub use self::circle::{angle_lookup, circle_coords, vertex_circle, CIRCLE_RESOLUTION};
pub use self::position::{Position, POSITION_EPS};
pub use self::position_vector::{side_offset, PositionVector};
pub use self::smooth::{bezier, compute_smooth_shape};
