use crate::draw::heading;
use crate::geom::{Position, PositionVector, POSITION_EPS};

/// A shape together with the rotation and length of each of its pieces.
///
/// `rotations[i]` and `lengths[i]` describe the piece from `shape[i]` to
/// `shape[i + 1]`. Rotations are box-line headings in degrees, lengths are 2D.
/// Single-point geometries (see `update_single_point` and
/// `update_position_along_shape`) carry one rotation and no lengths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentedGeometry {
    shape: PositionVector,
    rotations: Vec<f64>,
    lengths: Vec<f64>,
}

impl SegmentedGeometry {
    pub fn new() -> SegmentedGeometry {
        Default::default()
    }

    pub fn from_shape(shape: PositionVector) -> SegmentedGeometry {
        let mut geometry = SegmentedGeometry::new();
        geometry.update_whole_shape(shape);
        geometry
    }

    /// Takes precomputed caches as they are.
    pub fn from_parts(shape: PositionVector, rotations: Vec<f64>, lengths: Vec<f64>) -> SegmentedGeometry {
        SegmentedGeometry {
            shape,
            rotations,
            lengths,
        }
    }

    pub fn shape(&self) -> &PositionVector {
        &self.shape
    }

    pub fn rotations(&self) -> &[f64] {
        &self.rotations
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn update_whole_shape(&mut self, shape: PositionVector) {
        self.shape = shape;
        self.recompute_caches();
    }

    pub fn update_single_point(&mut self, position: Position, rotation: f64) {
        self.clear();
        self.shape.push(position);
        self.rotations.push(rotation);
    }

    /// Moves `shape` sideways by `lateral_offset` and keeps the part between
    /// `start_offset` and `end_offset`, both clamped into the shape.
    pub fn update_trimmed_shape(&mut self, shape: &PositionVector, start_offset: f64, end_offset: f64, lateral_offset: f64) {
        let mut moved = shape.clone();
        moved.move_to_side(lateral_offset);
        let (start, end) = clamp_trim_range(moved.length_2d(), Some(start_offset), Some(end_offset));
        self.update_whole_shape(moved.subpart_2d(start, end));
    }

    /// Trims `shape` when at least one offset is given and then connects the
    /// result to the optional extra positions. Without offsets the shape is
    /// used untouched and the extra positions are ignored.
    pub fn update_trimmed_shape_with_extensions(
        &mut self,
        shape: &PositionVector,
        start_offset: Option<f64>,
        end_offset: Option<f64>,
        extra_first: Option<Position>,
        extra_last: Option<Position>,
    ) {
        if start_offset.is_none() && end_offset.is_none() {
            self.update_whole_shape(shape.clone());
            return;
        }

        let (start, end) = clamp_trim_range(shape.length_2d(), start_offset, end_offset);
        let mut trimmed = shape.subpart_2d(start, end);
        if let Some(first) = extra_first {
            trimmed.push_front_no_double_pos(first);
        }
        if let Some(last) = extra_last {
            trimmed.push_back_no_double_pos(last);
        }
        self.update_whole_shape(trimmed);
    }

    /// Single point at `offset` along `shape` (clamped into `[0, length]`),
    /// moved sideways by `lateral_offset`. The rotation is the direction of
    /// `shape` there, in degrees counter-clockwise from +x.
    pub fn update_position_along_shape(&mut self, shape: &PositionVector, offset: f64, lateral_offset: f64) {
        self.clear();
        if shape.is_empty() {
            return;
        }
        let offset = offset.max(0.0).min(shape.length_2d());
        self.shape.push(shape.position_at_offset(offset, lateral_offset));
        self.rotations.push(shape.rotation_degree_at_offset(offset));
    }

    pub fn scale(&mut self, factor: f64) {
        self.shape.scale_relative(factor);
        for length in self.lengths.iter_mut() {
            *length *= factor;
        }
    }

    fn clear(&mut self) {
        self.shape.clear();
        self.rotations.clear();
        self.lengths.clear();
    }

    fn recompute_caches(&mut self) {
        let (rotations, lengths) = rotations_and_lengths(&self.shape);
        self.rotations = rotations;
        self.lengths = lengths;
    }
}

/// Heading and 2D length of every piece of `shape`.
pub fn rotations_and_lengths(shape: &PositionVector) -> (Vec<f64>, Vec<f64>) {
    shape
        .windows(2)
        .map(|w| (heading(&w[0], &w[1]), w[0].distance_to_2d(&w[1])))
        .unzip()
}

/// Clamps a trim range into a shape of the given length: absent offsets
/// stand for the shape ends, the start stays `POSITION_EPS` before the end of
/// the shape and the end is pushed `POSITION_EPS` past the start if needed.
///
/// # Examples
/// ```
/// use netgeom::geometry::segmented::clamp_trim_range;
/// assert_eq!(clamp_trim_range(100.0, Some(-5.0), Some(200.0)), (0.0, 100.0));
/// assert_eq!(clamp_trim_range(100.0, None, Some(40.0)), (0.0, 40.0));
/// let (start, end) = clamp_trim_range(100.0, Some(60.0), Some(20.0));
/// assert!(end > start);
/// ```
pub fn clamp_trim_range(length: f64, start: Option<f64>, end: Option<f64>) -> (f64, f64) {
    let mut start = start.unwrap_or(0.0).max(0.0);
    let mut end = match end {
        Some(end) if end >= 0.0 => end,
        _ => length,
    };
    if start > length - POSITION_EPS {
        start = (length - POSITION_EPS).max(0.0);
    }
    if end > length {
        end = length;
    }
    if end <= start {
        end = start + POSITION_EPS;
    }
    (start, end)
}
