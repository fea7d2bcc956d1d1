use crate::geom::position::{Position, POSITION_EPS};

use std::iter::FromIterator;
use std::ops::Deref;

/// An ordered sequence of positions forming connected line segments.
///
/// All offsets are 2D arc lengths measured from the first position. Lateral
/// offsets are perpendicular to the local direction; positive values move to
/// the left of the direction of travel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionVector {
    positions: Vec<Position>,
}

impl PositionVector {
    pub fn new() -> PositionVector {
        Default::default()
    }

    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn push_back_no_double_pos(&mut self, position: Position) {
        match self.positions.last() {
            Some(last) if last.almost_same(&position) => {}
            _ => self.positions.push(position),
        }
    }

    pub fn push_front_no_double_pos(&mut self, position: Position) {
        match self.positions.first() {
            Some(first) if first.almost_same(&position) => {}
            _ => self.positions.insert(0, position),
        }
    }

    /// # Examples
    /// ```
    /// use netgeom::geom::PositionVector;
    /// let shape = PositionVector::from(vec![(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
    /// assert_eq!(shape.length_2d(), 11.0);
    /// ```
    pub fn length_2d(&self) -> f64 {
        self.positions
            .windows(2)
            .map(|w| w[0].distance_to_2d(&w[1]))
            .sum()
    }

    pub fn position_at_offset_2d(&self, offset: f64) -> Position {
        self.position_at_offset(offset, 0.0)
    }

    /// Position at `offset` along the polyline, moved `lateral_offset` to the side.
    /// Offsets outside of `[0, length]` are clamped to the nearest end.
    /// An empty polyline yields the origin.
    pub fn position_at_offset(&self, offset: f64, lateral_offset: f64) -> Position {
        let (first, last) = match (self.positions.first(), self.positions.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Position::default(),
        };
        if self.positions.len() == 1 {
            return first;
        }

        let offset = offset.max(0.0);
        let mut seen = 0.0;
        let mut last_side = Position::default();
        for w in self.positions.windows(2) {
            let dist = w[0].distance_to_2d(&w[1]);
            if dist == 0.0 {
                continue;
            }
            let side = side_offset(&w[0], &w[1], lateral_offset).unwrap_or_default();
            if seen + dist >= offset {
                let along = (offset - seen).max(0.0) / dist;
                return w[0] + (w[1] - w[0]) * along + side;
            }
            seen += dist;
            last_side = side;
        }
        last + last_side
    }

    /// Direction (radians, counter-clockwise from +x) of the segment at `offset`.
    pub fn rotation_at_offset(&self, offset: f64) -> f64 {
        let mut seen = 0.0;
        let mut rotation = 0.0;
        for w in self.positions.windows(2) {
            let dist = w[0].distance_to_2d(&w[1]);
            if dist == 0.0 {
                continue;
            }
            rotation = w[0].angle_to_2d(&w[1]);
            seen += dist;
            if seen >= offset {
                break;
            }
        }
        rotation
    }

    pub fn rotation_degree_at_offset(&self, offset: f64) -> f64 {
        self.rotation_at_offset(offset).to_degrees()
    }

    /// The part of the polyline between two 2D offsets.
    pub fn subpart_2d(&self, begin: f64, end: f64) -> PositionVector {
        if self.positions.len() < 2 {
            return self.clone();
        }
        let length = self.length_2d();
        let begin_pos = if begin > POSITION_EPS {
            self.position_at_offset_2d(begin)
        } else {
            self.positions[0]
        };
        let end_pos = if end < length - POSITION_EPS {
            self.position_at_offset_2d(end)
        } else {
            self.positions[self.positions.len() - 1]
        };

        let mut result = PositionVector::new();
        result.push(begin_pos);
        let mut seen = 0.0;
        for w in self.positions.windows(2) {
            seen += w[0].distance_to_2d(&w[1]);
            if seen > begin && seen < end {
                result.push_back_no_double_pos(w[1]);
            }
        }
        result.push_back_no_double_pos(end_pos);
        if result.len() == 1 {
            result.push(end_pos);
        }
        result
    }

    /// Splits the polyline into pieces of (nearly) equal length not exceeding
    /// `max_length`. The first and last positions are kept exactly.
    pub fn resample(&self, max_length: f64) -> PositionVector {
        let length = self.length_2d();
        if max_length <= 0.0 || length < POSITION_EPS || self.positions.len() < 2 {
            return self.clone();
        }
        let pieces = (length / max_length).ceil().max(1.0) as usize;
        let step = length / pieces as f64;

        let mut result = PositionVector::new();
        result.push(self.positions[0]);
        for idx in 1..pieces {
            result.push(self.position_at_offset_2d(step * idx as f64));
        }
        result.push(self.positions[self.positions.len() - 1]);
        result
    }

    /// Moves every position `amount` to the side, mitering interior corners.
    pub fn move_to_side(&mut self, amount: f64) {
        if self.positions.len() < 2 || amount == 0.0 {
            return;
        }

        let mut segment_offsets = self
            .positions
            .windows(2)
            .map(|w| side_offset(&w[0], &w[1], amount))
            .collect::<Vec<_>>();

        // Zero-length segments borrow the offset of their neighbours.
        for idx in 1..segment_offsets.len() {
            if segment_offsets[idx].is_none() {
                segment_offsets[idx] = segment_offsets[idx - 1];
            }
        }
        for idx in (0..segment_offsets.len() - 1).rev() {
            if segment_offsets[idx].is_none() {
                segment_offsets[idx] = segment_offsets[idx + 1];
            }
        }
        if segment_offsets[0].is_none() {
            return;
        }

        let last_idx = self.positions.len() - 1;
        let moved = self
            .positions
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let prev = if idx > 0 { segment_offsets[idx - 1] } else { None };
                let next = if idx < last_idx { segment_offsets[idx] } else { None };
                match (prev, next) {
                    (Some(o1), Some(o2)) => *p + miter_offset(o1, o2, amount),
                    (Some(o), None) | (None, Some(o)) => *p + o,
                    (None, None) => *p,
                }
            })
            .collect();
        self.positions = moved;
    }

    /// Arc length offset of the point on the polyline nearest to `p`.
    pub fn nearest_offset_to_point_2d(&self, p: &Position) -> f64 {
        let mut best_dist = f64::INFINITY;
        let mut best_offset = 0.0;
        let mut seen = 0.0;
        for w in self.positions.windows(2) {
            let (along, dist) = project_on_segment(&w[0], &w[1], p);
            if dist < best_dist {
                best_dist = dist;
                best_offset = seen + along;
            }
            seen += w[0].distance_to_2d(&w[1]);
        }
        best_offset
    }

    /// Minimum 2D distance between `p` and the polyline.
    pub fn distance_2d(&self, p: &Position) -> f64 {
        match self.positions.len() {
            0 => f64::INFINITY,
            1 => self.positions[0].distance_to_2d(p),
            _ => self
                .positions
                .windows(2)
                .map(|w| project_on_segment(&w[0], &w[1], p).1)
                .fold(f64::INFINITY, f64::min),
        }
    }

    pub fn reverse(&self) -> PositionVector {
        self.positions.iter().rev().cloned().collect()
    }

    /// Appends `other`, skipping its first position if it repeats our last one.
    pub fn append(&mut self, other: &PositionVector) {
        let skip = match (self.positions.last(), other.positions.first()) {
            (Some(last), Some(first)) if last == first => 1,
            _ => 0,
        };
        self.positions.extend(other.positions.iter().skip(skip).cloned());
    }

    pub fn is_closed(&self) -> bool {
        self.positions.len() >= 2 && self.positions.first() == self.positions.last()
    }

    pub fn close_polygon(&mut self) {
        if let (Some(first), Some(last)) = (self.positions.first(), self.positions.last()) {
            if first != last {
                let first = *first;
                self.positions.push(first);
            }
        }
    }

    /// Rotates every position around the origin.
    pub fn rotate_2d(&mut self, radians: f64) {
        for p in self.positions.iter_mut() {
            *p = p.rotated_2d(radians);
        }
    }

    pub fn add(&mut self, dx: f64, dy: f64, dz: f64) {
        self.add_position(&Position::with_z(dx, dy, dz));
    }

    pub fn add_position(&mut self, offset: &Position) {
        for p in self.positions.iter_mut() {
            *p = *p + *offset;
        }
    }

    /// Scales all positions by `factor` around the centroid.
    pub fn scale_relative(&mut self, factor: f64) {
        let centroid = self.centroid();
        for p in self.positions.iter_mut() {
            p.x = centroid.x + (p.x - centroid.x) * factor;
            p.y = centroid.y + (p.y - centroid.y) * factor;
        }
    }

    /// Area centroid of the (implicitly closed) polygon, or the mean position
    /// when the polygon has no area.
    pub fn centroid(&self) -> Position {
        let n = self.positions.len();
        if n == 0 {
            return Position::default();
        }
        let mean = {
            let sum = self.positions.iter().fold((0.0, 0.0), |acc, p| (acc.0 + p.x, acc.1 + p.y));
            Position::new(sum.0 / n as f64, sum.1 / n as f64)
        };
        let signed_area = self.signed_area();
        if n < 3 || signed_area.abs() < 1e-9 {
            return mean;
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for idx in 0..n {
            let p1 = &self.positions[idx];
            let p2 = &self.positions[(idx + 1) % n];
            let cross = p1.x * p2.y - p2.x * p1.y;
            cx += (p1.x + p2.x) * cross;
            cy += (p1.y + p2.y) * cross;
        }
        Position::new(cx / (6.0 * signed_area), cy / (6.0 * signed_area))
    }

    /// Absolute area of the (implicitly closed) polygon.
    ///
    /// # Examples
    /// ```
    /// use netgeom::geom::PositionVector;
    /// let square = PositionVector::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    /// assert_eq!(square.area(), 4.0);
    /// ```
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    fn signed_area(&self) -> f64 {
        let n = self.positions.len();
        if n < 3 {
            return 0.0;
        }
        let doubled: f64 = (0..n)
            .map(|idx| {
                let p1 = &self.positions[idx];
                let p2 = &self.positions[(idx + 1) % n];
                p1.x * p2.y - p2.x * p1.y
            })
            .sum();
        doubled / 2.0
    }
}

/// Perpendicular offset of length `amount` to the left of the segment `beg -> end`.
pub fn side_offset(beg: &Position, end: &Position, amount: f64) -> Option<Position> {
    let dist = beg.distance_to_2d(end);
    if dist == 0.0 {
        return None;
    }
    Some(Position::new(beg.y - end.y, end.x - beg.x) * (amount / dist))
}

fn miter_offset(o1: Position, o2: Position, amount: f64) -> Position {
    let dot = o1.x * o2.x + o1.y * o2.y;
    let denominator = 1.0 + dot / (amount * amount);
    // Close to a reversal the miter point runs away, so stick to the next segment.
    if denominator < 0.2 {
        o2
    } else {
        (o1 + o2) * (1.0 / denominator)
    }
}

// Returns the offset of the projection along the segment and the distance to it.
fn project_on_segment(a: &Position, b: &Position, p: &Position) -> (f64, f64) {
    let length_squared = a.distance_squared_to_2d(b);
    if length_squared == 0.0 {
        return (0.0, a.distance_to_2d(p));
    }
    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / length_squared)
        .max(0.0)
        .min(1.0);
    let projection = *a + (*b - *a) * t;
    (t * length_squared.sqrt(), projection.distance_to_2d(p))
}

impl Deref for PositionVector {
    type Target = [Position];

    fn deref(&self) -> &[Position] {
        &self.positions
    }
}

impl From<Vec<Position>> for PositionVector {
    fn from(positions: Vec<Position>) -> PositionVector {
        PositionVector { positions }
    }
}

impl From<Vec<(f64, f64)>> for PositionVector {
    fn from(points: Vec<(f64, f64)>) -> PositionVector {
        points.into_iter().map(Position::from).collect()
    }
}

impl FromIterator<Position> for PositionVector {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> PositionVector {
        PositionVector {
            positions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PositionVector {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Position, b: &Position) {
        assert!(a.distance_to_2d(b) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_move_to_side_straight() {
        let mut shape = PositionVector::from(vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        shape.move_to_side(1.0);
        assert_close(&shape[0], &Position::new(0.0, 1.0));
        assert_close(&shape[1], &Position::new(5.0, 1.0));
        assert_close(&shape[2], &Position::new(10.0, 1.0));
    }

    #[test]
    fn test_move_to_side_miters_corner() {
        let mut shape = PositionVector::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        shape.move_to_side(-1.0);
        assert_close(&shape[0], &Position::new(0.0, -1.0));
        assert_close(&shape[1], &Position::new(11.0, -1.0));
        assert_close(&shape[2], &Position::new(11.0, 10.0));
    }

    #[test]
    fn test_move_to_side_ignores_duplicates() {
        let mut shape = PositionVector::from(vec![(0.0, 0.0), (0.0, 0.0), (0.0, 4.0)]);
        shape.move_to_side(2.0);
        assert_eq!(shape.len(), 3);
        assert_close(&shape[0], &Position::new(-2.0, 0.0));
        assert_close(&shape[1], &Position::new(-2.0, 0.0));
        assert_close(&shape[2], &Position::new(-2.0, 4.0));
    }

    #[test]
    fn test_position_at_offset_clamps() {
        let shape = PositionVector::from(vec![(0.0, 0.0), (10.0, 0.0)]);
        assert_close(&shape.position_at_offset_2d(-3.0), &Position::new(0.0, 0.0));
        assert_close(&shape.position_at_offset_2d(4.0), &Position::new(4.0, 0.0));
        assert_close(&shape.position_at_offset_2d(30.0), &Position::new(10.0, 0.0));
        assert_close(&shape.position_at_offset(4.0, 2.0), &Position::new(4.0, 2.0));
    }

    #[test]
    fn test_subpart() {
        let shape = PositionVector::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let part = shape.subpart_2d(5.0, 15.0);
        assert_eq!(part.len(), 3);
        assert_close(&part[0], &Position::new(5.0, 0.0));
        assert_close(&part[1], &Position::new(10.0, 0.0));
        assert_close(&part[2], &Position::new(10.0, 5.0));
    }

    #[test]
    fn test_resample_keeps_ends() {
        let shape = PositionVector::from(vec![(0.3, 0.1), (7.7, 3.9)]);
        let resampled = shape.resample(1.3);
        assert_eq!(resampled.first(), shape.first());
        assert_eq!(resampled.last(), shape.last());
        let lengths = resampled
            .windows(2)
            .map(|w| w[0].distance_to_2d(&w[1]))
            .collect::<Vec<_>>();
        assert!(lengths.iter().all(|l| *l <= 1.3 + 1e-9));
        assert!(lengths.iter().all(|l| (l - lengths[0]).abs() < 1e-9));
    }

    #[test]
    fn test_nearest_offset_and_distance() {
        let shape = PositionVector::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let p = Position::new(12.0, 4.0);
        assert!((shape.nearest_offset_to_point_2d(&p) - 14.0).abs() < 1e-9);
        assert!((shape.distance_2d(&p) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_relative_around_centroid() {
        let mut square = PositionVector::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        square.scale_relative(2.0);
        assert_close(&square[0], &Position::new(-1.0, -1.0));
        assert_close(&square[2], &Position::new(3.0, 3.0));
    }

    #[test]
    fn test_append_and_close() {
        let mut a = PositionVector::from(vec![(0.0, 0.0), (1.0, 0.0)]);
        let b = PositionVector::from(vec![(1.0, 0.0), (1.0, 1.0)]);
        a.append(&b);
        assert_eq!(a.len(), 3);
        assert!(!a.is_closed());
        a.close_polygon();
        assert!(a.is_closed());
        assert_eq!(a.len(), 4);
    }
}
