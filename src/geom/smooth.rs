use crate::geom::position::{Position, POSITION_EPS};
use crate::geom::position_vector::PositionVector;

// Directions closer than this (in radians) are treated as one straight line.
const STRAIGHT_THRESHOLD: f64 = 5.0 * std::f64::consts::PI / 180.0;

/// Samples the Bezier curve defined by `control` at `num_points` evenly spaced
/// parameter values. The first and last control points are hit exactly.
pub fn bezier(control: &[Position], num_points: usize) -> PositionVector {
    match (control.first(), control.last()) {
        (Some(first), Some(last)) if num_points >= 2 => {
            let mut curve = PositionVector::new();
            curve.push(*first);
            for idx in 1..num_points - 1 {
                let t = idx as f64 / (num_points - 1) as f64;
                curve.push(de_casteljau(control, t));
            }
            curve.push(*last);
            curve
        }
        _ => control.iter().cloned().collect(),
    }
}

fn de_casteljau(control: &[Position], t: f64) -> Position {
    let mut points = control.to_vec();
    while points.len() > 1 {
        points = points.windows(2).map(|w| w[0] + (w[1] - w[0]) * t).collect();
    }
    points[0]
}

/// Smooth curve from the end of `begin_shape` to the start of `end_shape`.
///
/// The curve leaves `begin_shape` along its last direction and enters
/// `end_shape` along its first direction. `extrapolate_begin`/`extrapolate_end`
/// cap how far the control points may reach from either end. Shapes that
/// cannot be smoothed yield the straight connection.
pub fn compute_smooth_shape(
    begin_shape: &PositionVector,
    end_shape: &PositionVector,
    num_points: usize,
    is_turnaround: bool,
    extrapolate_begin: f64,
    extrapolate_end: f64,
) -> PositionVector {
    let (begin, end) = match (begin_shape.last(), end_shape.first()) {
        (Some(begin), Some(end)) => (*begin, *end),
        _ => return PositionVector::new(),
    };
    let straight = PositionVector::from(vec![begin, end]);

    let dist = begin.distance_to_2d(&end);
    if dist < POSITION_EPS {
        return straight;
    }
    let (begin_dir, end_dir) = match (last_direction(begin_shape), first_direction(end_shape)) {
        (Some(begin_dir), Some(end_dir)) => (begin_dir, end_dir),
        _ => return straight,
    };

    if is_turnaround {
        let reach_begin = extrapolate_begin.min(dist).max(dist / 2.0);
        let reach_end = extrapolate_end.min(dist).max(dist / 2.0);
        let control = [begin, begin + begin_dir * reach_begin, end - end_dir * reach_end, end];
        return bezier(&control, num_points);
    }

    let begin_angle = begin_dir.y.atan2(begin_dir.x);
    let end_angle = end_dir.y.atan2(end_dir.x);
    let connection = end - begin;
    let connection_angle = connection.y.atan2(connection.x);
    if angle_diff(begin_angle, end_angle).abs() < STRAIGHT_THRESHOLD
        && angle_diff(begin_angle, connection_angle).abs() < STRAIGHT_THRESHOLD
    {
        return straight;
    }

    match intersect_rays(&begin, &begin_dir, &end, &end_dir) {
        Some((t_begin, t_end))
            if t_begin > 0.0 && t_end < 0.0 && t_begin <= extrapolate_begin.max(dist) && -t_end <= extrapolate_end.max(dist) =>
        {
            let control = [begin, begin + begin_dir * t_begin, end];
            bezier(&control, num_points)
        }
        _ => {
            let reach_begin = extrapolate_begin.min(dist / 3.0);
            let reach_end = extrapolate_end.min(dist / 3.0);
            let control = [begin, begin + begin_dir * reach_begin, end - end_dir * reach_end, end];
            bezier(&control, num_points)
        }
    }
}

fn last_direction(shape: &PositionVector) -> Option<Position> {
    shape
        .windows(2)
        .rev()
        .find_map(|w| unit(&w[0], &w[1]))
}

fn first_direction(shape: &PositionVector) -> Option<Position> {
    shape.windows(2).find_map(|w| unit(&w[0], &w[1]))
}

fn unit(from: &Position, to: &Position) -> Option<Position> {
    let dist = from.distance_to_2d(to);
    if dist == 0.0 {
        None
    } else {
        Some(Position::new((to.x - from.x) / dist, (to.y - from.y) / dist))
    }
}

fn angle_diff(a: f64, b: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let diff = (b - a).rem_euclid(two_pi);
    if diff > std::f64::consts::PI {
        diff - two_pi
    } else {
        diff
    }
}

// Parameters (t1, t2) with p1 + d1 * t1 == p2 + d2 * t2, if the rays are not parallel.
fn intersect_rays(p1: &Position, d1: &Position, p2: &Position, d2: &Position) -> Option<(f64, f64)> {
    let denominator = d1.x * d2.y - d1.y * d2.x;
    if denominator.abs() < 1e-9 {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t1 = (dx * d2.y - dy * d2.x) / denominator;
    let t2 = (dx * d1.y - dy * d1.x) / denominator;
    Some((t1, t2))
}
