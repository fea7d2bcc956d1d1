use std::ops::{Add, Mul, Sub};

/// Positions closer than this are considered the same point.
pub const POSITION_EPS: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y, z: 0.0 }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Position {
        Position { x, y, z }
    }

    pub fn distance_to_2d(&self, other: &Position) -> f64 {
        self.distance_squared_to_2d(other).sqrt()
    }

    pub fn distance_squared_to_2d(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle (radians, counter-clockwise from +x) of the vector from `self` to `other`.
    pub fn angle_to_2d(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn almost_same(&self, other: &Position) -> bool {
        self.distance_to_2d(other) < POSITION_EPS
    }

    /// Rotates around the origin.
    pub fn rotated_2d(&self, radians: f64) -> Position {
        let (sin, cos) = radians.sin_cos();
        Position {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, factor: f64) -> Position {
        Position {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Position {
        Position::new(x, y)
    }
}
