use serde::{Deserialize, Serialize};

use crate::team::Team;

/// A 2D point/vector on the sheet plane.
///
/// Origin is the button; +y runs from the hack toward (and past) the
/// house, +x is the thrower's right.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction, or None for a (near-)zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len < 1e-6 {
            None
        } else {
            Some(Vec2::new(self.x / len, self.y / len))
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Arena key for a stone: owning team plus per-team index (0..8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoneId {
    pub team: Team,
    pub index: u8,
}

impl StoneId {
    pub const fn new(team: Team, index: u8) -> Self {
        Self { team, index }
    }
}

/// Snapshot of a single stone, copied out of the pool.
///
/// Hosts and collaborators only ever see these copies; the pool owns the
/// live records and all mutation goes through its API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StoneState {
    pub id: StoneId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Visual rotation progress (non-gameplay).
    pub spin: f32,
    pub is_moving: bool,
    pub is_in_play: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_rejects_zero() {
        assert!(Vec2::ZERO.normalized().is_none());
        let n = Vec2::new(3.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vector_ops() {
        let v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, -1.0);
        assert_eq!(v, Vec2::new(4.0, 1.0));
        assert_eq!(v - Vec2::new(4.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(Vec2::new(2.0, 3.0) * 2.0, Vec2::new(4.0, 6.0));
    }
}
