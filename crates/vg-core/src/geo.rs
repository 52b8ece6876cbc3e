//! Planar positions and proximity checks.
//!
//! Positions are host data that change every tick, so the core never caches
//! them; it reads them at the moment a proximity decision is made.

/// A point on the host's map plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance.  Prefer this for comparisons.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// `true` if `other` lies within `radius` (inclusive).
    #[inline]
    pub fn within(self, other: Position, radius: f32) -> bool {
        self.distance_sq(other) <= radius * radius
    }

    /// Unit vector pointing from `self` towards `other`, or `None` when the
    /// two points coincide.
    pub fn direction_to(self, other: Position) -> Option<(f32, f32)> {
        let d = self.distance(other);
        if d <= f32::EPSILON {
            return None;
        }
        Some(((other.x - self.x) / d, (other.y - self.y) / d))
    }

    /// The point `dist` away from `self` along the unit vector `dir`.
    #[inline]
    pub fn step(self, dir: (f32, f32), dist: f32) -> Position {
        Position::new(self.x + dir.0 * dist, self.y + dir.1 * dist)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
