//! Planar coordinates in metres.
//!
//! Nodes never move, so positions are plain `f64` pairs.  Everything the
//! protocols need (Euclidean distance, polar angle around the base station)
//! lives here.

/// A point in the simulation plane, metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Polar angle of `self` seen from `origin`, in degrees, normalised to
    /// `[0, 360)`.
    pub fn angle_deg_from(self, origin: Point) -> f64 {
        let deg = (self.y - origin.y).atan2(self.x - origin.x).to_degrees();
        if deg < 0.0 { deg + 360.0 } else { deg }
    }

    /// Point at `radius` and `theta` (radians) around `center`.
    #[inline]
    pub fn from_polar(center: Point, radius: f64, theta: f64) -> Self {
        Self {
            x: center.x + radius * theta.cos(),
            y: center.y + radius * theta.sin(),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
