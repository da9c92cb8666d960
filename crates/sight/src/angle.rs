use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One of eight 45° sectors around the observer, named clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Octant {
    Up,
    UpRight,
    Right,
    RightDown,
    Down,
    DownLeft,
    Left,
    LeftUp,
}

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant::Up,
        Octant::UpRight,
        Octant::Right,
        Octant::RightDown,
        Octant::Down,
        Octant::DownLeft,
        Octant::Left,
        Octant::LeftUp,
    ];

    /// Position in [`Octant::ALL`], used to index the silhouette table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Octant of a (relative) point.
    pub fn of(point: DVec2) -> Self {
        degree_to_octant(point_to_degree(point))
    }
}

/// Direction of `point` from the origin in degrees: 0 is up (negative y),
/// increasing clockwise, result in `[0, 360)`.
pub fn point_to_degree(point: DVec2) -> f64 {
    (point.y.atan2(point.x).to_degrees() + 450.0).rem_euclid(360.0)
}

/// Classify an angle into an octant.
///
/// The four axis angles belong to the straight octants; everything strictly
/// between two axes belongs to the diagonal octant.
pub fn degree_to_octant(angle: f64) -> Octant {
    let angle = angle.rem_euclid(360.0);
    if angle == 0.0 {
        Octant::Up
    } else if angle < 90.0 {
        Octant::UpRight
    } else if angle == 90.0 {
        Octant::Right
    } else if angle < 180.0 {
        Octant::RightDown
    } else if angle == 180.0 {
        Octant::Down
    } else if angle < 270.0 {
        Octant::DownLeft
    } else if angle == 270.0 {
        Octant::Left
    } else {
        Octant::LeftUp
    }
}
