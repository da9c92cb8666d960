//! Obstacle silhouettes.
//!
//! An obstacle occupies all or half of its cell. A full cell casts the shadow
//! of its whole square, bounded by the two outermost corners. A half cell
//! casts the shadow of its outer edge only, the side of the cell its facing
//! names, so seen from behind it hides no more than the cell beyond it.
//! Which two corners bound a shadow depends only on the facing and on the
//! octant the obstacle sits in, so both are looked up from a fixed table.

use std::iter::{Chain, Once};

use fogline_common::{Facing, Offset};
use glam::DVec2;

use crate::angle::{Octant, point_to_degree};
use crate::interval::Interval;

/// Corner offsets, relative to the cell centre, bounding a silhouette.
///
/// `left` is the counter-clockwise edge, `right` the clockwise edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Silhouette {
    pub left: DVec2,
    pub right: DVec2,
}

const fn s(lx: f64, ly: f64, rx: f64, ry: f64) -> Silhouette {
    Silhouette {
        left: DVec2::new(lx, ly),
        right: DVec2::new(rx, ry),
    }
}

/// Rows follow [`Facing::ALL`], columns follow [`Octant::ALL`].
#[rustfmt::skip]
pub const SILHOUETTES: [[Silhouette; 8]; 5] = [
    // Full
    [
        s(-0.5,  0.5,  0.5,  0.5), // up
        s(-0.5, -0.5,  0.5,  0.5), // up-right
        s(-0.5, -0.5, -0.5,  0.5), // right
        s( 0.5, -0.5, -0.5,  0.5), // right-down
        s( 0.5, -0.5, -0.5, -0.5), // down
        s( 0.5,  0.5, -0.5, -0.5), // down-left
        s( 0.5,  0.5,  0.5, -0.5), // left
        s(-0.5,  0.5,  0.5, -0.5), // left-up
    ],
    // Up: edge y = -0.5
    [
        s(-0.5, -0.5,  0.5, -0.5),
        s(-0.5, -0.5,  0.5, -0.5),
        s(-0.5, -0.5,  0.5, -0.5),
        s( 0.5, -0.5, -0.5, -0.5),
        s( 0.5, -0.5, -0.5, -0.5),
        s( 0.5, -0.5, -0.5, -0.5),
        s(-0.5, -0.5,  0.5, -0.5),
        s(-0.5, -0.5,  0.5, -0.5),
    ],
    // Right: edge x = 0.5
    [
        s( 0.5, -0.5,  0.5,  0.5),
        s( 0.5, -0.5,  0.5,  0.5),
        s( 0.5, -0.5,  0.5,  0.5),
        s( 0.5, -0.5,  0.5,  0.5),
        s( 0.5, -0.5,  0.5,  0.5),
        s( 0.5,  0.5,  0.5, -0.5),
        s( 0.5,  0.5,  0.5, -0.5),
        s( 0.5,  0.5,  0.5, -0.5),
    ],
    // Down: edge y = 0.5
    [
        s(-0.5,  0.5,  0.5,  0.5),
        s(-0.5,  0.5,  0.5,  0.5),
        s( 0.5,  0.5, -0.5,  0.5),
        s( 0.5,  0.5, -0.5,  0.5),
        s( 0.5,  0.5, -0.5,  0.5),
        s( 0.5,  0.5, -0.5,  0.5),
        s( 0.5,  0.5, -0.5,  0.5),
        s(-0.5,  0.5,  0.5,  0.5),
    ],
    // Left: edge x = -0.5
    [
        s(-0.5,  0.5, -0.5, -0.5),
        s(-0.5, -0.5, -0.5,  0.5),
        s(-0.5, -0.5, -0.5,  0.5),
        s(-0.5, -0.5, -0.5,  0.5),
        s(-0.5,  0.5, -0.5, -0.5),
        s(-0.5,  0.5, -0.5, -0.5),
        s(-0.5,  0.5, -0.5, -0.5),
        s(-0.5,  0.5, -0.5, -0.5),
    ],
];

fn facing_row(facing: Facing) -> usize {
    match facing {
        Facing::Full => 0,
        Facing::Up => 1,
        Facing::Right => 2,
        Facing::Down => 3,
        Facing::Left => 4,
    }
}

/// Silhouette corners for an obstacle with `facing` seen from `octant`.
pub fn silhouette(facing: Facing, octant: Octant) -> Silhouette {
    SILHOUETTES[facing_row(facing)][octant.index()]
}

/// One interval, or two when the silhouette straddles 0°.
pub type Footprint = Chain<Once<Interval>, std::option::IntoIter<Interval>>;

/// Angular footprint of the cell at `point` (relative to the observer).
///
/// Yields `[left, right]`, or `[left, 360]` then `[0, right]` when the
/// silhouette wraps through straight up.
pub fn cell_to_intervals(point: Offset, facing: Facing) -> Footprint {
    let center = point.as_dvec2();
    let corners = silhouette(facing, Octant::of(center));
    let left = point_to_degree(center + corners.left);
    let right = point_to_degree(center + corners.right);

    if left <= right {
        std::iter::once(Interval::new(left, right)).chain(None)
    } else {
        std::iter::once(Interval::new(left, 360.0)).chain(Some(Interval::new(0.0, right)))
    }
}
