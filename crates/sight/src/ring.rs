//! Ring template: a circle drawn on square cells.
//!
//! Every offset within [`RING_TEMPLATE_RADIUS`] of the observer belongs to
//! exactly one ring. Rings are read from a fixed triangular table covering
//! one octant; the quadrant `x >= 1, y >= 0` is rotated a quarter turn four
//! times to cover the plane.

use fogline_common::Offset;
use glam::IVec2;

/// Largest ring the template describes.
pub const RING_TEMPLATE_RADIUS: u32 = 40;

/// Ring of each offset; row is the larger absolute coordinate, column the
/// smaller one.
#[rustfmt::skip]
const RING_BUCKETS: [&[u8]; RING_TEMPLATE_RADIUS as usize + 1] = [
    &[0],
    &[1, 1],
    &[2, 2, 3],
    &[3, 3, 4, 4],
    &[4, 4, 4, 5, 6],
    &[5, 5, 5, 6, 6, 7],
    &[6, 6, 6, 7, 7, 8, 8],
    &[7, 7, 7, 8, 8, 9, 9, 10],
    &[8, 8, 8, 9, 9, 9, 10, 11, 11],
    &[9, 9, 9, 9, 10, 10, 11, 11, 12, 13],
    &[10, 10, 10, 10, 11, 11, 12, 12, 13, 13, 14],
    &[11, 11, 11, 11, 12, 12, 13, 13, 14, 14, 15, 16],
    &[12, 12, 12, 12, 13, 13, 13, 14, 14, 15, 16, 16, 17],
    &[13, 13, 13, 13, 14, 14, 14, 15, 15, 16, 16, 17, 18, 18],
    &[14, 14, 14, 14, 15, 15, 15, 16, 16, 17, 17, 18, 18, 19, 20],
    &[15, 15, 15, 15, 16, 16, 16, 17, 17, 17, 18, 19, 19, 20, 21, 21],
    &[16, 16, 16, 16, 16, 17, 17, 17, 18, 18, 19, 19, 20, 21, 21, 22, 23],
    &[17, 17, 17, 17, 17, 18, 18, 18, 19, 19, 20, 20, 21, 21, 22, 23, 23, 24],
    &[18, 18, 18, 18, 18, 19, 19, 19, 20, 20, 21, 21, 22, 22, 23, 23, 24, 25, 25],
    &[19, 19, 19, 19, 19, 20, 20, 20, 21, 21, 21, 22, 22, 23, 24, 24, 25, 25, 26, 27],
    &[20, 20, 20, 20, 20, 21, 21, 21, 22, 22, 22, 23, 23, 24, 24, 25, 26, 26, 27, 28, 28],
    &[21, 21, 21, 21, 21, 22, 22, 22, 22, 23, 23, 24, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30],
    &[22, 22, 22, 22, 22, 23, 23, 23, 23, 24, 24, 25, 25, 26, 26, 27, 27, 28, 28, 29, 30, 30, 31],
    &[
        23, 23, 23, 23, 23, 24, 24, 24, 24, 25, 25, 25, 26, 26, 27, 27, 28, 29, 29, 30, 30, 31, 32,
        33,
    ],
    &[
        24, 24, 24, 24, 24, 25, 25, 25, 25, 26, 26, 26, 27, 27, 28, 28, 29, 29, 30, 31, 31, 32, 33,
        33, 34,
    ],
    &[
        25, 25, 25, 25, 25, 25, 26, 26, 26, 27, 27, 27, 28, 28, 29, 29, 30, 30, 31, 31, 32, 33, 33,
        34, 35, 35,
    ],
    &[
        26, 26, 26, 26, 26, 26, 27, 27, 27, 28, 28, 28, 29, 29, 30, 30, 31, 31, 32, 32, 33, 33, 34,
        35, 35, 36, 37,
    ],
    &[
        27, 27, 27, 27, 27, 27, 28, 28, 28, 28, 29, 29, 30, 30, 30, 31, 31, 32, 32, 33, 34, 34, 35,
        35, 36, 37, 37, 38,
    ],
    &[
        28, 28, 28, 28, 28, 28, 29, 29, 29, 29, 30, 30, 30, 31, 31, 32, 32, 33, 33, 34, 34, 35, 36,
        36, 37, 38, 38, 39, 40,
    ],
    &[
        29, 29, 29, 29, 29, 29, 30, 30, 30, 30, 31, 31, 31, 32, 32, 33, 33, 34, 34, 35, 35, 36, 36,
        37, 38, 38, 39, 40, 40, 41,
    ],
    &[
        30, 30, 30, 30, 30, 30, 31, 31, 31, 31, 32, 32, 32, 33, 33, 34, 34, 34, 35, 36, 36, 37, 37,
        38, 38, 39, 40, 40, 41, 42, 42,
    ],
    &[
        31, 31, 31, 31, 31, 31, 32, 32, 32, 32, 33, 33, 33, 34, 34, 34, 35, 35, 36, 36, 37, 37, 38,
        39, 39, 40, 40, 41, 42, 42, 43, 44,
    ],
    &[
        32, 32, 32, 32, 32, 32, 33, 33, 33, 33, 34, 34, 34, 35, 35, 35, 36, 36, 37, 37, 38, 38, 39,
        39, 40, 41, 41, 42, 43, 43, 44, 45, 45,
    ],
    &[
        33, 33, 33, 33, 33, 33, 34, 34, 34, 34, 34, 35, 35, 35, 36, 36, 37, 37, 38, 38, 39, 39, 40,
        40, 41, 41, 42, 43, 43, 44, 45, 45, 46, 47,
    ],
    &[
        34, 34, 34, 34, 34, 34, 35, 35, 35, 35, 35, 36, 36, 36, 37, 37, 38, 38, 38, 39, 39, 40, 40,
        41, 42, 42, 43, 43, 44, 45, 45, 46, 47, 47, 48,
    ],
    &[
        35, 35, 35, 35, 35, 35, 36, 36, 36, 36, 36, 37, 37, 37, 38, 38, 38, 39, 39, 40, 40, 41, 41,
        42, 42, 43, 44, 44, 45, 45, 46, 47, 47, 48, 49, 49,
    ],
    &[
        36, 36, 36, 36, 36, 36, 36, 37, 37, 37, 37, 38, 38, 38, 39, 39, 39, 40, 40, 41, 41, 42, 42,
        43, 43, 44, 44, 45, 46, 46, 47, 48, 48, 49, 50, 50, 51,
    ],
    &[
        37, 37, 37, 37, 37, 37, 37, 38, 38, 38, 38, 39, 39, 39, 40, 40, 40, 41, 41, 42, 42, 43, 43,
        44, 44, 45, 45, 46, 46, 47, 48, 48, 49, 50, 50, 51, 52, 52,
    ],
    &[
        38, 38, 38, 38, 38, 38, 38, 39, 39, 39, 39, 40, 40, 40, 40, 41, 41, 42, 42, 42, 43, 43, 44,
        44, 45, 45, 46, 47, 47, 48, 48, 49, 50, 50, 51, 52, 52, 53, 54,
    ],
    &[
        39, 39, 39, 39, 39, 39, 39, 40, 40, 40, 40, 41, 41, 41, 41, 42, 42, 43, 43, 43, 44, 44, 45,
        45, 46, 46, 47, 47, 48, 49, 49, 50, 50, 51, 52, 52, 53, 54, 54, 55,
    ],
    &[
        40, 40, 40, 40, 40, 40, 40, 41, 41, 41, 41, 41, 42, 42, 42, 43, 43, 43, 44, 44, 45, 45, 46,
        46, 47, 47, 48, 48, 49, 49, 50, 51, 51, 52, 52, 53, 54, 54, 55, 56, 57,
    ],
];

/// Ring an offset falls on, or `None` outside the template.
pub fn ring_of(offset: Offset) -> Option<u32> {
    let a = offset.x.unsigned_abs().max(offset.y.unsigned_abs());
    let b = offset.x.unsigned_abs().min(offset.y.unsigned_abs());
    RING_BUCKETS
        .get(a as usize)
        .map(|row| u32::from(row[b as usize]))
}

fn quarter_turns(p: IVec2) -> [IVec2; 4] {
    [
        p,
        IVec2::new(-p.y, p.x),
        IVec2::new(-p.x, -p.y),
        IVec2::new(p.y, -p.x),
    ]
}

/// All offsets on ring `distance`.
///
/// Points come out quadrant by quadrant, clockwise from the right-hand axis.
/// Ring 0 is the observer alone; rings past the template are empty.
pub fn generate_ring(distance: u32) -> Vec<Offset> {
    if distance == 0 {
        return vec![IVec2::ZERO];
    }
    if distance > RING_TEMPLATE_RADIUS {
        return Vec::new();
    }

    // The ring value never falls below the larger coordinate.
    let reach = distance as i32;
    let quadrant: Vec<IVec2> = (1..=reach)
        .flat_map(|x| (0..=reach).map(move |y| IVec2::new(x, y)))
        .filter(|p| ring_of(*p) == Some(distance))
        .collect();

    let mut ring = Vec::with_capacity(quadrant.len() * 4);
    for turn in 0..4 {
        ring.extend(quadrant.iter().map(|p| quarter_turns(*p)[turn]));
    }
    ring
}

/// Every offset on rings `0..=max_radius`, observer included.
pub fn ring_template(max_radius: u32) -> Vec<Offset> {
    (0..=max_radius.min(RING_TEMPLATE_RADIUS))
        .flat_map(generate_ring)
        .collect()
}
