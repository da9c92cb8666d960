use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Offset relative to an observer, in cells. x grows right, y grows down.
pub type Offset = IVec2;

/// Absolute cell coordinate on a toroidal grid.
pub type Cell = IVec2;

/// Which portion of a cell an obstacle's solid silhouette occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// The whole cell is solid.
    Full,
    /// Upper half solid.
    Up,
    /// Right half solid.
    Right,
    /// Lower half solid.
    Down,
    /// Left half solid.
    Left,
}

impl Facing {
    pub const ALL: [Facing; 5] = [
        Facing::Full,
        Facing::Up,
        Facing::Right,
        Facing::Down,
        Facing::Left,
    ];

    /// Stable numeric code, as emitted by terrain generators.
    pub fn code(self) -> u8 {
        match self {
            Facing::Full => 0,
            Facing::Up => 1,
            Facing::Right => 2,
            Facing::Down => 3,
            Facing::Left => 4,
        }
    }

    /// Decode a generator facing code.
    ///
    /// Unknown codes decode as [`Facing::Full`]: a malformed obstacle hides
    /// more rather than leaking line of sight.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Facing::Full,
            1 => Facing::Up,
            2 => Facing::Right,
            3 => Facing::Down,
            4 => Facing::Left,
            other => {
                tracing::warn!(code = other, "unknown facing code, treating as full");
                Facing::Full
            }
        }
    }
}

/// Per-cell fog-of-war classification.
///
/// Lifecycle: `Dark` until first seen, `Visible` while in the current view,
/// `Fog` once it drops out of view. `Fog` never returns to `Dark`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    Visible,
    Fog,
    #[default]
    Dark,
}

/// Wrap an absolute coordinate onto a `width` x `height` torus.
pub fn wrap(cell: Cell, width: i32, height: i32) -> Cell {
    IVec2::new(cell.x.rem_euclid(width), cell.y.rem_euclid(height))
}

/// Read access to the terrain the visibility engine runs over.
///
/// Implementors describe a toroidal grid. `facing_at` is only ever called
/// with coordinates already wrapped into `0..width` x `0..height`.
pub trait GridAccessor {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Solid silhouette of the terrain at `cell`, or `None` if it does not block.
    fn facing_at(&self, cell: Cell) -> Option<Facing>;

    /// Wrap `cell` onto this grid.
    fn wrap(&self, cell: Cell) -> Cell {
        wrap(cell, self.width(), self.height())
    }

    /// Facing at an unwrapped coordinate.
    fn facing_at_wrapped(&self, cell: Cell) -> Option<Facing> {
        self.facing_at(self.wrap(cell))
    }
}
