use std::time::{Duration, Instant};

use fogline_common::{Cell, GridAccessor, VisibilityState, wrap};
use fogline_sight::resolve;
use serde::{Deserialize, Serialize};

/// What one fog update changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FogStats {
    /// Cells seen for the first time.
    pub revealed: usize,
    /// Cells that dropped out of view and are now remembered.
    pub fogged: usize,
    /// Cells visible after the update.
    pub visible: usize,
    pub frame_time: Duration,
}

/// Number of cells in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogCounts {
    pub visible: usize,
    pub fog: usize,
    pub dark: usize,
}

/// Persistent per-cell fog of war for one toroidal grid.
///
/// Cells start dark. Each update marks the confirmed cells visible and turns
/// every previously visible cell that was not confirmed into fog. Fog never
/// goes back to dark.
#[derive(Debug, Clone)]
pub struct FogMap {
    width: i32,
    height: i32,
    states: Vec<VisibilityState>,
    /// Indices of the cells visible after the last update.
    visible: Vec<usize>,
    stats: FogStats,
}

impl FogMap {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "fog dimensions must be positive");
        Self {
            width,
            height,
            states: vec![VisibilityState::Dark; (width * height) as usize],
            visible: Vec::new(),
            stats: FogStats::default(),
        }
    }

    /// Fog map sized to `grid`.
    pub fn for_grid<G: GridAccessor + ?Sized>(grid: &G) -> Self {
        Self::new(grid.width(), grid.height())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, cell: Cell) -> usize {
        let c = wrap(cell, self.width, self.height);
        (c.y * self.width + c.x) as usize
    }

    /// State of `cell` (wrapped).
    pub fn state(&self, cell: Cell) -> VisibilityState {
        self.states[self.index(cell)]
    }

    /// Merge this frame's visible cells into the fog.
    pub fn apply(&mut self, cells: impl IntoIterator<Item = Cell>) -> FogStats {
        let _span = tracing::info_span!("fog_update").entered();
        let frame_start = Instant::now();

        // Demote last frame's view first; confirmed cells are promoted again below.
        for &i in &self.visible {
            self.states[i] = VisibilityState::Fog;
        }
        let previous = std::mem::take(&mut self.visible);

        let mut revealed = 0;
        for cell in cells {
            let i = self.index(cell);
            match self.states[i] {
                VisibilityState::Visible => continue,
                VisibilityState::Dark => revealed += 1,
                VisibilityState::Fog => {}
            }
            self.states[i] = VisibilityState::Visible;
            self.visible.push(i);
        }

        let fogged = previous
            .iter()
            .filter(|&&i| self.states[i] == VisibilityState::Fog)
            .count();

        self.stats = FogStats {
            revealed,
            fogged,
            visible: self.visible.len(),
            frame_time: frame_start.elapsed(),
        };

        tracing::trace!(
            revealed,
            fogged,
            visible = self.visible.len(),
            "fog update complete"
        );

        self.stats.clone()
    }

    /// Resolve what an observer at `observer` sees and merge it into the fog.
    pub fn observe<G: GridAccessor + ?Sized>(
        &mut self,
        grid: &G,
        observer: Cell,
        max_radius: u32,
    ) -> FogStats {
        debug_assert_eq!(
            (grid.width(), grid.height()),
            (self.width, self.height),
            "fog map and grid differ in size"
        );
        let visibility = resolve(grid, observer, max_radius);
        self.apply(visibility.cells(observer, grid))
    }

    /// Statistics from the last update.
    pub fn stats(&self) -> &FogStats {
        &self.stats
    }

    pub fn counts(&self) -> FogCounts {
        let mut counts = FogCounts::default();
        for state in &self.states {
            match state {
                VisibilityState::Visible => counts.visible += 1,
                VisibilityState::Fog => counts.fog += 1,
                VisibilityState::Dark => counts.dark += 1,
            }
        }
        counts
    }

    /// Forget everything: all cells dark again.
    pub fn reset(&mut self) {
        self.states.fill(VisibilityState::Dark);
        self.visible.clear();
        self.stats = FogStats::default();
    }

    /// Deterministic FNV-1a hash of every cell state, in row-major order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.width.to_le_bytes());
        mix(&self.height.to_le_bytes());
        for state in &self.states {
            let tag = match state {
                VisibilityState::Visible => 0u8,
                VisibilityState::Fog => 1,
                VisibilityState::Dark => 2,
            };
            mix(&[tag]);
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerrainGrid;
    use fogline_common::Facing;
    use glam::IVec2;

    fn cells(points: &[(i32, i32)]) -> Vec<Cell> {
        points.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    #[test]
    fn starts_dark() {
        let fog = FogMap::new(4, 3);
        assert_eq!(
            fog.counts(),
            FogCounts {
                visible: 0,
                fog: 0,
                dark: 12
            }
        );
        assert_eq!(fog.state(IVec2::new(3, 2)), VisibilityState::Dark);
    }

    #[test]
    fn seen_cells_become_visible() {
        let mut fog = FogMap::new(4, 4);
        let stats = fog.apply(cells(&[(0, 0), (1, 0)]));
        assert_eq!(stats.revealed, 2);
        assert_eq!(stats.fogged, 0);
        assert_eq!(stats.visible, 2);
        assert_eq!(fog.state(IVec2::new(1, 0)), VisibilityState::Visible);
        assert_eq!(fog.state(IVec2::new(2, 0)), VisibilityState::Dark);
    }

    #[test]
    fn unconfirmed_cells_fog() {
        let mut fog = FogMap::new(4, 4);
        fog.apply(cells(&[(0, 0), (1, 0)]));
        let stats = fog.apply(cells(&[(1, 0), (2, 0)]));
        assert_eq!(stats.revealed, 1);
        assert_eq!(stats.fogged, 1);
        assert_eq!(fog.state(IVec2::new(0, 0)), VisibilityState::Fog);
        assert_eq!(fog.state(IVec2::new(1, 0)), VisibilityState::Visible);
        assert_eq!(fog.state(IVec2::new(2, 0)), VisibilityState::Visible);
    }

    #[test]
    fn fog_never_returns_to_dark() {
        let mut fog = FogMap::new(4, 4);
        fog.apply(cells(&[(3, 3)]));
        fog.apply(Vec::new());
        fog.apply(Vec::new());
        assert_eq!(fog.state(IVec2::new(3, 3)), VisibilityState::Fog);

        let stats = fog.apply(cells(&[(3, 3)]));
        assert_eq!(stats.revealed, 0);
        assert_eq!(fog.state(IVec2::new(3, 3)), VisibilityState::Visible);
    }

    #[test]
    fn duplicate_and_unwrapped_cells_count_once() {
        let mut fog = FogMap::new(4, 4);
        let stats = fog.apply(cells(&[(1, 1), (5, 5), (-3, 1)]));
        assert_eq!(stats.revealed, 1);
        assert_eq!(stats.visible, 1);
    }

    #[test]
    fn reset_forgets() {
        let mut fog = FogMap::new(3, 3);
        fog.apply(cells(&[(0, 0)]));
        fog.apply(cells(&[(1, 1)]));
        fog.reset();
        assert_eq!(fog.counts().dark, 9);
        assert_eq!(fog.stats(), &FogStats::default());
    }

    #[test]
    fn observe_behind_wall() {
        let mut grid = TerrainGrid::new(7, 7);
        grid.place(IVec2::new(4, 3), Facing::Full);
        let mut fog = FogMap::for_grid(&grid);

        fog.observe(&grid, IVec2::new(3, 3), 3);
        assert_eq!(fog.state(IVec2::new(4, 3)), VisibilityState::Visible);
        assert_eq!(fog.state(IVec2::new(5, 3)), VisibilityState::Dark);
        assert_eq!(fog.state(IVec2::new(5, 2)), VisibilityState::Visible);

        // Step away; what was seen is remembered.
        fog.observe(&grid, IVec2::new(3, 0), 1);
        assert_eq!(fog.state(IVec2::new(3, 0)), VisibilityState::Visible);
        assert_eq!(fog.state(IVec2::new(3, 3)), VisibilityState::Fog);
        assert_eq!(fog.state(IVec2::new(5, 3)), VisibilityState::Dark);
    }

    #[test]
    fn state_hash_tracks_changes() {
        let mut a = FogMap::new(5, 5);
        let b = FogMap::new(5, 5);
        assert_eq!(a.state_hash(), b.state_hash());
        a.apply(cells(&[(2, 2)]));
        assert_ne!(a.state_hash(), b.state_hash());
    }
}
