//! Terrain and fog: the toroidal grid the sight engine runs over, and the
//! persistent fog-of-war merged from each frame's view.
//!
//! # Invariants
//! - Every coordinate wraps; there is no out-of-bounds cell.
//! - Fog state only moves Dark -> Visible <-> Fog, never back to Dark
//!   except through an explicit reset.

mod fog;
mod grid;

pub use fog::{FogCounts, FogMap, FogStats};
pub use grid::{MapError, ParsedMap, TerrainGrid};

pub fn crate_info() -> &'static str {
    "fogline-terrain v0.1.0"
}
