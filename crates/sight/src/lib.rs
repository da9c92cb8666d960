//! Sight: angular shadow casting over a toroidal grid.
//!
//! Rings of cells are expanded outward from the observer. Open directions are
//! kept as an ordered set of degree intervals (0° up, clockwise); each visible
//! opaque cell cuts its silhouette out of that set before the next ring.
//!
//! # Invariants
//! - Resolution is a pure function of grid, observer and radius.
//! - The open interval set only ever shrinks during one resolution.
//! - Silhouette and ring tables are fixed data, never derived at runtime.

pub mod angle;
pub mod config;
pub mod interval;
pub mod resolver;
pub mod ring;
pub mod silhouette;

pub use angle::{Octant, degree_to_octant, point_to_degree};
pub use config::{ConfigError, ViewConfig};
pub use interval::{Interval, IntervalSet};
pub use resolver::{MAX_VIEW_RADIUS, Resolver, RingReport, Visibility, resolve};
pub use ring::{RING_TEMPLATE_RADIUS, generate_ring, ring_of, ring_template};
pub use silhouette::{Silhouette, cell_to_intervals, silhouette};

pub fn crate_info() -> &'static str {
    "fogline-sight v0.1.0"
}
