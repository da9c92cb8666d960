//! Shared types for the fogline workspace.
//!
//! # Invariants
//! - Coordinates handed to a [`GridAccessor`] are always wrapped.
//! - Nothing here holds process-wide state.

mod types;

pub use types::{Cell, Facing, GridAccessor, Offset, VisibilityState, wrap};

pub fn crate_info() -> &'static str {
    "fogline-common v0.1.0"
}
