use fogline_common::{Facing, Offset};
use serde::Serialize;

use crate::silhouette::cell_to_intervals;

/// A contiguous angular span in degrees, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "inverted interval [{start}, {end}]");
        Self { start, end }
    }

    /// Inclusive containment: a direction on an edge is inside.
    pub fn contains(&self, degree: f64) -> bool {
        self.start <= degree && degree <= self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    fn touches(&self, other: &Interval) -> bool {
        self.contains(other.start) || self.contains(other.end)
    }
}

/// Ordered, disjoint sight intervals: the directions not yet blocked.
///
/// Intervals never overlap (they may share an endpoint), are sorted by
/// start, and are never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl Default for IntervalSet {
    fn default() -> Self {
        Self::full_circle()
    }
}

impl IntervalSet {
    /// Every direction open.
    pub fn full_circle() -> Self {
        Self {
            intervals: vec![Interval::new(0.0, 360.0)],
        }
    }

    /// Build a set from intervals already sorted and disjoint.
    pub fn from_sorted(intervals: Vec<Interval>) -> Self {
        debug_assert!(
            intervals.windows(2).all(|w| w[0].end <= w[1].start),
            "intervals must be sorted and disjoint"
        );
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True once every direction is blocked.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total open angle in degrees.
    pub fn open_degrees(&self) -> f64 {
        self.intervals.iter().map(Interval::width).sum()
    }

    /// Whether `degree` lies in some open interval, edges included.
    pub fn contains(&self, degree: f64) -> bool {
        self.intervals.iter().any(|i| i.contains(degree))
    }

    /// Whether the cell at `target` can be seen through the open directions.
    ///
    /// A cell is visible when either edge of its footprint falls inside an
    /// open interval.
    pub fn is_visible(&self, target: Offset) -> bool {
        cell_to_intervals(target, Facing::Full).any(|span| self.contains(span.start) || self.contains(span.end))
    }

    /// Remove the obstacle's span from the open directions.
    pub fn subtract(&mut self, obstacle: Interval) {
        let Some(first) = self.intervals.iter().position(|i| i.touches(&obstacle)) else {
            tracing::warn!(
                start = obstacle.start,
                end = obstacle.end,
                open = self.intervals.len(),
                "obstacle overlaps no open interval, leaving sight unchanged"
            );
            return;
        };

        let hit = self.intervals[first];
        if hit.contains(obstacle.start) && hit.contains(obstacle.end) {
            let mut remains = Vec::with_capacity(2);
            if hit.start < obstacle.start {
                remains.push(Interval::new(hit.start, obstacle.start));
            }
            if obstacle.end < hit.end {
                remains.push(Interval::new(obstacle.end, hit.end));
            }
            self.intervals.splice(first..=first, remains);
            return;
        }

        // The obstacle runs past `hit`: clip it and every following interval
        // the obstacle reaches, stopping at the first one it only partly covers.
        let mut end = first;
        let mut kept = Vec::new();
        while end < self.intervals.len() && self.intervals[end].start <= obstacle.end {
            let current = self.intervals[end];
            end += 1;
            if current.start < obstacle.start {
                kept.push(Interval::new(current.start, obstacle.start));
            }
            if obstacle.end < current.end {
                kept.push(Interval::new(obstacle.end, current.end));
                break;
            }
        }
        self.intervals.splice(first..end, kept);
    }
}
