use fogline_common::{Cell, GridAccessor, Offset};

use crate::interval::IntervalSet;
use crate::ring::{RING_TEMPLATE_RADIUS, generate_ring};
use crate::silhouette::cell_to_intervals;

/// Largest view radius the resolver accepts. The last ring expanded is one
/// past the radius, which must still lie on the ring template.
pub const MAX_VIEW_RADIUS: u32 = RING_TEMPLATE_RADIUS - 1;

/// Cells one observer sees this frame, as offsets from the observer.
///
/// The observer comes first, then every visible offset ring by ring in
/// template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    offsets: Vec<Offset>,
}

impl Visibility {
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: Offset) -> bool {
        self.offsets.contains(&offset)
    }

    /// Absolute, wrapped cells seen by an observer standing at `observer`.
    pub fn cells<'a, G: GridAccessor + ?Sized>(
        &'a self,
        observer: Cell,
        grid: &'a G,
    ) -> impl Iterator<Item = Cell> + 'a {
        self.offsets.iter().map(move |o| grid.wrap(observer + *o))
    }
}

/// Summary of one expanded ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingReport {
    pub distance: u32,
    /// Offsets on the ring.
    pub candidates: usize,
    /// Offsets on the ring that were visible.
    pub visible: usize,
    /// Visible offsets that were opaque and narrowed the sight.
    pub occluders: usize,
}

/// Shadow caster for a single observer, expanded one ring at a time.
///
/// Starts with every direction open and only the observer visible. Each
/// [`step`](Resolver::step) expands the next ring: cells whose footprint
/// still meets an open direction are visible, and visible opaque cells then
/// cut their silhouette out of the open directions before the next ring.
/// The ring just expanded is then compared against the radius, so the last
/// ring expanded is `max_radius + 1`.
pub struct Resolver<'g, G: ?Sized> {
    grid: &'g G,
    observer: Cell,
    max_radius: u32,
    distance: u32,
    open: IntervalSet,
    visible: Vec<Offset>,
    done: bool,
}

impl<'g, G: GridAccessor + ?Sized> Resolver<'g, G> {
    /// Prepare a resolver around `observer` bounded by `max_radius`.
    ///
    /// Radii past [`MAX_VIEW_RADIUS`] are clamped to it.
    pub fn new(grid: &'g G, observer: Cell, max_radius: u32) -> Self {
        let max_radius = if max_radius > MAX_VIEW_RADIUS {
            tracing::warn!(
                requested = max_radius,
                limit = MAX_VIEW_RADIUS,
                "view radius exceeds ring template, clamping"
            );
            MAX_VIEW_RADIUS
        } else {
            max_radius
        };

        Self {
            grid,
            observer: grid.wrap(observer),
            max_radius,
            distance: 1,
            open: IntervalSet::full_circle(),
            visible: vec![Offset::ZERO],
            done: false,
        }
    }

    /// Next ring to expand, or one past the last once done.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    /// Directions still open.
    pub fn open(&self) -> &IntervalSet {
        &self.open
    }

    /// Offsets found visible so far.
    pub fn visible(&self) -> &[Offset] {
        &self.visible
    }

    /// True once a ring past the radius has been expanded or every
    /// direction is blocked.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Expand the next ring. Returns `None` once done.
    pub fn step(&mut self) -> Option<RingReport> {
        if self.done {
            return None;
        }

        let ring = generate_ring(self.distance);
        let first_new = self.visible.len();
        let open = &self.open;
        self.visible
            .extend(ring.iter().copied().filter(|p| open.is_visible(*p)));

        let mut occluders = 0;
        for &p in &self.visible[first_new..] {
            let Some(facing) = self.grid.facing_at_wrapped(self.observer + p) else {
                continue;
            };
            occluders += 1;
            tracing::debug!(offset = ?p, ?facing, "occluder in view");
            for span in cell_to_intervals(p, facing) {
                self.open.subtract(span);
            }
        }

        let report = RingReport {
            distance: self.distance,
            candidates: ring.len(),
            visible: self.visible.len() - first_new,
            occluders,
        };
        tracing::trace!(
            distance = report.distance,
            candidates = report.candidates,
            visible = report.visible,
            occluders = report.occluders,
            open_degrees = self.open.open_degrees(),
            "ring expanded"
        );

        self.done = self.distance > self.max_radius || self.open.is_empty();
        self.distance += 1;
        Some(report)
    }

    /// Expand every remaining ring and return what was seen.
    pub fn run(mut self) -> Visibility {
        while self.step().is_some() {}
        Visibility {
            offsets: self.visible,
        }
    }
}

/// Compute what an observer at `observer` sees out to ring `max_radius + 1`.
///
/// Pure over its inputs: the same grid, observer and radius always give the
/// same result.
pub fn resolve<G: GridAccessor + ?Sized>(grid: &G, observer: Cell, max_radius: u32) -> Visibility {
    let _span = tracing::info_span!("resolve_visibility", x = observer.x, y = observer.y, max_radius).entered();
    let visibility = Resolver::new(grid, observer, max_radius).run();
    tracing::debug!(visible = visibility.len(), "visibility resolved");
    visibility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::ring_template;
    use fogline_common::Facing;
    use glam::IVec2;
    use std::collections::{BTreeMap, HashSet};

    /// Sparse toroidal test grid.
    struct TestGrid {
        width: i32,
        height: i32,
        walls: BTreeMap<(i32, i32), Facing>,
    }

    impl TestGrid {
        fn open(width: i32, height: i32) -> Self {
            Self {
                width,
                height,
                walls: BTreeMap::new(),
            }
        }

        fn with(mut self, x: i32, y: i32, facing: Facing) -> Self {
            self.walls.insert((x, y), facing);
            self
        }
    }

    impl GridAccessor for TestGrid {
        fn width(&self) -> i32 {
            self.width
        }

        fn height(&self) -> i32 {
            self.height
        }

        fn facing_at(&self, cell: Cell) -> Option<Facing> {
            self.walls.get(&(cell.x, cell.y)).copied()
        }
    }

    fn offsets(v: &Visibility) -> HashSet<IVec2> {
        v.offsets().iter().copied().collect()
    }

    #[test]
    fn open_grid_sees_whole_template() {
        let grid = TestGrid::open(64, 64);
        for radius in [0, 1, 2, 5, 12] {
            for observer in [IVec2::new(0, 0), IVec2::new(31, 17), IVec2::new(63, 63)] {
                let seen = resolve(&grid, observer, radius);
                let template: HashSet<_> = ring_template(radius + 1).into_iter().collect();
                assert_eq!(offsets(&seen), template, "radius {radius} at {observer}");
                assert_eq!(seen.len(), template.len());
            }
        }
    }

    #[test]
    fn observer_always_first() {
        let grid = TestGrid::open(7, 7).with(4, 3, Facing::Full);
        let seen = resolve(&grid, IVec2::new(3, 3), 3);
        assert_eq!(seen.offsets()[0], IVec2::ZERO);
    }

    #[test]
    fn identical_inputs_identical_output() {
        let grid = TestGrid::open(20, 20)
            .with(5, 4, Facing::Full)
            .with(7, 9, Facing::Up)
            .with(3, 3, Facing::Left);
        let a = resolve(&grid, IVec2::new(6, 6), 8);
        let b = resolve(&grid, IVec2::new(6, 6), 8);
        assert_eq!(a, b);
    }

    #[test]
    fn single_obstacle_only_removes_cells() {
        let open = TestGrid::open(30, 30);
        let baseline = offsets(&resolve(&open, IVec2::new(15, 15), 10));
        for facing in Facing::ALL {
            for (dx, dy) in [(1, 0), (0, -2), (3, 1), (-2, -2), (-4, 3)] {
                let grid = TestGrid::open(30, 30).with(15 + dx, 15 + dy, facing);
                let seen = offsets(&resolve(&grid, IVec2::new(15, 15), 10));
                assert!(seen.is_subset(&baseline), "{facing:?} at ({dx},{dy})");
                if facing == Facing::Full {
                    assert!(seen.len() < baseline.len(), "wall at ({dx},{dy}) cast no shadow");
                }
                assert!(seen.contains(&IVec2::new(dx, dy)), "obstacle itself must be seen");
            }
        }
    }

    #[test]
    fn full_obstacle_to_the_right() {
        let grid = TestGrid::open(7, 7).with(4, 3, Facing::Full);
        let seen = resolve(&grid, IVec2::new(3, 3), 3);

        for p in generate_ring(1) {
            assert!(seen.contains(p), "ring 1 offset {p} hidden");
        }
        assert!(!seen.contains(IVec2::new(2, 0)), "cell behind the obstacle is visible");
        assert!(seen.contains(IVec2::new(2, -1)));
        assert!(seen.contains(IVec2::new(2, 1)));
    }

    #[test]
    fn half_facing_casts_narrower_shadow() {
        let observer = IVec2::new(10, 10);
        let full = TestGrid::open(21, 21).with(10, 9, Facing::Full);
        let upper = TestGrid::open(21, 21).with(10, 9, Facing::Up);
        let under_full = offsets(&resolve(&full, observer, 6));
        let under_upper = offsets(&resolve(&upper, observer, 6));

        assert!(under_full.is_subset(&under_upper));
        assert!(under_upper.len() > under_full.len());
        // Off-axis cells the narrower shadow releases.
        assert!(!under_full.contains(&IVec2::new(1, -3)));
        assert!(under_upper.contains(&IVec2::new(1, -3)));
        assert!(under_upper.contains(&IVec2::new(-1, -3)));
        // The cell straight behind the upper half stays visible.
        assert!(under_upper.contains(&IVec2::new(0, -2)));
        assert!(!under_full.contains(&IVec2::new(0, -2)));
    }

    #[test]
    fn upper_half_above_keeps_next_cell_visible() {
        let observer = IVec2::new(3, 3);
        let full = TestGrid::open(7, 7).with(3, 2, Facing::Full);
        let upper = TestGrid::open(7, 7).with(3, 2, Facing::Up);
        let under_full = resolve(&full, observer, 3);
        let under_upper = resolve(&upper, observer, 3);
        assert!(under_upper.contains(IVec2::new(0, -1)));
        assert!(under_upper.contains(IVec2::new(0, -2)));
        assert!(!under_full.contains(IVec2::new(0, -2)));
    }

    #[test]
    fn wrapped_observer_matches_interior_observer() {
        let walls: [(i32, i32, Facing); 3] =
            [(1, 0, Facing::Full), (0, 2, Facing::Down), (-2, -1, Facing::Right)];
        let mut edge = TestGrid::open(16, 16);
        let mut inner = TestGrid::open(16, 16);
        for (dx, dy, f) in walls {
            edge = edge.with(dx.rem_euclid(16), dy.rem_euclid(16), f);
            inner = inner.with(8 + dx, 8 + dy, f);
        }
        let at_edge = resolve(&edge, IVec2::new(0, 0), 6);
        let at_inner = resolve(&inner, IVec2::new(8, 8), 6);
        assert_eq!(at_edge, at_inner);

        let cells: HashSet<_> = at_edge.cells(IVec2::new(0, 0), &edge).collect();
        assert!(cells.contains(&IVec2::new(15, 0)));
        assert!(cells.contains(&IVec2::new(0, 15)));
        for c in &cells {
            assert!((0..16).contains(&c.x) && (0..16).contains(&c.y));
        }
    }

    #[test]
    fn unwrapped_observer_is_wrapped() {
        let grid = TestGrid::open(9, 9).with(1, 0, Facing::Full);
        let a = resolve(&grid, IVec2::new(0, 0), 4);
        let b = resolve(&grid, IVec2::new(-9, 18), 4);
        assert_eq!(a, b);
    }

    #[test]
    fn walled_in_observer_stops_early() {
        let mut grid = TestGrid::open(11, 11);
        for p in generate_ring(1) {
            grid = grid.with(5 + p.x, 5 + p.y, Facing::Full);
        }
        let mut resolver = Resolver::new(&grid, IVec2::new(5, 5), 5);
        let first = resolver.step().expect("first ring");
        assert_eq!(first.visible, 8);
        assert_eq!(first.occluders, 8);
        assert!(resolver.open().is_empty());
        assert!(resolver.is_done());
        assert!(resolver.step().is_none());
        assert_eq!(resolver.run().len(), 9);
    }

    #[test]
    fn steps_report_each_ring() {
        let grid = TestGrid::open(32, 32);
        let mut resolver = Resolver::new(&grid, IVec2::new(3, 3), 4);
        let mut distances = Vec::new();
        while let Some(report) = resolver.step() {
            assert_eq!(report.visible, report.candidates);
            assert_eq!(report.occluders, 0);
            distances.push(report.distance);
        }
        assert_eq!(distances, vec![1, 2, 3, 4, 5]);
        assert!(resolver.is_done());
        assert_eq!(resolver.visible().len(), ring_template(5).len());
    }

    #[test]
    fn ring_past_radius_is_expanded_last() {
        let grid = TestGrid::open(32, 32);
        let mut resolver = Resolver::new(&grid, IVec2::new(3, 3), 2);
        let mut last = None;
        while let Some(report) = resolver.step() {
            last = Some(report.distance);
        }
        assert_eq!(last, Some(3));
        assert!(resolver.step().is_none());
    }

    #[test]
    fn radius_is_clamped_to_template() {
        let grid = TestGrid::open(8, 8);
        let resolver = Resolver::new(&grid, IVec2::ZERO, RING_TEMPLATE_RADIUS + 10);
        assert_eq!(resolver.max_radius(), MAX_VIEW_RADIUS);
        let seen = resolve(&grid, IVec2::ZERO, RING_TEMPLATE_RADIUS + 10);
        assert_eq!(seen.len(), ring_template(RING_TEMPLATE_RADIUS).len());
    }

    #[test]
    fn zero_radius_sees_first_ring() {
        let grid = TestGrid::open(8, 8);
        let seen = resolve(&grid, IVec2::new(2, 2), 0);
        assert_eq!(seen.offsets()[0], IVec2::ZERO);
        assert_eq!(&seen.offsets()[1..], generate_ring(1).as_slice());
    }
}
