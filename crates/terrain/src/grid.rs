use std::path::Path;

use fogline_common::{Cell, Facing, GridAccessor, wrap};
use glam::IVec2;

/// Errors from reading an ASCII terrain map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("map has no rows")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("second observer marker at {second}, first at {first}")]
    MultipleObservers { first: Cell, second: Cell },
}

/// A parsed map: terrain plus the observer marker, if the map had one.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub grid: TerrainGrid,
    pub observer: Option<Cell>,
}

/// Dense toroidal terrain grid.
///
/// Each cell is open (`None`) or holds an obstacle with a [`Facing`]. All
/// coordinates wrap, so the left edge touches the right and the top touches
/// the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    cells: Vec<Option<Facing>>,
}

impl TerrainGrid {
    /// Create an open grid.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    fn index(&self, cell: Cell) -> usize {
        let c = wrap(cell, self.width, self.height);
        (c.y * self.width + c.x) as usize
    }

    /// Set or clear the obstacle at `cell` (wrapped).
    pub fn set(&mut self, cell: Cell, facing: Option<Facing>) {
        let i = self.index(cell);
        self.cells[i] = facing;
    }

    pub fn place(&mut self, cell: Cell, facing: Facing) {
        self.set(cell, Some(facing));
    }

    pub fn clear(&mut self, cell: Cell) {
        self.set(cell, None);
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Parse an ASCII map.
    ///
    /// `.` is open ground, `@` is open ground holding the observer, `#` is a
    /// full obstacle and `^ > v <` are obstacles solid on that half. Blank
    /// lines are skipped. Any other glyph is read as a full obstacle.
    pub fn parse(text: &str) -> Result<ParsedMap, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let width = first.chars().count();

        let mut grid = TerrainGrid::new(width as i32, rows.len() as i32);
        let mut observer: Option<Cell> = None;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = IVec2::new(x as i32, y as i32);
                let facing = match glyph {
                    '.' => None,
                    '@' => {
                        if let Some(first) = observer {
                            return Err(MapError::MultipleObservers {
                                first,
                                second: cell,
                            });
                        }
                        observer = Some(cell);
                        None
                    }
                    '#' => Some(Facing::Full),
                    '^' => Some(Facing::Up),
                    '>' => Some(Facing::Right),
                    'v' => Some(Facing::Down),
                    '<' => Some(Facing::Left),
                    other => {
                        tracing::warn!(?other, x, y, "unknown map glyph, treating as full obstacle");
                        Some(Facing::Full)
                    }
                };
                grid.set(cell, facing);
            }
        }

        tracing::debug!(
            width = grid.width,
            height = grid.height,
            obstacles = grid.obstacle_count(),
            "map parsed"
        );
        Ok(ParsedMap { grid, observer })
    }

    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<ParsedMap, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Glyph for a terrain cell, as understood by [`TerrainGrid::parse`].
    pub fn glyph(facing: Option<Facing>) -> char {
        match facing {
            None => '.',
            Some(Facing::Full) => '#',
            Some(Facing::Up) => '^',
            Some(Facing::Right) => '>',
            Some(Facing::Down) => 'v',
            Some(Facing::Left) => '<',
        }
    }

    /// Render the terrain as an ASCII map, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in self.cells.chunks(self.width as usize) {
            out.extend(row.iter().map(|f| Self::glyph(*f)));
            out.push('\n');
        }
        out
    }
}

impl GridAccessor for TerrainGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn facing_at(&self, cell: Cell) -> Option<Facing> {
        self.cells[self.index(cell)]
    }
}
