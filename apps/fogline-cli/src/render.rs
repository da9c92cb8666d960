use fogline_common::{Cell, GridAccessor, VisibilityState};
use fogline_sight::ViewConfig;
use fogline_terrain::{FogMap, TerrainGrid};
use glam::IVec2;

/// Glyph for a remembered cell.
fn fog_glyph(terrain: char) -> char {
    if terrain == '.' { ',' } else { '%' }
}

/// Top-left cell of the drawn window along one axis.
fn window_start(observer: Option<i32>, view: i32, map: i32) -> i32 {
    match observer {
        Some(o) if view < map => o - view / 2,
        _ => 0,
    }
}

/// Draw the fog over the terrain as text.
///
/// Visible cells show their terrain glyph, remembered cells show `,` for
/// open ground and `%` for obstacles, dark cells are blank. The observer is
/// drawn as `@`. Maps larger than the viewport are cut to a viewport-sized
/// window centred on the observer, wrapping around the map edges.
pub fn render_fog(
    grid: &TerrainGrid,
    fog: &FogMap,
    observer: Option<Cell>,
    view: &ViewConfig,
) -> String {
    let observer = observer.map(|o| grid.wrap(o));
    let cols = i32::try_from(view.viewport_width).map_or(grid.width(), |w| w.min(grid.width()));
    let rows = i32::try_from(view.viewport_height).map_or(grid.height(), |h| h.min(grid.height()));
    let origin = IVec2::new(
        window_start(observer.map(|o| o.x), cols, grid.width()),
        window_start(observer.map(|o| o.y), rows, grid.height()),
    );

    let mut out = String::with_capacity(((cols + 1) * rows) as usize);
    for y in 0..rows {
        for x in 0..cols {
            let cell = grid.wrap(origin + IVec2::new(x, y));
            let terrain = TerrainGrid::glyph(grid.facing_at(cell));
            let glyph = match fog.state(cell) {
                _ if observer == Some(cell) => '@',
                VisibilityState::Visible => terrain,
                VisibilityState::Fog => fog_glyph(terrain),
                VisibilityState::Dark => ' ',
            };
            out.push(glyph);
        }
        // Keep rows rectangular even when the tail is dark.
        out.push('|');
        out.push('\n');
    }
    out
}
