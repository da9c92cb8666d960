use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fogline_common::{Facing, GridAccessor};
use fogline_sight::{ViewConfig, resolve};
use fogline_terrain::{FogMap, TerrainGrid};
use glam::IVec2;
use tracing_subscriber::EnvFilter;

mod render;

use render::render_fog;

#[derive(Parser)]
#[command(name = "fogline-cli", about = "Inspect fog-of-war visibility on ASCII maps")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ViewArgs {
    /// JSON view configuration (viewport size)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Viewport width in cells; overrides the configuration file
    #[arg(short, long)]
    width: Option<u32>,
}

impl ViewArgs {
    fn config(&self) -> anyhow::Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::from_json_file(path)
                .with_context(|| format!("loading view config {}", path.display()))?,
            None => ViewConfig::default(),
        };
        if let Some(width) = self.width {
            config = ViewConfig::new(width, config.viewport_height)?;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Show what an observer sees on a map
    View {
        /// ASCII map file
        #[arg(short, long)]
        map: PathBuf,
        /// Observer position as x,y; defaults to the map's @ marker
        #[arg(short, long, value_parser = parse_cell)]
        at: Option<IVec2>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Walk an observer along a path, printing the fog after each step
    Walk {
        /// ASCII map file
        #[arg(short, long)]
        map: PathBuf,
        /// Steps as x,y;x,y;...
        #[arg(short, long, value_delimiter = ';', value_parser = parse_cell)]
        path: Vec<IVec2>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Run the 7x7 single-wall scenario
    Demo,
}

fn parse_cell(s: &str) -> Result<IVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(IVec2::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("fogline-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", fogline_common::crate_info());
            println!("sight: {}", fogline_sight::crate_info());
            println!("terrain: {}", fogline_terrain::crate_info());
            println!("ring template radius: {}", fogline_sight::RING_TEMPLATE_RADIUS);
        }
        Commands::View { map, at, view } => {
            let parsed = TerrainGrid::load(&map)
                .with_context(|| format!("loading map {}", map.display()))?;
            let observer = at
                .or(parsed.observer)
                .context("no observer: pass --at or put @ in the map")?;
            let config = view.config()?;
            let radius = config.max_horizontal_radius();
            let grid = parsed.grid;
            tracing::info!(%observer, radius, "resolving view");

            let mut fog = FogMap::for_grid(&grid);
            let stats = fog.observe(&grid, observer, radius);
            print!("{}", render_fog(&grid, &fog, Some(observer), &config));
            println!(
                "observer={observer} radius={radius} visible={} hash={:#x}",
                stats.visible,
                fog.state_hash()
            );
        }
        Commands::Walk { map, path, view } => {
            let parsed = TerrainGrid::load(&map)
                .with_context(|| format!("loading map {}", map.display()))?;
            let config = view.config()?;
            let radius = config.max_horizontal_radius();
            let grid = parsed.grid;
            let steps: Vec<IVec2> = parsed.observer.into_iter().chain(path).collect();
            if steps.is_empty() {
                anyhow::bail!("no steps: pass --path or put @ in the map");
            }
            tracing::info!(steps = steps.len(), radius, "walking");

            let mut fog = FogMap::for_grid(&grid);
            for (i, step) in steps.iter().enumerate() {
                let stats = fog.observe(&grid, *step, radius);
                println!(
                    "step {i}: at {} revealed={} fogged={} visible={}",
                    grid.wrap(*step),
                    stats.revealed,
                    stats.fogged,
                    stats.visible
                );
                print!("{}", render_fog(&grid, &fog, Some(*step), &config));
            }
            let counts = fog.counts();
            println!(
                "explored {} of {} cells, hash={:#x}",
                counts.visible + counts.fog,
                counts.visible + counts.fog + counts.dark,
                fog.state_hash()
            );
        }
        Commands::Demo => {
            println!("Single wall: 7x7 torus, observer (3,3), full wall at (4,3)");

            let mut grid = TerrainGrid::new(7, 7);
            grid.place(IVec2::new(4, 3), Facing::Full);
            let observer = IVec2::new(3, 3);

            let seen = resolve(&grid, observer, 3);
            let mut fog = FogMap::for_grid(&grid);
            fog.apply(seen.cells(observer, &grid));
            print!("{}", render_fog(&grid, &fog, Some(observer), &ViewConfig::default()));

            for offset in [IVec2::new(2, 0), IVec2::new(2, -1), IVec2::new(2, 1)] {
                println!(
                    "offset {offset}: {}",
                    if seen.contains(offset) { "visible" } else { "hidden" }
                );
            }
        }
    }

    Ok(())
}
