#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the hazard map engine.
//!
//! One-shot subcommands inspect the engine's output (the filtered,
//! classified render scene; the gazetteer registry) as text or JSON.
//! With no subcommand, drops into the interactive menu-driven map.

mod interactive;
mod surface;

use std::collections::BTreeSet;

use clap::{Parser, Subcommand};
use hazard_map_dataset::SpatialDataset;
use hazard_map_dataset_models::{BoundingBox, ViewQuery};
use hazard_map_gazetteer::Gazetteer;
use hazard_map_hazard_models::MapLayer;
use hazard_map_scene::{MapRenderer, RenderScene, SceneConfig};

#[derive(Parser)]
#[command(name = "hazard_map_cli", about = "Hazard map inspection tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the render scene for a query against the seed data
    Scene {
        /// Search text matched against report titles, descriptions, and
        /// place names
        #[arg(long, default_value = "")]
        search: String,
        /// Comma-separated list of active layers (default: all)
        #[arg(long)]
        layers: Option<String>,
        /// Bounding box as `west,south,east,north`
        #[arg(long)]
        bbox: Option<String>,
        /// Emit the scene as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the named regions the gazetteer resolves place names from
    Regions,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run();
    };

    match command {
        Commands::Scene {
            search,
            layers,
            bbox,
            json,
        } => {
            let seed = hazard_map_seed::embedded();
            let dataset = SpatialDataset::new(seed.reports, seed.hotspots, Gazetteer::embedded());

            let active_layers = layers.as_deref().map_or_else(
                || MapLayer::all().iter().copied().collect::<BTreeSet<_>>(),
                parse_layers,
            );

            let query = ViewQuery {
                search_text: search,
                active_layers,
                bounds: bbox.as_deref().and_then(parse_bbox),
            };

            let scene = RenderScene::build(&dataset.query(&query), &SceneConfig::default());

            if json {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                println!(
                    "{} marker(s), {} circle(s)",
                    scene.markers.len(),
                    scene.circles.len()
                );
                let mut renderer = MapRenderer::new(surface::TerminalSurface::new());
                renderer.init()?;
                renderer.render(&scene)?;
                renderer.surface().draw();
            }
        }
        Commands::Regions => {
            let gazetteer = Gazetteer::embedded();
            let mut regions: Vec<_> = gazetteer.regions().collect();
            regions.sort_by(|a, b| a.id.cmp(&b.id));
            println!("{:<20} NAME", "ID");
            println!("{}", "-".repeat(50));
            for region in regions {
                println!("{:<20} {}", region.id, region.name);
            }
        }
    }

    Ok(())
}

/// Parses a comma-separated layer list. Unknown ids are warned about
/// and dropped rather than failing the command.
fn parse_layers(s: &str) -> BTreeSet<MapLayer> {
    s.split(',')
        .filter_map(|raw| {
            let trimmed = raw.trim();
            match trimmed.parse() {
                Ok(layer) => Some(layer),
                Err(_) => {
                    log::warn!("Ignoring unknown layer id '{trimmed}'");
                    None
                }
            }
        })
        .collect()
}

/// Parses a bounding box string `"west,south,east,north"` into a
/// [`BoundingBox`].
fn parse_bbox(s: &str) -> Option<BoundingBox> {
    let parts: Vec<f64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 4 {
        Some(BoundingBox::new(parts[0], parts[1], parts[2], parts[3]))
    } else {
        log::warn!("Ignoring malformed bbox '{s}' (expected west,south,east,north)");
        None
    }
}
