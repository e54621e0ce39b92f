//! Interactive TUI for the hazard map.
//!
//! Presents a menu-driven interface using `dialoguer` so the full
//! engine loop (search, layer toggles, selection, report submission)
//! can be driven from a terminal without memorising CLI flags.

use chrono::Utc;
use dialoguer::{Confirm, Input, Select};
use hazard_map_dataset::SpatialDataset;
use hazard_map_dataset_models::{GeoPoint, HazardReport, Hotspot};
use hazard_map_gazetteer::Gazetteer;
use hazard_map_hazard_models::{HazardKind, HazardSeverity, MapLayer, ReportStatus};
use hazard_map_scene::SceneConfig;
use hazard_map_view::MapViewController;

use crate::surface::TerminalSurface;

/// Runs the interactive map menu loop against the embedded seed data.
///
/// # Errors
///
/// Returns an error if an I/O prompt fails or the user declines to
/// retry a failed surface initialization.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let seed = hazard_map_seed::embedded();
    let session = Session {
        seed_reports: seed.reports.clone(),
        seed_hotspots: seed.hotspots.clone(),
        submitted: Vec::new(),
    };

    let dataset = SpatialDataset::new(seed.reports, seed.hotspots, Gazetteer::embedded());
    let mut controller = init_with_retry(dataset)?;

    run_loop(&mut controller, session)
}

/// Reports submitted this session, layered on top of the seed set.
struct Session {
    seed_reports: Vec<HazardReport>,
    seed_hotspots: Vec<Hotspot>,
    submitted: Vec<HazardReport>,
}

impl Session {
    /// The full working set: seed entities plus session submissions.
    fn working_set(&self) -> (Vec<HazardReport>, Vec<Hotspot>) {
        let mut reports = self.seed_reports.clone();
        reports.extend(self.submitted.iter().cloned());
        (reports, self.seed_hotspots.clone())
    }
}

/// Builds the controller, offering a retry prompt if the surface fails
/// to initialize with a retryable error.
fn init_with_retry(
    dataset: SpatialDataset,
) -> Result<MapViewController<TerminalSurface>, Box<dyn std::error::Error>> {
    match MapViewController::new(dataset, TerminalSurface::new(), SceneConfig::default()) {
        Ok(controller) => Ok(controller),
        Err((mut controller, e)) => {
            log::error!("Map surface failed to initialize: {e}");
            let mut last = e;
            while last.is_retryable() {
                let retry = Confirm::new()
                    .with_prompt("Map failed to load. Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    break;
                }
                match controller.retry_init() {
                    Ok(()) => return Ok(*controller),
                    Err(next) => {
                        log::error!("Map surface retry failed: {next}");
                        last = next;
                    }
                }
            }
            Err(Box::new(last))
        }
    }
}

fn run_loop(
    controller: &mut MapViewController<TerminalSurface>,
    mut session: Session,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        println!();
        controller.surface().draw();
        println!();

        let active: Vec<String> = controller
            .active_layers()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!(
            "Layers: [{}]  Search: {:?}",
            active.join(", "),
            controller.search_text()
        );

        let items = &[
            "Search",
            "Toggle layer",
            "Select entity",
            "Clear selection",
            "Submit report",
            "Exit",
        ];

        let selection = Select::new()
            .with_prompt("Hazard map")
            .items(items)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let text: String = Input::new()
                    .with_prompt("Search location or text (blank for all)")
                    .allow_empty(true)
                    .interact_text()?;
                controller.set_search_text(text)?;
            }
            1 => {
                let layer_id: String = Input::new()
                    .with_prompt(format!("Layer id ({})", layer_universe()))
                    .interact_text()?;
                // Unknown ids are warned about and ignored.
                controller.toggle_layer_id(&layer_id)?;
            }
            2 => {
                let id: String = Input::new().with_prompt("Entity id").interact_text()?;
                if !controller.select(&id) {
                    println!("No entity with id '{id}' in the current scene.");
                }
            }
            3 => controller.clear_selection(),
            4 => {
                let report = prompt_report()?;
                session.submitted.push(report);
                let (reports, hotspots) = session.working_set();
                controller.refresh_data(reports, hotspots)?;
                println!("Report submitted (pending verification).");
            }
            5 => {
                println!("Goodbye.");
                return Ok(());
            }
            _ => unreachable!(),
        }
    }
}

/// Prompts for a new hazard report. Submissions start pending and get a
/// generated id; the dataset itself never mints entities.
fn prompt_report() -> Result<HazardReport, Box<dyn std::error::Error>> {
    let kinds = HazardKind::all();
    let kind_labels: Vec<String> = kinds.iter().map(ToString::to_string).collect();
    let kind_idx = Select::new()
        .with_prompt("Hazard kind")
        .items(&kind_labels)
        .default(0)
        .interact()?;

    let severities = HazardSeverity::all();
    let severity_labels: Vec<String> = severities.iter().map(ToString::to_string).collect();
    let severity_idx = Select::new()
        .with_prompt("Severity")
        .items(&severity_labels)
        .default(0)
        .interact()?;

    let title: String = Input::new().with_prompt("Title").interact_text()?;
    let description: String = Input::new()
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;
    let latitude: f64 = Input::new().with_prompt("Latitude").interact_text()?;
    let longitude: f64 = Input::new().with_prompt("Longitude").interact_text()?;

    Ok(HazardReport {
        id: uuid::Uuid::new_v4().to_string(),
        kind: kinds[kind_idx],
        severity: severities[severity_idx],
        location: GeoPoint::new(latitude, longitude),
        title,
        description,
        reported_at: Utc::now(),
        status: ReportStatus::Pending,
    })
}

/// Formats the layer universe for help text.
fn layer_universe() -> String {
    MapLayer::all()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
