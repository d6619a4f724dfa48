use std::path::Path;

use anyhow::Result;
use fleet_core::FleetPlanningData;
use fleet_io::importers::load_scenario;
use tracing::info;

/// Load a scenario file, or fall back to the built-in reference dataset.
pub fn load_data(config: Option<&Path>) -> Result<FleetPlanningData> {
    match config {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            load_scenario(path)
        }
        None => {
            info!("No scenario given, using the built-in reference dataset");
            Ok(FleetPlanningData::reference())
        }
    }
}

/// Create the parent directory of an output path if needed.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
