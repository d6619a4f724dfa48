//! Uniform export trait for solved fleet plans

use anyhow::Result;
use std::path::Path;

/// Header of the per-combination plan table.
pub const PLAN_CSV_COLUMNS: [&str; 6] =
    ["Year", "VehicleType", "SizeClass", "Buy", "Sell", "Operate"];

/// Trait for exporting solved plans to files
pub trait PlanExport {
    /// Export one row per (year, vehicle type, size class) in extraction order,
    /// with the columns in [`PLAN_CSV_COLUMNS`]
    fn to_csv(&self, path: &Path) -> Result<()>;

    /// Export the full plan, including per-year summaries
    fn to_json(&self, path: &Path) -> Result<()>;

    /// Convert to JSON value (for stdout)
    fn to_json_value(&self) -> Result<serde_json::Value>;
}

// The implementation for fleet_algo::plan::FleetPlan lives in fleet-algo
// (src/plan/export.rs), since fleet-algo already depends on this crate.
