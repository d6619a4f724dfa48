//! Fleet transition planning command

use std::path::Path;

use anyhow::{Context, Result};
use fleet_algo::plan::{plan_fleet, MilpSolverKind, SolverConfig};
use fleet_io::PlanExport;
use tracing::info;

use super::util::{ensure_parent, load_data};

pub fn handle(
    config: Option<&Path>,
    out: &Path,
    json: Option<&Path>,
    solver: Option<MilpSolverKind>,
) -> Result<()> {
    let data = load_data(config)?;
    let solver_config = SolverConfig::with_solver(solver.unwrap_or_default());

    println!(
        "Fleet problem: {} years, {} vehicle types, {} size classes ({} combinations)",
        data.years().len(),
        data.vehicle_types().len(),
        data.size_classes().len(),
        data.num_combinations()
    );
    info!("Solving with {}", solver_config.solver);

    let plan = plan_fleet(&data, &solver_config).context("solving fleet transition plan")?;

    ensure_parent(out)?;
    plan.to_csv(out)?;
    if let Some(json_path) = json {
        ensure_parent(json_path)?;
        plan.to_json(json_path)?;
    }

    println!();
    print!("{}", plan.summary());
    println!("\nPlan written to {}", out.display());
    if let Some(json_path) = json {
        println!("Full plan written to {}", json_path.display());
    }

    Ok(())
}
