//! Scenario validation command

use std::path::Path;

use anyhow::{Context, Result};
use fleet_algo::plan::{build_model, carbon_floor, infeasible_suspects, ConstraintKind};

use super::util::load_data;

pub fn handle(config: Option<&Path>) -> Result<()> {
    let data = load_data(config)?;
    data.validate().context("validating scenario")?;
    let model = build_model(&data).context("building model")?;

    println!("Scenario is valid");
    println!(
        "  {} years, {} vehicle types, {} size classes",
        data.years().len(),
        data.vehicle_types().len(),
        data.size_classes().len()
    );
    println!(
        "  {} variables ({} integer), {} constraints",
        model.num_variables(),
        model.num_integer_variables(),
        model.num_constraints()
    );
    for kind in ConstraintKind::ALL {
        println!("    {}: {}", kind, model.constraints_of(kind).count());
    }

    let suspects = infeasible_suspects(&data)?;
    for &year in data.years() {
        let name = format!("{}_{}", ConstraintKind::CarbonLimit, year);
        if suspects.contains(&name) {
            println!(
                "  Warning: {} = {:.2} is below the emissions floor {:.2}",
                name,
                data.carbon_limit(year)?,
                carbon_floor(&data, year)?
            );
        }
    }
    if !suspects.is_empty() {
        println!("  Solving this scenario will report it infeasible");
    }

    Ok(())
}
