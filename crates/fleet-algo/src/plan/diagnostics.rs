//! Infeasibility diagnostics
//!
//! Range, sell-limit and non-negativity constraints can always be met by
//! buying more vehicles, so an infeasible model means some year's carbon cap
//! is below the emissions any plan must produce to cover demand.

use fleet_core::{FleetPlanningData, Year};

use super::model::ConstraintKind;
use super::PlanError;

/// Relative slack before a limit counts as below the floor.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Least emissions that can cover every size class's demand in `year`.
///
/// Per size class, serving demand `D` entirely with vehicle type `v` takes
/// `D / range` vehicle-equivalents, each emitting `emissions · D`. Mixing
/// types is linear in between, so the cleanest type per class gives the floor.
pub fn carbon_floor(data: &FleetPlanningData, year: Year) -> Result<f64, PlanError> {
    // Demand does not vary by year; only reject years outside the horizon.
    data.carbon_limit(year)?;

    let mut floor = 0.0;
    for size_class in data.size_classes() {
        let demand = data.demand(size_class)?;
        let mut cleanest = f64::INFINITY;
        for vehicle_type in data.vehicle_types() {
            let spec = data.spec(vehicle_type, size_class)?;
            let emissions = spec.vehicles_for(demand) * spec.emissions_factor * demand;
            cleanest = cleanest.min(emissions);
        }
        floor += cleanest;
    }
    Ok(floor)
}

/// Identifiers of carbon-limit constraints that no plan can satisfy.
pub fn infeasible_suspects(data: &FleetPlanningData) -> Result<Vec<String>, PlanError> {
    let mut suspects = Vec::new();
    for &year in data.years() {
        let floor = carbon_floor(data, year)?;
        let limit = data.carbon_limit(year)?;
        if floor > limit + FLOOR_TOLERANCE * (1.0 + limit.abs()) {
            tracing::debug!(%year, floor, limit, "carbon limit below emissions floor");
            suspects.push(format!("{}_{}", ConstraintKind::CarbonLimit, year));
        }
    }
    Ok(suspects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{FleetPlanningDataBuilder, VehicleSpec};

    #[test]
    fn test_reference_floor() {
        let data = FleetPlanningData::reference();
        // S1 via Electric: 2.5 × 0.2 × 100 000 = 50 000
        // S2 via Electric: 3.33 × 0.2 × 150 000 = 100 000
        let floor = carbon_floor(&data, Year::new(2024)).unwrap();
        assert!((floor - 150_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_reference_suspects() {
        let suspects = infeasible_suspects(&FleetPlanningData::reference()).unwrap();
        assert_eq!(suspects, vec!["Carbon_Limit_2027", "Carbon_Limit_2028"]);
    }

    #[test]
    fn test_zero_cap_suspects_every_year() {
        let data = FleetPlanningDataBuilder::new()
            .years([2024, 2025])
            .spec("A", "S1", VehicleSpec::new(1.0, 10.0, 0.1, 0.1, 0.5))
            .demand("S1", 100.0)
            .carbon_limit(2024, 0.0)
            .carbon_limit(2025, 0.0)
            .build();
        let suspects = infeasible_suspects(&data).unwrap();
        assert_eq!(suspects, vec!["Carbon_Limit_2024", "Carbon_Limit_2025"]);
    }

    #[test]
    fn test_zero_emission_vehicle_has_zero_floor() {
        let data = FleetPlanningDataBuilder::new()
            .year(2024)
            .spec("A", "S1", VehicleSpec::new(1.0, 10.0, 0.1, 0.1, 1.0))
            .spec("H2", "S1", VehicleSpec::new(5.0, 10.0, 0.1, 0.1, 0.0))
            .demand("S1", 100.0)
            .carbon_limit(2024, 0.0)
            .build();
        assert_eq!(carbon_floor(&data, Year::new(2024)).unwrap(), 0.0);
        assert!(infeasible_suspects(&data).unwrap().is_empty());
    }
}
