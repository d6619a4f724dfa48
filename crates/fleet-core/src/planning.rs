//! Planning data container
//!
//! [`FleetPlanningData`] holds the ordered index sets and the parameter tables
//! a fleet transition model is built from. It is assembled once through
//! [`FleetPlanningDataBuilder`] and never mutated afterwards.

use crate::{FleetError, FleetResult, SizeClass, VehicleSpec, VehicleType, Year};
use std::collections::{BTreeMap, HashMap};

/// One element of the Year × VehicleType × SizeClass cross product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination<'a> {
    pub year: Year,
    pub vehicle_type: &'a VehicleType,
    pub size_class: &'a SizeClass,
}

/// Static input for one planning run.
#[derive(Debug, Clone, Default)]
pub struct FleetPlanningData {
    years: Vec<Year>,
    vehicle_types: Vec<VehicleType>,
    size_classes: Vec<SizeClass>,
    specs: HashMap<(VehicleType, SizeClass), VehicleSpec>,
    demand: BTreeMap<SizeClass, f64>,
    carbon_limits: BTreeMap<Year, f64>,
}

impl FleetPlanningData {
    /// The five-year Diesel/Electric reference dataset.
    ///
    /// Note that its carbon limits for 2027 and 2028 sit below the emissions
    /// floor implied by demand, so solving it as-is is infeasible.
    pub fn reference() -> Self {
        FleetPlanningDataBuilder::new()
            .years([2024, 2025, 2026, 2027, 2028])
            .spec("Diesel", "S1", VehicleSpec::new(50_000.0, 50_000.0, 0.4, 0.1, 1.0))
            .spec("Diesel", "S2", VehicleSpec::new(80_000.0, 60_000.0, 0.4, 0.1, 1.0))
            .spec("Electric", "S1", VehicleSpec::new(70_000.0, 40_000.0, 0.2, 0.05, 0.2))
            .spec("Electric", "S2", VehicleSpec::new(100_000.0, 45_000.0, 0.2, 0.05, 0.2))
            .demand("S1", 100_000.0)
            .demand("S2", 150_000.0)
            .carbon_limit(2024, 200_000.0)
            .carbon_limit(2025, 180_000.0)
            .carbon_limit(2026, 150_000.0)
            .carbon_limit(2027, 120_000.0)
            .carbon_limit(2028, 100_000.0)
            .build()
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    pub fn size_classes(&self) -> &[SizeClass] {
        &self.size_classes
    }

    /// Number of (year, vehicle type, size class) combinations.
    pub fn num_combinations(&self) -> usize {
        self.years.len() * self.vehicle_types.len() * self.size_classes.len()
    }

    /// Iterate the full cross product: years ascending, then vehicle type,
    /// then size class, each in index-set order.
    pub fn combinations(&self) -> impl Iterator<Item = Combination<'_>> + '_ {
        self.years.iter().flat_map(move |&year| {
            self.vehicle_types.iter().flat_map(move |vehicle_type| {
                self.size_classes.iter().map(move |size_class| Combination {
                    year,
                    vehicle_type,
                    size_class,
                })
            })
        })
    }

    /// Look up the spec for a (vehicle type, size class) pair.
    pub fn spec(&self, vehicle_type: &VehicleType, size_class: &SizeClass) -> FleetResult<&VehicleSpec> {
        self.specs
            .get(&(vehicle_type.clone(), size_class.clone()))
            .ok_or_else(|| {
                FleetError::Config(format!(
                    "missing vehicle spec for ({}, {})",
                    vehicle_type, size_class
                ))
            })
    }

    /// Required distance for a size class (constant across years).
    pub fn demand(&self, size_class: &SizeClass) -> FleetResult<f64> {
        self.demand.get(size_class).copied().ok_or_else(|| {
            FleetError::Config(format!("missing demand for size class {}", size_class))
        })
    }

    /// Maximum total emissions allowed in a year.
    pub fn carbon_limit(&self, year: Year) -> FleetResult<f64> {
        self.carbon_limits.get(&year).copied().ok_or_else(|| {
            FleetError::Config(format!("missing carbon limit for year {}", year))
        })
    }

    /// Check that every combination the model references is fully populated.
    ///
    /// Run once before model building; downstream code may then assume
    /// lookups succeed but still propagates their `Result`s.
    pub fn validate(&self) -> FleetResult<()> {
        if self.years.is_empty() {
            return Err(FleetError::Config("no planning years defined".into()));
        }
        if self.vehicle_types.is_empty() {
            return Err(FleetError::Config("no vehicle types defined".into()));
        }
        if self.size_classes.is_empty() {
            return Err(FleetError::Config("no size classes defined".into()));
        }
        if let Some(pair) = self.years.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FleetError::Config(format!(
                "years must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }

        for size_class in &self.size_classes {
            let demand = self.demand(size_class).map_err(|e| {
                FleetError::Config(format!(
                    "{} (referenced by Demand_{}_{})",
                    config_message(&e),
                    self.years[0],
                    size_class
                ))
            })?;
            check_quantity(demand, || format!("demand for size class {}", size_class))?;
        }

        for &year in &self.years {
            let limit = self.carbon_limit(year).map_err(|e| {
                FleetError::Config(format!(
                    "{} (referenced by Carbon_Limit_{})",
                    config_message(&e),
                    year
                ))
            })?;
            check_quantity(limit, || format!("carbon limit for year {}", year))?;
        }

        let first_year = self.years[0];
        for vehicle_type in &self.vehicle_types {
            for size_class in &self.size_classes {
                let spec = self.spec(vehicle_type, size_class).map_err(|e| {
                    FleetError::Config(format!(
                        "{} (referenced by Range_{}_{}_{})",
                        config_message(&e),
                        first_year,
                        vehicle_type,
                        size_class
                    ))
                })?;
                let label = |field: &str| format!("{} of ({}, {})", field, vehicle_type, size_class);
                check_quantity(spec.purchase_cost, || label("purchase cost"))?;
                check_quantity(spec.fuel_cost, || label("fuel cost"))?;
                check_quantity(spec.maintenance_rate, || label("maintenance rate"))?;
                check_quantity(spec.emissions_factor, || label("emissions factor"))?;
                if !(spec.range.is_finite() && spec.range > 0.0) {
                    return Err(FleetError::Config(format!(
                        "{} must be positive, got {}",
                        label("range"),
                        spec.range
                    )));
                }
            }
        }

        Ok(())
    }
}

fn check_quantity(value: f64, what: impl FnOnce() -> String) -> FleetResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FleetError::Config(format!(
            "{} must be finite and non-negative, got {}",
            what(),
            value
        )))
    }
}

fn config_message(err: &FleetError) -> String {
    match err {
        FleetError::Config(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Builder for [`FleetPlanningData`].
///
/// Vehicle types and size classes keep the order in which they are first
/// mentioned (by `vehicle_type`, `size_class`, `spec` or `demand`). Years are
/// sorted and deduplicated on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct FleetPlanningDataBuilder {
    data: FleetPlanningData,
}

impl FleetPlanningDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a planning year
    pub fn year(mut self, year: impl Into<Year>) -> Self {
        self.data.years.push(year.into());
        self
    }

    /// Add several planning years
    pub fn years<Y: Into<Year>>(mut self, years: impl IntoIterator<Item = Y>) -> Self {
        self.data.years.extend(years.into_iter().map(Into::into));
        self
    }

    /// Declare a vehicle type without attaching any spec
    pub fn vehicle_type(mut self, vehicle_type: impl Into<VehicleType>) -> Self {
        let vehicle_type = vehicle_type.into();
        if !self.data.vehicle_types.contains(&vehicle_type) {
            self.data.vehicle_types.push(vehicle_type);
        }
        self
    }

    /// Declare a size class without attaching demand
    pub fn size_class(mut self, size_class: impl Into<SizeClass>) -> Self {
        let size_class = size_class.into();
        if !self.data.size_classes.contains(&size_class) {
            self.data.size_classes.push(size_class);
        }
        self
    }

    /// Set the spec for a (vehicle type, size class) pair
    pub fn spec(
        self,
        vehicle_type: impl Into<VehicleType>,
        size_class: impl Into<SizeClass>,
        spec: VehicleSpec,
    ) -> Self {
        let vehicle_type = vehicle_type.into();
        let size_class = size_class.into();
        let mut builder = self
            .vehicle_type(vehicle_type.clone())
            .size_class(size_class.clone());
        builder.data.specs.insert((vehicle_type, size_class), spec);
        builder
    }

    /// Set the yearly demand for a size class
    pub fn demand(self, size_class: impl Into<SizeClass>, distance: f64) -> Self {
        let size_class = size_class.into();
        let mut builder = self.size_class(size_class.clone());
        builder.data.demand.insert(size_class, distance);
        builder
    }

    /// Set the emissions cap for a year
    pub fn carbon_limit(mut self, year: impl Into<Year>, limit: f64) -> Self {
        self.data.carbon_limits.insert(year.into(), limit);
        self
    }

    /// Build the planning data
    pub fn build(mut self) -> FleetPlanningData {
        self.data.years.sort();
        self.data.years.dedup();
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_type_data() -> FleetPlanningDataBuilder {
        FleetPlanningDataBuilder::new()
            .years([2025, 2024])
            .spec("A", "S1", VehicleSpec::new(50_000.0, 50_000.0, 0.4, 0.1, 1.0))
            .spec("B", "S1", VehicleSpec::new(70_000.0, 40_000.0, 0.2, 0.05, 0.2))
            .demand("S1", 100_000.0)
            .carbon_limit(2024, 200_000.0)
            .carbon_limit(2025, 200_000.0)
    }

    #[test]
    fn test_combinations_order() {
        let data = two_type_data().build();
        let combos: Vec<String> = data
            .combinations()
            .map(|c| format!("{}_{}_{}", c.year, c.vehicle_type, c.size_class))
            .collect();
        assert_eq!(combos, vec!["2024_A_S1", "2024_B_S1", "2025_A_S1", "2025_B_S1"]);
        assert_eq!(data.num_combinations(), 4);
    }

    #[test]
    fn test_builder_dedups_index_sets() {
        let data = two_type_data().year(2024).vehicle_type("A").size_class("S1").build();
        assert_eq!(data.years().len(), 2);
        assert_eq!(data.vehicle_types().len(), 2);
        assert_eq!(data.size_classes().len(), 1);
    }

    #[test]
    fn test_validate_complete_data() {
        assert!(two_type_data().build().validate().is_ok());
        assert!(FleetPlanningData::reference().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_spec_names_constraint() {
        let data = two_type_data().size_class("S2").demand("S2", 10.0).build();
        let err = data.validate().unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, FleetError::Config(_)));
        assert!(msg.contains("(A, S2)"), "{msg}");
        assert!(msg.contains("Range_2024_A_S2"), "{msg}");
    }

    #[test]
    fn test_validate_missing_carbon_limit() {
        let data = two_type_data().year(2026).build();
        let msg = data.validate().unwrap_err().to_string();
        assert!(msg.contains("Carbon_Limit_2026"), "{msg}");
    }

    #[test]
    fn test_validate_missing_demand() {
        let data = two_type_data().size_class("S9").build();
        let msg = data.validate().unwrap_err().to_string();
        assert!(msg.contains("missing demand for size class S9"), "{msg}");
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let data = two_type_data()
            .spec("C", "S1", VehicleSpec::new(1.0, 0.0, 0.1, 0.1, 0.1))
            .build();
        assert!(data.validate().unwrap_err().to_string().contains("range of (C, S1)"));

        let data = two_type_data().demand("S1", f64::NAN).build();
        assert!(data.validate().is_err());

        let data = two_type_data().carbon_limit(2024, -1.0).build();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_empty_sets() {
        let data = FleetPlanningDataBuilder::new().build();
        assert!(data.validate().unwrap_err().to_string().contains("no planning years"));
    }

    #[test]
    fn test_lookups() {
        let data = FleetPlanningData::reference();
        let diesel = VehicleType::new("Diesel");
        let s2 = SizeClass::new("S2");
        assert_eq!(data.spec(&diesel, &s2).unwrap().purchase_cost, 80_000.0);
        assert_eq!(data.demand(&s2).unwrap(), 150_000.0);
        assert_eq!(data.carbon_limit(Year::new(2028)).unwrap(), 100_000.0);
        assert!(data.carbon_limit(Year::new(2030)).is_err());
    }
}
