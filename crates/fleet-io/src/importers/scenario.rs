//! Scenario file schema
//!
//! ```toml
//! years = [2024, 2025]
//! vehicle_types = ["Diesel", "Electric"]   # optional, fixes output order
//!
//! [demand]
//! S1 = 100000
//!
//! [carbon_limits]
//! 2024 = 200000
//! 2025 = 180000
//!
//! [vehicles.Diesel.S1]
//! cost = 50000
//! range = 50000
//! fuel_cost = 0.4
//! maintenance = 0.1
//! emissions = 1.0
//! ```

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use fleet_core::{FleetPlanningData, FleetPlanningDataBuilder, VehicleSpec};
use serde::{Deserialize, Serialize};

/// On-disk representation of a planning scenario (TOML or JSON).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub years: Vec<i32>,
    /// Output order of vehicle types. Defaults to the order of `vehicles`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicle_types: Vec<String>,
    /// Output order of size classes. Defaults to the order of `demand`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size_classes: Vec<String>,
    /// Distance per size class, identical for every year
    pub demand: BTreeMap<String, f64>,
    /// Emissions cap keyed by year
    pub carbon_limits: BTreeMap<String, f64>,
    /// `vehicles[type][class]`
    pub vehicles: BTreeMap<String, BTreeMap<String, VehicleSpec>>,
}

impl ScenarioFile {
    /// Convert into planning data.
    ///
    /// Rejects malformed year keys and caps for years outside `years`.
    /// Missing specs, demand or caps are left for
    /// [`FleetPlanningData::validate`] to report.
    pub fn into_planning_data(self) -> Result<FleetPlanningData> {
        if self.years.is_empty() {
            bail!("scenario declares no planning years");
        }

        let mut builder = FleetPlanningDataBuilder::new().years(self.years.iter().copied());
        for vehicle_type in &self.vehicle_types {
            builder = builder.vehicle_type(vehicle_type.as_str());
        }
        for size_class in &self.size_classes {
            builder = builder.size_class(size_class.as_str());
        }

        for (size_class, distance) in self.demand {
            builder = builder.demand(size_class, distance);
        }

        for (key, limit) in self.carbon_limits {
            let year: i32 = key
                .trim()
                .parse()
                .map_err(|_| anyhow!("carbon limit key '{}' is not a year", key))?;
            if !self.years.contains(&year) {
                bail!("carbon limit for {} is outside the planning years", year);
            }
            builder = builder.carbon_limit(year, limit);
        }

        for (vehicle_type, classes) in self.vehicles {
            for (size_class, spec) in classes {
                builder = builder.spec(vehicle_type.as_str(), size_class, spec);
            }
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{SizeClass, VehicleType, Year};

    fn spec() -> VehicleSpec {
        VehicleSpec::new(50_000.0, 50_000.0, 0.4, 0.1, 1.0)
    }

    fn scenario() -> ScenarioFile {
        let mut vehicles = BTreeMap::new();
        vehicles.insert("Electric".to_string(), BTreeMap::from([("S1".to_string(), spec())]));
        vehicles.insert("Diesel".to_string(), BTreeMap::from([("S1".to_string(), spec())]));
        ScenarioFile {
            years: vec![2025, 2024],
            demand: BTreeMap::from([("S1".to_string(), 100_000.0)]),
            carbon_limits: BTreeMap::from([
                ("2024".to_string(), 200_000.0),
                ("2025".to_string(), 180_000.0),
            ]),
            vehicles,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_order_follows_keys() {
        let data = scenario().into_planning_data().unwrap();
        assert_eq!(data.years(), &[Year::new(2024), Year::new(2025)]);
        assert_eq!(
            data.vehicle_types(),
            &[VehicleType::new("Diesel"), VehicleType::new("Electric")]
        );
        assert_eq!(data.carbon_limit(Year::new(2025)).unwrap(), 180_000.0);
        data.validate().unwrap();
    }

    #[test]
    fn test_declared_order_wins() {
        let file = ScenarioFile {
            vehicle_types: vec!["Electric".into(), "Diesel".into()],
            size_classes: vec!["S1".into()],
            ..scenario()
        };
        let data = file.into_planning_data().unwrap();
        assert_eq!(data.vehicle_types()[0], VehicleType::new("Electric"));
        assert_eq!(data.size_classes(), &[SizeClass::new("S1")]);
    }

    #[test]
    fn test_bad_year_key() {
        let mut file = scenario();
        file.carbon_limits.insert("next".into(), 1.0);
        let err = file.into_planning_data().unwrap_err();
        assert!(err.to_string().contains("'next' is not a year"));
    }

    #[test]
    fn test_cap_outside_horizon() {
        let mut file = scenario();
        file.carbon_limits.insert("2030".into(), 1.0);
        let err = file.into_planning_data().unwrap_err();
        assert!(err.to_string().contains("2030"));
    }

    #[test]
    fn test_no_years() {
        let file = ScenarioFile {
            years: Vec::new(),
            ..scenario()
        };
        assert!(file.into_planning_data().is_err());
    }

    #[test]
    fn test_declared_type_without_spec_fails_validation() {
        let file = ScenarioFile {
            vehicle_types: vec!["Hydrogen".into()],
            ..scenario()
        };
        let data = file.into_planning_data().unwrap();
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("(Hydrogen, S1)"), "{err}");
    }
}
