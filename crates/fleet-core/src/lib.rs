//! # fleet-core: Fleet Transition Planning Data
//!
//! Provides the static input data for multi-year fleet transition planning:
//! which vehicle technologies and size classes exist, what each combination
//! costs and emits, how much distance must be served per size class, and how
//! much may be emitted per year.
//!
//! ## Quick Start
//!
//! ```rust
//! use fleet_core::*;
//!
//! let data = FleetPlanningDataBuilder::new()
//!     .year(2024)
//!     .spec("Diesel", "S1", VehicleSpec::new(50_000.0, 50_000.0, 0.4, 0.1, 1.0))
//!     .spec("Electric", "S1", VehicleSpec::new(70_000.0, 40_000.0, 0.2, 0.05, 0.2))
//!     .demand("S1", 100_000.0)
//!     .carbon_limit(2024, 200_000.0)
//!     .build();
//!
//! data.validate().expect("complete planning data");
//! assert_eq!(data.combinations().count(), 2);
//! ```
//!
//! ## Index Sets
//!
//! Years, vehicle types and size classes are materialized, ordered index sets.
//! Everything downstream (model building, result extraction) iterates the
//! cross product through [`FleetPlanningData::combinations`] so that variable
//! layout, constraint names and output rows are reproducible run to run.
//!
//! ## Modules
//!
//! - [`error`] - Unified error type
//! - [`planning`] - Planning data container, builder and validation

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod planning;

pub use error::{FleetError, FleetResult};
pub use planning::{Combination, FleetPlanningData, FleetPlanningDataBuilder};

/// A planning period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(i32);

/// A vehicle technology (e.g. "Diesel", "Electric").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleType(String);

/// A vehicle size bucket (e.g. "S1", "S2").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeClass(String);

impl Year {
    #[inline]
    pub fn new(value: i32) -> Self {
        Year(value)
    }
    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl VehicleType {
    pub fn new(name: impl Into<String>) -> Self {
        VehicleType(name.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SizeClass {
    pub fn new(name: impl Into<String>) -> Self {
        SizeClass(name.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Year(value)
    }
}

impl From<&str> for VehicleType {
    fn from(value: &str) -> Self {
        VehicleType::new(value)
    }
}

impl From<String> for VehicleType {
    fn from(value: String) -> Self {
        VehicleType(value)
    }
}

impl From<&str> for SizeClass {
    fn from(value: &str) -> Self {
        SizeClass::new(value)
    }
}

impl From<String> for SizeClass {
    fn from(value: String) -> Self {
        SizeClass(value)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Techno-economic attributes of one (vehicle type, size class) combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Purchase cost per vehicle (currency/unit)
    #[serde(alias = "cost")]
    pub purchase_cost: f64,
    /// Distance one vehicle covers per year (distance/unit/year)
    pub range: f64,
    /// Fuel cost rate (currency per unit of demand served)
    pub fuel_cost: f64,
    /// Maintenance cost as a fraction of purchase cost per unit operated
    #[serde(alias = "maintenance")]
    pub maintenance_rate: f64,
    /// Emissions per unit of demand served
    #[serde(alias = "emissions")]
    pub emissions_factor: f64,
}

impl VehicleSpec {
    pub fn new(
        purchase_cost: f64,
        range: f64,
        fuel_cost: f64,
        maintenance_rate: f64,
        emissions_factor: f64,
    ) -> Self {
        Self {
            purchase_cost,
            range,
            fuel_cost,
            maintenance_rate,
            emissions_factor,
        }
    }

    /// Yearly maintenance cost of operating one vehicle-equivalent.
    pub fn maintenance_cost(&self) -> f64 {
        self.purchase_cost * self.maintenance_rate
    }

    /// Vehicle-equivalents needed to cover `distance` with this vehicle alone.
    pub fn vehicles_for(&self, distance: f64) -> f64 {
        distance / self.range
    }
}
