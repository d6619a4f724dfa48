//! # fleet-io: Scenario Import & Plan Export
//!
//! Reads fleet planning scenarios from TOML or JSON into
//! [`fleet_core::FleetPlanningData`], and defines the [`export::PlanExport`]
//! trait that solved plans implement to write CSV and JSON results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fleet_io::importers::load_scenario;
//!
//! fn main() -> anyhow::Result<()> {
//!     let data = load_scenario("demos/two_technology.toml")?;
//!     data.validate()?;
//!     println!("{} decision combinations", data.num_combinations());
//!     Ok(())
//! }
//! ```
//!
//! ## Scenario Formats
//!
//! | Format | File Extensions | Notes |
//! |--------|-----------------|-------|
//! | TOML | `.toml` | Preferred for hand-written scenarios |
//! | JSON | `.json` | Same schema, for generated scenarios |
//!
//! Parsing only checks the shape of the file. Completeness (a spec for every
//! type and class, demand for every class, a cap for every year) is checked by
//! [`fleet_core::FleetPlanningData::validate`] so that errors name the
//! constraint that would have used the missing value.

pub mod export;
pub mod importers;

pub use export::PlanExport;
pub use importers::{
    load_scenario, parse_scenario_json, parse_scenario_toml, ScenarioFile, ScenarioFormat,
};
