//! # fleet-algo: Fleet Transition Optimization
//!
//! Formulates and solves the multi-year fleet transition problem as a
//! mixed-integer linear program and turns the solver's answer into a
//! rounded, tabular plan.
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Model building | [`plan::build_model`] | [`plan::Model`] (variables, objective, named constraints) |
//! | Solving | [`plan::solve_model`] | [`plan::SolveOutcome`] (status + values) |
//! | Extraction | [`plan::extract_records`] | ordered [`plan::SolutionRecord`]s |
//!
//! [`plan::plan_fleet`] chains the three and gates extraction on an optimal
//! status.
//!
//! ## Solver Backends
//!
//! The MILP backend is picked at build time through cargo features and at run
//! time through [`plan::MilpSolverKind`]:
//!
//! - `solver-microlp` (default): pure-Rust branch-and-bound
//! - `solver-highs`: HiGHS
//!
//! ## Example
//!
//! ```no_run
//! use fleet_algo::plan::{plan_fleet, SolverConfig};
//! use fleet_core::FleetPlanningData;
//!
//! match plan_fleet(&FleetPlanningData::reference(), &SolverConfig::default()) {
//!     Ok(plan) => println!("{}", plan.summary()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod plan;

pub use plan::{
    build_model, plan_fleet, solve_model, FleetPlan, MilpSolverKind, Model, PlanError,
    SolutionRecord, SolveStatus, SolverConfig,
};
