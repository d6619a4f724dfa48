//! Fleet Transition Planning
//!
//! This module implements a Mixed-Integer Linear Programming (MILP)
//! formulation for multi-year fleet transition planning.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FLEET TRANSITION PLANNING                                               │
//! │  ─────────────────────────                                               │
//! │                                                                          │
//! │  Given:                                                                  │
//! │    • Vehicle technologies and size classes                              │
//! │    • Purchase, fuel and maintenance costs, range, emissions             │
//! │    • Yearly demand per size class                                       │
//! │    • Yearly carbon limits                                               │
//! │                                                                          │
//! │  Decide, per (year, technology, size class):                             │
//! │    • Buy     vehicles purchased            (integer)                    │
//! │    • Sell    vehicles resold               (integer)                    │
//! │    • Operate vehicle-equivalents operated  (continuous)                 │
//! │                                                                          │
//! │  Minimize:                                                               │
//! │    purchase + fuel + maintenance − resale                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## MILP Formulation
//!
//! ```text
//! minimize  Σ_{y,v,t} c·Buy + (f·D_t + c·m)·Operate − 0.5·c·Sell
//!
//! subject to:
//!   Σ_v Operate[y,v,t] · range(v,t) ≥ D_t                 Demand_<y>_<t>
//!   Σ_{v,t} Operate[y,v,t] · e(v,t) · D_t ≤ L_y           Carbon_Limit_<y>
//!   Operate[y,v,t] ≤ Buy[y,v,t] − Sell[y,v,t]             Range_<y>_<v>_<t>
//!   Operate[y,v,t] ≥ 0                                    Non_Negative_Operate_<y>_<v>_<t>
//!   Sell[y,v,t] ≤ 0.3 · Buy[y,v,t]                        Sell_Limit_<y>_<v>_<t>
//!   Buy, Sell ∈ ℤ≥0,  Operate ∈ ℝ≥0
//! ```
//!
//! ## Modeling Notes
//!
//! - **No fleet carry-over.** The range constraint only looks at the current
//!   year's Buy and Sell, so every year re-buys its whole operating fleet. A
//!   cumulative fleet balance would change the results; it is not modeled.
//! - **Fuel term scaled by demand.** Fuel cost is `fuel_cost · D_t` per
//!   vehicle-equivalent operated rather than per distance actually driven.
//!
//! ## Pipeline
//!
//! [`plan_fleet`] runs the stages strictly in sequence:
//! validate → [`build_model`] → [`solve_model`] → gate on Optimal →
//! [`extract_records`]. Non-optimal outcomes are terminal.
//!
//! Solved plans implement [`fleet_io::PlanExport`] for CSV and JSON output.

mod diagnostics;
mod error;
mod export;
mod model;
mod solution;
mod solver;

pub use diagnostics::{carbon_floor, infeasible_suspects};
pub use error::PlanError;
pub use model::{
    build_model, CombinationVars, Constraint, ConstraintKind, DecisionVariable, LinearExpr, Model,
    Sense, VarId, VarKind, VariableKey, VariableValues, RESALE_VALUE_FRACTION,
    SELL_LIMIT_FRACTION,
};
pub use solution::{
    extract_records, round_integral, round_operate, summarize_years, CoverageSummary, FleetPlan,
    SolutionRecord, YearSummary,
};
pub use solver::{solve_model, MilpSolverKind, SolveOutcome, SolveStatus, SolverConfig};

use fleet_core::FleetPlanningData;

/// Build, solve and extract a fleet transition plan.
///
/// Fails with [`PlanError::Configuration`] before any solver call if the
/// data is incomplete, with [`PlanError::InfeasibleModel`] (naming the carbon
/// limits that cannot be met) if no plan exists, and with
/// [`PlanError::UnresolvedModel`] for any other non-optimal outcome.
///
/// # Example
///
/// ```no_run
/// use fleet_algo::plan::{plan_fleet, SolverConfig};
/// use fleet_core::{FleetPlanningDataBuilder, VehicleSpec};
///
/// let data = FleetPlanningDataBuilder::new()
///     .year(2024)
///     .spec("Diesel", "S1", VehicleSpec::new(50_000.0, 50_000.0, 0.4, 0.1, 1.0))
///     .spec("Electric", "S1", VehicleSpec::new(70_000.0, 40_000.0, 0.2, 0.05, 0.2))
///     .demand("S1", 100_000.0)
///     .carbon_limit(2024, 200_000.0)
///     .build();
///
/// let plan = plan_fleet(&data, &SolverConfig::default())?;
/// println!("{}", plan.summary());
/// # Ok::<(), fleet_algo::plan::PlanError>(())
/// ```
pub fn plan_fleet(data: &FleetPlanningData, config: &SolverConfig) -> Result<FleetPlan, PlanError> {
    let model = build_model(data)?;
    let outcome = solve_model(&model, config);
    let status = outcome.status;
    let solve_time = outcome.solve_time;

    let values = match outcome.into_values() {
        Ok(values) => values,
        Err(PlanError::InfeasibleModel { status, .. }) => {
            let suspects = infeasible_suspects(data)?;
            return Err(PlanError::InfeasibleModel { status, suspects });
        }
        Err(err) => return Err(err),
    };

    let records = extract_records(data, &model, &values)?;
    let years = summarize_years(data, &records)?;

    Ok(FleetPlan {
        status,
        total_cost: records.iter().map(SolutionRecord::total_cost).sum(),
        solver_objective: model.objective_value(&values),
        records,
        years,
        values,
        solve_time,
    })
}
