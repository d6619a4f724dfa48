//! Planning errors

use fleet_core::FleetError;
use thiserror::Error;

use super::SolveStatus;

/// Terminal failures of a planning run. None of them are retried.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Planning data is incomplete or inconsistent; raised before solving
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The solver proved that no plan satisfies every constraint
    #[error("Model infeasible (solver status: {status}){}", suspects_hint(.suspects))]
    InfeasibleModel {
        status: SolveStatus,
        /// Identifiers of constraints that cannot be met on their own
        suspects: Vec<String>,
    },

    /// The solver returned Unbounded or could not solve the model
    #[error("Model unresolved (solver status: {status}): {detail}")]
    UnresolvedModel { status: SolveStatus, detail: String },
}

impl PlanError {
    /// Solver status behind this error, if the solver ran.
    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            PlanError::Configuration(_) => None,
            PlanError::InfeasibleModel { status, .. } | PlanError::UnresolvedModel { status, .. } => {
                Some(*status)
            }
        }
    }
}

fn suspects_hint(suspects: &[String]) -> String {
    if suspects.is_empty() {
        String::new()
    } else {
        format!("; cannot be met: {}", suspects.join(", "))
    }
}

impl From<FleetError> for PlanError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::Config(msg) => PlanError::Configuration(msg),
            other => PlanError::Configuration(other.to_string()),
        }
    }
}

impl From<PlanError> for FleetError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::Configuration(msg) => FleetError::Config(msg),
            other => FleetError::Solver(other.to_string()),
        }
    }
}
