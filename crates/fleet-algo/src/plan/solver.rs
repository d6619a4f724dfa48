//! MILP solver adapter
//!
//! Translates an immutable [`Model`] into a `good_lp` problem, runs it with
//! default solver settings and reports the status. Buy and Sell become
//! integer variables, Operate stays continuous; every variable is bounded
//! below by zero.

use super::{LinearExpr, Model, PlanError, Sense, VariableValues};
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as highs_solver;
#[cfg(feature = "solver-microlp")]
use good_lp::solvers::microlp::microlp as microlp_solver;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

#[cfg(not(any(feature = "solver-microlp", feature = "solver-highs")))]
compile_error!("fleet-algo needs at least one MILP backend: enable `solver-microlp` or `solver-highs`");

/// MILP backend used for the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilpSolverKind {
    #[cfg(feature = "solver-microlp")]
    Microlp,
    #[cfg(feature = "solver-highs")]
    Highs,
}

#[allow(clippy::derivable_impls)]
impl Default for MilpSolverKind {
    fn default() -> Self {
        #[cfg(feature = "solver-microlp")]
        {
            MilpSolverKind::Microlp
        }
        #[cfg(not(feature = "solver-microlp"))]
        {
            MilpSolverKind::Highs
        }
    }
}

impl MilpSolverKind {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_MILP_SOLVERS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            #[cfg(feature = "solver-microlp")]
            MilpSolverKind::Microlp => "microlp",
            #[cfg(feature = "solver-highs")]
            MilpSolverKind::Highs => "highs",
        }
    }
}

const AVAILABLE_MILP_SOLVERS: &[&str] = &[
    #[cfg(feature = "solver-microlp")]
    "microlp",
    #[cfg(feature = "solver-highs")]
    "highs",
];

fn unknown_solver_error(label: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "unknown milp solver '{}'; supported values: {}",
        label,
        MilpSolverKind::available().join(", ")
    )
}

impl FromStr for MilpSolverKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "microlp" => {
                #[cfg(feature = "solver-microlp")]
                {
                    Ok(MilpSolverKind::Microlp)
                }
                #[cfg(not(feature = "solver-microlp"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(MilpSolverKind::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            other => Err(unknown_solver_error(other)),
        }
    }
}

impl fmt::Display for MilpSolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solver configuration. No time limit or gap tuning: the solve runs to
/// completion with the backend's defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    pub solver: MilpSolverKind,
}

impl SolverConfig {
    pub fn with_solver(solver: MilpSolverKind) -> Self {
        Self { solver }
    }
}

/// Outcome reported by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Optimal solution found
    Optimal,
    /// No assignment satisfies every constraint
    Infeasible,
    /// Objective can decrease without bound
    Unbounded,
    /// Solver failed or was unavailable
    NotSolved,
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::NotSolved => write!(f, "not_solved"),
        }
    }
}

/// Status plus, for optimal solves only, the value of every variable.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Present if and only if `status` is Optimal
    pub values: Option<VariableValues>,
    /// Objective evaluated at `values`
    pub objective: Option<f64>,
    pub solve_time: Duration,
    /// Solver message for non-optimal outcomes
    pub message: String,
}

impl SolveOutcome {
    fn failed(status: SolveStatus, message: String, solve_time: Duration) -> Self {
        Self {
            status,
            values: None,
            objective: None,
            solve_time,
            message,
        }
    }

    /// Variable values of an optimal solve, or the matching terminal error.
    ///
    /// Infeasible outcomes carry no suspects here; see
    /// [`infeasible_suspects`](super::infeasible_suspects) for that.
    pub fn into_values(self) -> Result<VariableValues, PlanError> {
        match (self.status, self.values) {
            (SolveStatus::Optimal, Some(values)) => Ok(values),
            (SolveStatus::Infeasible, _) => Err(PlanError::InfeasibleModel {
                status: SolveStatus::Infeasible,
                suspects: Vec::new(),
            }),
            (status, _) => Err(PlanError::UnresolvedModel {
                status,
                detail: self.message,
            }),
        }
    }
}

/// Solve a fleet transition model.
///
/// Never fabricates values: unless the backend reports an optimal solution,
/// the outcome carries a status and message only.
///
/// # Example
///
/// ```no_run
/// use fleet_algo::plan::{build_model, solve_model, SolverConfig};
/// use fleet_core::FleetPlanningData;
///
/// let model = build_model(&FleetPlanningData::reference())?;
/// let outcome = solve_model(&model, &SolverConfig::default());
/// println!("status: {}", outcome.status);
/// # Ok::<(), fleet_algo::plan::PlanError>(())
/// ```
pub fn solve_model(model: &Model, config: &SolverConfig) -> SolveOutcome {
    let start = Instant::now();

    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|var| {
            let definition = variable().min(var.lower_bound).name(var.key.name());
            if var.is_integer() {
                vars.add(definition.integer())
            } else {
                vars.add(definition)
            }
        })
        .collect();

    let objective = to_expression(model.objective(), &handles);
    let constraints: Vec<good_lp::Constraint> = model
        .constraints()
        .iter()
        .map(|c| {
            let lhs = to_expression(&c.expr, &handles);
            let rhs = c.rhs;
            match c.sense {
                Sense::Le => constraint!(lhs <= rhs),
                Sense::Ge => constraint!(lhs >= rhs),
            }
        })
        .collect();

    tracing::debug!(
        solver = %config.solver,
        variables = handles.len(),
        constraints = constraints.len(),
        "submitting model to MILP solver"
    );

    let unsolved = vars.minimise(objective);
    let result = match config.solver {
        #[cfg(feature = "solver-microlp")]
        MilpSolverKind::Microlp => {
            let problem = add_constraints(unsolved.using(microlp_solver), constraints);
            problem.solve().map(|s| collect_values(&s, &handles))
        }
        #[cfg(feature = "solver-highs")]
        MilpSolverKind::Highs => {
            let problem = add_constraints(unsolved.using(highs_solver), constraints);
            problem.solve().map(|s| collect_values(&s, &handles))
        }
    };
    let solve_time = start.elapsed();

    match result {
        Ok(raw) => {
            let values = VariableValues::new(raw);
            let objective = model.objective_value(&values);
            tracing::info!(
                solver = %config.solver,
                objective,
                elapsed_ms = solve_time.as_millis() as u64,
                "fleet model solved to optimality"
            );
            SolveOutcome {
                status: SolveStatus::Optimal,
                values: Some(values),
                objective: Some(objective),
                solve_time,
                message: "Optimal".to_string(),
            }
        }
        Err(err) => {
            let status = classify(&err);
            tracing::warn!(solver = %config.solver, %status, error = %err, "fleet model not solved");
            SolveOutcome::failed(status, err.to_string(), solve_time)
        }
    }
}

fn classify(err: &ResolutionError) -> SolveStatus {
    match err {
        ResolutionError::Infeasible => SolveStatus::Infeasible,
        ResolutionError::Unbounded => SolveStatus::Unbounded,
        _ => SolveStatus::NotSolved,
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms().len());
    out += expr.constant();
    for &(var, coefficient) in expr.terms() {
        out += coefficient * handles[var.index()];
    }
    out
}

fn add_constraints<M>(mut problem: M, constraints: Vec<good_lp::Constraint>) -> M
where
    M: SolverModel,
{
    for c in constraints {
        problem = problem.with(c);
    }
    problem
}

fn collect_values<S: Solution>(solution: &S, handles: &[Variable]) -> Vec<f64> {
    handles.iter().map(|&v| solution.value(v)).collect()
}
