//! Fleet transition MILP model
//!
//! Builds decision variables, the cost objective and the named linear
//! constraints from [`FleetPlanningData`]. The resulting [`Model`] is an
//! immutable value: the solver adapter only reads it.

use fleet_core::{FleetPlanningData, SizeClass, VehicleType, Year};
use std::collections::HashMap;
use std::fmt;

use super::PlanError;

/// Fraction of a year's purchases that may be resold in the same year.
pub const SELL_LIMIT_FRACTION: f64 = 0.3;

/// Fraction of the purchase cost recovered when a vehicle is sold.
pub const RESALE_VALUE_FRACTION: f64 = 0.5;

/// Which of the three per-combination decisions a variable represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarKind {
    /// Vehicles purchased (integer)
    Buy,
    /// Vehicles sold (integer)
    Sell,
    /// Vehicle-equivalents operated (continuous)
    Operate,
}

impl VarKind {
    pub const ALL: [VarKind; 3] = [VarKind::Buy, VarKind::Sell, VarKind::Operate];

    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Buy => "Buy",
            VarKind::Sell => "Sell",
            VarKind::Operate => "Operate",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, VarKind::Buy | VarKind::Sell)
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a variable in [`Model::variables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Identity of a decision variable: (year, vehicle type, size class, kind).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableKey {
    pub year: Year,
    pub vehicle_type: VehicleType,
    pub size_class: SizeClass,
    pub kind: VarKind,
}

impl VariableKey {
    /// Identifier of the form `Buy_2024_Diesel_S1`.
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.kind, self.year, self.vehicle_type, self.size_class
        )
    }
}

#[derive(Debug, Clone)]
pub struct DecisionVariable {
    pub key: VariableKey,
    pub lower_bound: f64,
}

impl DecisionVariable {
    pub fn is_integer(&self) -> bool {
        self.key.kind.is_integer()
    }
}

/// The Buy/Sell/Operate triple of one (year, vehicle type, size class).
#[derive(Debug, Clone)]
pub struct CombinationVars {
    pub year: Year,
    pub vehicle_type: VehicleType,
    pub size_class: SizeClass,
    pub buy: VarId,
    pub sell: VarId,
    pub operate: VarId,
}

impl CombinationVars {
    pub fn get(&self, kind: VarKind) -> VarId {
        match kind {
            VarKind::Buy => self.buy,
            VarKind::Sell => self.sell,
            VarKind::Operate => self.operate,
        }
    }
}

/// Sparse affine expression `Σ coef·x + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Combined coefficient of `var` (terms may repeat a variable).
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, c)| c)
            .sum()
    }

    pub fn evaluate(&self, values: &VariableValues) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values.get(var))
            .sum::<f64>()
            + self.constant
    }
}

/// Constraint direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// expr ≤ rhs
    Le,
    /// expr ≥ rhs
    Ge,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Le => f.write_str("<="),
            Sense::Ge => f.write_str(">="),
        }
    }
}

/// Family a constraint belongs to, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Demand,
    CarbonLimit,
    Range,
    NonNegativeOperate,
    SellLimit,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 5] = [
        ConstraintKind::Demand,
        ConstraintKind::CarbonLimit,
        ConstraintKind::Range,
        ConstraintKind::NonNegativeOperate,
        ConstraintKind::SellLimit,
    ];

    /// Prefix used in constraint identifiers.
    pub fn prefix(&self) -> &'static str {
        match self {
            ConstraintKind::Demand => "Demand",
            ConstraintKind::CarbonLimit => "Carbon_Limit",
            ConstraintKind::Range => "Range",
            ConstraintKind::NonNegativeOperate => "Non_Negative_Operate",
            ConstraintKind::SellLimit => "Sell_Limit",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A named linear constraint `expr (≤|≥) rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub kind: ConstraintKind,
    pub expr: LinearExpr,
    pub sense: Sense,
    pub rhs: f64,
}

impl Constraint {
    /// Amount by which `values` violate the constraint (0 if satisfied).
    pub fn violation(&self, values: &VariableValues) -> f64 {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            Sense::Le => (lhs - self.rhs).max(0.0),
            Sense::Ge => (self.rhs - lhs).max(0.0),
        }
    }

    /// Satisfaction check with a tolerance relative to the right-hand side.
    pub fn is_satisfied(&self, values: &VariableValues, tolerance: f64) -> bool {
        self.violation(values) <= tolerance * (1.0 + self.rhs.abs())
    }
}

/// Resolved value of every decision variable, indexed by [`VarId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableValues(Vec<f64>);

impl VariableValues {
    pub fn new(values: Vec<f64>) -> Self {
        VariableValues(values)
    }

    pub fn get(&self, var: VarId) -> f64 {
        self.0.get(var.index()).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Immutable MILP: variables, objective to minimize, named constraints.
#[derive(Debug, Clone)]
pub struct Model {
    variables: Vec<DecisionVariable>,
    combinations: Vec<CombinationVars>,
    lookup: HashMap<(Year, VehicleType, SizeClass), usize>,
    objective: LinearExpr,
    constraints: Vec<Constraint>,
}

impl Model {
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    /// Variable triples in Year × VehicleType × SizeClass order.
    pub fn combinations(&self) -> &[CombinationVars] {
        &self.combinations
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints_of(&self, kind: ConstraintKind) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Look up a variable by its identity.
    pub fn variable_id(
        &self,
        year: Year,
        vehicle_type: &VehicleType,
        size_class: &SizeClass,
        kind: VarKind,
    ) -> Option<VarId> {
        self.lookup
            .get(&(year, vehicle_type.clone(), size_class.clone()))
            .map(|&i| self.combinations[i].get(kind))
    }

    pub fn variable_name(&self, var: VarId) -> Option<String> {
        self.variables.get(var.index()).map(|v| v.key.name())
    }

    pub fn objective_value(&self, values: &VariableValues) -> f64 {
        self.objective.evaluate(values)
    }

    /// Names of constraints that `values` violate beyond `tolerance`.
    pub fn violations(&self, values: &VariableValues, tolerance: f64) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied(values, tolerance))
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Build the fleet transition model.
///
/// Validates the planning data first and fails with
/// [`PlanError::Configuration`] if any referenced combination lacks data.
/// Constraints are generated in a fixed order (demand, carbon limit, range,
/// non-negativity, sell limit) so their identifiers are reproducible.
pub fn build_model(data: &FleetPlanningData) -> Result<Model, PlanError> {
    data.validate()?;

    let mut variables = Vec::with_capacity(data.num_combinations() * 3);
    let mut combinations = Vec::with_capacity(data.num_combinations());
    let mut lookup = HashMap::with_capacity(data.num_combinations());

    for combo in data.combinations() {
        let mut add = |kind: VarKind| {
            let id = VarId(variables.len());
            variables.push(DecisionVariable {
                key: VariableKey {
                    year: combo.year,
                    vehicle_type: combo.vehicle_type.clone(),
                    size_class: combo.size_class.clone(),
                    kind,
                },
                lower_bound: 0.0,
            });
            id
        };
        let buy = add(VarKind::Buy);
        let sell = add(VarKind::Sell);
        let operate = add(VarKind::Operate);

        lookup.insert(
            (combo.year, combo.vehicle_type.clone(), combo.size_class.clone()),
            combinations.len(),
        );
        combinations.push(CombinationVars {
            year: combo.year,
            vehicle_type: combo.vehicle_type.clone(),
            size_class: combo.size_class.clone(),
            buy,
            sell,
            operate,
        });
    }

    // Objective: purchase + fuel + maintenance − resale, over every combination.
    // The fuel term is scaled by the size class demand, not by distance driven.
    let mut objective = LinearExpr::new();
    for vars in &combinations {
        let spec = data.spec(&vars.vehicle_type, &vars.size_class)?;
        let demand = data.demand(&vars.size_class)?;
        objective.add_term(vars.buy, spec.purchase_cost);
        objective.add_term(vars.operate, spec.fuel_cost * demand);
        objective.add_term(vars.operate, spec.maintenance_cost());
        objective.add_term(vars.sell, -spec.purchase_cost * RESALE_VALUE_FRACTION);
    }

    let mut model = Model {
        variables,
        combinations,
        lookup,
        objective,
        constraints: Vec::new(),
    };

    let constraints = generate_constraints(data, &model)?;
    model.constraints = constraints;

    tracing::debug!(
        years = data.years().len(),
        vehicle_types = data.vehicle_types().len(),
        size_classes = data.size_classes().len(),
        variables = model.num_variables(),
        integer_variables = model.num_integer_variables(),
        constraints = model.num_constraints(),
        "built fleet transition model"
    );

    Ok(model)
}

fn generate_constraints(
    data: &FleetPlanningData,
    model: &Model,
) -> Result<Vec<Constraint>, PlanError> {
    let var = |year: Year, v: &VehicleType, t: &SizeClass, kind: VarKind| {
        model.variable_id(year, v, t, kind).ok_or_else(|| {
            PlanError::Configuration(format!(
                "no {} variable for ({}, {}, {})",
                kind, year, v, t
            ))
        })
    };

    let mut constraints = Vec::new();

    // 1. Demand coverage: Σ_v Operate·range ≥ Demand, per year and size class
    for &year in data.years() {
        for size_class in data.size_classes() {
            let mut expr = LinearExpr::new();
            for vehicle_type in data.vehicle_types() {
                let spec = data.spec(vehicle_type, size_class)?;
                expr.add_term(var(year, vehicle_type, size_class, VarKind::Operate)?, spec.range);
            }
            constraints.push(Constraint {
                name: format!("{}_{}_{}", ConstraintKind::Demand, year, size_class),
                kind: ConstraintKind::Demand,
                expr,
                sense: Sense::Ge,
                rhs: data.demand(size_class)?,
            });
        }
    }

    // 2. Carbon limit: Σ_{v,t} Operate·emissions·Demand ≤ limit, per year
    for &year in data.years() {
        let mut expr = LinearExpr::new();
        for vehicle_type in data.vehicle_types() {
            for size_class in data.size_classes() {
                let spec = data.spec(vehicle_type, size_class)?;
                let demand = data.demand(size_class)?;
                expr.add_term(
                    var(year, vehicle_type, size_class, VarKind::Operate)?,
                    spec.emissions_factor * demand,
                );
            }
        }
        constraints.push(Constraint {
            name: format!("{}_{}", ConstraintKind::CarbonLimit, year),
            kind: ConstraintKind::CarbonLimit,
            expr,
            sense: Sense::Le,
            rhs: data.carbon_limit(year)?,
        });
    }

    // 3. Range capacity: Operate ≤ Buy − Sell (no fleet carried across years)
    constraints.extend(per_combination(model, ConstraintKind::Range, |vars| {
        let expr = LinearExpr::new()
            .with_term(vars.operate, 1.0)
            .with_term(vars.buy, -1.0)
            .with_term(vars.sell, 1.0);
        (expr, Sense::Le, 0.0)
    }));

    // 4. Operate ≥ 0 as a named constraint, on top of the variable bound
    constraints.extend(per_combination(model, ConstraintKind::NonNegativeOperate, |vars| {
        (LinearExpr::new().with_term(vars.operate, 1.0), Sense::Ge, 0.0)
    }));

    // 5. Sell ≤ 30% of the same year's purchases
    constraints.extend(per_combination(model, ConstraintKind::SellLimit, |vars| {
        let expr = LinearExpr::new()
            .with_term(vars.sell, 1.0)
            .with_term(vars.buy, -SELL_LIMIT_FRACTION);
        (expr, Sense::Le, 0.0)
    }));

    Ok(constraints)
}

/// One constraint per (year, vehicle type, size class), named `<kind>_<y>_<v>_<t>`.
fn per_combination(
    model: &Model,
    kind: ConstraintKind,
    build: impl Fn(&CombinationVars) -> (LinearExpr, Sense, f64),
) -> Vec<Constraint> {
    model
        .combinations()
        .iter()
        .map(|vars| {
            let (expr, sense, rhs) = build(vars);
            Constraint {
                name: format!("{}_{}_{}_{}", kind, vars.year, vars.vehicle_type, vars.size_class),
                kind,
                expr,
                sense,
                rhs,
            }
        })
        .collect()
}
