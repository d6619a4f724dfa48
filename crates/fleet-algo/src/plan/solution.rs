//! Fleet plan solution records
//!
//! Turns the raw values of an optimal solve into rounded, ordered
//! [`SolutionRecord`]s and per-year summaries. Pure: no I/O.

use super::model::RESALE_VALUE_FRACTION;
use super::{Model, PlanError, SolveStatus, VariableValues};
use fleet_core::{FleetPlanningData, SizeClass, VehicleType, Year};
use serde::Serialize;
use std::time::Duration;

/// Round a value the solver treats as integral to the nearest integer.
pub fn round_integral(value: f64) -> i64 {
    value.round() as i64
}

/// Round a continuous Operate level to two decimals.
pub fn round_operate(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid reporting "-0.00" for tiny negative solver noise
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// One output row per (year, vehicle type, size class).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionRecord {
    pub year: Year,
    pub vehicle_type: VehicleType,
    pub size_class: SizeClass,
    pub buy: i64,
    pub sell: i64,
    pub operate: f64,
    /// Buy × purchase cost
    pub purchase_cost: f64,
    /// Operate × (fuel cost × demand + maintenance)
    pub operating_cost: f64,
    /// Sell × purchase cost × resale fraction
    pub resale_credit: f64,
}

impl SolutionRecord {
    /// Net cost of this row as it enters the objective.
    pub fn total_cost(&self) -> f64 {
        self.purchase_cost + self.operating_cost - self.resale_credit
    }

    /// Re-apply the rounding policy. Idempotent on extracted records.
    pub fn rounded(&self) -> Self {
        Self {
            operate: round_operate(self.operate),
            ..self.clone()
        }
    }
}

/// Served distance for one size class in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub size_class: SizeClass,
    pub served: f64,
    pub demand: f64,
}

/// Totals for one planning year, computed from the rounded records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: Year,
    pub vehicles_bought: i64,
    pub vehicles_sold: i64,
    pub total_cost: f64,
    pub emissions: f64,
    pub carbon_limit: f64,
    pub coverage: Vec<CoverageSummary>,
}

/// Complete result of a successful planning run.
#[derive(Debug, Clone, Serialize)]
pub struct FleetPlan {
    pub status: SolveStatus,
    /// Total cost of the rounded plan
    pub total_cost: f64,
    /// Objective value at the raw solver values
    pub solver_objective: f64,
    pub records: Vec<SolutionRecord>,
    pub years: Vec<YearSummary>,
    #[serde(skip)]
    pub values: VariableValues,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl FleetPlan {
    pub fn records_for(&self, year: Year) -> impl Iterator<Item = &SolutionRecord> + '_ {
        self.records.iter().filter(move |r| r.year == year)
    }

    pub fn year_summary(&self, year: Year) -> Option<&YearSummary> {
        self.years.iter().find(|y| y.year == year)
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Fleet Transition Plan\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Status: {}\n", self.status));
        s.push_str(&format!("Total Cost: {:.2}\n", self.total_cost));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        for year in &self.years {
            s.push_str(&format!(
                "\n{}: bought {}, sold {}, cost {:.2}, emissions {:.2} / {:.2}\n",
                year.year,
                year.vehicles_bought,
                year.vehicles_sold,
                year.total_cost,
                year.emissions,
                year.carbon_limit
            ));
            for record in self.records_for(year.year) {
                if record.buy == 0 && record.sell == 0 && record.operate == 0.0 {
                    continue;
                }
                s.push_str(&format!(
                    "  {} {}: buy {}, sell {}, operate {:.2}\n",
                    record.vehicle_type, record.size_class, record.buy, record.sell, record.operate
                ));
            }
        }

        s
    }
}

/// Convert raw solver values into ordered, rounded records.
///
/// Precondition: `values` come from an Optimal solve of `model`, which was
/// built from `data`. Records follow the model's combination order (years
/// ascending, then vehicle type, then size class).
pub fn extract_records(
    data: &FleetPlanningData,
    model: &Model,
    values: &VariableValues,
) -> Result<Vec<SolutionRecord>, PlanError> {
    model
        .combinations()
        .iter()
        .map(|vars| -> Result<SolutionRecord, PlanError> {
            let spec = data.spec(&vars.vehicle_type, &vars.size_class)?;
            let demand = data.demand(&vars.size_class)?;
            let buy = round_integral(values.get(vars.buy));
            let sell = round_integral(values.get(vars.sell));
            let operate = round_operate(values.get(vars.operate));
            Ok(SolutionRecord {
                year: vars.year,
                vehicle_type: vars.vehicle_type.clone(),
                size_class: vars.size_class.clone(),
                buy,
                sell,
                operate,
                purchase_cost: buy as f64 * spec.purchase_cost,
                operating_cost: operate * (spec.fuel_cost * demand + spec.maintenance_cost()),
                resale_credit: sell as f64 * spec.purchase_cost * RESALE_VALUE_FRACTION,
            })
        })
        .collect()
}

/// Per-year totals: cost, emissions against the cap, and demand coverage.
pub fn summarize_years(
    data: &FleetPlanningData,
    records: &[SolutionRecord],
) -> Result<Vec<YearSummary>, PlanError> {
    data.years()
        .iter()
        .map(|&year| -> Result<YearSummary, PlanError> {
            let rows: Vec<&SolutionRecord> = records.iter().filter(|r| r.year == year).collect();

            let mut emissions = 0.0;
            for row in &rows {
                let spec = data.spec(&row.vehicle_type, &row.size_class)?;
                emissions += row.operate * spec.emissions_factor * data.demand(&row.size_class)?;
            }

            let coverage = data
                .size_classes()
                .iter()
                .map(|size_class| -> Result<CoverageSummary, PlanError> {
                    let mut served = 0.0;
                    for row in rows.iter().filter(|r| &r.size_class == size_class) {
                        served += row.operate * data.spec(&row.vehicle_type, size_class)?.range;
                    }
                    Ok(CoverageSummary {
                        size_class: size_class.clone(),
                        served,
                        demand: data.demand(size_class)?,
                    })
                })
                .collect::<Result<Vec<_>, PlanError>>()?;

            Ok(YearSummary {
                year,
                vehicles_bought: rows.iter().map(|r| r.buy).sum(),
                vehicles_sold: rows.iter().map(|r| r.sell).sum(),
                total_cost: rows.iter().map(|r| r.total_cost()).sum(),
                emissions,
                carbon_limit: data.carbon_limit(year)?,
                coverage,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_model;

    #[test]
    fn test_rounding_policy() {
        assert_eq!(round_integral(49.999_999_9), 50);
        assert_eq!(round_integral(2.5000001), 3);
        assert_eq!(round_integral(0.4), 0);
        assert_eq!(round_operate(2.499_999_99), 2.5);
        assert_eq!(round_operate(1.666_666), 1.67);
        assert_eq!(round_operate(-1e-9), 0.0);
        assert!(round_operate(-1e-9).is_sign_positive());
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for raw in [0.0, 0.005, 1.234_567, 2.5, 3.335, 99.999, 12_345.678_9] {
            let once = round_operate(raw);
            assert_eq!(round_operate(once), once, "raw value {raw}");
        }
    }

    #[test]
    fn test_extract_records_order_and_costs() {
        let data = FleetPlanningData::reference();
        let model = build_model(&data).unwrap();

        // Diesel S1 in 2024: buy ~3, sell ~0, operate 2.004
        let mut raw = vec![0.0; model.num_variables()];
        let first = &model.combinations()[0];
        raw[first.buy.index()] = 2.999_999_9;
        raw[first.sell.index()] = 1e-8;
        raw[first.operate.index()] = 2.004;
        let values = VariableValues::new(raw);

        let records = extract_records(&data, &model, &values).unwrap();
        assert_eq!(records.len(), 20);

        let keys: Vec<String> = records
            .iter()
            .take(4)
            .map(|r| format!("{}_{}_{}", r.year, r.vehicle_type, r.size_class))
            .collect();
        assert_eq!(
            keys,
            vec!["2024_Diesel_S1", "2024_Diesel_S2", "2024_Electric_S1", "2024_Electric_S2"]
        );

        let row = &records[0];
        assert_eq!(row.buy, 3);
        assert_eq!(row.sell, 0);
        assert_eq!(row.operate, 2.0);
        assert_eq!(row.purchase_cost, 150_000.0);
        assert!((row.operating_cost - 90_000.0).abs() < 1e-6);
        assert_eq!(row.rounded(), *row);
        assert_eq!(records.last().unwrap().year, Year::new(2028));
    }

    #[test]
    fn test_summarize_years() {
        let data = FleetPlanningData::reference();
        let model = build_model(&data).unwrap();
        let mut raw = vec![0.0; model.num_variables()];
        let first = &model.combinations()[0];
        raw[first.buy.index()] = 2.0;
        raw[first.operate.index()] = 2.0;
        let records = extract_records(&data, &model, &VariableValues::new(raw)).unwrap();
        let years = summarize_years(&data, &records).unwrap();

        assert_eq!(years.len(), 5);
        let y2024 = &years[0];
        assert_eq!(y2024.vehicles_bought, 2);
        assert!((y2024.emissions - 200_000.0).abs() < 1e-6);
        assert_eq!(y2024.carbon_limit, 200_000.0);
        assert_eq!(y2024.coverage[0].served, 100_000.0);
        assert_eq!(y2024.coverage[1].served, 0.0);
        assert!((y2024.total_cost - 190_000.0).abs() < 1e-6);
        assert_eq!(years[1].total_cost, 0.0);
    }
}
