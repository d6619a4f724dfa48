//! Implementation of the PlanExport trait for FleetPlan
//!
//! The trait is defined in fleet-io so that exporters for other result types
//! share one interface.

use super::FleetPlan;
use anyhow::{Context, Result};
use fleet_io::export::{PlanExport, PLAN_CSV_COLUMNS};
use std::path::Path;

impl PlanExport for FleetPlan {
    fn to_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("creating CSV writer for {}", path.display()))?;

        wtr.write_record(PLAN_CSV_COLUMNS)
            .context("writing CSV header")?;

        for record in &self.records {
            wtr.write_record([
                record.year.to_string(),
                record.vehicle_type.to_string(),
                record.size_class.to_string(),
                record.buy.to_string(),
                record.sell.to_string(),
                format!("{:.2}", record.operate),
            ])
            .context("writing CSV record")?;
        }

        wtr.flush().context("flushing CSV writer")?;
        Ok(())
    }

    fn to_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing FleetPlan to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing JSON to {}", path.display()))?;
        Ok(())
    }

    fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).context("converting FleetPlan to JSON value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_model, extract_records, summarize_years, SolveStatus, VariableValues};
    use fleet_core::{FleetPlanningData, FleetPlanningDataBuilder, VehicleSpec};
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_plan() -> FleetPlan {
        let data: FleetPlanningData = FleetPlanningDataBuilder::new()
            .year(2024)
            .spec("A", "S1", VehicleSpec::new(50_000.0, 50_000.0, 0.4, 0.1, 1.0))
            .spec("B", "S1", VehicleSpec::new(70_000.0, 40_000.0, 0.2, 0.05, 0.2))
            .demand("S1", 100_000.0)
            .carbon_limit(2024, 200_000.0)
            .build();
        let model = build_model(&data).unwrap();
        let values = VariableValues::new(vec![2.0, 0.0, 2.0, 0.0, 0.0, 0.0]);
        let records = extract_records(&data, &model, &values).unwrap();
        let years = summarize_years(&data, &records).unwrap();

        FleetPlan {
            status: SolveStatus::Optimal,
            total_cost: records.iter().map(|r| r.total_cost()).sum(),
            solver_objective: model.objective_value(&values),
            records,
            years,
            values,
            solve_time: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_to_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.csv");
        create_test_plan().to_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Year,VehicleType,SizeClass,Buy,Sell,Operate");
        assert_eq!(lines[1], "2024,A,S1,2,0,2.00");
        assert_eq!(lines[2], "2024,B,S1,0,0,0.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_to_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.json");
        create_test_plan().to_json(&path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["status"], "optimal");
        assert_eq!(parsed["records"].as_array().unwrap().len(), 2);
        assert!(parsed.get("values").is_none(), "raw values are not exported");
    }

    #[test]
    fn test_to_json_value() {
        let json = create_test_plan().to_json_value().unwrap();
        assert!((json["total_cost"].as_f64().unwrap() - 190_000.0).abs() < 1e-6);
        assert_eq!(json["years"][0]["year"], 2024);
        assert_eq!(json["records"][0]["vehicle_type"], "A");
    }
}
