//! Model inspection command.
//!
//! Prints each constraint's identifier, direction and right-hand side in the
//! order the model builder generates them.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fleet_algo::plan::{build_model, ConstraintKind};
use fleet_cli::cli::ConstraintFilter;
use tabwriter::TabWriter;

use super::util::load_data;

pub fn handle(config: Option<&Path>, kind: Option<ConstraintFilter>) -> Result<()> {
    let data = load_data(config)?;
    let model = build_model(&data).context("building model")?;
    let kind = kind.map(ConstraintKind::from);

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "CONSTRAINT\tSENSE\tRHS\tTERMS")?;
    for constraint in model.constraints() {
        if kind.is_some_and(|k| k != constraint.kind) {
            continue;
        }
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            constraint.name,
            constraint.sense,
            constraint.rhs,
            constraint.expr.terms().len()
        )?;
    }
    writer.flush()?;
    Ok(())
}
