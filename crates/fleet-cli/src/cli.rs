use std::path::PathBuf;

use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use fleet_algo::plan::{ConstraintKind, MilpSolverKind};

#[derive(Parser, Debug)]
#[command(name = "fleet", author, version, about = "Fleet transition planning", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the fleet transition MILP and write the plan
    Plan {
        /// Scenario file (.toml or .json); the built-in reference dataset if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output CSV with one row per year, vehicle type and size class
        #[arg(short, long, default_value = "fleet_plan.csv")]
        out: PathBuf,

        /// Also write the full plan, with per-year summaries, as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// MILP backend (microlp, highs)
        #[arg(long)]
        solver: Option<MilpSolverKind>,
    },
    /// Check a scenario for completeness and report model dimensions
    Validate {
        /// Scenario file (.toml or .json); the built-in reference dataset if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the model's constraints in generation order
    Inspect {
        /// Scenario file (.toml or .json); the built-in reference dataset if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only list one constraint family
        #[arg(long, value_enum)]
        kind: Option<ConstraintFilter>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Constraint families selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintFilter {
    Demand,
    Carbon,
    Range,
    NonNegative,
    SellLimit,
}

impl From<ConstraintFilter> for ConstraintKind {
    fn from(filter: ConstraintFilter) -> Self {
        match filter {
            ConstraintFilter::Demand => ConstraintKind::Demand,
            ConstraintFilter::Carbon => ConstraintKind::CarbonLimit,
            ConstraintFilter::Range => ConstraintKind::Range,
            ConstraintFilter::NonNegative => ConstraintKind::NonNegativeOperate,
            ConstraintFilter::SellLimit => ConstraintKind::SellLimit,
        }
    }
}

pub fn build_cli_command() -> Command {
    Cli::command()
}
