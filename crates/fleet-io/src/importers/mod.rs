//! Scenario importers.
//!
//! Both formats share the [`ScenarioFile`] schema; [`ScenarioFormat::detect`]
//! picks one from the file extension.
//!
//! ```no_run
//! use fleet_io::importers::{load_scenario, ScenarioFormat};
//!
//! let data = load_scenario("demos/reference.toml")?;
//! assert_eq!(
//!     ScenarioFormat::detect(std::path::Path::new("plan.json")),
//!     Some(ScenarioFormat::Json)
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

mod scenario;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fleet_core::FleetPlanningData;

pub use scenario::ScenarioFile;

/// Supported scenario formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Toml,
    Json,
}

impl ScenarioFormat {
    pub const ALL: &'static [ScenarioFormat] = &[ScenarioFormat::Toml, ScenarioFormat::Json];

    /// Expected file extensions for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ScenarioFormat::Toml => &["toml"],
            ScenarioFormat::Json => &["json"],
        }
    }

    /// Detect the format from a file extension.
    pub fn detect(path: &Path) -> Option<ScenarioFormat> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Parse scenario text in this format.
    pub fn parse(&self, content: &str) -> Result<FleetPlanningData> {
        match self {
            ScenarioFormat::Toml => parse_scenario_toml(content),
            ScenarioFormat::Json => parse_scenario_json(content),
        }
    }
}

impl std::fmt::Display for ScenarioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioFormat::Toml => write!(f, "toml"),
            ScenarioFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ScenarioFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("unknown scenario format '{}'; expected toml or json", s))
    }
}

/// Parse a TOML scenario.
pub fn parse_scenario_toml(content: &str) -> Result<FleetPlanningData> {
    let file: ScenarioFile = toml::from_str(content).context("parsing TOML scenario")?;
    file.into_planning_data()
}

/// Parse a JSON scenario.
pub fn parse_scenario_json(content: &str) -> Result<FleetPlanningData> {
    let file: ScenarioFile = serde_json::from_str(content).context("parsing JSON scenario")?;
    file.into_planning_data()
}

/// Load a scenario file, choosing the parser from the extension.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<FleetPlanningData> {
    let path = path.as_ref();
    let format = ScenarioFormat::detect(path).ok_or_else(|| {
        anyhow!(
            "cannot infer scenario format of {}; use a .toml or .json extension",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    format
        .parse(&content)
        .with_context(|| format!("loading scenario {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(ScenarioFormat::detect(Path::new("a.toml")), Some(ScenarioFormat::Toml));
        assert_eq!(ScenarioFormat::detect(Path::new("a.JSON")), Some(ScenarioFormat::Json));
        assert_eq!(ScenarioFormat::detect(Path::new("a.yaml")), None);
        assert_eq!(ScenarioFormat::detect(Path::new("scenario")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TOML".parse::<ScenarioFormat>().unwrap(), ScenarioFormat::Toml);
        assert!("csv".parse::<ScenarioFormat>().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_scenario_toml("years = [2024]\nyear = 2025\n").unwrap_err();
        assert!(format!("{err:#}").contains("year"));
    }
}
