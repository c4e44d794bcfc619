mod loader;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::scenario::ScenarioCalculator;

pub use loader::{load_builtin_v1, load_rules_ini, parse_rules_ini};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    Builtin,
    File(PathBuf),
}

impl RuleSource {
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) => RuleSource::File(p.to_path_buf()),
            None => RuleSource::Builtin,
        }
    }

    pub fn label(&self) -> String {
        match self {
            RuleSource::Builtin => "built-in v1".to_string(),
            RuleSource::File(p) => p.display().to_string(),
        }
    }
}

pub fn load_calculator(source: &RuleSource) -> Result<ScenarioCalculator> {
    let sections = match source {
        RuleSource::Builtin => load_builtin_v1()?,
        RuleSource::File(path) => load_rules_ini(path)?,
    };
    let calculator = ScenarioCalculator::new(&sections)
        .with_context(|| format!("invalid scenario rules in {}", source.label()))?;
    info!(
        source = %source.label(),
        sections = sections.len(),
        rules = calculator.rule_count(),
        "scenario_rules_loaded"
    );
    Ok(calculator)
}
