use thiserror::Error;

use crate::scenario::{AnalysisType, SampleType};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("malformed condition '{expression}': {reason}")]
    MalformedCondition { expression: String, reason: String },

    #[error("unknown analysis type '{0}'")]
    UnknownAnalysisType(String),

    #[error("unrecognized event '{event}' in section [{section}]")]
    UnrecognizedEvent { section: String, event: String },

    #[error("malformed rule section [{section}]: {reason}")]
    MalformedConfig { section: String, reason: String },

    #[error("no scenario for analysis type {analysis_type}: {detail}")]
    NoScenario {
        analysis_type: AnalysisType,
        detail: String,
    },

    #[error(
        "wrong VAF values for analysis type {analysis_type}: expected [{}], supplied [{}]",
        join(.expected),
        join(.supplied)
    )]
    WrongVafValues {
        analysis_type: AnalysisType,
        expected: Vec<SampleType>,
        supplied: Vec<SampleType>,
    },
}

impl ScenarioError {
    /// True for errors raised while building a calculator rather than per call.
    pub fn is_config_error(&self) -> bool {
        !matches!(
            self,
            ScenarioError::NoScenario { .. } | ScenarioError::WrongVafValues { .. }
        )
    }
}

fn join(samples: &[SampleType]) -> String {
    samples
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
