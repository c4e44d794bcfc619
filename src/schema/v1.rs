use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scenario::{AnalysisType, SampleType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleInput {
    pub sample_type: SampleType,
    pub path: String,
    pub rows: u64,
    pub ref_count_column: String,
    pub alt_count_column: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Totals {
    pub merged_variants: u64,
    pub skipped_variant_type: u64,
    pub classified: u64,
    pub no_scenario: u64,
    pub wrong_vaf_values: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub rules_source: String,
    pub analysis_type: AnalysisType,
    pub sample_id: Option<String>,
    pub inputs: Vec<SampleInput>,
    pub totals: Totals,
    pub scenario_counts: BTreeMap<String, u64>,
    pub output_tsv: Option<String>,
    pub warnings: Vec<String>,
}

impl ScenarioReportV1 {
    pub fn empty(tool_version: &str, analysis_type: AnalysisType, rules_source: &str) -> Self {
        Self {
            tool: "r2d2-vaf".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            rules_source: rules_source.to_string(),
            analysis_type,
            sample_id: None,
            inputs: Vec::new(),
            totals: Totals::default(),
            scenario_counts: BTreeMap::new(),
            output_tsv: None,
            warnings: Vec::new(),
        }
    }
}
