use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::io::maf::{DEFAULT_ALT_COUNT_COLUMN, DEFAULT_REF_COUNT_COLUMN, MafTable};
use crate::scenario::{AnalysisType, Event, SampleType, ScenarioError};
use crate::schema::v1::ScenarioReportV1;
use crate::variants::{MergedVariant, ReadCounts};

pub const DEFAULT_SAMPLE_ID_HEADER: &str = "Sample_ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountColumns {
    pub ref_count: String,
    pub alt_count: String,
}

impl Default for CountColumns {
    fn default() -> Self {
        Self {
            ref_count: DEFAULT_REF_COUNT_COLUMN.to_string(),
            alt_count: DEFAULT_ALT_COUNT_COLUMN.to_string(),
        }
    }
}

/// Extra input columns copied to the output, suffixed per sample.
#[derive(Debug, Clone, Default)]
pub struct ExtraColumns {
    /// Taken from every sample in the analysis.
    pub shared: Vec<String>,
    pub per_sample: BTreeMap<SampleType, Vec<String>>,
}

impl ExtraColumns {
    pub fn for_sample(&self, sample: SampleType) -> Vec<&str> {
        let mut out: Vec<&str> = self.shared.iter().map(|s| s.as_str()).collect();
        if let Some(cols) = self.per_sample.get(&sample) {
            for c in cols {
                if !out.contains(&c.as_str()) {
                    out.push(c.as_str());
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct VariantRow {
    /// Index into `Ctx::variants`.
    pub variant: usize,
    pub counts: BTreeMap<SampleType, ReadCounts>,
    pub outcome: Option<Result<Event, ScenarioError>>,
}

impl VariantRow {
    pub fn vafs(&self) -> BTreeMap<SampleType, f64> {
        self.counts.iter().map(|(s, c)| (*s, c.vaf)).collect()
    }

    pub fn scenario(&self) -> Option<Event> {
        match &self.outcome {
            Some(Ok(event)) => Some(*event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassifyStats {
    pub classified: u64,
    pub no_scenario: u64,
    pub wrong_vaf_values: u64,
    pub scenario_counts: BTreeMap<Event, u64>,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub tsv_path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub analysis_type: AnalysisType,
    pub inputs: BTreeMap<SampleType, PathBuf>,
    pub count_columns: BTreeMap<SampleType, CountColumns>,
    pub extra_columns: ExtraColumns,
    pub sample_id: Option<String>,
    pub sample_id_header: String,
    pub rules_source: String,
    pub write_json: bool,
    pub threads: usize,
    pub tables: BTreeMap<SampleType, MafTable>,
    pub variants: Vec<MergedVariant>,
    pub rows: Vec<VariantRow>,
    pub skipped_variant_type: u64,
    pub stats: ClassifyStats,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: ScenarioReportV1,
}

impl Ctx {
    pub fn new(
        analysis_type: AnalysisType,
        inputs: BTreeMap<SampleType, PathBuf>,
        out_dir: PathBuf,
        rules_source: &str,
        write_json: bool,
        tool_version: &str,
    ) -> Self {
        let stem = format!("scenarios_{}", analysis_type);
        let tsv_path = out_dir.join(format!("{}.tsv", stem));
        let json_path = out_dir.join(format!("{}.json", stem));
        let report = ScenarioReportV1::empty(tool_version, analysis_type, rules_source);
        Self {
            analysis_type,
            inputs,
            count_columns: BTreeMap::new(),
            extra_columns: ExtraColumns::default(),
            sample_id: None,
            sample_id_header: DEFAULT_SAMPLE_ID_HEADER.to_string(),
            rules_source: rules_source.to_string(),
            write_json,
            threads: 0,
            tables: BTreeMap::new(),
            variants: Vec::new(),
            rows: Vec::new(),
            skipped_variant_type: 0,
            stats: ClassifyStats::default(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                tsv_path,
                json_path,
            },
            report,
        }
    }

    /// Count columns for a sample, falling back to `t_ref_count`/`t_alt_count`.
    pub fn count_columns_for(&self, sample: SampleType) -> CountColumns {
        self.count_columns.get(&sample).cloned().unwrap_or_default()
    }
}
