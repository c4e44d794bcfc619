use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scenario::{AnalysisType, SampleType};

#[derive(Debug, Parser)]
#[command(
    name = "r2d2-vaf",
    version,
    about = "Classify DNA/RNA normal/tumor variant calls into VAF scenarios"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge MAFs, compute VAFs and classify every variant
    Run(RunArgs),
    /// Classify a single set of VAF values
    Classify(ClassifyArgs),
    /// Inspect scenario rules
    Rules(RulesArgs),
    /// Check that a rules file loads
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "DNA normal MAF")]
    pub dna_normal: Option<PathBuf>,

    #[arg(long, help = "DNA tumor MAF")]
    pub dna_tumor: Option<PathBuf>,

    #[arg(long, help = "RNA normal MAF")]
    pub rna_normal: Option<PathBuf>,

    #[arg(long, help = "RNA tumor MAF")]
    pub rna_tumor: Option<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Scenario rules INI (defaults to the built-in set)")]
    pub rules: Option<PathBuf>,

    #[arg(long, value_enum, help = "Run only this analysis instead of detecting from inputs")]
    pub analysis_type: Option<AnalysisArg>,

    #[arg(long, help = "Reference read count column in the DNA normal MAF")]
    pub dna_normal_ref_count: Option<String>,

    #[arg(long, help = "Alternate read count column in the DNA normal MAF")]
    pub dna_normal_alt_count: Option<String>,

    #[arg(long, help = "Reference read count column in the DNA tumor MAF")]
    pub dna_tumor_ref_count: Option<String>,

    #[arg(long, help = "Alternate read count column in the DNA tumor MAF")]
    pub dna_tumor_alt_count: Option<String>,

    #[arg(long, help = "Reference read count column in the RNA normal MAF")]
    pub rna_normal_ref_count: Option<String>,

    #[arg(long, help = "Alternate read count column in the RNA normal MAF")]
    pub rna_normal_alt_count: Option<String>,

    #[arg(long, help = "Reference read count column in the RNA tumor MAF")]
    pub rna_tumor_ref_count: Option<String>,

    #[arg(long, help = "Alternate read count column in the RNA tumor MAF")]
    pub rna_tumor_alt_count: Option<String>,

    #[arg(long, num_args = 1.., help = "Extra columns to copy from every input")]
    pub extra_columns: Vec<String>,

    #[arg(long, num_args = 1..)]
    pub dna_normal_extra_columns: Vec<String>,

    #[arg(long, num_args = 1..)]
    pub dna_tumor_extra_columns: Vec<String>,

    #[arg(long, num_args = 1..)]
    pub rna_normal_extra_columns: Vec<String>,

    #[arg(long, num_args = 1..)]
    pub rna_tumor_extra_columns: Vec<String>,

    #[arg(long, help = "Sample ID written as the first column of every row")]
    pub sample_id: Option<String>,

    #[arg(long, default_value = crate::ctx::DEFAULT_SAMPLE_ID_HEADER)]
    pub sample_id_header: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,
}

impl RunArgs {
    pub fn input(&self, sample: SampleType) -> Option<&PathBuf> {
        match sample {
            SampleType::DnaNormal => self.dna_normal.as_ref(),
            SampleType::DnaTumor => self.dna_tumor.as_ref(),
            SampleType::RnaNormal => self.rna_normal.as_ref(),
            SampleType::RnaTumor => self.rna_tumor.as_ref(),
        }
    }

    /// Explicit (ref, alt) count column overrides for a sample.
    pub fn count_columns(&self, sample: SampleType) -> (Option<&String>, Option<&String>) {
        match sample {
            SampleType::DnaNormal => (
                self.dna_normal_ref_count.as_ref(),
                self.dna_normal_alt_count.as_ref(),
            ),
            SampleType::DnaTumor => (
                self.dna_tumor_ref_count.as_ref(),
                self.dna_tumor_alt_count.as_ref(),
            ),
            SampleType::RnaNormal => (
                self.rna_normal_ref_count.as_ref(),
                self.rna_normal_alt_count.as_ref(),
            ),
            SampleType::RnaTumor => (
                self.rna_tumor_ref_count.as_ref(),
                self.rna_tumor_alt_count.as_ref(),
            ),
        }
    }

    pub fn sample_extra_columns(&self, sample: SampleType) -> &[String] {
        match sample {
            SampleType::DnaNormal => &self.dna_normal_extra_columns,
            SampleType::DnaTumor => &self.dna_tumor_extra_columns,
            SampleType::RnaNormal => &self.rna_normal_extra_columns,
            SampleType::RnaTumor => &self.rna_tumor_extra_columns,
        }
    }
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long, value_enum)]
    pub analysis_type: AnalysisArg,

    #[arg(
        long = "vaf",
        num_args = 1..,
        value_parser = parse_vaf_arg,
        help = "Sample VAF as sample_type=value (repeatable)"
    )]
    pub vafs: Vec<(SampleType, f64)>,

    #[arg(long, help = "Scenario rules INI (defaults to the built-in set)")]
    pub rules: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    Show(RulesShowArgs),
}

#[derive(Debug, Args)]
pub struct RulesShowArgs {
    #[arg(long, help = "Scenario rules INI (defaults to the built-in set)")]
    pub rules: Option<PathBuf>,

    #[arg(long, value_enum, help = "Only show rules for this analysis")]
    pub analysis_type: Option<AnalysisArg>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Scenario rules INI to check")]
    pub rules: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisArg {
    #[value(name = "all_inputs")]
    AllInputs,
    #[value(name = "no_rna_normal")]
    NoRnaNormal,
    #[value(name = "dna_only")]
    DnaOnly,
    #[value(name = "normal_only")]
    NormalOnly,
    #[value(name = "tumor_only")]
    TumorOnly,
}

impl From<AnalysisArg> for AnalysisType {
    fn from(arg: AnalysisArg) -> Self {
        match arg {
            AnalysisArg::AllInputs => AnalysisType::AllInputs,
            AnalysisArg::NoRnaNormal => AnalysisType::NoRnaNormal,
            AnalysisArg::DnaOnly => AnalysisType::DnaOnly,
            AnalysisArg::NormalOnly => AnalysisType::NormalOnly,
            AnalysisArg::TumorOnly => AnalysisType::TumorOnly,
        }
    }
}

pub fn parse_vaf_arg(s: &str) -> Result<(SampleType, f64), String> {
    let (sample, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected sample_type=value, got '{}'", s))?;
    let sample: SampleType = sample.trim().parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid VAF '{}' for {}", value.trim(), sample))?;
    Ok((sample, value))
}
