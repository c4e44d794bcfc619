//! VAF scenario decision engine.
//!
//! Rules are loaded once into an immutable [`DecisionTree`] and evaluated
//! first-match in priority order by [`ScenarioCalculator::categorize`].

pub mod calculator;
pub mod condition;
pub mod error;
pub mod rules;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use calculator::ScenarioCalculator;
pub use condition::Condition;
pub use error::ScenarioError;
pub use rules::{DecisionTree, GermlineBranch, Rule};

/// Per-sample VAF values for one variant.
pub type VafValues = BTreeMap<SampleType, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    DnaNormal,
    DnaTumor,
    RnaNormal,
    RnaTumor,
}

impl SampleType {
    pub const ALL: [SampleType; 4] = [
        SampleType::DnaNormal,
        SampleType::DnaTumor,
        SampleType::RnaNormal,
        SampleType::RnaTumor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::DnaNormal => "dna_normal",
            SampleType::DnaTumor => "dna_tumor",
            SampleType::RnaNormal => "rna_normal",
            SampleType::RnaTumor => "rna_tumor",
        }
    }

    /// Column suffix used in output tables.
    pub fn printable(&self) -> &'static str {
        match self {
            SampleType::DnaNormal => "DNA_Normal",
            SampleType::DnaTumor => "DNA_Tumor",
            SampleType::RnaNormal => "RNA_Normal",
            SampleType::RnaTumor => "RNA_Tumor",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown sample type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    AllInputs,
    NoRnaNormal,
    DnaOnly,
    NormalOnly,
    TumorOnly,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 5] = [
        AnalysisType::AllInputs,
        AnalysisType::NoRnaNormal,
        AnalysisType::DnaOnly,
        AnalysisType::NormalOnly,
        AnalysisType::TumorOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::AllInputs => "all_inputs",
            AnalysisType::NoRnaNormal => "no_rna_normal",
            AnalysisType::DnaOnly => "dna_only",
            AnalysisType::NormalOnly => "normal_only",
            AnalysisType::TumorOnly => "tumor_only",
        }
    }

    /// Sample types that must be supplied for this analysis, in canonical order.
    pub fn samples(&self) -> &'static [SampleType] {
        use SampleType::*;
        match self {
            AnalysisType::AllInputs => &[DnaNormal, DnaTumor, RnaNormal, RnaTumor],
            AnalysisType::NoRnaNormal => &[DnaNormal, DnaTumor, RnaTumor],
            AnalysisType::DnaOnly => &[DnaNormal, DnaTumor],
            AnalysisType::NormalOnly => &[DnaNormal, RnaNormal],
            AnalysisType::TumorOnly => &[DnaTumor, RnaTumor],
        }
    }

    pub fn has_sample(&self, sample: SampleType) -> bool {
        self.samples().contains(&sample)
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ScenarioError::UnknownAnalysisType(s.to_string()))
    }
}

/// Analyses that can be run from the given set of sample files.
///
/// Four files give the canonical `all_inputs` run and the DNA pair plus RNA
/// tumor gives `no_rna_normal`. Any other two or three files fan out into
/// every pairwise analysis they cover.
pub fn analysis_types_for(present: &[SampleType]) -> Vec<AnalysisType> {
    let has = |s: SampleType| present.contains(&s);
    let count = SampleType::ALL.iter().filter(|s| has(**s)).count();
    if count == 4 {
        return vec![AnalysisType::AllInputs];
    }
    if count <= 1 {
        return Vec::new();
    }
    if has(SampleType::DnaNormal) && has(SampleType::DnaTumor) && has(SampleType::RnaTumor) {
        return vec![AnalysisType::NoRnaNormal];
    }

    let mut out = Vec::new();
    if has(SampleType::DnaTumor) && has(SampleType::DnaNormal) {
        out.push(AnalysisType::DnaOnly);
    }
    if has(SampleType::DnaTumor) && has(SampleType::RnaTumor) {
        out.push(AnalysisType::TumorOnly);
    }
    if has(SampleType::DnaNormal) && has(SampleType::RnaNormal) {
        out.push(AnalysisType::NormalOnly);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    GermlineMosaic,
    TumorInNormal,
    Vse,
    TVse,
    Vsl,
    TVsl,
    LohAlt,
    LohRef,
    Germline,
    Rnaed,
    TRnaed,
    Somatic,
    Unclassified,
}

impl Event {
    pub const ALL: [Event; 13] = [
        Event::GermlineMosaic,
        Event::TumorInNormal,
        Event::Vse,
        Event::TVse,
        Event::Vsl,
        Event::TVsl,
        Event::LohAlt,
        Event::LohRef,
        Event::Germline,
        Event::Rnaed,
        Event::TRnaed,
        Event::Somatic,
        Event::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Event::GermlineMosaic => "germline_mosaic",
            Event::TumorInNormal => "tumor_in_normal",
            Event::Vse => "vse",
            Event::TVse => "t_vse",
            Event::Vsl => "vsl",
            Event::TVsl => "t_vsl",
            Event::LohAlt => "loh_alt",
            Event::LohRef => "loh_ref",
            Event::Germline => "germline",
            Event::Rnaed => "rnaed",
            Event::TRnaed => "t_rnaed",
            Event::Somatic => "somatic",
            Event::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Event::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unrecognized event '{}'", s))
    }
}
