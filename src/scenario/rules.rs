use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::scenario::{AnalysisType, Condition, Event, SampleType, ScenarioError, VafValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GermlineBranch {
    /// `gl>0`: DNA normal carries the alternate allele.
    Positive,
    /// `gl=0`: DNA normal shows no alternate reads.
    Zero,
    /// `no_gl`: no DNA normal sample in the analysis.
    Absent,
}

impl GermlineBranch {
    pub const ALL: [GermlineBranch; 3] = [
        GermlineBranch::Positive,
        GermlineBranch::Zero,
        GermlineBranch::Absent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GermlineBranch::Positive => "gl>0",
            GermlineBranch::Zero => "gl=0",
            GermlineBranch::Absent => "no_gl",
        }
    }

    pub fn select(vafs: &VafValues) -> Self {
        match vafs.get(&SampleType::DnaNormal) {
            Some(&v) if v > 0.0 => GermlineBranch::Positive,
            Some(_) => GermlineBranch::Zero,
            None => GermlineBranch::Absent,
        }
    }

    /// Whether this branch can be selected for the given analysis.
    pub fn reachable_for(&self, analysis: AnalysisType) -> bool {
        let has_normal = analysis.has_sample(SampleType::DnaNormal);
        match self {
            GermlineBranch::Positive | GermlineBranch::Zero => has_normal,
            GermlineBranch::Absent => !has_normal,
        }
    }
}

impl fmt::Display for GermlineBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GermlineBranch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GermlineBranch::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| format!("unknown germline branch '{}'", s))
    }
}

/// One raw configuration section: `[<analysis>.<branch>.<priority>.<event>]`
/// with its `sample_type = expression` entries in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl RuleSection {
    pub fn new(name: impl Into<String>, entries: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub analysis_type: AnalysisType,
    pub branch: GermlineBranch,
    pub priority: u32,
    pub event: Event,
    pub conditions: BTreeMap<SampleType, Condition>,
}

impl Rule {
    pub fn from_section(section: &RuleSection) -> Result<Self, ScenarioError> {
        let name = section.name.as_str();
        let malformed = |reason: String| ScenarioError::MalformedConfig {
            section: name.to_string(),
            reason,
        };

        let parts: Vec<&str> = name.split('.').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(malformed(
                "expected <analysis_type>.<germline_branch>.<priority>.<event>".to_string(),
            ));
        }

        let analysis_type: AnalysisType = parts[0].parse()?;
        let branch: GermlineBranch = parts[1].parse().map_err(malformed)?;
        let priority: u32 = parts[2]
            .parse()
            .map_err(|_| malformed(format!("priority '{}' is not a non-negative integer", parts[2])))?;
        let event: Event = parts[3]
            .parse()
            .map_err(|_| ScenarioError::UnrecognizedEvent {
                section: name.to_string(),
                event: parts[3].to_string(),
            })?;

        let mut conditions = BTreeMap::new();
        for (key, expression) in &section.entries {
            let sample: SampleType = key.trim().parse().map_err(malformed)?;
            let condition = Condition::parse(expression)?;
            if conditions.insert(sample, condition).is_some() {
                return Err(malformed(format!("duplicate condition for {}", sample)));
            }
        }

        Ok(Self {
            analysis_type,
            branch,
            priority,
            event,
            conditions,
        })
    }

    /// A rule fits when every condition on a supplied sample passes.
    pub fn fits(&self, vafs: &VafValues) -> bool {
        self.conditions.iter().all(|(sample, condition)| match vafs.get(sample) {
            Some(&v) => condition.test(v),
            None => true,
        })
    }

    pub fn key(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.analysis_type, self.branch, self.priority, self.event
        )
    }
}

/// Rules grouped by analysis type then germline branch, each list in
/// ascending priority. Equal priorities keep declaration order.
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    branches: BTreeMap<AnalysisType, BTreeMap<GermlineBranch, Vec<Rule>>>,
}

impl DecisionTree {
    pub fn build(sections: &[RuleSection]) -> Result<Self, ScenarioError> {
        let mut branches: BTreeMap<AnalysisType, BTreeMap<GermlineBranch, Vec<Rule>>> =
            BTreeMap::new();

        for section in sections {
            let rule = Rule::from_section(section)?;
            if !rule.branch.reachable_for(rule.analysis_type) {
                warn!(
                    section = %section.name,
                    "rule branch is never selected for its analysis type"
                );
            }
            for sample in rule.conditions.keys() {
                if !rule.analysis_type.has_sample(*sample) {
                    warn!(
                        section = %section.name,
                        sample = %sample,
                        "rule constrains a sample the analysis does not carry"
                    );
                }
            }
            branches
                .entry(rule.analysis_type)
                .or_default()
                .entry(rule.branch)
                .or_default()
                .push(rule);
        }

        for by_branch in branches.values_mut() {
            for rules in by_branch.values_mut() {
                // sort_by_key is stable, so declaration order breaks ties.
                rules.sort_by_key(|r| r.priority);
            }
        }

        Ok(Self { branches })
    }

    pub fn contains(&self, analysis: AnalysisType) -> bool {
        self.branches.contains_key(&analysis)
    }

    pub fn rules(&self, analysis: AnalysisType, branch: GermlineBranch) -> &[Rule] {
        self.branches
            .get(&analysis)
            .and_then(|b| b.get(&branch))
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }

    pub fn analysis_types(&self) -> impl Iterator<Item = AnalysisType> + '_ {
        self.branches.keys().copied()
    }

    pub fn branches(&self, analysis: AnalysisType) -> impl Iterator<Item = GermlineBranch> + '_ {
        self.branches
            .get(&analysis)
            .into_iter()
            .flat_map(|b| b.keys().copied())
    }

    pub fn len(&self) -> usize {
        self.branches
            .values()
            .flat_map(|b| b.values())
            .map(|r| r.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
