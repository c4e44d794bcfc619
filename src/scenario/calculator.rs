use crate::scenario::rules::RuleSection;
use crate::scenario::{
    AnalysisType, DecisionTree, Event, GermlineBranch, Rule, SampleType, ScenarioError, VafValues,
};

/// Classifies per-sample VAFs into scenario events.
///
/// The decision tree is built once from the supplied sections and never
/// mutated, so a calculator can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct ScenarioCalculator {
    tree: DecisionTree,
}

impl ScenarioCalculator {
    pub fn new(sections: &[RuleSection]) -> Result<Self, ScenarioError> {
        let tree = DecisionTree::build(sections)?;
        Ok(Self { tree })
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn rule_count(&self) -> usize {
        self.tree.len()
    }

    pub fn analysis_types(&self) -> Vec<AnalysisType> {
        self.tree.analysis_types().collect()
    }

    pub fn rules_for(&self, analysis: AnalysisType, branch: GermlineBranch) -> &[Rule] {
        self.tree.rules(analysis, branch)
    }

    pub fn categorize(
        &self,
        analysis_type: AnalysisType,
        vaf_values: &VafValues,
    ) -> Result<Event, ScenarioError> {
        if !self.tree.contains(analysis_type) {
            return Err(ScenarioError::NoScenario {
                analysis_type,
                detail: "no rules registered for this analysis type".to_string(),
            });
        }

        let expected = analysis_type.samples();
        let supplied: Vec<SampleType> = vaf_values.keys().copied().collect();
        // Both sides are in canonical SampleType order.
        if supplied.as_slice() != expected {
            return Err(ScenarioError::WrongVafValues {
                analysis_type,
                expected: expected.to_vec(),
                supplied,
            });
        }

        let branch = GermlineBranch::select(vaf_values);
        let rules = self.tree.rules(analysis_type, branch);
        if rules.is_empty() {
            return Err(ScenarioError::NoScenario {
                analysis_type,
                detail: format!("no rules registered for branch {}", branch),
            });
        }

        rules
            .iter()
            .find(|rule| rule.fits(vaf_values))
            .map(|rule| rule.event)
            .ok_or_else(|| ScenarioError::NoScenario {
                analysis_type,
                detail: format!("no rule in branch {} fits {}", branch, format_vafs(vaf_values)),
            })
    }
}

pub fn format_vafs(vafs: &VafValues) -> String {
    let parts: Vec<String> = vafs
        .iter()
        .map(|(sample, vaf)| format!("{}={}", sample, vaf))
        .collect();
    format!("{{{}}}", parts.join(", "))
}
