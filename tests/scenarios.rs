use r2d2_vaf::ruleset::{RuleSource, load_calculator};
use r2d2_vaf::scenario::{AnalysisType, Event, SampleType, ScenarioCalculator, VafValues};

use AnalysisType::*;
use SampleType::*;

fn builtin() -> ScenarioCalculator {
    load_calculator(&RuleSource::Builtin).unwrap()
}

fn vafs(values: &[(SampleType, f64)]) -> VafValues {
    values.iter().copied().collect()
}

fn quad(dn: f64, dt: f64, rn: f64, rt: f64) -> VafValues {
    vafs(&[(DnaNormal, dn), (DnaTumor, dt), (RnaNormal, rn), (RnaTumor, rt)])
}

fn trio(dn: f64, dt: f64, rt: f64) -> VafValues {
    vafs(&[(DnaNormal, dn), (DnaTumor, dt), (RnaTumor, rt)])
}

#[test]
fn all_inputs_table() {
    let sc = builtin();
    let cases = [
        (quad(0.25, 0.20, 0.25, 0.15), Event::GermlineMosaic),
        (quad(0.25, 0.75, 0.25, 0.75), Event::TumorInNormal),
        (quad(0.55, 0.35, 0.95, 0.90), Event::Vse),
        (quad(0.50, 0.48, 0.10, 0.98), Event::TVse),
        (quad(0.41, 0.69, 0.05, 0.10), Event::Vsl),
        (quad(0.58, 0.68, 0.8, 0.02), Event::TVsl),
        (quad(0.32, 0.96, 0.44, 0.93), Event::LohAlt),
        (quad(0.45, 0.08, 0.62, 0.07), Event::LohRef),
        (quad(0.01, 0.72, 0.59, 0.03), Event::Germline),
        (quad(0.0, 0.0, 0.35, 0.45), Event::Rnaed),
        (quad(0.0, 0.0, 0.0, 0.55), Event::TRnaed),
        (quad(0.0, 0.20, 0.0, 0.15), Event::Somatic),
        (quad(0.0, 0.20, 0.25, 0.15), Event::Unclassified),
    ];
    for (values, expected) in cases {
        assert_eq!(sc.categorize(AllInputs, &values).unwrap(), expected, "{:?}", values);
    }
}

#[test]
fn no_rna_normal_table() {
    let sc = builtin();
    let cases = [
        (trio(0.25, 0.20, 0.15), Event::GermlineMosaic),
        (trio(0.25, 0.75, 0.75), Event::TumorInNormal),
        (trio(0.55, 0.35, 0.90), Event::Vse),
        (trio(0.41, 0.69, 0.10), Event::Vsl),
        (trio(0.32, 0.96, 0.93), Event::LohAlt),
        (trio(0.45, 0.08, 0.07), Event::LohRef),
        (trio(0.01, 0.72, 0.03), Event::Germline),
        (trio(0.0, 0.0, 0.45), Event::Rnaed),
        (trio(0.0, 0.20, 0.15), Event::Somatic),
        (trio(0.0, 0.0, 0.15), Event::Unclassified),
    ];
    for (values, expected) in cases {
        assert_eq!(sc.categorize(NoRnaNormal, &values).unwrap(), expected, "{:?}", values);
    }
}

#[test]
fn dna_only_table() {
    let sc = builtin();
    let cases = [
        ((0.25, 0.20), Event::GermlineMosaic),
        ((0.25, 0.75), Event::TumorInNormal),
        ((0.32, 0.96), Event::LohAlt),
        ((0.45, 0.08), Event::LohRef),
        ((0.4, 0.72), Event::Germline),
        ((0.0, 0.20), Event::Somatic),
    ];
    for ((dn, dt), expected) in cases {
        let values = vafs(&[(DnaNormal, dn), (DnaTumor, dt)]);
        assert_eq!(sc.categorize(DnaOnly, &values).unwrap(), expected, "{:?}", values);
    }
}

#[test]
fn normal_only_table() {
    let sc = builtin();
    let cases = [
        ((0.35, 0.98), Event::Vse),
        ((0.45, 0.07), Event::Vsl),
        ((0.35, 0.88), Event::Germline),
    ];
    for ((dn, rn), expected) in cases {
        let values = vafs(&[(DnaNormal, dn), (RnaNormal, rn)]);
        assert_eq!(sc.categorize(NormalOnly, &values).unwrap(), expected, "{:?}", values);
    }
}

#[test]
fn tumor_only_table() {
    let sc = builtin();
    let cases = [
        ((0.35, 0.98), Event::Vse),
        ((0.45, 0.10), Event::Vsl),
        ((0.25, 0.98), Event::Somatic),
    ];
    for ((dt, rt), expected) in cases {
        let values = vafs(&[(DnaTumor, dt), (RnaTumor, rt)]);
        assert_eq!(sc.categorize(TumorOnly, &values).unwrap(), expected, "{:?}", values);
    }
}

#[test]
fn every_builtin_branch_has_a_catch_all() {
    let sc = builtin();
    for analysis in AnalysisType::ALL {
        let values: VafValues = analysis.samples().iter().map(|s| (*s, 0.5)).collect();
        assert!(sc.categorize(analysis, &values).is_ok(), "{}", analysis);
        if analysis.has_sample(DnaNormal) {
            let mut zero = values.clone();
            zero.insert(DnaNormal, 0.0);
            assert!(sc.categorize(analysis, &zero).is_ok(), "{} gl=0", analysis);
        }
    }
}
