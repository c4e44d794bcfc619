use std::fs;

use r2d2_vaf::ruleset::{RuleSource, load_builtin_v1, load_calculator, load_rules_ini};
use r2d2_vaf::scenario::{AnalysisType, Event, GermlineBranch, SampleType, VafValues};
use tempfile::TempDir;

const CUSTOM_RULES: &str = "\
# dna pair only
[dna_only.gl>0.2.germline]
dna_tumor = > 0

[dna_only.gl>0.1.loh_alt]
dna_normal = = 0.3 0.7
dna_tumor = > 0.9

[dna_only.gl=0.1.somatic]
dna_tumor: > 0

[dna_only.gl=0.99.unclassified]
";

#[test]
fn custom_rules_file_replaces_builtin() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("rules.ini");
    fs::write(&path, CUSTOM_RULES).unwrap();

    let sections = load_rules_ini(&path).unwrap();
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0].name, "dna_only.gl>0.2.germline");

    let sc = load_calculator(&RuleSource::File(path)).unwrap();
    assert_eq!(sc.rule_count(), 4);
    assert_eq!(sc.analysis_types(), vec![AnalysisType::DnaOnly]);
    let positive = sc.rules_for(AnalysisType::DnaOnly, GermlineBranch::Positive);
    assert_eq!(positive[0].event, Event::LohAlt);
    assert_eq!(positive[1].event, Event::Germline);

    let vafs: VafValues = [(SampleType::DnaNormal, 0.5), (SampleType::DnaTumor, 0.95)]
        .into_iter()
        .collect();
    assert_eq!(sc.categorize(AnalysisType::DnaOnly, &vafs).unwrap(), Event::LohAlt);

    let vafs: VafValues = [(SampleType::DnaNormal, 0.0), (SampleType::DnaTumor, 0.0)]
        .into_iter()
        .collect();
    assert_eq!(
        sc.categorize(AnalysisType::DnaOnly, &vafs).unwrap(),
        Event::Unclassified
    );
}

#[test]
fn builtin_covers_every_analysis() {
    let sections = load_builtin_v1().unwrap();
    assert!(!sections.is_empty());

    let sc = load_calculator(&RuleSource::Builtin).unwrap();
    assert_eq!(sc.analysis_types(), AnalysisType::ALL.to_vec());
    assert_eq!(sc.rule_count(), sections.len());
    assert_eq!(RuleSource::Builtin.label(), "built-in v1");
}

#[test]
fn missing_rules_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.ini");
    let err = load_calculator(&RuleSource::File(path)).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read rules file"));
}

#[test]
fn invalid_rules_report_source_and_cause() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.ini");
    fs::write(&path, "[dna_only.gl>0.1.somatic]\ndna_tumor = = 0.8\n").unwrap();

    let err = load_calculator(&RuleSource::File(path.clone())).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("invalid scenario rules"), "{msg}");
    assert!(msg.contains(&path.display().to_string()), "{msg}");
    assert!(msg.contains("malformed condition"), "{msg}");
}

#[test]
fn unknown_event_section_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.ini");
    fs::write(&path, "[tumor_only.no_gl.1.artifact]\ndna_tumor = > 0\n").unwrap();

    let err = load_calculator(&RuleSource::File(path)).unwrap_err();
    assert!(format!("{:#}", err).contains("unrecognized event 'artifact'"));
}

#[test]
fn structural_errors_carry_line_numbers() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.ini");
    fs::write(&path, "[dna_only.gl>0.1.somatic]\ndna_tumor = > 0\n[dna_only.gl>0.1.somatic]\n")
        .unwrap();

    let err = load_rules_ini(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.ends_with("bad.ini:3 duplicate section [dna_only.gl>0.1.somatic]"), "{msg}");
}
