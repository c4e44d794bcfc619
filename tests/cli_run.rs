use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

const HEADER: &str = "Hugo_Symbol\tChromosome\tStart_position\tEnd_position\tStrand\tVariant_Classification\tVariant_Type\tt_ref_count\tt_alt_count";

fn write_maf(path: &Path, rows: &[&str]) {
    let mut content = format!("{}\n", HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn run_detects_pairwise_analyses() {
    let tmp = TempDir::new().unwrap();
    let dn = tmp.path().join("dn.maf");
    let dt = tmp.path().join("dt.maf");
    let rn = tmp.path().join("rn.maf");
    write_maf(&dn, &["TP53\t17\t100\t100\t+\tMissense_Mutation\tSNP\t10\t10"]);
    write_maf(&dt, &["TP53\t17\t100\t100\t+\tMissense_Mutation\tSNP\t2\t98"]);
    write_maf(&rn, &["TP53\t17\t100\t100\t+\tMissense_Mutation\tSNP\t1\t99"]);
    let out = tmp.path().join("out");

    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.arg("run")
        .arg("--dna-normal")
        .arg(&dn)
        .arg("--dna-tumor")
        .arg(&dt)
        .arg("--rna-normal")
        .arg(&rn)
        .arg("--out")
        .arg(&out)
        .arg("--json");
    let stdout = stdout_of(&mut cmd);

    assert!(stdout.contains("Analysis: dna_only (dna_normal, dna_tumor)"));
    assert!(stdout.contains("Analysis: normal_only (dna_normal, rna_normal)"));
    assert!(out.join("scenarios_dna_only.tsv").exists());
    assert!(out.join("scenarios_normal_only.tsv").exists());
    assert!(out.join("scenarios_dna_only.json").exists());
    assert!(!out.join("scenarios_all_inputs.tsv").exists());

    let dna = fs::read_to_string(out.join("scenarios_dna_only.tsv")).unwrap();
    assert!(dna.lines().nth(1).unwrap().starts_with("loh_alt\tTP53"));
    let normal = fs::read_to_string(out.join("scenarios_normal_only.tsv")).unwrap();
    assert!(normal.lines().nth(1).unwrap().starts_with("vse\tTP53"));
}

#[test]
fn run_with_one_file_fails() {
    let tmp = TempDir::new().unwrap();
    let dt = tmp.path().join("dt.maf");
    write_maf(&dt, &["TP53\t17\t100\t100\t+\tMissense_Mutation\tSNP\t2\t98"]);

    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.arg("run")
        .arg("--dna-tumor")
        .arg(&dt)
        .arg("--out")
        .arg(tmp.path().join("out"));
    cmd.assert().failure();
}

#[test]
fn forced_analysis_requires_its_samples() {
    let tmp = TempDir::new().unwrap();
    let dn = tmp.path().join("dn.maf");
    let dt = tmp.path().join("dt.maf");
    write_maf(&dn, &["TP53\t17\t100\t100\t+\tMissense_Mutation\tSNP\t10\t10"]);
    write_maf(&dt, &["TP53\t17\t100\t100\t+\tMissense_Mutation\tSNP\t2\t98"]);

    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.arg("run")
        .arg("--dna-normal")
        .arg(&dn)
        .arg("--dna-tumor")
        .arg(&dt)
        .arg("--analysis-type")
        .arg("tumor_only")
        .arg("--out")
        .arg(tmp.path().join("out"));
    let output = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("requires MAFs for: rna_tumor"), "{stderr}");
}

#[test]
fn classify_prints_event() {
    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.args([
        "classify",
        "--analysis-type",
        "all_inputs",
        "--vaf",
        "dna_normal=0.55",
        "--vaf",
        "dna_tumor=0.35",
        "--vaf",
        "rna_normal=0.95",
        "--vaf",
        "rna_tumor=0.90",
    ]);
    assert_eq!(stdout_of(&mut cmd).trim(), "vse");
}

#[test]
fn classify_rejects_wrong_vaf_set() {
    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.args([
        "classify",
        "--analysis-type",
        "no_rna_normal",
        "--vaf",
        "dna_normal=0.4",
        "--vaf",
        "rna_tumor=0.4",
    ]);
    let output = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("wrong VAF values"), "{stderr}");
}

#[test]
fn rules_show_filters_by_analysis() {
    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.args(["rules", "show", "--analysis-type", "tumor_only"]);
    let stdout = stdout_of(&mut cmd);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("scenario rules (built-in v1):"));
    let rules: Vec<&str> = lines.collect();
    assert_eq!(rules.len(), 5);
    assert!(rules.iter().all(|l| l.starts_with("tumor_only\tno_gl\t")));
    assert_eq!(rules[4], "tumor_only\tno_gl\t99\tunclassified\t*");
}

#[test]
fn validate_reports_rule_counts() {
    let tmp = TempDir::new().unwrap();
    let rules = tmp.path().join("rules.ini");
    fs::write(
        &rules,
        "[dna_only.gl>0.1.germline]\ndna_tumor = > 0\n[dna_only.gl=0.1.somatic]\ndna_tumor = > 0\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.arg("validate").arg("--rules").arg(&rules);
    let stdout = stdout_of(&mut cmd);
    assert!(stdout.starts_with("r2d2-vaf validate ok\n"));
    assert!(stdout.contains("rules: 2"));
    assert!(stdout.contains("dna_only\tgl>0=1, gl=0=1"));
}

#[test]
fn validate_fails_on_bad_condition() {
    let tmp = TempDir::new().unwrap();
    let rules = tmp.path().join("rules.ini");
    fs::write(&rules, "[dna_only.gl>0.1.germline]\ndna_tumor = = 2.5 3.8\n").unwrap();

    let mut cmd = Command::cargo_bin("r2d2-vaf").unwrap();
    cmd.arg("validate").arg("--rules").arg(&rules);
    cmd.assert().failure();
}
