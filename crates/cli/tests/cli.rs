use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Two diploid samples; chr1 has one segregating and one fixed variant,
/// chr2 one segregating variant (0/1, 0/0).
const CALLSET: &str = r#"{
    "samples": ["S1", "S2"],
    "positions": [100, 200, 50],
    "contigs": ["chr1", "chr1", "chr2"],
    "genotypes": [
        [[0, 1], [0, 0]],
        [[1, 1], [1, 1]],
        [[0, 1], [0, 0]]
    ]
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_compute_tajima_d_to_stdout() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    let assert = cmd
        .arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("-s")
        .arg("tajima_d")
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    let d = json["tajima_d"]["population"]["chr2"].as_f64().unwrap();
    assert!((d + 6f64.sqrt() / 4.0).abs() < 1e-12);
    assert!(json["tajima_d"]["population"]["chr1"].as_f64().unwrap().is_finite());
    assert!(json.get("pi").is_none());
}

#[test]
fn test_compute_all_statistics_by_default() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    let assert = cmd
        .arg("compute")
        .arg("--callset")
        .arg(&callset)
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    for stat in [
        "pi",
        "theta_w",
        "tajima_d",
        "observed_het",
        "expected_het",
        "inbreeding",
    ] {
        assert!(json.get(stat).is_some(), "missing {stat}");
    }
}

#[test]
fn test_compute_genome_wide_weights() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);
    let weights = write_file(temp.path(), "weights.json", r#"{"chr1": 1.0, "chr2": 1.0}"#);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    let assert = cmd
        .arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("--weights")
        .arg(&weights)
        .arg("-s")
        .arg("observed_het")
        .assert()
        .success();

    // Ho: chr1 mean of 0.5 and 0.0, chr2 0.5
    let json = stdout_json(&assert.get_output().stdout);
    let population = &json["observed_het"]["population"];
    assert_eq!(population["chr1"].as_f64().unwrap(), 0.25);
    assert_eq!(population["chr2"].as_f64().unwrap(), 0.5);
    assert_eq!(population["genome-wide"].as_f64().unwrap(), 0.375);
}

#[test]
fn test_compute_invalid_weight_fails() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);
    let weights = write_file(temp.path(), "weights.json", r#"{"chr1": -5.0}"#);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("--weights")
        .arg(&weights)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse weights"));
}

#[test]
fn test_compute_skips_invalid_clade() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);
    let clades = write_file(
        temp.path(),
        "clades.json",
        r#"{"cladeA": ["S1", "S2"], "cladeB": ["S1", "S9"]}"#,
    );

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    let assert = cmd
        .arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("--clades")
        .arg(&clades)
        .arg("-s")
        .arg("pi")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown sample identifier: S9"));

    let json = stdout_json(&assert.get_output().stdout);
    assert!(json["pi"].get("cladeA").is_some());
    assert!(json["pi"].get("cladeB").is_none());
}

#[test]
fn test_compute_pooled_per_sample_with_config() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);
    let config = write_file(temp.path(), "config.json", r#"{"per_sample": true}"#);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    let assert = cmd
        .arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("--config")
        .arg(&config)
        .arg("--pooled")
        .arg("-s")
        .arg("observed_het")
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    let ho = &json["observed_het"];
    // S1 is heterozygous at 2 of 3 variants, S2 at none
    assert!((ho["S1"].as_f64().unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(ho["S2"].as_f64().unwrap(), 0.0);
    assert!(ho["population"].is_number());
}

#[test]
fn test_compute_writes_output_file() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);
    let output = temp.path().join("results.json");

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("-s")
        .arg("theta_w")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Results written to"));

    let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json["theta_w"]["population"]["chr2"].is_number());
}

#[test]
fn test_compute_unknown_statistic() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("compute")
        .arg("--callset")
        .arg(&callset)
        .arg("-s")
        .arg("fst")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown statistic"));
}

#[test]
fn test_compute_missing_callset() {
    let temp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("compute")
        .arg("--callset")
        .arg(temp.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open callset"));
}

#[test]
fn test_compute_malformed_callset() {
    let temp = tempdir().unwrap();
    let callset = write_file(
        temp.path(),
        "callset.json",
        r#"{"samples": ["S1"], "positions": [1, 2], "contigs": ["chr1"], "genotypes": [[[0, 0]]]}"#,
    );

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("compute")
        .arg("--callset")
        .arg(&callset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load callset"));
}

#[test]
fn test_het_profile() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    let assert = cmd
        .arg("het-profile")
        .arg("--callset")
        .arg(&callset)
        .arg("--samples")
        .arg("S2,S1")
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["contig"], "chr1");
    assert_eq!(rows[0]["observed"].as_f64().unwrap(), 0.5);
    // Fixed variant: F undefined
    assert!(rows[1]["inbreeding"].is_null());
    assert_eq!(rows[2]["position"], 50);
}

#[test]
fn test_het_profile_unknown_sample() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("het-profile")
        .arg("--callset")
        .arg(&callset)
        .arg("--samples")
        .arg("S1,S7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sample identifier: S7"));
}

#[test]
fn test_inspect() {
    let temp = tempdir().unwrap();
    let callset = write_file(temp.path(), "callset.json", CALLSET);

    let mut cmd = Command::cargo_bin("sumstats").unwrap();
    cmd.arg("inspect")
        .arg("--callset")
        .arg(&callset)
        .assert()
        .success()
        .stdout(predicate::str::contains("Samples: 2"))
        .stdout(predicate::str::contains("Variants: 3"))
        .stdout(predicate::str::contains("chr1: 2 variants (100..=200)"))
        .stdout(predicate::str::contains("chr2: 1 variants (50..=50)"));
}
