// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end runs of the shoald binary on a 3-digit keyspace

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HASH_007: &str = "629f4cf9337b0d0c76f305d860f98894cfa8c279516b425747514ca8710deb97";
const HASH_042: &str = "19158c4a7252e121f7367e7e86a3baabbf93fded76110076cfab2b31eb7df887";
const HASH_035: &str = "41a8c9a10cdfce0ac30d40b8e8061fcc86395327c3aa1f04dbfe6e507eab837e";
const HASH_001: &str = "7a3e6b16cb75f48fb897eff3ae732f3154f6d203b53f33660f01b4c3b6bc2df9";
const HASH_002: &str = "a1dd6837f284625bdb1cb68f1dbc85c5dc4d8b05bae24c94ed5f55c477326ea2";
const HASH_004: &str = "9c1850fcaa632f2189deac5e9b66e02fa85be92a920b6cae7696c9b691e4bacb";

const CONFIG: &str = r#"
[cracking]
digits = 3
batch_size = 100

[mining]
prefix_len = 1

[cluster]
join_timeout = "10s"
"#;

fn setup(hashes: [&str; 3]) -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let genes = ["GATTACA", "TACATG", "CATC"];
    let mut csv = String::from("ID;NAME;PASSWORD;GENE\n");
    for (i, (hash, gene)) in hashes.iter().zip(genes).enumerate() {
        csv.push_str(&format!("{};user{};{};{}\n", i + 1, i + 1, hash, gene));
    }
    let input = temp.path().join("data.csv");
    std::fs::write(&input, csv).unwrap();
    let config = temp.path().join("shoal.toml");
    std::fs::write(&config, CONFIG).unwrap();
    (temp, input, config)
}

fn shoald(input: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shoald").unwrap();
    cmd.arg("--input")
        .arg(input)
        .arg("--config")
        .arg(config)
        .args(["--workers", "2"])
        .timeout(std::time::Duration::from_secs(120));
    cmd
}

#[test]
fn balanced_passwords_complete_the_task() {
    let (temp, input, config) = setup([HASH_007, HASH_042, HASH_035]);
    let report = temp.path().join("report.json");

    let output = shoald(&input, &config)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("ELAPSED"))
        .get_output()
        .stdout
        .clone();

    // 7 - 42 + 35 = 0: plus mines a run of '1', minus a run of '0'
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "stdout:\n{}", stdout);
    assert!(lines[0].starts_with("ID 1 HASH 1"), "{}", lines[0]);
    assert!(lines[1].starts_with("ID 2 HASH 0"), "{}", lines[1]);
    assert!(lines[2].starts_with("ID 3 HASH 1"), "{}", lines[2]);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["outcome"]["status"], "completed");
    assert_eq!(json["plaintext_by_id"]["1"], "007");
    assert_eq!(json["plaintext_by_id"]["2"], "042");
    assert_eq!(json["plaintext_by_id"]["3"], "035");
    assert_eq!(json["sign_by_id"]["2"], "minus");
    assert_eq!(json["best_overlap_by_id"]["3"]["partner_id"], 2);
}

#[test]
fn unbalanced_passwords_fail_the_task() {
    let (_temp, input, config) = setup([HASH_001, HASH_002, HASH_004]);

    shoald(&input, &config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("ELAPSED"))
        .stderr(predicate::str::contains("no zero-sum sign assignment"));
}

#[test]
fn missing_dataset_fails_before_starting() {
    let (temp, _input, config) = setup([HASH_007, HASH_042, HASH_035]);

    shoald(&temp.path().join("absent.csv"), &config)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot read dataset"));
}

#[test]
fn impossible_worker_threshold_is_rejected() {
    let (_temp, input, config) = setup([HASH_007, HASH_042, HASH_035]);

    shoald(&input, &config)
        .args(["--min-workers", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cluster.min_workers (3) exceeds cluster.workers (2)",
        ));
}

#[test]
fn logs_go_to_file_when_requested() {
    let (temp, input, config) = setup([HASH_007, HASH_042, HASH_035]);
    let log = temp.path().join("logs").join("shoald.log");

    shoald(&input, &config)
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting shoald"), "{}", contents);
    assert!(contents.contains("task completed"), "{}", contents);
}
