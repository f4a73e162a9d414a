// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

const HASH_007: &str = "629f4cf9337b0d0c76f305d860f98894cfa8c279516b425747514ca8710deb97";
const HASH_042: &str = "19158c4a7252e121f7367e7e86a3baabbf93fded76110076cfab2b31eb7df887";

#[test]
fn parses_rows_after_header() {
    let text = format!(
        "ID;NAME;PASSWORD;GENE\n\
         2;bob;{HASH_042};TACATG\n\
         \n\
         1;alice;{};GATTACA\n",
        HASH_007.to_uppercase()
    );

    let dataset = parse(&text).unwrap();

    assert_eq!(dataset.ids().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(dataset.password_hash(1), Some(HASH_007));
    assert_eq!(dataset.password_hash(2), Some(HASH_042));
    assert_eq!(dataset.gene(1), Some("GATTACA"));
}

#[test]
fn extra_columns_are_ignored() {
    let text = format!("5;eve;{HASH_007};ACGT;extra;more\n");
    let dataset = parse(&text).unwrap();
    assert_eq!(dataset.gene(5), Some("ACGT"));
}

#[test]
fn quoted_fields_may_contain_the_delimiter() {
    let text = format!(
        "\"ID\";\"NAME\";\"PASSWORD\";\"GENE\"\n\
         1;\"Smith; Alice\";\"{HASH_007}\";\"GATTACA\"\n"
    );

    let dataset = parse(&text).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.password_hash(1), Some(HASH_007));
    assert_eq!(dataset.gene(1), Some("GATTACA"));
}

#[test]
fn whitespace_only_lines_are_skipped() {
    let text = format!("   \n3;carol;{HASH_042};CAT\n  \n");
    let dataset = parse(&text).unwrap();
    assert_eq!(dataset.ids().collect::<Vec<_>>(), vec![3]);
}

#[parameterized(
    short_row = { "1;alice;abc\n", "line 1: expected at least 4 columns, found 3" },
    bad_id = { "ID;N;P;G\nx1;alice;abc;ACGT\n", "line 2: invalid record id \"x1\"" },
    empty = { "ID;N;P;G\n\n", "invalid dataset: dataset is empty" },
)]
fn rejects_malformed_text(text: &str, message: &str) {
    assert_eq!(parse(text).unwrap_err().to_string(), message);
}

#[test]
fn rejects_duplicate_ids() {
    let text = format!("1;a;{HASH_007};A\n1;b;{HASH_042};C\n");
    let err = parse(&text).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid(DatasetError::DuplicateId(1))
    ));
}

#[test]
fn rejects_malformed_hash() {
    let err = parse("1;a;not-a-digest;ACGT\n").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid(DatasetError::MalformedHash { id: 1, .. })
    ));
}

#[test]
fn load_reports_missing_file() {
    let err = load(Path::new("/nonexistent/data.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/data.csv"));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, format!("ID;N;P;G\n7;x;{HASH_007};GGG\n")).unwrap();

    let dataset = load(&path).unwrap();
    assert_eq!(dataset.len(), 1);
}
