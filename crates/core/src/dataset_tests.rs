// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const HASH_A: &str = "91b4d142823f7d20c5f08df69122de43f35f057a988d9619f6d3138485c9a203";
const HASH_B: &str = "6ca13d52ca70c883e0f0bb101e425a89e8624de51db2d2392593af6a84118090";

fn record(id: RecordId, hash: &str, gene: &str) -> (RecordId, String, String) {
    (id, hash.to_string(), gene.to_string())
}

#[test]
fn ids_iterate_in_ascending_order() {
    let dataset = Dataset::from_records(vec![
        record(7, HASH_A, "GATTACA"),
        record(2, HASH_B, "TACATG"),
    ])
    .unwrap();

    assert_eq!(dataset.ids().collect::<Vec<_>>(), vec![2, 7]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.gene(7), Some("GATTACA"));
    assert_eq!(dataset.password_hash(2), Some(HASH_B));
}

#[test]
fn hashes_are_normalized_to_lowercase() {
    let upper = HASH_A.to_ascii_uppercase();
    let dataset = Dataset::from_records(vec![record(1, &upper, "ACGT")]).unwrap();
    assert_eq!(dataset.password_hash(1), Some(HASH_A));
}

#[test]
fn empty_dataset_is_rejected() {
    let err = Dataset::from_records(Vec::new()).unwrap_err();
    assert_eq!(err, DatasetError::Empty);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Dataset::from_records(vec![record(1, HASH_A, "A"), record(1, HASH_B, "C")])
        .unwrap_err();
    assert_eq!(err, DatasetError::DuplicateId(1));
}

#[test]
fn mismatched_id_sets_are_rejected() {
    let hashes = BTreeMap::from([(1, HASH_A.to_string()), (2, HASH_B.to_string())]);
    let genes = BTreeMap::from([(1, "ACGT".to_string())]);
    assert_eq!(
        Dataset::new(hashes, genes).unwrap_err(),
        DatasetError::MissingGene(2)
    );

    let hashes = BTreeMap::from([(1, HASH_A.to_string())]);
    let genes = BTreeMap::from([(1, "ACGT".to_string()), (3, "TT".to_string())]);
    assert_eq!(
        Dataset::new(hashes, genes).unwrap_err(),
        DatasetError::MissingHash(3)
    );
}

#[test]
fn malformed_hash_is_a_configuration_error() {
    let err = Dataset::from_records(vec![record(4, "not-a-digest", "ACGT")]).unwrap_err();
    assert!(matches!(err, DatasetError::MalformedHash { id: 4, .. }));
}
