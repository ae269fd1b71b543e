mod common;

use std::fs;

use tempfile::tempdir;

use crate::common::{alignment_fixture, feature_lines, run_tinscan, tinscan};

#[test]
fn writes_default_output_into_new_outdir() {
    let dir = tempdir().unwrap();
    let outdir = dir.path().join("results").join("chr1");

    let gff = run_tinscan(&alignment_fixture(), &outdir, &[]).unwrap();

    assert!(outdir.join("candidate_insertion_events.gff3").is_file());
    assert_eq!(gff.lines().count(), 12);
    let features = feature_lines(&gff);
    assert_eq!(
        features
            .iter()
            .filter(|line| line.contains("\tCandidate_Insertion\t"))
            .count(),
        2
    );
    assert!(features.iter().all(|line| line.starts_with("chr1\t")));
}

#[test]
fn noflanks_drops_flank_features() {
    let outdir = tempdir().unwrap();
    let gff = run_tinscan(&alignment_fixture(), outdir.path(), &["--noflanks"]).unwrap();

    assert!(!gff.contains("InsertFlank"));
    assert_eq!(feature_lines(&gff).len(), 6);
}

#[test]
fn finder_preset_uses_its_labels() {
    let outdir = tempdir().unwrap();
    let gff = run_tinscan(
        &alignment_fixture(),
        outdir.path(),
        &["-p", "finder", "--gffOut", "finder.gff3"],
    )
    .unwrap();

    let features = feature_lines(&gff);
    assert!(features[0].starts_with("chr1\tInsertFinder\tInsertion\t1500\t1799\t"));
    assert!(features[0].contains("leftflank=ctgA_+_0_499;"));
    assert!(features[1].contains("\tTSD\t"));
    assert!(features[3].contains("\tInsertFlank\t"));
}

#[test]
fn thresholds_can_exclude_every_pair() {
    let outdir = tempdir().unwrap();
    let gff = run_tinscan(
        &alignment_fixture(),
        outdir.path(),
        &["--min-insert", "500", "--max-ident-diff", "0.1"],
    )
    .unwrap();

    assert_eq!(
        gff,
        "#gff-version 3\n#seqid\tsource\ttype\tstart\tend\tscore\tstrand\tphase\tattributes\n"
    );
}

#[test]
fn negative_query_gap_keeps_only_overlapping_flanks() {
    let outdir = tempdir().unwrap();
    let gff = run_tinscan(
        &alignment_fixture(),
        outdir.path(),
        &["--q-gap", "-5", "--max-tsd", "10"],
    )
    .unwrap();

    // Both fixture pairs overlap by 9 bases on the query.
    assert_eq!(feature_lines(&gff).len(), 10);
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.tab");
    fs::write(
        &input,
        "chr1\t+\t1001\t1500\tctgA\t+\t1\t500\t40000\t98.2\nchr1\t+\t1801\n",
    )
    .unwrap();
    let outdir = dir.path().join("out");

    tinscan()
        .arg("-i")
        .arg(&input)
        .arg("-d")
        .arg(&outdir)
        .assert()
        .failure();

    assert!(!outdir.join("candidate_insertion_events.gff3").exists());
}

#[test]
fn descending_target_coordinates_fail() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("descending.tab");
    fs::write(&input, "chr1\t+\t1500\t1001\tctgA\t+\t1\t500\t40000\t98.2\n").unwrap();

    tinscan()
        .arg("-i")
        .arg(&input)
        .arg("-d")
        .arg(dir.path())
        .assert()
        .failure();

    assert!(!dir.path().join("candidate_insertion_events.gff3").exists());
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().unwrap();
    tinscan()
        .arg("-i")
        .arg(dir.path().join("absent.tab"))
        .arg("-d")
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn contradictory_insert_bounds_are_rejected() {
    let dir = tempdir().unwrap();
    tinscan()
        .arg("-i")
        .arg(alignment_fixture())
        .arg("-d")
        .arg(dir.path())
        .args(["--min-insert", "5000", "--max-insert", "100"])
        .assert()
        .failure();

    assert!(!dir.path().join("candidate_insertion_events.gff3").exists());
}

#[test]
fn infile_is_required() {
    tinscan().assert().failure();
}

#[test]
fn summary_is_logged_unless_quiet() {
    let dir = tempdir().unwrap();

    let loud = tinscan()
        .arg("-i")
        .arg(alignment_fixture())
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success();
    let stderr = String::from_utf8(loud.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Found 2 candidate insertions (2 with TSD)"));
    assert!(stderr.contains("Inverting query sequence coordinates for record number: 5"));

    let quiet = tinscan()
        .arg("-i")
        .arg(alignment_fixture())
        .arg("-d")
        .arg(dir.path())
        .arg("-q")
        .assert()
        .success();
    assert!(quiet.get_output().stderr.is_empty());
}
