mod common;

use insta::assert_snapshot;
use tempfile::tempdir;

use crate::common::{alignment_fixture, run_tinscan};

// Golden snapshot of the full annotation for the bundled fixture
#[test]
fn default_scan_gff_snapshot() {
    let outdir = tempdir().unwrap();
    let gff = run_tinscan(&alignment_fixture(), outdir.path(), &[]).unwrap();
    assert_snapshot!("default_scan_gff", gff);
}

#[test]
fn repeated_runs_are_identical() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let a = run_tinscan(&alignment_fixture(), first.path(), &[]).unwrap();
    let b = run_tinscan(&alignment_fixture(), second.path(), &[]).unwrap();
    assert_eq!(a, b);
}
