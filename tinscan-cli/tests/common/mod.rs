#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Alignment table with two candidate insertions on `chr1`, one hit below the
/// default identity threshold and one record with inverted query coordinates.
pub fn alignment_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("alignments.tab")
}

/// The tinscan binary with logging left to its own defaults
pub fn tinscan() -> Command {
    let mut cmd = Command::cargo_bin("tinscan").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Runs tinscan on `input` writing into `outdir`, returning the annotation text.
pub fn run_tinscan(
    input: &Path,
    outdir: &Path,
    extra_args: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    let mut cmd = tinscan();
    cmd.arg("-i").arg(input).arg("-d").arg(outdir).args(extra_args);
    cmd.assert().success();

    let gff_name = extra_args
        .iter()
        .position(|arg| matches!(*arg, "-o" | "--gff-out" | "--gffOut"))
        .and_then(|index| extra_args.get(index + 1).copied())
        .unwrap_or("candidate_insertion_events.gff3");
    Ok(fs::read_to_string(outdir.join(gff_name))?)
}

/// Feature lines of an annotation, headers dropped
pub fn feature_lines(gff: &str) -> Vec<&str> {
    gff.lines().filter(|line| !line.starts_with('#')).collect()
}
