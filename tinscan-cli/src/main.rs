//! # tinscan CLI - Transposable Element Insertion Scanner
//!
//! Reads a tab-delimited pairwise alignment table and reports candidate
//! insertions in the target genome as GFF3.
//!
//! ## Usage
//!
//! ```bash
//! # Default thresholds, output to ./candidate_insertion_events.gff3
//! tinscan -i tinscan_alignment.tab
//!
//! # Custom output location, no flank features
//! tinscan -i tinscan_alignment.tab -d results -o chr2.gff3 --noflanks
//!
//! # Stricter flank identity, allow larger target site duplications
//! tinscan -i tinscan_alignment.tab --min-ident 95 --max-tsd 200
//! ```
//!
//! ## Options
//!
//! - `-i, --infile <FILE>`: Alignment table (required)
//! - `-d, --outdir <DIR>`: Directory for the annotation (default: current directory)
//! - `-o, --gff-out <NAME>`: Annotation file name (default: candidate_insertion_events.gff3)
//! - `--noflanks`: Do not report flanking alignments
//! - `--max-tsd <N>`: Largest query overlap read as a TSD (default: 100)
//! - `--max-insert <N>`: Largest insertion (default: 100000, or 20000 with `-p finder`)
//! - `--min-insert <N>`: Smallest insertion (default: 100)
//! - `--q-gap <N>`: Largest query gap between flanks (default: 100)
//! - `--min-ident <PCT>`: Minimum alignment identity (default: 90)
//! - `--max-ident-diff <PCT>`: Largest identity difference between flanks (default: 20)
//! - `-p, --preset <PRESET>`: Label set and defaults: scanner or finder (default: scanner)
//! - `-q, --quiet`: Only log errors
//!
//! Log verbosity can also be set with `RUST_LOG`.

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::{LevelFilter, info};
use std::path::PathBuf;
use tinscan_core::InsertionScanner;
use tinscan_core::config::{Preset, ScanConfig};
use tinscan_core::constants::DEFAULT_GFF_NAME;

fn cli() -> Command {
    Command::new("tinscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find candidate transposon insertions from whole genome alignments")
        .arg(
            Arg::new("infile")
                .short('i')
                .long("infile")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Tab-delimited alignment table"),
        )
        .arg(
            Arg::new("outdir")
                .short('d')
                .long("outdir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Output directory (default: current directory)"),
        )
        .arg(
            Arg::new("gff-out")
                .short('o')
                .long("gff-out")
                .alias("gffOut")
                .value_name("NAME")
                .default_value(DEFAULT_GFF_NAME)
                .help("Name of the GFF3 annotation file"),
        )
        .arg(
            Arg::new("noflanks")
                .long("noflanks")
                .action(ArgAction::SetTrue)
                .help("Do not report flanking alignments"),
        )
        .arg(
            Arg::new("max-tsd")
                .long("max-tsd")
                .alias("maxTSD")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .help("Maximum query overlap between flanks, read as a TSD [default: 100]"),
        )
        .arg(
            Arg::new("max-insert")
                .long("max-insert")
                .alias("maxInsert")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .help("Maximum insertion length [default: 100000, finder: 20000]"),
        )
        .arg(
            Arg::new("min-insert")
                .long("min-insert")
                .alias("minInsert")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Minimum insertion length [default: 100]"),
        )
        .arg(
            Arg::new("q-gap")
                .long("q-gap")
                .alias("qGap")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Maximum query gap between flanks [default: 100]"),
        )
        .arg(
            Arg::new("min-ident")
                .long("min-ident")
                .alias("minIdent")
                .value_name("PCT")
                .value_parser(value_parser!(f64))
                .help("Minimum percent identity of a flank alignment [default: 90]"),
        )
        .arg(
            Arg::new("max-ident-diff")
                .long("max-ident-diff")
                .alias("maxIdentDiff")
                .value_name("PCT")
                .value_parser(value_parser!(f64))
                .help("Maximum identity difference between flanks [default: 20]"),
        )
        .arg(
            Arg::new("preset")
                .short('p')
                .long("preset")
                .value_name("PRESET")
                .value_parser(["scanner", "finder"])
                .default_value("scanner")
                .help("Feature labels and insert size default"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
}

/// Builds the scan configuration from the preset and any overrides.
fn scan_config(matches: &ArgMatches) -> ScanConfig {
    let preset = match matches.get_one::<String>("preset").map(String::as_str) {
        Some("finder") => Preset::InsertFinder,
        _ => Preset::Scanner,
    };
    let mut config = ScanConfig::from_preset(preset);
    config.report_flanks = !matches.get_flag("noflanks");

    if let Some(&value) = matches.get_one::<f64>("min-ident") {
        config.min_identity = value;
    }
    if let Some(&value) = matches.get_one::<f64>("max-ident-diff") {
        config.thresholds.max_identity_diff = value;
    }
    if let Some(&value) = matches.get_one::<i64>("max-tsd") {
        config.thresholds.max_tsd = value;
    }
    if let Some(&value) = matches.get_one::<i64>("max-insert") {
        config.thresholds.max_insert = value;
    }
    if let Some(&value) = matches.get_one::<i64>("min-insert") {
        config.thresholds.min_insert = value;
    }
    if let Some(&value) = matches.get_one::<i64>("q-gap") {
        config.thresholds.q_gap = value;
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("quiet") {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();

    let scanner = InsertionScanner::with_config(scan_config(&matches))?;

    let infile = matches
        .get_one::<PathBuf>("infile")
        .ok_or("Missing alignment file")?;
    let gff_name = matches
        .get_one::<String>("gff-out")
        .map_or(DEFAULT_GFF_NAME, String::as_str);
    let output = match matches.get_one::<PathBuf>("outdir") {
        Some(outdir) => outdir.join(gff_name),
        None => PathBuf::from(gff_name),
    };

    let summary = scanner.scan_file(infile, &output)?;

    if summary.inverted_records > 0 {
        info!(
            "{} alignment records had inverted query coordinates",
            summary.inverted_records
        );
    }
    info!("{summary}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_legacy_option_names() {
        let matches = cli()
            .try_get_matches_from([
                "tinscan", "-i", "aln.tab", "--gffOut", "x.gff3", "--maxTSD", "20", "--maxInsert",
                "5000", "--minInsert", "50", "--qGap", "-10", "--minIdent", "80",
                "--maxIdentDiff", "5",
            ])
            .unwrap();
        let config = scan_config(&matches);
        assert_eq!(matches.get_one::<String>("gff-out").unwrap(), "x.gff3");
        assert_eq!(config.thresholds.max_tsd, 20);
        assert_eq!(config.thresholds.max_insert, 5000);
        assert_eq!(config.thresholds.min_insert, 50);
        assert_eq!(config.thresholds.q_gap, -10);
        assert_eq!(config.min_identity, 80.0);
        assert_eq!(config.thresholds.max_identity_diff, 5.0);
    }

    #[test]
    fn test_preset_controls_max_insert_default() {
        let scanner = cli().try_get_matches_from(["tinscan", "-i", "a"]).unwrap();
        assert_eq!(scan_config(&scanner).thresholds.max_insert, 100_000);
        assert!(scan_config(&scanner).report_flanks);

        let finder = cli()
            .try_get_matches_from(["tinscan", "-i", "a", "-p", "finder", "--noflanks"])
            .unwrap();
        let config = scan_config(&finder);
        assert_eq!(config.thresholds.max_insert, 20_000);
        assert_eq!(config.labels.source, "InsertFinder");
        assert!(!config.report_flanks);
    }

    #[test]
    fn test_infile_is_required() {
        assert!(cli().try_get_matches_from(["tinscan"]).is_err());
    }
}
