//! End-to-end runs over guide / genome files on disk

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use guide_scan::pipeline::{self, ScanMeta, ScanOpt};
use guide_scan::ScanError;
use tempfile::tempdir;

fn write(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, content).expect("write fixture");
    p
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> T {
    serde_json::from_str(&fs::read_to_string(path).expect("read output")).expect("parse output")
}

#[test]
fn scan_writes_offsets_and_counts() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "ACG\nCGT\nGT\nTTTT\n");
    let genome = write(dir.path(), "genome.txt", "AA\nCGTT\n");
    let base = dir.path().join("run").display().to_string();

    let genomes = [genome];
    let report = pipeline::scan_all(&guides, &genomes, ScanOpt::default()).unwrap();
    let written = pipeline::write_scan(&report, &guides, &genomes, &base, false).unwrap();
    assert!(written.meta.is_none());

    let offsets: BTreeMap<String, Vec<u64>> = read_json(&written.outputs.offsets);
    let counts: BTreeMap<String, u64> = read_json(&written.outputs.counts);

    assert_eq!(offsets["ACG"], vec![1]);
    assert_eq!(offsets["CGT"], vec![2]);
    assert_eq!(offsets["GT"], vec![3]);
    assert!(!offsets.contains_key("TTTT"));
    assert_eq!(offsets.keys().collect::<Vec<_>>(), counts.keys().collect::<Vec<_>>());
    for (g, offs) in &offsets {
        assert_eq!(counts[g], offs.len() as u64);
    }
    assert_eq!(report.stats.symbols, 6);
}

#[test]
fn fasta_genome_with_wrapped_lines() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "gattaca\n");
    let genome = write(dir.path(), "genome.fa", ">chr1 test\r\nCCGAT\r\nTACAGG\r\nGATTA\r\nCA\r\n");

    let report = pipeline::scan_all(&guides, &[genome], ScanOpt::default()).unwrap();
    assert_eq!(report.table.offsets("GATTACA"), &[2, 11]);
    assert_eq!(report.table.count("GATTACA"), 2);
}

#[test]
fn multiple_genomes_merge_in_input_order() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "AAC\n");
    let g1 = write(dir.path(), "g1.txt", "TTTTTAAC\n");
    let g2 = write(dir.path(), "g2.txt", "AA\nC\n");
    let g3 = write(dir.path(), "g3.txt", "GGGG\n");

    for threads in [1, 3] {
        let report = pipeline::scan_all(&guides, &[g1.clone(), g2.clone(), g3.clone()], ScanOpt { threads }).unwrap();
        assert_eq!(report.table.offsets("AAC"), &[5, 0], "threads={}", threads);
        assert_eq!(report.stats.symbols, 15);
    }
}

#[test]
fn meta_sidecar_records_run() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "ACGT\nCG\n");
    let genome = write(dir.path(), "genome.txt", "ACGTACGT\n");
    let base = dir.path().join("meta").display().to_string();

    let genomes = [genome];
    let report = pipeline::scan_all(&guides, &genomes, ScanOpt::default()).unwrap();
    let written = pipeline::write_scan(&report, &guides, &genomes, &base, true).unwrap();
    let meta: ScanMeta = read_json(written.meta.as_deref().unwrap());
    assert_eq!(meta.guides, 2);
    assert_eq!(meta.max_len, 4);
    assert_eq!(meta.symbols, 8);
    assert_eq!(meta.matches, 4);
    assert!(!meta.timestamp.is_empty());
}

#[test]
fn check_report_lists_all_guides() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "CG\nTTT\nACGT\n");
    let genome = write(dir.path(), "genome.txt", "ACGTA\nCGA\n");
    let out = dir.path().join("report.tsv");

    let report = pipeline::scan_all(&guides, &[genome], ScanOpt::default()).unwrap();
    let summary = pipeline::write_check(&report, &out, false).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.multi_hit, 1);
    assert_eq!(fs::read_to_string(&out).unwrap(), "guide\toccurrences\nCG\t2\nTTT\t0\nACGT\t1\n");

    let summary = pipeline::write_check(&report, &out, true).unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(fs::read_to_string(&out).unwrap(), "guide\toccurrences\nTTT\t0\nACGT\t1\n");
}

#[test]
fn empty_guide_file_yields_empty_results() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "\n\n");
    let genome = write(dir.path(), "genome.txt", "ACGT\n");
    let base = dir.path().join("empty").display().to_string();

    let genomes = [genome];
    let report = pipeline::scan_all(&guides, &genomes, ScanOpt::default()).unwrap();
    assert!(report.table.is_empty());
    let written = pipeline::write_scan(&report, &guides, &genomes, &base, false).unwrap();
    assert_eq!(fs::read_to_string(&written.outputs.offsets).unwrap(), "{}");
    assert_eq!(fs::read_to_string(&written.outputs.counts).unwrap(), "{}");
}

#[test]
fn invalid_guide_fails_before_scanning() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "ACGT\nAC-T\n");
    let genome = write(dir.path(), "genome.txt", "ACGT\n");

    let err = pipeline::scan_all(&guides, &[genome], ScanOpt::default()).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn missing_genome_is_io_error() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "ACGT\n");

    let err = pipeline::scan_all(&guides, &[dir.path().join("nope.txt")], ScanOpt::default()).unwrap_err();
    assert!(matches!(err, ScanError::Path { .. }));
    assert!(!err.is_sink());
}

#[test]
fn results_survive_unwritable_output() {
    let dir = tempdir().unwrap();
    let guides = write(dir.path(), "guides.txt", "ACG\n");
    let genomes = [write(dir.path(), "genome.txt", "AACGT\n")];
    let bad_base = dir.path().join("no-such-dir").join("out").display().to_string();

    let report = pipeline::scan_all(&guides, &genomes, ScanOpt::default()).unwrap();
    let err = pipeline::write_scan(&report, &guides, &genomes, &bad_base, false).unwrap_err();
    assert!(err.is_sink(), "{}", err);
    assert!(err.to_string().contains("no-such-dir"));

    // 表仍在内存中，可以写到另一个位置
    assert_eq!(report.table.offsets("ACG"), &[1]);
    let good_base = dir.path().join("retry").display().to_string();
    let written = pipeline::write_scan(&report, &guides, &genomes, &good_base, false).unwrap();
    let counts: BTreeMap<String, u64> = read_json(&written.outputs.counts);
    assert_eq!(counts["ACG"], 1);

    let err = pipeline::write_check(&report, &dir.path().join("no-such-dir").join("r.tsv"), false).unwrap_err();
    assert!(matches!(err, ScanError::Sink { .. }));
    assert_eq!(report.table.count("ACG"), 1);
}
