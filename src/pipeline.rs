use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::automaton::MatchAutomaton;
use crate::error::{Result, ScanError};
use crate::io::genome::GenomeReader;
use crate::io::{guides, sink};
use crate::scan::{ResultAggregator, ResultTable, ScanStats, StreamScanner};

/// 扫描参数
#[derive(Debug, Clone, Copy)]
pub struct ScanOpt {
    /// 同时扫描的基因组文件数上限
    pub threads: usize,
}

impl Default for ScanOpt {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// 单个基因组文件的扫描结果，offset 相对于该文件自身的序列
#[derive(Debug)]
pub struct FileScan {
    pub path: PathBuf,
    pub results: ResultAggregator,
    pub stats: ScanStats,
    pub lines: u64,
    pub headers: u64,
}

/// 运行元信息（`--meta`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMeta {
    pub guides_file: String,
    pub genome_files: Vec<String>,
    pub command: String,
    pub timestamp: String,
    pub guides: usize,
    pub max_len: usize,
    pub states: usize,
    pub chunks: u64,
    pub symbols: u64,
    pub matches: u64,
}

/// 全部基因组文件扫描完成后的结果，由调用方持有。
/// 写出失败不会丢失 `table`，可换一个输出位置重试。
#[derive(Debug)]
pub struct ScanReport {
    pub ac: MatchAutomaton,
    pub table: ResultTable,
    pub stats: ScanStats,
}

#[derive(Debug)]
pub struct ScanOutputs {
    pub outputs: sink::OutputPaths,
    pub meta: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub rows: usize,
    pub multi_hit: usize,
}

pub fn scan_reader<R: BufRead>(
    ac: &MatchAutomaton,
    reader: &mut GenomeReader<R>,
) -> Result<(ResultAggregator, ScanStats)> {
    let mut agg = ResultAggregator::new(ac.patterns());
    let mut scanner = StreamScanner::new(ac);
    while let Some(chunk) = reader.next_chunk()? {
        scanner.feed(chunk, |m| agg.record(m));
    }
    Ok((agg, scanner.stats()))
}

pub fn scan_genome_file(ac: &MatchAutomaton, path: &Path) -> Result<FileScan> {
    let mut reader = GenomeReader::open(path)?;
    let (results, stats) = scan_reader(ac, &mut reader).map_err(|e| match e {
        ScanError::Io(io) => ScanError::at(path, io),
        other => other,
    })?;
    Ok(FileScan {
        path: path.to_path_buf(),
        results,
        stats,
        lines: reader.lines(),
        headers: reader.headers(),
    })
}

/// 每个文件独立扫描（各自的 StreamScanner 与 ResultAggregator，共享只读自动机），
/// 结果顺序与输入顺序一致。
pub fn scan_genome_files(ac: &MatchAutomaton, paths: &[PathBuf], threads: usize) -> Result<Vec<FileScan>> {
    if threads <= 1 || paths.len() <= 1 {
        return paths.iter().map(|p| scan_genome_file(ac, p)).collect();
    }

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("cannot build thread pool ({}), scanning sequentially", e);
            return paths.iter().map(|p| scan_genome_file(ac, p)).collect();
        }
    };
    pool.install(|| paths.par_iter().map(|p| scan_genome_file(ac, p)).collect())
}

/// 按输入顺序拼接各文件结果
pub fn merge_scans(ac: &MatchAutomaton, scans: Vec<FileScan>) -> (ResultTable, ScanStats) {
    let mut agg = ResultAggregator::new(ac.patterns());
    let mut stats = ScanStats::default();
    for s in scans {
        log::debug!(
            "{}: {} lines ({} headers skipped), {} symbols, {} matches",
            s.path.display(),
            s.lines,
            s.headers,
            s.stats.symbols,
            s.results.total()
        );
        agg.merge(s.results);
        stats.add(s.stats);
    }
    (agg.finalize(ac.patterns()), stats)
}

fn build_automaton(guides_path: &Path) -> Result<MatchAutomaton> {
    let patterns = guides::read_guides(guides_path)?;
    if patterns.is_empty() {
        log::warn!("guide file '{}' contains no guides", guides_path.display());
    }
    Ok(MatchAutomaton::build(patterns))
}

/// 读入 guide、构建自动机并扫描全部基因组文件。不写任何输出。
pub fn scan_all(guides_path: &Path, genomes: &[PathBuf], opt: ScanOpt) -> Result<ScanReport> {
    if genomes.is_empty() {
        return Err(ScanError::InvalidInput("no genome file given".into()));
    }
    let ac = build_automaton(guides_path)?;
    let scans = scan_genome_files(&ac, genomes, opt.threads)?;
    let (table, stats) = merge_scans(&ac, scans);
    log::info!(
        "{} of {} guides found, {} symbols scanned",
        table.counts.len(),
        ac.patterns().len(),
        stats.symbols
    );
    Ok(ScanReport { ac, table, stats })
}

/// 写出 `<base>.json` / `<base>_count.json`，`write_meta` 时再写 `<base>_meta.json`。
pub fn write_scan(
    report: &ScanReport,
    guides_path: &Path,
    genomes: &[PathBuf],
    output_base: &str,
    write_meta: bool,
) -> Result<ScanOutputs> {
    let outputs = sink::write_results(&report.table, output_base)?;
    if !write_meta {
        return Ok(ScanOutputs { outputs, meta: None });
    }

    let meta = ScanMeta {
        guides_file: guides_path.display().to_string(),
        genome_files: genomes.iter().map(|p| p.display().to_string()).collect(),
        command: std::env::args().collect::<Vec<_>>().join(" "),
        timestamp: chrono::Utc::now().to_rfc3339(),
        guides: report.ac.patterns().len(),
        max_len: report.ac.max_len(),
        states: report.ac.num_states(),
        chunks: report.stats.chunks,
        symbols: report.stats.symbols,
        matches: report.table.counts.values().sum(),
    };
    let path = PathBuf::from(format!("{}_meta.json", output_base));
    sink::write_json(&meta, &path)?;
    Ok(ScanOutputs { outputs, meta: Some(path) })
}

/// 写出每条 guide 出现次数的 TSV 报告。
pub fn write_check(report: &ScanReport, out_path: &Path, drop_multi: bool) -> Result<CheckSummary> {
    let multi_hit = report.table.multi_hit();
    log::info!(
        "{} guides out of {} occurred more than once in the reference",
        multi_hit,
        report.ac.patterns().len()
    );

    let to_sink = |e: ScanError| match e {
        ScanError::Io(io) => ScanError::sink(out_path, io),
        other => other,
    };
    let fh = File::create(out_path).map_err(|e| ScanError::sink(out_path, e))?;
    let mut w = BufWriter::new(fh);
    let rows = sink::write_occurrence_report(&mut w, report.ac.patterns(), &report.table, drop_multi)
        .map_err(to_sink)?;
    w.flush().map_err(|e| ScanError::sink(out_path, e))?;

    Ok(CheckSummary { rows, multi_hit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::PatternSet;
    use std::io::Cursor;

    #[test]
    fn scan_reader_skips_headers_in_offsets() {
        let ac = MatchAutomaton::build(PatternSet::build(["TTAC"]).unwrap());
        let mut r = GenomeReader::new(Cursor::new(&b">chr1\nGGTT\n>chr2\nACGG\n"[..]));
        let (agg, stats) = scan_reader(&ac, &mut r).unwrap();
        let t = agg.finalize(ac.patterns());
        assert_eq!(t.offsets("TTAC"), &[2]);
        assert_eq!(stats.symbols, 8);
        assert_eq!(r.headers(), 2);
    }

    #[test]
    fn no_genome_is_invalid_input() {
        let err = scan_all(Path::new("guides.txt"), &[], ScanOpt::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
