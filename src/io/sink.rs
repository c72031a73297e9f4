use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::automaton::PatternSet;
use crate::error::{Result, ScanError};
use crate::scan::ResultTable;

/// `<base>.json` 与 `<base>_count.json` 两个输出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub offsets: PathBuf,
    pub counts: PathBuf,
}

impl OutputPaths {
    pub fn from_base(base: &str) -> Self {
        Self {
            offsets: PathBuf::from(format!("{}.json", base)),
            counts: PathBuf::from(format!("{}_count.json", base)),
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let fh = File::create(path).map_err(|e| ScanError::sink(path, e))?;
    let mut w = BufWriter::new(fh);
    serde_json::to_writer(&mut w, value).map_err(|e| json_error(path, e))?;
    w.flush().map_err(|e| ScanError::sink(path, e))?;
    Ok(())
}

/// 写盘失败（如 ENOSPC）带上路径；其余才算序列化错误
fn json_error(path: &Path, e: serde_json::Error) -> ScanError {
    if e.is_io() {
        ScanError::sink(path, e.into())
    } else {
        ScanError::Serialization(e)
    }
}

/// 写出 offset 表和计数表，两者键完全相同。
pub fn write_results(table: &ResultTable, base: &str) -> Result<OutputPaths> {
    let paths = OutputPaths::from_base(base);
    write_json(&table.offsets, &paths.offsets)?;
    write_json(&table.counts, &paths.counts)?;
    Ok(paths)
}

/// 每条 guide 一行 `guide\toccurrences`（按输入顺序，包括 0 次的）。
/// `drop_multi` 时省略出现超过一次的 guide。返回写出的行数（不含表头）。
pub fn write_occurrence_report<W: Write>(
    out: &mut W,
    patterns: &PatternSet,
    table: &ResultTable,
    drop_multi: bool,
) -> Result<usize> {
    writeln!(out, "guide\toccurrences")?;
    let mut rows = 0usize;
    for (_, guide) in patterns.iter() {
        let n = table.count(guide);
        if drop_multi && n > 1 {
            continue;
        }
        writeln!(out, "{}\t{}", guide, n)?;
        rows += 1;
    }
    Ok(rows)
}
