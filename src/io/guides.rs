use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::automaton::PatternSet;
use crate::error::{Result, ScanError};
use crate::util::dna;

/// 每行一条 guide。空行忽略，其余行去空白并转大写后交给 [`PatternSet::build`] 校验。
pub fn parse_guides<R: BufRead>(reader: R) -> Result<PatternSet> {
    let mut texts = Vec::new();
    for line in reader.lines() {
        let g = dna::normalize_guide(&line?);
        if !g.is_empty() {
            texts.push(g);
        }
    }
    let set = PatternSet::build(&texts)?;
    if set.duplicates() > 0 {
        log::warn!("{} duplicate guide(s) ignored", set.duplicates());
    }
    Ok(set)
}

pub fn read_guides(path: impl AsRef<Path>) -> Result<PatternSet> {
    let path = path.as_ref();
    let fh = File::open(path).map_err(|e| ScanError::at(path, e))?;
    let set = parse_guides(BufReader::new(fh))?;
    log::debug!("loaded {} guides from {}", set.len(), path.display());
    Ok(set)
}
