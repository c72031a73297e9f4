//! 分块流式扫描与结果累积

pub mod result;
pub mod stream;

pub use result::{ResultAggregator, ResultTable};
pub use stream::{GlobalMatch, ScanStats, StreamScanner};

use crate::automaton::MatchAutomaton;

/// 扫描内存中的分块序列，返回累积结果与统计。
pub fn scan_chunks<I, C>(ac: &MatchAutomaton, chunks: I) -> (ResultAggregator, ScanStats)
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let mut agg = ResultAggregator::new(ac.patterns());
    let mut scanner = StreamScanner::new(ac);
    for chunk in chunks {
        scanner.feed(chunk.as_ref(), |m| agg.record(m));
    }
    (agg, scanner.stats())
}
