//! 演示如何在 library 模式下使用 guide-scan 进行流式匹配。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_scan
//! ```

use guide_scan::automaton::{MatchAutomaton, PatternSet};
use guide_scan::scan::{ResultAggregator, StreamScanner};

fn main() -> guide_scan::Result<()> {
    // 1. 构建 guide 集合与自动机
    let patterns = PatternSet::build(["GATTACA", "TACA", "CCGG"])?;
    let ac = MatchAutomaton::build(patterns);
    println!("guides: {}, 最长 guide: {} bp, 状态数: {}", ac.patterns().len(), ac.max_len(), ac.num_states());

    // 2. 基因组按行到达，GATTACA 跨越第一、二行
    let lines: [&[u8]; 3] = [b"TTGAT", b"TACACCG", b"GAAGATTACA"];

    // 3. 流式扫描
    let mut scanner = StreamScanner::new(&ac);
    let mut agg = ResultAggregator::new(ac.patterns());
    for line in lines {
        scanner.feed(line, |m| {
            println!("  {} @ {}", ac.patterns().guide(m.guide), m.offset);
            agg.record(m);
        });
    }

    // 4. 汇总
    let table = agg.finalize(ac.patterns());
    for (guide, n) in &table.counts {
        println!("{}: {} 次, 位置 {:?}", guide, n, table.offsets(guide));
    }
    println!("共扫描 {} bp", scanner.consumed());
    Ok(())
}
