//! # guide-scan
//!
//! 在超大基因组文本中查找一组 sgRNA guide 的全部出现位置。
//!
//! 本 crate 提供：
//!
//! - **自动机构建**：由 guide 集合构建 Aho-Corasick 自动机（trie + failure 链 + 合并输出集合）
//! - **流式扫描**：按行分块读入基因组，用 carry 缓冲区找出跨分块边界的匹配，内存占用与基因组大小无关
//! - **结果累积**：每条 guide 的 0 基起始位置列表与出现次数
//!
//! ## 快速示例
//!
//! ```rust
//! use guide_scan::automaton::{MatchAutomaton, PatternSet};
//! use guide_scan::scan::scan_chunks;
//!
//! let patterns = PatternSet::build(["ACG", "CGT", "GT"]).unwrap();
//! let ac = MatchAutomaton::build(patterns);
//!
//! // "AACGTT" 被切成两行
//! let (agg, _stats) = scan_chunks(&ac, ["AA", "CGTT"]);
//! let table = agg.finalize(ac.patterns());
//! assert_eq!(table.offsets("ACG"), &[1]);
//! assert_eq!(table.count("GT"), 1);
//! ```
//!
//! ## 模块说明
//!
//! - [`automaton`] — guide 校验（`PatternSet`）与自动机（`MatchAutomaton`）
//! - [`scan`] — 分块流式扫描（`StreamScanner`）与结果累积（`ResultAggregator`）
//! - [`io`] — guide 文件、基因组文件读取与 JSON / TSV 结果输出
//! - [`pipeline`] — 文件级驱动（多文件并行、`scan` / `check` 命令）
//! - [`util`] — 碱基字母表

pub mod automaton;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scan;
pub mod util;

pub use error::{Result, ScanError};
