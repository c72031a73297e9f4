use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stream::GlobalMatch;
use crate::automaton::PatternSet;

/// 按 guide 累积匹配位置与计数。
///
/// 以 [`GuideId`](crate::automaton::GuideId) 为下标存储；`finalize` 时才转换为按文本索引的表。
#[derive(Debug, Clone, Default)]
pub struct ResultAggregator {
    offsets: Vec<Vec<u64>>,
    counts: Vec<u64>,
}

impl ResultAggregator {
    pub fn new(patterns: &PatternSet) -> Self {
        Self { offsets: vec![Vec::new(); patterns.len()], counts: vec![0; patterns.len()] }
    }

    #[inline]
    pub fn record(&mut self, m: GlobalMatch) {
        let i = m.guide.index();
        if i >= self.offsets.len() {
            self.offsets.resize_with(i + 1, Vec::new);
            self.counts.resize(i + 1, 0);
        }
        self.offsets[i].push(m.offset);
        self.counts[i] += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// 追加另一个扫描的结果：逐 guide 拼接，不排序。
    pub fn merge(&mut self, other: ResultAggregator) {
        if other.offsets.len() > self.offsets.len() {
            self.offsets.resize_with(other.offsets.len(), Vec::new);
            self.counts.resize(other.counts.len(), 0);
        }
        for (i, (offs, n)) in other.offsets.into_iter().zip(other.counts).enumerate() {
            self.offsets[i].extend(offs);
            self.counts[i] += n;
        }
    }

    /// Freeze into a text-keyed table. Guides without any match are left out.
    pub fn finalize(self, patterns: &PatternSet) -> ResultTable {
        let mut table = ResultTable::default();
        for ((id, guide), (offs, n)) in patterns.iter().zip(self.offsets.into_iter().zip(self.counts)) {
            debug_assert_eq!(offs.len() as u64, n, "count drift for guide {:?}", id);
            if n == 0 {
                continue;
            }
            table.offsets.insert(guide.to_string(), offs);
            table.counts.insert(guide.to_string(), n);
        }
        table
    }
}

/// Final result: per-guide match offsets and counts, keyed by guide text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    pub offsets: BTreeMap<String, Vec<u64>>,
    pub counts: BTreeMap<String, u64>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 未出现的 guide 返回 0
    pub fn count(&self, guide: &str) -> u64 {
        self.counts.get(guide).copied().unwrap_or(0)
    }

    pub fn offsets(&self, guide: &str) -> &[u64] {
        self.offsets.get(guide).map(Vec::as_slice).unwrap_or(&[])
    }

    /// guides found more than once
    pub fn multi_hit(&self) -> usize {
        self.counts.values().filter(|&&n| n > 1).count()
    }
}
