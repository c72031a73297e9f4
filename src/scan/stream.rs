use crate::automaton::{GuideId, MatchAutomaton};
use crate::util::dna;

/// 一次全局匹配：`offset` 为 guide 起点在整条（去分块后）基因组序列中的 0 基位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlobalMatch {
    pub guide: GuideId,
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub chunks: u64,
    pub symbols: u64,
}

impl ScanStats {
    pub fn add(&mut self, other: ScanStats) {
        self.chunks += other.chunks;
        self.symbols += other.symbols;
    }
}

/// 把按行分块的基因组当作一条连续序列扫描。
///
/// 每个分块做两次扫描：
/// 1. 边界探测窗口 `carry ++ chunk[..max_len]`，只保留起点在 carry 内、终点在本块内的匹配；
/// 2. 整块扫描，得到完全落在本块内的匹配。
///
/// `carry` 始终保存到目前为止整条序列的最后 `max_len` 个字符（开头用 [`dna::PAD`] 填充），
/// 所以跨越多个短分块的匹配也会在其终点所在分块被找到，且只找到一次。
/// 内存占用为 O(max_len + 分块大小)。
pub struct StreamScanner<'a> {
    ac: &'a MatchAutomaton,
    max_len: usize,
    carry: Vec<u8>,
    window: Vec<u8>,
    consumed: u64,
    chunks: u64,
}

impl<'a> StreamScanner<'a> {
    pub fn new(ac: &'a MatchAutomaton) -> Self {
        let max_len = ac.max_len();
        Self {
            ac,
            max_len,
            carry: vec![dna::PAD; max_len],
            window: Vec::with_capacity(max_len * 2),
            consumed: 0,
            chunks: 0,
        }
    }

    /// Symbols consumed so far; the global offset of the next chunk's first symbol.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats { chunks: self.chunks, symbols: self.consumed }
    }

    /// 送入下一个分块（已去掉换行符），对每个匹配调用 `on_match`。
    ///
    /// 同一 guide 的匹配按 offset 升序产出。
    pub fn feed<F>(&mut self, chunk: &[u8], mut on_match: F)
    where
        F: FnMut(GlobalMatch),
    {
        self.chunks += 1;
        let m = self.max_len;
        if chunk.is_empty() {
            return;
        }
        if m == 0 {
            self.consumed += chunk.len() as u64;
            return;
        }

        // 跨边界的匹配先产出：同长度 guide 的起点一定早于本块内部的匹配
        self.window.clear();
        self.window.extend_from_slice(&self.carry);
        self.window.extend_from_slice(&chunk[..m.min(chunk.len())]);
        for ev in self.ac.scan(&self.window) {
            if ev.start < m && ev.end > m {
                let back = (m - ev.start) as u64;
                on_match(GlobalMatch { guide: ev.guide, offset: self.consumed - back });
            }
        }

        for ev in self.ac.scan(chunk) {
            on_match(GlobalMatch { guide: ev.guide, offset: self.consumed + ev.start as u64 });
        }

        if chunk.len() >= m {
            self.carry.clear();
            self.carry.extend_from_slice(&chunk[chunk.len() - m..]);
        } else {
            let keep = m - chunk.len();
            self.carry.rotate_left(chunk.len());
            self.carry[keep..].copy_from_slice(chunk);
        }
        self.consumed += chunk.len() as u64;
    }

    #[cfg(test)]
    fn feed_collect(&mut self, chunk: &[u8]) -> Vec<GlobalMatch> {
        let mut out = Vec::new();
        self.feed(chunk, |m| out.push(m));
        out
    }
}
