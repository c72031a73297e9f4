use std::collections::VecDeque;

use super::pattern::{GuideId, PatternSet};
use crate::util::dna;

const SIGMA: usize = dna::GUIDE_ALPHABET.len();
const NONE: u32 = u32::MAX;

/// 自动机状态编号。`StateId::ROOT` 为初始状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(u32);

impl StateId {
    pub const ROOT: StateId = StateId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct State {
    /// 完整的转移表（goto + failure 合并后的 DFA 转移）
    next: [u32; SIGMA],
    fail: u32,
    depth: u32,
    /// 到达本状态时完成的 guide（已并入 failure 链上的输出）
    out: Vec<GuideId>,
}

impl State {
    fn new(depth: u32) -> Self {
        Self { next: [NONE; SIGMA], fail: 0, depth, out: Vec::new() }
    }
}

/// 一次匹配：`guide` 在输入窗口 `[start, end)` 上完整出现
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent {
    pub guide: GuideId,
    pub start: usize,
    pub end: usize,
}

/// Aho-Corasick 多模式自动机。
///
/// 构建完成后只读；扫描时的当前状态由调用方持有（见 [`StateId`]、[`MatchAutomaton::step`]），
/// 因此同一个自动机可以被多个并发扫描共享。
#[derive(Debug, Clone)]
pub struct MatchAutomaton {
    states: Vec<State>,
    patterns: PatternSet,
}

impl MatchAutomaton {
    pub fn build(patterns: PatternSet) -> Self {
        let mut states = vec![State::new(0)];

        // 第一步：trie
        for (id, guide) in patterns.iter() {
            let mut cur = 0usize;
            for &b in guide.as_bytes() {
                // PatternSet 已保证字母表合法
                let Some(c) = dna::to_code(b) else { break };
                if states[cur].next[c] == NONE {
                    let depth = states[cur].depth + 1;
                    states.push(State::new(depth));
                    states[cur].next[c] = (states.len() - 1) as u32;
                }
                cur = states[cur].next[c] as usize;
            }
            states[cur].out.push(id);
        }

        // 第二步：BFS 计算 failure，同时补全转移表并合并输出集合
        let mut queue: VecDeque<usize> = VecDeque::new();
        for c in 0..SIGMA {
            let child = states[0].next[c];
            if child == NONE {
                states[0].next[c] = 0;
            } else {
                states[child as usize].fail = 0;
                queue.push_back(child as usize);
            }
        }

        while let Some(s) = queue.pop_front() {
            let fail_s = states[s].fail as usize;
            for c in 0..SIGMA {
                let child = states[s].next[c];
                if child == NONE {
                    // missing edge: reuse the failure state's transition
                    states[s].next[c] = states[fail_s].next[c];
                    continue;
                }
                let child = child as usize;
                let f = states[fail_s].next[c];
                states[child].fail = f;
                // suffix guides complete here too
                let inherited = states[f as usize].out.clone();
                states[child].out.extend(inherited);
                queue.push_back(child);
            }
        }

        log::debug!(
            "automaton built: {} guides, {} states, max_len={}",
            patterns.len(),
            states.len(),
            patterns.max_len()
        );

        Self { states, patterns }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.patterns.max_len()
    }

    /// 从 `state` 读入一个字符后的新状态。字母表外的字符回到根状态。
    #[inline]
    pub fn step(&self, state: StateId, b: u8) -> StateId {
        match dna::to_code(b) {
            Some(c) => StateId(self.states[state.index()].next[c]),
            None => StateId::ROOT,
        }
    }

    /// guides completed on arrival at `state`
    #[inline]
    pub fn outputs(&self, state: StateId) -> &[GuideId] {
        &self.states[state.index()].out
    }

    pub fn failure(&self, state: StateId) -> StateId {
        StateId(self.states[state.index()].fail)
    }

    /// 从根状态开始扫描 `symbols`，惰性产出所有匹配。
    pub fn scan<'a>(&'a self, symbols: &'a [u8]) -> Matches<'a> {
        Matches { ac: self, symbols, pos: 0, state: StateId::ROOT, pending: 0 }
    }
}

/// [`MatchAutomaton::scan`] 返回的迭代器
pub struct Matches<'a> {
    ac: &'a MatchAutomaton,
    symbols: &'a [u8],
    /// 下一个待读入字符的位置
    pos: usize,
    state: StateId,
    /// 当前状态输出集合中下一个待产出的下标
    pending: usize,
}

impl<'a> Iterator for Matches<'a> {
    type Item = MatchEvent;

    fn next(&mut self) -> Option<MatchEvent> {
        loop {
            let out = self.ac.outputs(self.state);
            if self.pending < out.len() {
                let guide = out[self.pending];
                self.pending += 1;
                let end = self.pos;
                let start = end - self.ac.patterns.guide_len(guide);
                return Some(MatchEvent { guide, start, end });
            }
            let &b = self.symbols.get(self.pos)?;
            self.state = self.ac.step(self.state, b);
            self.pos += 1;
            self.pending = 0;
        }
    }
}
