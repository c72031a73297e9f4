use std::collections::HashMap;

use crate::error::{Result, ScanError};
use crate::util::dna;

/// guide 在 PatternSet 中的编号（按首次出现顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GuideId(pub u32);

impl GuideId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 校验后的 guide 集合。
/// - 每条 guide 非空且只含 A/C/G/T
/// - 按文本去重，保留首次出现的顺序
/// - `max_len` 为最长 guide 的长度，空集合时为 0
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    guides: Vec<String>,
    lookup: HashMap<String, GuideId>,
    max_len: usize,
    duplicates: usize,
}

impl PatternSet {
    pub fn build<I, S>(guide_texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PatternSet::default();
        for (n, raw) in guide_texts.into_iter().enumerate() {
            let text = raw.as_ref();
            if text.is_empty() {
                return Err(ScanError::InvalidInput(format!("guide #{} is empty", n + 1)));
            }
            if let Some((pos, b)) = dna::first_invalid(text.as_bytes()) {
                return Err(ScanError::InvalidInput(format!(
                    "guide #{} '{}' has symbol {:?} at position {} outside the A/C/G/T alphabet",
                    n + 1,
                    text,
                    b as char,
                    pos
                )));
            }
            if set.lookup.contains_key(text) {
                set.duplicates += 1;
                continue;
            }
            let id = GuideId(set.guides.len() as u32);
            set.max_len = set.max_len.max(text.len());
            set.lookup.insert(text.to_string(), id);
            set.guides.push(text.to_string());
        }
        Ok(set)
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.guides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }

    /// Number of input texts dropped because an identical guide came earlier.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    #[inline]
    pub fn guide(&self, id: GuideId) -> &str {
        &self.guides[id.index()]
    }

    #[inline]
    pub fn guide_len(&self, id: GuideId) -> usize {
        self.guides[id.index()].len()
    }

    pub fn id_of(&self, text: &str) -> Option<GuideId> {
        self.lookup.get(text).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GuideId, &str)> + '_ {
        self.guides
            .iter()
            .enumerate()
            .map(|(i, g)| (GuideId(i as u32), g.as_str()))
    }
}
