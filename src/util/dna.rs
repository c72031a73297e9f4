/// guide 允许的碱基集合（大写）
pub const GUIDE_ALPHABET: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// carry 缓冲区的填充字符。不在 guide 字母表内，因此永远不会参与匹配。
pub const PAD: u8 = b'N';

#[inline]
pub fn is_guide_base(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T')
}

/// Dense symbol code used by the automaton transition table.
/// Returns `None` for anything outside the guide alphabet.
#[inline]
pub fn to_code(b: u8) -> Option<usize> {
    match b {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// 去掉首尾空白并转为大写；不做字母表校验。
pub fn normalize_guide(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// 返回第一个不在字母表中的字符及其位置
pub fn first_invalid(seq: &[u8]) -> Option<(usize, u8)> {
    seq.iter()
        .enumerate()
        .find(|(_, &b)| !is_guide_base(b))
        .map(|(i, &b)| (i, b))
}
