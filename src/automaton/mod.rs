//! guide 集合校验与 Aho-Corasick 自动机构建

pub mod ac;
pub mod pattern;

pub use ac::{MatchAutomaton, MatchEvent, Matches, StateId};
pub use pattern::{GuideId, PatternSet};
