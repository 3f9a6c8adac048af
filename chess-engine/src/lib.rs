//! 国际象棋引擎
//!
//! 包含:
//! - 局面评估（子力、位置分值表、王的安全、悬子、重复局面收缩）
//! - 简易开局库
//! - Negamax + Alpha-Beta + 静态搜索 + 迭代加深的搜索引擎

mod evaluate;
mod opening;
mod search;

pub use evaluate::Evaluator;
pub use opening::OpeningBook;
pub use search::{Difficulty, SearchConfig, SearchEngine, SearchResult};
