//! 规则常量定义

/// 棋盘边长（8x8）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 五十回合规则的半回合数上限
pub const FIFTY_MOVE_LIMIT: u32 = 100;
