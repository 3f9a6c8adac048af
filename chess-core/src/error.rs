//! 错误类型定义

use thiserror::Error;

use crate::piece::Square;

/// 国际象棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 无效的格子坐标文本
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// 非法走法（吃己方子、走法后被将军、违反易位前提等）
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    /// 起始格没有棋子
    #[error("No piece at {square}")]
    NoPieceAtSource { square: Square },

    /// 不是该方走子
    #[error("Not this side's turn to move")]
    WrongSideToMove,

    /// 无效的 FEN 字符串
    #[error("Malformed FEN: {reason}")]
    MalformedFen { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
