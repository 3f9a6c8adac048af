//! 国际象棋规则核心库
//!
//! 包含:
//! - 棋子、棋盘、格子等核心数据结构
//! - 局面状态（走子方、易位权、过路兵、重复局面计数）
//! - 走法生成和规则验证（执行/撤销、将死/逼和/和棋判定）
//! - FEN 格式解析和生成
//! - UCI 坐标记谱与标准代数记谱
//! - Zobrist 局面哈希

mod board;
mod constants;
mod error;
mod fen;
mod moves;
mod notation;
mod piece;
mod rules;
mod zobrist;

pub use board::{Board, CastlingRights, Position};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use moves::{CastleSide, Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Color, Piece, PieceType, Square};
pub use rules::{Rules, UndoInfo};
pub use zobrist::ZobristTable;
