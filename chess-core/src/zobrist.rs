//! Zobrist 哈希
//!
//! 用于快速计算局面的哈希值，支持三次重复局面检测

use std::sync::OnceLock;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::NUM_SQUARES;
use crate::piece::{Color, PieceType, Square};

/// Zobrist 哈希表
///
/// 使用随机数为每个位置的每种棋子生成唯一的哈希值
pub struct ZobristTable {
    /// 棋子哈希值 [color][piece_type][square]
    /// color: 0=White, 1=Black
    /// piece_type: 0-5 对应 6 种棋子
    /// square: 0-63 对应 64 个格子
    pieces: [[[u64; NUM_SQUARES]; 6]; 2],
    /// 黑方走子哈希值
    side_to_move: u64,
    /// 易位权哈希值 [白短, 白长, 黑短, 黑长]
    castling: [u64; 4],
    /// 过路兵目标列哈希值
    en_passant_file: [u64; 8],
}

impl ZobristTable {
    /// 创建新的 Zobrist 表（使用固定种子保证确定性）
    pub fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0xDEADBEEF_CAFE_1234);

        let mut pieces = [[[0u64; NUM_SQUARES]; 6]; 2];
        for color in 0..2 {
            for piece in 0..6 {
                for sq in 0..NUM_SQUARES {
                    pieces[color][piece][sq] = rng.gen();
                }
            }
        }

        let side_to_move = rng.gen();

        let mut castling = [0u64; 4];
        for entry in castling.iter_mut() {
            *entry = rng.gen();
        }

        let mut en_passant_file = [0u64; 8];
        for entry in en_passant_file.iter_mut() {
            *entry = rng.gen();
        }

        Self {
            pieces,
            side_to_move,
            castling,
            en_passant_file,
        }
    }

    /// 获取进程级共享表
    pub fn global() -> &'static ZobristTable {
        static TABLE: OnceLock<ZobristTable> = OnceLock::new();
        TABLE.get_or_init(ZobristTable::new)
    }

    /// 获取棋子的哈希值
    #[inline]
    pub fn piece_hash(&self, color: Color, piece_type: PieceType, square: Square) -> u64 {
        let color_idx = match color {
            Color::White => 0,
            Color::Black => 1,
        };
        self.pieces[color_idx][piece_type_to_index(piece_type)][square.to_index()]
    }

    /// 获取走子方切换的哈希值
    #[inline]
    pub fn side_hash(&self) -> u64 {
        self.side_to_move
    }

    /// 获取易位权的哈希值（index: 0=白短, 1=白长, 2=黑短, 3=黑长）
    #[inline]
    pub fn castling_hash(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// 获取过路兵目标列的哈希值
    #[inline]
    pub fn en_passant_hash(&self, file: u8) -> u64 {
        self.en_passant_file[file as usize]
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 将棋子类型转换为索引
#[inline]
fn piece_type_to_index(piece_type: PieceType) -> usize {
    match piece_type {
        PieceType::King => 0,
        PieceType::Queen => 1,
        PieceType::Rook => 2,
        PieceType::Bishop => 3,
        PieceType::Knight => 4,
        PieceType::Pawn => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn test_zobrist_deterministic() {
        let table1 = ZobristTable::new();
        let table2 = ZobristTable::new();

        let sq = Square::new_unchecked(4, 3);
        assert_eq!(
            table1.piece_hash(Color::White, PieceType::Queen, sq),
            table2.piece_hash(Color::White, PieceType::Queen, sq),
            "Zobrist 哈希应该是确定性的"
        );
        assert_eq!(table1.side_hash(), table2.side_hash());
    }

    #[test]
    fn test_zobrist_different_positions() {
        let pos1 = Position::initial();

        // 走一步棋
        let mut pos2 = Position::initial();
        let from = Square::new_unchecked(4, 1); // e2
        let to = Square::new_unchecked(4, 3); // e4
        pos2.board.move_piece(from, to);
        pos2.side_to_move = Color::Black;

        assert_ne!(
            pos1.position_hash(),
            pos2.position_hash(),
            "不同局面应该有不同的哈希值"
        );
    }

    #[test]
    fn test_zobrist_side_matters() {
        let pos1 = Position::initial();
        let mut pos2 = Position::initial();
        pos2.side_to_move = Color::Black;

        assert_ne!(
            pos1.position_hash(),
            pos2.position_hash(),
            "不同走子方应该有不同的哈希值"
        );
    }
}
