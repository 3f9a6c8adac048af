//! 棋盘与局面状态

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, FIFTY_MOVE_LIMIT, NUM_SQUARES};
use crate::piece::{Color, Piece, PieceType, Square};
use crate::zobrist::ZobristTable;

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 rank * 8 + file，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; NUM_SQUARES],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in back_rank.iter().enumerate() {
            let file = file as u8;
            board.set(
                Square::new_unchecked(file, 0),
                Some(Piece::new(piece_type, Color::White)),
            );
            board.set(
                Square::new_unchecked(file, 1),
                Some(Piece::new(PieceType::Pawn, Color::White)),
            );
            board.set(
                Square::new_unchecked(file, 7),
                Some(Piece::new(piece_type, Color::Black)),
            );
            board.set(
                Square::new_unchecked(file, 6),
                Some(Piece::new(PieceType::Pawn, Color::Black)),
            );
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.to_index()]
        } else {
            None
        }
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_valid() {
            self.squares[square.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, color: Color) -> Option<Square> {
        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let sq = Square::new_unchecked(file as u8, rank as u8);
                if let Some(piece) = self.get(sq) {
                    if piece.piece_type == PieceType::King && piece.color == color {
                        return Some(sq);
                    }
                }
            }
        }
        None
    }

    /// 获取指定阵营的所有棋子及其位置（rank 优先、file 其次的固定顺序）
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        let mut result = Vec::new();
        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let sq = Square::new_unchecked(file as u8, rank as u8);
                if let Some(piece) = self.get(sq) {
                    if piece.color == color {
                        result.push((sq, piece));
                    }
                }
            }
        }
        result
    }

    /// 获取所有棋子及其位置
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        let mut result = Vec::new();
        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let sq = Square::new_unchecked(file as u8, rank as u8);
                if let Some(piece) = self.get(sq) {
                    result.push((sq, piece));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 易位权（白/黑 x 短/长 四个独立开关）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// 全部可用（初始局面）
    pub fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    /// 全部不可用
    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// 转换为 FEN 字段
    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        if self.white_kingside {
            s.push('K');
        }
        if self.white_queenside {
            s.push('Q');
        }
        if self.black_kingside {
            s.push('k');
        }
        if self.black_queenside {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// 完整的局面状态（棋盘、走子方、易位权、过路兵目标、计数器、历史）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
    /// 易位权
    pub castling: CastlingRights,
    /// 过路兵目标格（仅在上一步是兵两格推进后有效）
    pub en_passant: Option<Square>,
    /// 半回合计数（自上次吃子或兵移动起）
    pub halfmove_clock: u32,
    /// 完整回合数（黑方走完后 +1）
    pub fullmove_number: u32,
    /// 走法历史（显示记谱，只追加）
    pub move_history: Vec<String>,
    /// 局面哈希出现次数（用于三次重复局面检测）
    pub position_counts: HashMap<u64, u32>,
}

impl Position {
    /// 创建初始局面
    pub fn initial() -> Self {
        let mut pos = Self {
            board: Board::initial(),
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            move_history: Vec::new(),
            position_counts: HashMap::new(),
        };
        pos.record_position();
        pos
    }

    /// 计算当前局面的 Zobrist 哈希
    /// （棋子布局 ⊕ 走子方 ⊕ 易位权 ⊕ 过路兵目标列）
    pub fn position_hash(&self) -> u64 {
        let table = ZobristTable::global();
        let mut hash = 0u64;

        for (sq, piece) in self.board.all_pieces() {
            hash ^= table.piece_hash(piece.color, piece.piece_type, sq);
        }

        if self.side_to_move == Color::Black {
            hash ^= table.side_hash();
        }

        if self.castling.white_kingside {
            hash ^= table.castling_hash(0);
        }
        if self.castling.white_queenside {
            hash ^= table.castling_hash(1);
        }
        if self.castling.black_kingside {
            hash ^= table.castling_hash(2);
        }
        if self.castling.black_queenside {
            hash ^= table.castling_hash(3);
        }

        if let Some(ep) = self.en_passant {
            hash ^= table.en_passant_hash(ep.file);
        }

        hash
    }

    /// 记录当前局面（哈希计数 +1）
    pub fn record_position(&mut self) {
        let hash = self.position_hash();
        *self.position_counts.entry(hash).or_insert(0) += 1;
    }

    /// 撤销当前局面的记录（哈希计数 -1，归零后移除）
    pub fn unrecord_position(&mut self) {
        let hash = self.position_hash();
        if let Some(count) = self.position_counts.get_mut(&hash) {
            if *count <= 1 {
                self.position_counts.remove(&hash);
            } else {
                *count -= 1;
            }
        }
    }

    /// 当前局面已出现的次数
    pub fn repetition_count(&self) -> u32 {
        self.position_counts
            .get(&self.position_hash())
            .copied()
            .unwrap_or(0)
    }

    /// 检查是否三次重复局面
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// 检查是否满足五十回合规则
    pub fn is_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// 检查仅凭计数即可判定的和棋（三次重复或五十回合）
    /// 不含逼和，逼和需要走法生成，见 `Rules::is_draw`
    pub fn is_draw_by_rule(&self) -> bool {
        self.is_threefold_repetition() || self.is_fifty_move_rule()
    }

    /// 统计双方吃掉的棋子（与初始配置对比）
    /// 返回 (白方吃掉的黑子, 黑方吃掉的白子)
    pub fn captured_pieces(&self) -> (Vec<Piece>, Vec<Piece>) {
        let initial_counts: [(PieceType, u32); 6] = [
            (PieceType::Pawn, 8),
            (PieceType::Knight, 2),
            (PieceType::Bishop, 2),
            (PieceType::Rook, 2),
            (PieceType::Queen, 1),
            (PieceType::King, 1),
        ];

        let mut captured_by_white = Vec::new();
        let mut captured_by_black = Vec::new();

        for color in [Color::White, Color::Black] {
            for &(piece_type, initial) in &initial_counts {
                let current = self
                    .board
                    .all_pieces()
                    .iter()
                    .filter(|(_, p)| p.color == color && p.piece_type == piece_type)
                    .count() as u32;

                for _ in current..initial {
                    let piece = Piece::new(piece_type, color);
                    match color {
                        Color::White => captured_by_black.push(piece),
                        Color::Black => captured_by_white.push(piece),
                    }
                }
            }
        }

        (captured_by_white, captured_by_black)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

// 历史和重复计数不参与局面等价性，保证 FEN 往返后相等
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}
