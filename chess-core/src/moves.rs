//! 走法表示与走法生成

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::piece::{Color, PieceType, Square};
use crate::rules::Rules;

/// 易位方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// 短易位（王翼）
    Kingside,
    /// 长易位（后翼）
    Queenside,
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 移动的棋子类型
    pub piece: PieceType,
    /// 是否吃子
    pub capture: bool,
    /// 升变目标（仅兵到达底线时）
    pub promotion: Option<PieceType>,
    /// 易位方向（仅王易位时）
    pub castle: Option<CastleSide>,
    /// 是否过路兵吃子
    pub en_passant: bool,
}

impl Move {
    /// 创建普通走法
    pub fn new(from: Square, to: Square, piece: PieceType) -> Self {
        Self {
            from,
            to,
            piece,
            capture: false,
            promotion: None,
            castle: None,
            en_passant: false,
        }
    }

    /// 创建吃子走法
    pub fn with_capture(from: Square, to: Square, piece: PieceType) -> Self {
        Self {
            capture: true,
            ..Self::new(from, to, piece)
        }
    }

    /// 创建易位走法
    pub fn castling(from: Square, to: Square, side: CastleSide) -> Self {
        Self {
            castle: Some(side),
            ..Self::new(from, to, PieceType::King)
        }
    }

    /// 转换为 UCI 坐标记谱（如 "e2e4"、"e7e8q"）
    pub fn uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            s.push(promo.to_fen_char(Color::Black)); // UCI 升变字母用小写
        }
        s
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uci())
    }
}

/// 升变候选棋子（生成时每种各展开一个走法）
const PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成当前走子方的所有伪合法走法（不考虑走后被将军）
    ///
    /// 遍历顺序固定为 rank 优先、file 其次，保证生成顺序确定
    pub fn generate_pseudo_legal(pos: &Position) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let side = pos.side_to_move;

        for (sq, piece) in pos.board.pieces(side) {
            match piece.piece_type {
                PieceType::Pawn => Self::generate_pawn_moves(pos, sq, side, &mut moves),
                PieceType::Knight => Self::generate_knight_moves(&pos.board, sq, side, &mut moves),
                PieceType::Bishop => {
                    Self::generate_sliding_moves(&pos.board, sq, side, PieceType::Bishop, &mut moves)
                }
                PieceType::Rook => {
                    Self::generate_sliding_moves(&pos.board, sq, side, PieceType::Rook, &mut moves)
                }
                PieceType::Queen => {
                    Self::generate_sliding_moves(&pos.board, sq, side, PieceType::Queen, &mut moves)
                }
                PieceType::King => Self::generate_king_moves(pos, sq, side, &mut moves),
            }
        }

        moves
    }

    /// 生成当前走子方的所有合法走法
    ///
    /// 用试走/撤销过滤掉会让己方王被将军的伪合法走法
    pub fn generate_legal(pos: &mut Position) -> Vec<Move> {
        let pseudo_legal = Self::generate_pseudo_legal(pos);
        let mut legal = Vec::with_capacity(pseudo_legal.len());

        for mv in pseudo_legal {
            if let Ok(undo) = Rules::apply_move(pos, &mv) {
                Rules::undo_move(pos, &mv, undo);
                pos.move_history.pop();
                legal.push(mv);
            }
        }

        legal
    }

    /// 生成兵的走法（前进、双格推进、斜吃、过路兵、升变展开）
    fn generate_pawn_moves(pos: &Position, from: Square, side: Color, moves: &mut Vec<Move>) {
        let board = &pos.board;
        let forward = side.forward();

        // 前进一格
        if let Some(to) = from.offset(0, forward) {
            if board.get(to).is_none() {
                Self::push_pawn_move(Move::new(from, to, PieceType::Pawn), side, moves);

                // 从起始行可以前进两格
                let start_rank = match side {
                    Color::White => 1,
                    Color::Black => 6,
                };
                if from.rank == start_rank {
                    if let Some(double) = from.offset(0, forward * 2) {
                        if board.get(double).is_none() {
                            moves.push(Move::new(from, double, PieceType::Pawn));
                        }
                    }
                }
            }
        }

        // 斜吃
        for df in [-1i8, 1i8] {
            if let Some(to) = from.offset(df, forward) {
                if let Some(target) = board.get(to) {
                    if target.color != side {
                        Self::push_pawn_move(Move::with_capture(from, to, PieceType::Pawn), side, moves);
                    }
                } else if pos.en_passant == Some(to) {
                    // 过路兵吃子
                    let mut mv = Move::with_capture(from, to, PieceType::Pawn);
                    mv.en_passant = true;
                    moves.push(mv);
                }
            }
        }
    }

    /// 添加兵的走法，到达底线时展开为四种升变
    fn push_pawn_move(mv: Move, side: Color, moves: &mut Vec<Move>) {
        if mv.to.rank == side.promotion_rank() {
            for promo in PROMOTION_PIECES {
                moves.push(Move {
                    promotion: Some(promo),
                    ..mv
                });
            }
        } else {
            moves.push(mv);
        }
    }

    /// 生成马的走法
    fn generate_knight_moves(board: &Board, from: Square, side: Color, moves: &mut Vec<Move>) {
        let offsets = [
            (1, 2),
            (2, 1),
            (2, -1),
            (1, -2),
            (-1, -2),
            (-2, -1),
            (-2, 1),
            (-1, 2),
        ];

        for (df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                Self::try_add_move(board, from, to, PieceType::Knight, side, moves);
            }
        }
    }

    /// 生成象/车/后的直线走法（遇到第一个棋子停止）
    fn generate_sliding_moves(
        board: &Board,
        from: Square,
        side: Color,
        piece: PieceType,
        moves: &mut Vec<Move>,
    ) {
        let diagonals: &[(i8, i8)] = &[(1, 1), (1, -1), (-1, 1), (-1, -1)];
        let straights: &[(i8, i8)] = &[(0, 1), (0, -1), (1, 0), (-1, 0)];

        let directions: Vec<(i8, i8)> = match piece {
            PieceType::Bishop => diagonals.to_vec(),
            PieceType::Rook => straights.to_vec(),
            _ => diagonals.iter().chain(straights).copied().collect(),
        };

        for (df, dr) in directions {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                if let Some(target) = board.get(to) {
                    if target.color != side {
                        moves.push(Move::with_capture(from, to, piece));
                    }
                    break;
                }
                moves.push(Move::new(from, to, piece));
                current = to;
            }
        }
    }

    /// 生成王的走法（单步移动加易位）
    fn generate_king_moves(pos: &Position, from: Square, side: Color, moves: &mut Vec<Move>) {
        for dr in -1i8..=1 {
            for df in -1i8..=1 {
                if df == 0 && dr == 0 {
                    continue;
                }
                if let Some(to) = from.offset(df, dr) {
                    Self::try_add_move(&pos.board, from, to, PieceType::King, side, moves);
                }
            }
        }

        // 易位（前提条件由 can_castle 检查：权利、空位、不经过被攻击格）
        let home = side.home_rank();
        if Rules::can_castle(pos, side, CastleSide::Kingside) {
            moves.push(Move::castling(
                from,
                Square::new_unchecked(6, home),
                CastleSide::Kingside,
            ));
        }
        if Rules::can_castle(pos, side, CastleSide::Queenside) {
            moves.push(Move::castling(
                from,
                Square::new_unchecked(2, home),
                CastleSide::Queenside,
            ));
        }
    }

    /// 尝试添加走法（目标格为空或有敌方棋子时可走）
    fn try_add_move(
        board: &Board,
        from: Square,
        to: Square,
        piece: PieceType,
        side: Color,
        moves: &mut Vec<Move>,
    ) {
        if let Some(target) = board.get(to) {
            if target.color != side {
                moves.push(Move::with_capture(from, to, piece));
            }
        } else {
            moves.push(Move::new(from, to, piece));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn test_initial_move_count() {
        let mut pos = Position::initial();
        let moves = MoveGenerator::generate_legal(&mut pos);

        // 初始局面白方恰好 20 个合法走法：16 个兵走法 + 4 个马走法
        assert_eq!(moves.len(), 20);

        // 生成后局面保持不变
        assert_eq!(pos, Position::initial());
        assert!(pos.move_history.is_empty());
    }

    #[test]
    fn test_kiwipete_move_count() {
        // 经典复杂局面（含易位、过路兵、升变威胁），深度 1 走法数为 48
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let moves = MoveGenerator::generate_legal(&mut pos);

        assert_eq!(moves.len(), 48);
    }

    #[test]
    fn test_pseudo_legal_deterministic() {
        let pos = Position::initial();
        let moves1 = MoveGenerator::generate_pseudo_legal(&pos);
        let moves2 = MoveGenerator::generate_pseudo_legal(&pos);

        assert_eq!(moves1, moves2, "生成顺序应该是确定的");
    }

    #[test]
    fn test_promotion_expansion() {
        // 白兵 a7 待升变，白王 h2，黑王 h7
        let fen = "8/P6k/8/8/8/8/7K/8 w - - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let moves = MoveGenerator::generate_legal(&mut pos);

        // 升变 4 种 + 王 5 个走法
        assert_eq!(moves.len(), 9);

        let promotions: Vec<_> = moves.iter().filter(|m| m.promotion.is_some()).collect();
        assert_eq!(promotions.len(), 4);
        for mv in &promotions {
            assert_eq!(mv.to, Square::parse("a8").unwrap());
        }
    }

    #[test]
    fn test_en_passant_generation() {
        // 黑兵刚走 d7d5，白兵 e5 可过路吃
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let mut pos = Fen::parse(fen).unwrap();
        let moves = MoveGenerator::generate_legal(&mut pos);

        let ep = moves.iter().find(|m| m.en_passant);
        assert!(ep.is_some(), "应生成过路兵吃子");
        let ep = ep.unwrap();
        assert_eq!(ep.from, Square::parse("e5").unwrap());
        assert_eq!(ep.to, Square::parse("d6").unwrap());
        assert!(ep.capture);
    }

    #[test]
    fn test_castle_generation() {
        // 双方只剩王车，白方两侧均可易位
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let moves = MoveGenerator::generate_legal(&mut pos);

        let kingside = moves.iter().find(|m| m.castle == Some(CastleSide::Kingside));
        let queenside = moves
            .iter()
            .find(|m| m.castle == Some(CastleSide::Queenside));
        assert!(kingside.is_some());
        assert!(queenside.is_some());
        assert_eq!(kingside.unwrap().to, Square::parse("g1").unwrap());
        assert_eq!(queenside.unwrap().to, Square::parse("c1").unwrap());
    }

    #[test]
    fn test_no_castle_through_check() {
        // 黑车控制 f1，白方不能短易位；d1 未被控制，长易位仍可
        let fen = "4k3/8/8/8/5r2/8/8/R3K2R w KQ - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let moves = MoveGenerator::generate_legal(&mut pos);

        assert!(moves
            .iter()
            .all(|m| m.castle != Some(CastleSide::Kingside)));
        assert!(moves
            .iter()
            .any(|m| m.castle == Some(CastleSide::Queenside)));
    }

    #[test]
    fn test_check_restricts_moves() {
        // 白王被黑后将军，只能应将
        let fen = "4k3/8/8/8/8/8/4q3/4K3 w - - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let moves = MoveGenerator::generate_legal(&mut pos);

        for mv in &moves {
            let undo = Rules::apply_move(&mut pos, mv).unwrap();
            assert!(!Rules::is_in_check(&pos, Color::White));
            Rules::undo_move(&mut pos, mv, undo);
            pos.move_history.pop();
        }
    }

    #[test]
    fn test_uci_format() {
        let mv = Move::new(
            Square::parse("e2").unwrap(),
            Square::parse("e4").unwrap(),
            PieceType::Pawn,
        );
        assert_eq!(mv.uci(), "e2e4");

        let mut promo = Move::new(
            Square::parse("e7").unwrap(),
            Square::parse("e8").unwrap(),
            PieceType::Pawn,
        );
        promo.promotion = Some(PieceType::Queen);
        assert_eq!(promo.uci(), "e7e8q");
    }
}
