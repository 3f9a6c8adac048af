//! 规则引擎
//!
//! 包含:
//! - 攻击检测与将军判定
//! - 走法合法性验证（含易位前提）
//! - 走法执行与精确撤销（UndoInfo 模式，不复制棋盘）
//! - 将死、逼和、和棋判定

use crate::board::{Board, CastlingRights, Position};
use crate::error::{ChessError, Result};
use crate::moves::{CastleSide, Move, MoveGenerator};
use crate::notation::Notation;
use crate::piece::{Color, Piece, PieceType, Square};

/// 执行走法时产生的撤销信息
///
/// 由 `apply_move` 创建，由对应的 `undo_move` 消费一次，不持久化
#[derive(Debug, Clone)]
pub struct UndoInfo {
    /// 被吃的棋子及其所在格（过路兵吃子时不在目标格上）
    pub captured: Option<(Square, Piece)>,
    /// 走法前的易位权
    pub castling: CastlingRights,
    /// 走法前的过路兵目标
    pub en_passant: Option<Square>,
    /// 走法前的半回合计数
    pub halfmove_clock: u32,
    /// 走法前的完整回合数
    pub fullmove_number: u32,
    /// 该走法是否发生了升变
    pub promoted: bool,
}

/// 规则引擎
pub struct Rules;

impl Rules {
    /// 检查指定格子是否被某一方攻击
    ///
    /// 依次检查兵的斜吃、马跳、直线滑行（象/车/后，遇第一个棋子停止）和王的相邻格
    pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
        // 兵：攻击方的兵位于目标格斜后方
        for df in [-1i8, 1i8] {
            if let Some(sq) = square.offset(df, -by.forward()) {
                if board.get(sq) == Some(Piece::new(PieceType::Pawn, by)) {
                    return true;
                }
            }
        }

        // 马
        let knight_offsets = [
            (1, 2),
            (2, 1),
            (2, -1),
            (1, -2),
            (-1, -2),
            (-2, -1),
            (-2, 1),
            (-1, 2),
        ];
        for (df, dr) in knight_offsets {
            if let Some(sq) = square.offset(df, dr) {
                if board.get(sq) == Some(Piece::new(PieceType::Knight, by)) {
                    return true;
                }
            }
        }

        // 王
        for dr in -1i8..=1 {
            for df in -1i8..=1 {
                if df == 0 && dr == 0 {
                    continue;
                }
                if let Some(sq) = square.offset(df, dr) {
                    if board.get(sq) == Some(Piece::new(PieceType::King, by)) {
                        return true;
                    }
                }
            }
        }

        // 斜线：象或后
        let diagonals = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        for (df, dr) in diagonals {
            if let Some(piece) = Self::first_piece_on_ray(board, square, df, dr) {
                if piece.color == by
                    && (piece.piece_type == PieceType::Bishop
                        || piece.piece_type == PieceType::Queen)
                {
                    return true;
                }
            }
        }

        // 直线：车或后
        let straights = [(0, 1), (0, -1), (1, 0), (-1, 0)];
        for (df, dr) in straights {
            if let Some(piece) = Self::first_piece_on_ray(board, square, df, dr) {
                if piece.color == by
                    && (piece.piece_type == PieceType::Rook
                        || piece.piece_type == PieceType::Queen)
                {
                    return true;
                }
            }
        }

        false
    }

    /// 沿射线方向找到的第一个棋子
    fn first_piece_on_ray(board: &Board, from: Square, df: i8, dr: i8) -> Option<Piece> {
        let mut current = from;
        while let Some(sq) = current.offset(df, dr) {
            if let Some(piece) = board.get(sq) {
                return Some(piece);
            }
            current = sq;
        }
        None
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(pos: &Position, color: Color) -> bool {
        match pos.board.find_king(color) {
            Some(king_sq) => Self::is_square_attacked(&pos.board, king_sq, color.opponent()),
            None => false,
        }
    }

    /// 检查易位前提：权利保留、王车在位、中间格为空、王不在且不经过被攻击格
    pub fn can_castle(pos: &Position, color: Color, side: CastleSide) -> bool {
        let right = match (color, side) {
            (Color::White, CastleSide::Kingside) => pos.castling.white_kingside,
            (Color::White, CastleSide::Queenside) => pos.castling.white_queenside,
            (Color::Black, CastleSide::Kingside) => pos.castling.black_kingside,
            (Color::Black, CastleSide::Queenside) => pos.castling.black_queenside,
        };
        if !right {
            return false;
        }

        let home = color.home_rank();
        let king_sq = Square::new_unchecked(4, home);
        if pos.board.get(king_sq) != Some(Piece::new(PieceType::King, color)) {
            return false;
        }

        let (rook_file, empty_files, safe_files): (u8, &[u8], &[u8]) = match side {
            CastleSide::Kingside => (7, &[5, 6], &[4, 5, 6]),
            CastleSide::Queenside => (0, &[1, 2, 3], &[4, 3, 2]),
        };

        let rook_sq = Square::new_unchecked(rook_file, home);
        if pos.board.get(rook_sq) != Some(Piece::new(PieceType::Rook, color)) {
            return false;
        }

        for &file in empty_files {
            if pos.board.get(Square::new_unchecked(file, home)).is_some() {
                return false;
            }
        }

        let opponent = color.opponent();
        for &file in safe_files {
            if Self::is_square_attacked(&pos.board, Square::new_unchecked(file, home), opponent) {
                return false;
            }
        }

        true
    }

    /// 检查棋子几何上能否从 from 走到 to（不含兵和易位，路径上不能有阻挡）
    ///
    /// 同时服务于走法验证和记谱消歧
    pub(crate) fn can_reach(board: &Board, from: Square, to: Square, piece: PieceType) -> bool {
        let df = to.file as i8 - from.file as i8;
        let dr = to.rank as i8 - from.rank as i8;
        if df == 0 && dr == 0 {
            return false;
        }

        match piece {
            PieceType::Knight => {
                (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1)
            }
            PieceType::Bishop => df.abs() == dr.abs() && Self::path_clear(board, from, to),
            PieceType::Rook => (df == 0 || dr == 0) && Self::path_clear(board, from, to),
            PieceType::Queen => {
                (df == 0 || dr == 0 || df.abs() == dr.abs()) && Self::path_clear(board, from, to)
            }
            PieceType::King => df.abs() <= 1 && dr.abs() <= 1,
            PieceType::Pawn => false,
        }
    }

    /// 检查 from 和 to 之间（不含端点）是否没有棋子
    fn path_clear(board: &Board, from: Square, to: Square) -> bool {
        let df = (to.file as i8 - from.file as i8).signum();
        let dr = (to.rank as i8 - from.rank as i8).signum();

        let mut current = from;
        loop {
            current = match current.offset(df, dr) {
                Some(sq) => sq,
                None => return false,
            };
            if current == to {
                return true;
            }
            if board.get(current).is_some() {
                return false;
            }
        }
    }

    /// 检查走法的伪合法性（棋子几何规则，不含走后被将军的判定）
    pub fn is_pseudo_legal(pos: &Position, mv: &Move) -> bool {
        let piece = match pos.board.get(mv.from) {
            Some(p) => p,
            None => return false,
        };
        if piece.piece_type != mv.piece {
            return false;
        }

        // 不能吃己方子
        if let Some(target) = pos.board.get(mv.to) {
            if target.color == piece.color {
                return false;
            }
        }

        if let Some(side) = mv.castle {
            let home = piece.color.home_rank();
            let target_file = match side {
                CastleSide::Kingside => 6,
                CastleSide::Queenside => 2,
            };
            return mv.to == Square::new_unchecked(target_file, home)
                && Self::can_castle(pos, piece.color, side);
        }

        if piece.piece_type == PieceType::Pawn {
            return Self::is_pseudo_legal_pawn(pos, mv, piece.color);
        }

        // 升变只属于兵
        if mv.promotion.is_some() {
            return false;
        }

        Self::can_reach(&pos.board, mv.from, mv.to, piece.piece_type)
    }

    /// 兵的伪合法性：前进、双格推进、斜吃、过路兵、升变行
    fn is_pseudo_legal_pawn(pos: &Position, mv: &Move, color: Color) -> bool {
        let df = mv.to.file as i8 - mv.from.file as i8;
        let dr = mv.to.rank as i8 - mv.from.rank as i8;
        let forward = color.forward();

        // 升变走法必须到达底线，到达底线的走法必须升变
        let reaches_last = mv.to.rank == color.promotion_rank();
        if mv.promotion.is_some() != reaches_last {
            return false;
        }

        let target = pos.board.get(mv.to);

        // 直进一格
        if df == 0 && dr == forward {
            return target.is_none();
        }

        // 起始行直进两格
        let start_rank = match color {
            Color::White => 1,
            Color::Black => 6,
        };
        if df == 0 && dr == forward * 2 && mv.from.rank == start_rank {
            let middle = Square::new_unchecked(mv.from.file, (mv.from.rank as i8 + forward) as u8);
            return target.is_none() && pos.board.get(middle).is_none();
        }

        // 斜吃（普通或过路兵）
        if df.abs() == 1 && dr == forward {
            if mv.en_passant {
                return target.is_none() && pos.en_passant == Some(mv.to);
            }
            return target.is_some();
        }

        false
    }

    /// 执行走法
    ///
    /// 验证失败或走后己方王被将军时返回错误且局面不变（外部原子性）。
    /// 成功时更新易位权（王/车移动或角上的车被吃）、过路兵目标、
    /// 半回合计数、回合数、走子方、局面哈希计数和走法历史
    pub fn apply_move(pos: &mut Position, mv: &Move) -> Result<UndoInfo> {
        let piece = pos.board.get(mv.from).ok_or(ChessError::NoPieceAtSource {
            square: mv.from,
        })?;
        if piece.color != pos.side_to_move {
            return Err(ChessError::WrongSideToMove);
        }
        let illegal = ChessError::IllegalMove {
            from: mv.from,
            to: mv.to,
        };
        if piece.piece_type != mv.piece || !Self::is_pseudo_legal(pos, mv) {
            return Err(illegal);
        }

        // 记谱需要走法前的局面
        let notation = Notation::to_algebraic(pos, mv);

        let mut undo = UndoInfo {
            captured: None,
            castling: pos.castling,
            en_passant: pos.en_passant,
            halfmove_clock: pos.halfmove_clock,
            fullmove_number: pos.fullmove_number,
            promoted: false,
        };

        // 移除被吃的棋子（过路兵吃子时被吃的兵不在目标格上）
        if mv.en_passant {
            let captured_sq = Square::new_unchecked(mv.to.file, mv.from.rank);
            if let Some(captured) = pos.board.get(captured_sq) {
                undo.captured = Some((captured_sq, captured));
                pos.board.set(captured_sq, None);
            }
        } else if let Some(target) = pos.board.get(mv.to) {
            undo.captured = Some((mv.to, target));
        }

        pos.board.move_piece(mv.from, mv.to);

        // 升变（未指定时默认升后）
        if piece.piece_type == PieceType::Pawn && mv.to.rank == piece.color.promotion_rank() {
            let promoted = mv.promotion.unwrap_or(PieceType::Queen);
            pos.board
                .set(mv.to, Some(Piece::new(promoted, piece.color)));
            undo.promoted = true;
        }

        // 易位时同步移动车
        if let Some(side) = mv.castle {
            let home = piece.color.home_rank();
            let (rook_from, rook_to) = match side {
                CastleSide::Kingside => (
                    Square::new_unchecked(7, home),
                    Square::new_unchecked(5, home),
                ),
                CastleSide::Queenside => (
                    Square::new_unchecked(0, home),
                    Square::new_unchecked(3, home),
                ),
            };
            pos.board.move_piece(rook_from, rook_to);
        }

        // 试走后己方王不能被将军，否则回滚
        if Self::is_in_check(pos, piece.color) {
            Self::restore_board(pos, mv, &undo, piece.color);
            return Err(illegal);
        }

        Self::update_castling_rights(pos, mv, piece, &undo);

        // 兵两格推进设置新的过路兵目标，否则清除
        pos.en_passant = if piece.piece_type == PieceType::Pawn
            && (mv.to.rank as i8 - mv.from.rank as i8).abs() == 2
        {
            Some(Square::new_unchecked(
                mv.from.file,
                (mv.from.rank + mv.to.rank) / 2,
            ))
        } else {
            None
        };

        if piece.piece_type == PieceType::Pawn || undo.captured.is_some() {
            pos.halfmove_clock = 0;
        } else {
            pos.halfmove_clock += 1;
        }
        if pos.side_to_move == Color::Black {
            pos.fullmove_number += 1;
        }
        pos.side_to_move = pos.side_to_move.opponent();

        pos.record_position();
        pos.move_history.push(notation);

        Ok(undo)
    }

    /// 撤销走法（`apply_move` 的精确逆操作）
    ///
    /// 不截断 `move_history`，由调用方负责
    pub fn undo_move(pos: &mut Position, mv: &Move, undo: UndoInfo) {
        // 先移除走法后局面的哈希记录
        pos.unrecord_position();

        pos.side_to_move = pos.side_to_move.opponent();
        let color = pos.side_to_move;

        Self::restore_board(pos, mv, &undo, color);

        pos.castling = undo.castling;
        pos.en_passant = undo.en_passant;
        pos.halfmove_clock = undo.halfmove_clock;
        pos.fullmove_number = undo.fullmove_number;
    }

    /// 仅还原棋盘（走子、升变、被吃子、易位车），不动其他状态
    fn restore_board(pos: &mut Position, mv: &Move, undo: &UndoInfo, color: Color) {
        let piece_type = if undo.promoted {
            PieceType::Pawn
        } else {
            mv.piece
        };
        pos.board.set(mv.from, Some(Piece::new(piece_type, color)));
        pos.board.set(mv.to, None);

        if let Some((sq, captured)) = undo.captured {
            pos.board.set(sq, Some(captured));
        }

        if let Some(side) = mv.castle {
            let home = color.home_rank();
            let (rook_from, rook_to) = match side {
                CastleSide::Kingside => (
                    Square::new_unchecked(7, home),
                    Square::new_unchecked(5, home),
                ),
                CastleSide::Queenside => (
                    Square::new_unchecked(0, home),
                    Square::new_unchecked(3, home),
                ),
            };
            pos.board.move_piece(rook_to, rook_from);
        }
    }

    /// 更新易位权：王或车移动、或角上的车被吃都会使对应权利失效
    fn update_castling_rights(pos: &mut Position, mv: &Move, piece: Piece, undo: &UndoInfo) {
        match piece.piece_type {
            PieceType::King => match piece.color {
                Color::White => {
                    pos.castling.white_kingside = false;
                    pos.castling.white_queenside = false;
                }
                Color::Black => {
                    pos.castling.black_kingside = false;
                    pos.castling.black_queenside = false;
                }
            },
            PieceType::Rook => match (mv.from.file, mv.from.rank) {
                (0, 0) => pos.castling.white_queenside = false,
                (7, 0) => pos.castling.white_kingside = false,
                (0, 7) => pos.castling.black_queenside = false,
                (7, 7) => pos.castling.black_kingside = false,
                _ => {}
            },
            _ => {}
        }

        if let Some((sq, captured)) = undo.captured {
            if captured.piece_type == PieceType::Rook {
                match (sq.file, sq.rank) {
                    (0, 0) => pos.castling.white_queenside = false,
                    (7, 0) => pos.castling.white_kingside = false,
                    (0, 7) => pos.castling.black_queenside = false,
                    (7, 7) => pos.castling.black_kingside = false,
                    _ => {}
                }
            }
        }
    }

    /// 检查指定阵营是否被将死（轮到该方走、被将军且无合法走法）
    pub fn is_checkmate(pos: &mut Position, color: Color) -> bool {
        if pos.side_to_move != color || !Self::is_in_check(pos, color) {
            return false;
        }
        MoveGenerator::generate_legal(pos).is_empty()
    }

    /// 检查指定阵营是否被逼和（轮到该方走、未被将军且无合法走法）
    pub fn is_stalemate(pos: &mut Position, color: Color) -> bool {
        if pos.side_to_move != color || Self::is_in_check(pos, color) {
            return false;
        }
        MoveGenerator::generate_legal(pos).is_empty()
    }

    /// 检查是否和棋（逼和、三次重复或五十回合）
    pub fn is_draw(pos: &mut Position) -> bool {
        pos.is_draw_by_rule() || Self::is_stalemate(pos, pos.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn uci(pos: &Position, text: &str) -> Move {
        Notation::parse_uci(pos, text).unwrap()
    }

    fn play(pos: &mut Position, text: &str) {
        let mv = uci(pos, text);
        Rules::apply_move(pos, &mv).unwrap();
    }

    #[test]
    fn test_apply_undo_restores_position() {
        // 含易位权和过路兵目标的复杂局面，逐一试走全部合法走法
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut pos = Fen::parse(fen).unwrap();

        let fen_before = Fen::to_string(&pos);
        let hash_before = pos.position_hash();
        let moves = MoveGenerator::generate_legal(&mut pos);
        assert!(!moves.is_empty());

        for mv in &moves {
            let undo = Rules::apply_move(&mut pos, mv).unwrap();
            Rules::undo_move(&mut pos, mv, undo);
            pos.move_history.pop();

            assert_eq!(Fen::to_string(&pos), fen_before, "走法 {} 未能还原局面", mv);
            assert_eq!(pos.position_hash(), hash_before, "走法 {} 未能还原哈希", mv);
        }
    }

    #[test]
    fn test_fools_mate() {
        let mut pos = Position::initial();
        play(&mut pos, "f2f3");
        play(&mut pos, "e7e5");
        play(&mut pos, "g2g4");
        play(&mut pos, "d8h4");

        assert!(Rules::is_in_check(&pos, Color::White));
        assert!(Rules::is_checkmate(&mut pos, Color::White));
        assert!(MoveGenerator::generate_legal(&mut pos).is_empty());
        assert!(!Rules::is_stalemate(&mut pos, Color::White));
    }

    #[test]
    fn test_threefold_repetition_by_knight_shuffle() {
        let mut pos = Position::initial();

        // 双方马来回各两轮，初始局面出现三次
        for _ in 0..2 {
            play(&mut pos, "g1f3");
            play(&mut pos, "g8f6");
            play(&mut pos, "f3g1");
            play(&mut pos, "f6g8");
        }

        assert_eq!(pos.repetition_count(), 3);
        assert!(pos.is_threefold_repetition());
        assert!(Rules::is_draw(&mut pos));
    }

    #[test]
    fn test_en_passant_apply_undo() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let mut pos = Fen::parse(fen).unwrap();
        let fen_before = Fen::to_string(&pos);

        let mv = uci(&pos, "e5d6");
        assert!(mv.en_passant);

        let undo = Rules::apply_move(&mut pos, &mv).unwrap();
        // 被吃的黑兵在 d5 而不是 d6
        assert!(pos.board.get(Square::parse("d5").unwrap()).is_none());
        assert_eq!(
            pos.board.get(Square::parse("d6").unwrap()),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );

        Rules::undo_move(&mut pos, &mv, undo);
        pos.move_history.pop();
        assert_eq!(Fen::to_string(&pos), fen_before);
    }

    #[test]
    fn test_promotion_apply_undo() {
        let fen = "8/P6k/8/8/8/8/7K/8 w - - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let fen_before = Fen::to_string(&pos);

        let mv = uci(&pos, "a7a8n");
        let undo = Rules::apply_move(&mut pos, &mv).unwrap();
        assert_eq!(
            pos.board.get(Square::parse("a8").unwrap()),
            Some(Piece::new(PieceType::Knight, Color::White))
        );

        Rules::undo_move(&mut pos, &mv, undo);
        pos.move_history.pop();
        assert_eq!(Fen::to_string(&pos), fen_before);
    }

    #[test]
    fn test_castling_apply_undo() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let fen_before = Fen::to_string(&pos);

        let mv = uci(&pos, "e1g1");
        assert_eq!(mv.castle, Some(CastleSide::Kingside));

        let undo = Rules::apply_move(&mut pos, &mv).unwrap();
        assert_eq!(
            pos.board.get(Square::parse("g1").unwrap()),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            pos.board.get(Square::parse("f1").unwrap()),
            Some(Piece::new(PieceType::Rook, Color::White))
        );
        assert!(!pos.castling.white_kingside);
        assert!(!pos.castling.white_queenside);

        Rules::undo_move(&mut pos, &mv, undo);
        pos.move_history.pop();
        assert_eq!(Fen::to_string(&pos), fen_before);
    }

    #[test]
    fn test_rook_capture_clears_castling_right() {
        // 白象吃掉 h8 黑车后，黑方短易位权消失
        let fen = "r3k2r/8/8/8/8/8/1B6/R3K2R w KQkq - 0 1";
        let mut pos = Fen::parse(fen).unwrap();

        play(&mut pos, "b2h8");

        assert!(!pos.castling.black_kingside);
        assert!(pos.castling.black_queenside);
    }

    #[test]
    fn test_illegal_moves_leave_position_unchanged() {
        let mut pos = Position::initial();
        let snapshot = pos.clone();

        // 起始格没有棋子
        let mv = Move::new(
            Square::parse("e4").unwrap(),
            Square::parse("e5").unwrap(),
            PieceType::Pawn,
        );
        assert!(matches!(
            Rules::apply_move(&mut pos, &mv),
            Err(ChessError::NoPieceAtSource { .. })
        ));

        // 黑方棋子但轮到白方
        let mv = Move::new(
            Square::parse("e7").unwrap(),
            Square::parse("e5").unwrap(),
            PieceType::Pawn,
        );
        assert!(matches!(
            Rules::apply_move(&mut pos, &mv),
            Err(ChessError::WrongSideToMove)
        ));

        // 马吃己方兵
        let mv = Move::new(
            Square::parse("g1").unwrap(),
            Square::parse("e2").unwrap(),
            PieceType::Knight,
        );
        assert!(matches!(
            Rules::apply_move(&mut pos, &mv),
            Err(ChessError::IllegalMove { .. })
        ));

        assert_eq!(pos, snapshot);
        assert!(pos.move_history.is_empty());
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // 白马 e2 被黑后 e7 沿 e 线牵制在王前
        let fen = "4k3/4q3/8/8/8/8/4N3/4K3 w - - 0 1";
        let mut pos = Fen::parse(fen).unwrap();

        let mv = uci(&pos, "e2c3");
        let result = Rules::apply_move(&mut pos, &mv);
        assert!(matches!(result, Err(ChessError::IllegalMove { .. })));

        // 局面未被破坏
        assert_eq!(Fen::to_string(&pos), fen);
    }

    #[test]
    fn test_fifty_move_rule() {
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 100 80";
        let pos = Fen::parse(fen).unwrap();

        assert!(pos.is_fifty_move_rule());
        assert!(pos.is_draw_by_rule());
    }

    #[test]
    fn test_stalemate_detection() {
        // 经典逼和：黑王 a8 无路可走且未被将军
        let fen = "k7/8/1Q6/8/8/8/8/4K3 b - - 0 1";
        let mut pos = Fen::parse(fen).unwrap();

        assert!(!Rules::is_in_check(&pos, Color::Black));
        assert!(Rules::is_stalemate(&mut pos, Color::Black));
        assert!(!Rules::is_checkmate(&mut pos, Color::Black));
        assert!(Rules::is_draw(&mut pos));
    }

    #[test]
    fn test_halfmove_clock_updates() {
        let mut pos = Position::initial();
        play(&mut pos, "g1f3");
        assert_eq!(pos.halfmove_clock, 1);
        play(&mut pos, "g8f6");
        assert_eq!(pos.halfmove_clock, 2);
        play(&mut pos, "e2e4");
        // 兵移动重置计数
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 2);
    }
}
