//! 简易开局库
//!
//! 只覆盖前几步最常见的主线，超出范围后交给搜索

use chess_core::{Color, Move, Piece, PieceType, Position, Square};

/// 开局库
pub struct OpeningBook;

/// 开局库覆盖的最大步数（半回合）
const BOOK_DEPTH: usize = 6;

impl OpeningBook {
    /// 查询开局库，命中时返回推荐走法
    ///
    /// 按已走的着法记录匹配，返回的走法未经合法性验证，调用方应验证后再用
    pub fn probe(pos: &Position) -> Option<Move> {
        let ply = pos.move_history.len();
        if ply > BOOK_DEPTH {
            return None;
        }

        match pos.side_to_move {
            Color::White => Self::probe_white(pos, ply),
            Color::Black => Self::probe_black(pos, ply),
        }
    }

    fn probe_white(pos: &Position, ply: usize) -> Option<Move> {
        match ply {
            // 首着 1. e4
            0 => Some(Move::new(
                Square::new_unchecked(4, 1),
                Square::new_unchecked(4, 3),
                PieceType::Pawn,
            )),
            // 第二着出马 2. Nf3
            2 => {
                let g1 = Square::new_unchecked(6, 0);
                if pos.board.get(g1) == Some(Piece::new(PieceType::Knight, Color::White)) {
                    Some(Move::new(g1, Square::new_unchecked(5, 2), PieceType::Knight))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn probe_black(pos: &Position, ply: usize) -> Option<Move> {
        if ply != 1 {
            return None;
        }

        // 对称应对白方首着
        match pos.move_history.first().map(String::as_str) {
            Some("e4") => Some(Move::new(
                Square::new_unchecked(4, 6),
                Square::new_unchecked(4, 4),
                PieceType::Pawn,
            )),
            Some("d4") => Some(Move::new(
                Square::new_unchecked(3, 6),
                Square::new_unchecked(3, 4),
                PieceType::Pawn,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Notation, Position, Rules};

    fn play(pos: &mut Position, text: &str) {
        let mv = Notation::parse_uci(pos, text).unwrap();
        Rules::apply_move(pos, &mv).unwrap();
    }

    #[test]
    fn test_white_first_move() {
        let pos = Position::initial();
        let mv = OpeningBook::probe(&pos).unwrap();
        assert_eq!(mv.uci(), "e2e4");
    }

    #[test]
    fn test_black_answers_e4() {
        let mut pos = Position::initial();
        play(&mut pos, "e2e4");

        let mv = OpeningBook::probe(&pos).unwrap();
        assert_eq!(mv.uci(), "e7e5");
    }

    #[test]
    fn test_black_answers_d4() {
        let mut pos = Position::initial();
        play(&mut pos, "d2d4");

        let mv = OpeningBook::probe(&pos).unwrap();
        assert_eq!(mv.uci(), "d7d5");
    }

    #[test]
    fn test_white_develops_knight() {
        let mut pos = Position::initial();
        play(&mut pos, "e2e4");
        play(&mut pos, "e7e5");

        let mv = OpeningBook::probe(&pos).unwrap();
        assert_eq!(mv.uci(), "g1f3");
    }

    #[test]
    fn test_no_knight_no_book_move() {
        let mut pos = Position::initial();
        play(&mut pos, "g1f3");
        play(&mut pos, "g8f6");

        // 马已离开 g1，第二着没有库着
        assert!(OpeningBook::probe(&pos).is_none());
    }

    #[test]
    fn test_unknown_line_misses() {
        let mut pos = Position::initial();
        play(&mut pos, "c2c4");

        assert!(OpeningBook::probe(&pos).is_none());
    }

    #[test]
    fn test_book_depth_limit() {
        let mut pos = Position::initial();
        for text in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4"] {
            play(&mut pos, text);
        }

        assert!(pos.move_history.len() > 6);
        assert!(OpeningBook::probe(&pos).is_none());
    }
}
