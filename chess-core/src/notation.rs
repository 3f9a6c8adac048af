//! 走法记谱
//!
//! 支持两种格式：
//! - UCI 坐标记谱（如 `e2e4`、`e7e8q`），用于机器交换
//! - 标准代数记谱 SAN（如 `Nf3`、`exd5`、`O-O`、`e8=Q`），用于显示，
//!   消歧通过扫描能到达同一目标格的同类同色棋子计算

use crate::board::Position;
use crate::error::{ChessError, Result};
use crate::moves::{CastleSide, Move};
use crate::piece::{PieceType, Square};
use crate::rules::Rules;

/// 记谱处理
pub struct Notation;

impl Notation {
    /// 将走法转换为 UCI 坐标记谱
    pub fn to_uci(mv: &Move) -> String {
        mv.uci()
    }

    /// 从 UCI 坐标文本解析走法（需要当前局面来补全走法信息）
    pub fn parse_uci(pos: &Position, text: &str) -> Result<Move> {
        if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
            return Err(ChessError::InvalidSquare {
                text: text.to_string(),
            });
        }

        let from = Square::parse(&text[0..2])?;
        let to = Square::parse(&text[2..4])?;

        let promotion = match text.as_bytes().get(4) {
            None => None,
            Some(c) => Some(match c {
                b'q' => PieceType::Queen,
                b'r' => PieceType::Rook,
                b'b' => PieceType::Bishop,
                b'n' => PieceType::Knight,
                _ => {
                    return Err(ChessError::InvalidSquare {
                        text: text.to_string(),
                    })
                }
            }),
        };

        let piece = pos
            .board
            .get(from)
            .ok_or(ChessError::NoPieceAtSource { square: from })?;
        if piece.color != pos.side_to_move {
            return Err(ChessError::WrongSideToMove);
        }

        let mut mv = Move::new(from, to, piece.piece_type);
        mv.promotion = promotion;

        // 王横跳两格视为易位
        if piece.piece_type == PieceType::King {
            let df = to.file as i8 - from.file as i8;
            if df == 2 {
                mv.castle = Some(CastleSide::Kingside);
            } else if df == -2 {
                mv.castle = Some(CastleSide::Queenside);
            }
        }

        // 兵斜走到过路兵目标格视为过路兵吃子
        if piece.piece_type == PieceType::Pawn
            && pos.en_passant == Some(to)
            && from.file != to.file
        {
            mv.en_passant = true;
            mv.capture = true;
        } else if pos.board.get(to).is_some() {
            mv.capture = true;
        }

        Ok(mv)
    }

    /// 将走法转换为标准代数记谱（不含将军/将死后缀，后缀见 `check_suffix`）
    ///
    /// 必须用走法执行前的局面调用
    pub fn to_algebraic(pos: &Position, mv: &Move) -> String {
        if let Some(side) = mv.castle {
            return match side {
                CastleSide::Kingside => "O-O".to_string(),
                CastleSide::Queenside => "O-O-O".to_string(),
            };
        }

        let is_capture = mv.capture || mv.en_passant || pos.board.get(mv.to).is_some();
        let mut san = String::new();

        match mv.piece.san_letter() {
            Some(letter) => {
                san.push(letter);
                san.push_str(&Self::disambiguation(pos, mv));
                if is_capture {
                    san.push('x');
                }
            }
            None => {
                // 兵吃子时以起始列开头
                if is_capture {
                    san.push((b'a' + mv.from.file) as char);
                    san.push('x');
                }
            }
        }

        san.push_str(&mv.to.to_string());

        if let Some(promo) = mv.promotion {
            san.push('=');
            if let Some(letter) = promo.san_letter() {
                san.push(letter);
            }
        }

        san
    }

    /// 计算将军/将死后缀（"+"、"#" 或空），需要可变局面做试走
    pub fn check_suffix(pos: &mut Position, mv: &Move) -> &'static str {
        let undo = match Rules::apply_move(pos, mv) {
            Ok(undo) => undo,
            Err(_) => return "",
        };

        let opponent = pos.side_to_move;
        let suffix = if Rules::is_in_check(pos, opponent) {
            if Rules::is_checkmate(pos, opponent) {
                "#"
            } else {
                "+"
            }
        } else {
            ""
        };

        Rules::undo_move(pos, mv, undo);
        pos.move_history.pop();
        suffix
    }

    /// 带后缀的完整代数记谱（显示边界使用）
    pub fn to_algebraic_with_suffix(pos: &mut Position, mv: &Move) -> String {
        let san = Self::to_algebraic(pos, mv);
        let suffix = Self::check_suffix(pos, mv);
        format!("{}{}", san, suffix)
    }

    /// 消歧前缀：列、行或两者
    ///
    /// 扫描棋盘上能到达同一目标格的其他同类同色棋子
    fn disambiguation(pos: &Position, mv: &Move) -> String {
        // 兵的吃子记谱自带起始列；王每方只有一个
        if mv.piece == PieceType::Pawn || mv.piece == PieceType::King {
            return String::new();
        }

        let piece = match pos.board.get(mv.from) {
            Some(p) => p,
            None => return String::new(),
        };

        let mut ambiguous: Vec<Square> = Vec::new();
        for (sq, other) in pos.board.pieces(piece.color) {
            if sq == mv.from || other.piece_type != mv.piece {
                continue;
            }
            if Rules::can_reach(&pos.board, sq, mv.to, mv.piece) {
                ambiguous.push(sq);
            }
        }

        if ambiguous.is_empty() {
            return String::new();
        }

        let file_char = (b'a' + mv.from.file) as char;
        let rank_char = (b'1' + mv.from.rank) as char;

        if ambiguous.iter().all(|sq| sq.file != mv.from.file) {
            file_char.to_string()
        } else if ambiguous.iter().all(|sq| sq.rank != mv.from.rank) {
            rank_char.to_string()
        } else {
            format!("{}{}", file_char, rank_char)
        }
    }
}
