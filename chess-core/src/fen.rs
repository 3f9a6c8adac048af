//! FEN 格式解析和生成
//!
//! 标准 FEN 六个字段：
//! `<棋盘> <走子方> <易位权> <过路兵目标> <半回合计数> <回合数>`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`

use std::collections::HashMap;

use crate::board::{Board, CastlingRights, Position};
use crate::error::ChessError;
use crate::piece::{Color, Piece, Square};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面
    pub fn parse(fen: &str) -> Result<Position, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(ChessError::MalformedFen {
                reason: format!("Expected 6 fields, got {}", parts.len()),
            });
        }

        let board = Self::parse_board(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ChessError::MalformedFen {
                    reason: format!("Invalid active color: {}", other),
                })
            }
        };

        let castling = Self::parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            text => {
                let sq = Square::parse(text)?;
                // 过路兵目标只能紧跟对方的兵两格推进：
                // 白方走子时在第 6 行，黑方走子时在第 3 行
                let expected_rank = match side_to_move {
                    Color::White => 5,
                    Color::Black => 2,
                };
                if sq.rank != expected_rank {
                    return Err(ChessError::MalformedFen {
                        reason: format!("Invalid en passant target: {}", text),
                    });
                }
                Some(sq)
            }
        };

        let halfmove_clock = parts[4].parse().map_err(|_| ChessError::MalformedFen {
            reason: format!("Invalid halfmove clock: {}", parts[4]),
        })?;
        let fullmove_number = parts[5].parse().map_err(|_| ChessError::MalformedFen {
            reason: format!("Invalid fullmove number: {}", parts[5]),
        })?;

        let mut pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            move_history: Vec::new(),
            position_counts: HashMap::new(),
        };
        // 解析出的局面算作出现一次
        pos.record_position();
        tracing::debug!(side = ?pos.side_to_move, fullmove = pos.fullmove_number, "FEN 解析完成");
        Ok(pos)
    }

    /// 解析棋盘部分（rank 8 到 rank 1，'/' 分隔，数字为连续空格数）
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != 8 {
            return Err(ChessError::MalformedFen {
                reason: format!("Expected 8 rows, got {}", rows.len()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let rank = 7 - row_idx as u8;
            let mut file = 0u8;

            for c in row.chars() {
                if file >= 8 {
                    return Err(ChessError::MalformedFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(count) = c.to_digit(10) {
                    file += count as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Square::new_unchecked(file, rank), Some(piece));
                    file += 1;
                } else {
                    return Err(ChessError::MalformedFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if file != 8 {
                return Err(ChessError::MalformedFen {
                    reason: format!("Row {} has {} columns, expected 8", row_idx, file),
                });
            }
        }

        Ok(board)
    }

    /// 解析易位权字段（"-" 或 KQkq 的任意子集）
    fn parse_castling(text: &str) -> Result<CastlingRights, ChessError> {
        let mut rights = CastlingRights::none();
        if text == "-" {
            return Ok(rights);
        }

        for c in text.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                _ => {
                    return Err(ChessError::MalformedFen {
                        reason: format!("Invalid castling character: {}", c),
                    })
                }
            }
        }
        Ok(rights)
    }

    /// 将局面转换为 FEN 字符串
    pub fn to_string(pos: &Position) -> String {
        format!(
            "{} {} {} {} {} {}",
            Self::board_to_string(&pos.board),
            pos.side_to_move.to_fen_char(),
            pos.castling.to_fen(),
            pos.en_passant
                .map(|sq| sq.to_string())
                .unwrap_or_else(|| "-".to_string()),
            pos.halfmove_clock,
            pos.fullmove_number
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(8);

        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for file in 0..8 {
                if let Some(piece) = board.get(Square::new_unchecked(file, rank)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> Position {
        Self::parse(INITIAL_FEN).expect("Initial FEN should be valid")
    }
}
