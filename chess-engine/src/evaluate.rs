//! 局面评估函数
//!
//! 白方视角：正值对白方有利。搜索引擎在内部按走子方取反（negamax 约定）

use chess_core::{Color, PieceType, Position, Rules, Square};

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表（白方视角，第一行对应 rank 8）
/// 黑方取垂直镜像
mod position_tables {
    /// 兵的位置分值
    pub const PAWN: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
        50, 50, 50, 50, 50, 50, 50, 50,
        10, 10, 20, 30, 30, 20, 10, 10,
         5,  5, 10, 25, 25, 10,  5,  5,
         0,  0,  0, 20, 20,  0,  0,  0,
         5, -5,-10,  0,  0,-10, -5,  5,
         5, 10, 10,-20,-20, 10, 10,  5,
         0,  0,  0,  0,  0,  0,  0,  0,
    ];

    /// 马的位置分值
    pub const KNIGHT: [i32; 64] = [
        -50,-40,-30,-30,-30,-30,-40,-50,
        -40,-20,  0,  0,  0,  0,-20,-40,
        -30,  0, 10, 15, 15, 10,  0,-30,
        -30,  5, 15, 20, 20, 15,  5,-30,
        -30,  0, 15, 20, 20, 15,  0,-30,
        -30,  5, 10, 15, 15, 10,  5,-30,
        -40,-20,  0,  5,  5,  0,-20,-40,
        -50,-40,-30,-30,-30,-30,-40,-50,
    ];

    /// 象的位置分值
    pub const BISHOP: [i32; 64] = [
        -20,-10,-10,-10,-10,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5, 10, 10,  5,  0,-10,
        -10,  5,  5, 10, 10,  5,  5,-10,
        -10,  0, 10, 10, 10, 10,  0,-10,
        -10, 10, 10, 10, 10, 10, 10,-10,
        -10,  5,  0,  0,  0,  0,  5,-10,
        -20,-10,-10,-10,-10,-10,-10,-20,
    ];

    /// 车的位置分值
    pub const ROOK: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
         5, 10, 10, 10, 10, 10, 10,  5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
         0,  0,  0,  5,  5,  0,  0,  0,
    ];

    /// 后的位置分值
    pub const QUEEN: [i32; 64] = [
        -20,-10,-10, -5, -5,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5,  5,  5,  5,  0,-10,
         -5,  0,  5,  5,  5,  5,  0, -5,
          0,  0,  5,  5,  5,  5,  0, -5,
        -10,  5,  5,  5,  5,  5,  0,-10,
        -10,  0,  5,  0,  0,  0,  0,-10,
        -20,-10,-10, -5, -5,-10,-10,-20,
    ];

    /// 王的中局位置分值（鼓励底线角部躲藏）
    pub const KING_MIDDLE: [i32; 64] = [
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -20,-30,-30,-40,-40,-30,-30,-20,
        -10,-20,-20,-20,-20,-20,-20,-10,
         20, 20,  0,  0,  0,  0, 20, 20,
         20, 30, 10,  0,  0, 10, 30, 20,
    ];

    /// 王的残局位置分值（鼓励走向中心）
    pub const KING_END: [i32; 64] = [
        -50,-40,-30,-20,-20,-30,-40,-50,
        -30,-20,-10,  0,  0,-10,-20,-30,
        -30,-10, 20, 30, 30, 20,-10,-30,
        -30,-10, 30, 40, 40, 30,-10,-30,
        -30,-10, 30, 40, 40, 30,-10,-30,
        -30,-10, 20, 30, 30, 20,-10,-30,
        -30,-30,  0,  0,  0,  0,-30,-30,
        -50,-30,-30,-30,-30,-30,-30,-50,
    ];
}

impl Evaluator {
    /// 评估局面（白方视角，正值对白方有利）
    ///
    /// 按规则已成和棋的局面恒为 0，覆盖其余所有评估项
    pub fn evaluate(pos: &Position) -> i32 {
        if pos.is_draw_by_rule() {
            return 0;
        }

        let endgame = Self::is_endgame(pos);
        let mut score = 0;

        for (sq, piece) in pos.board.all_pieces() {
            let piece_score = Self::piece_score(sq, piece.piece_type, piece.color, endgame);
            match piece.color {
                Color::White => score += piece_score,
                Color::Black => score -= piece_score,
            }
        }

        score += Self::king_safety(pos, Color::White, endgame);
        score -= Self::king_safety(pos, Color::Black, endgame);

        score += Self::hanging_pieces(pos, Color::White);
        score -= Self::hanging_pieces(pos, Color::Black);

        // 已出现两次的局面：把明显的优劣势向 0 收缩，
        // 优势方倾向避开第三次重复，劣势方则倾向重复求和
        if pos.repetition_count() >= 2 && score.abs() > 100 {
            score -= score / 4;
        }

        score
    }

    /// 单个棋子的分值（子力 + 位置分，王不计子力）
    fn piece_score(sq: Square, piece_type: PieceType, color: Color, endgame: bool) -> i32 {
        // 表格第一行对应 rank 8，白方索引垂直翻转，黑方取镜像
        let index = match color {
            Color::White => (7 - sq.rank as usize) * 8 + sq.file as usize,
            Color::Black => sq.rank as usize * 8 + sq.file as usize,
        };

        let position_bonus = match piece_type {
            PieceType::Pawn => position_tables::PAWN[index],
            PieceType::Knight => position_tables::KNIGHT[index],
            PieceType::Bishop => position_tables::BISHOP[index],
            PieceType::Rook => position_tables::ROOK[index],
            PieceType::Queen => position_tables::QUEEN[index],
            PieceType::King => {
                if endgame {
                    position_tables::KING_END[index]
                } else {
                    position_tables::KING_MIDDLE[index]
                }
            }
        };

        let material = match piece_type {
            PieceType::King => 0, // 王不计入子力差
            other => other.value(),
        };

        material + position_bonus
    }

    /// 残局判定：双方都没有后，或双方除兵和王外各剩不超过一个子
    pub fn is_endgame(pos: &Position) -> bool {
        let mut white_pieces = 0;
        let mut black_pieces = 0;
        let mut has_white_queen = false;
        let mut has_black_queen = false;

        for (_, piece) in pos.board.all_pieces() {
            match (piece.piece_type, piece.color) {
                (PieceType::Queen, Color::White) => has_white_queen = true,
                (PieceType::Queen, Color::Black) => has_black_queen = true,
                (PieceType::Knight | PieceType::Bishop | PieceType::Rook, Color::White) => {
                    white_pieces += 1
                }
                (PieceType::Knight | PieceType::Bishop | PieceType::Rook, Color::Black) => {
                    black_pieces += 1
                }
                _ => {}
            }
        }

        (!has_white_queen && !has_black_queen) || (white_pieces <= 1 && black_pieces <= 1)
    }

    /// 王的安全调整（返回该方的加减分，负值为罚分）
    ///
    /// 中局对贴边的王小幅罚分；残局罚分随对方剩余子力增大
    fn king_safety(pos: &Position, color: Color, endgame: bool) -> i32 {
        let king_sq = match pos.board.find_king(color) {
            Some(sq) => sq,
            None => return 0,
        };

        let edge_distance = [
            king_sq.file,
            7 - king_sq.file,
            king_sq.rank,
            7 - king_sq.rank,
        ]
        .into_iter()
        .min()
        .unwrap_or(0) as i32;

        // 离边 3 格以上视为安全
        let exposure = (3 - edge_distance).max(0);

        if endgame {
            let enemy_material = Self::side_material(pos, color.opponent());
            -exposure * enemy_material / 100
        } else {
            -exposure * 4
        }
    }

    /// 悬子罚分（返回该方的加减分）：被对方攻击且无己方保护的棋子
    /// 按其子力价值的一半扣分，放大防漏着能力
    fn hanging_pieces(pos: &Position, color: Color) -> i32 {
        let opponent = color.opponent();
        let mut penalty = 0;

        for (sq, piece) in pos.board.pieces(color) {
            if piece.piece_type == PieceType::King {
                continue;
            }
            if Rules::is_square_attacked(&pos.board, sq, opponent)
                && !Rules::is_square_attacked(&pos.board, sq, color)
            {
                penalty -= piece.value() / 2;
            }
        }

        penalty
    }

    /// 一方除王外的子力总和
    fn side_material(pos: &Position, color: Color) -> i32 {
        pos.board
            .pieces(color)
            .iter()
            .filter(|(_, p)| p.piece_type != PieceType::King)
            .map(|(_, p)| p.value())
            .sum()
    }

    /// 快速评估（仅计算子力差，白方视角）
    pub fn evaluate_material(pos: &Position) -> i32 {
        let mut score = 0;
        for (_, piece) in pos.board.all_pieces() {
            if piece.piece_type == PieceType::King {
                continue;
            }
            match piece.color {
                Color::White => score += piece.value(),
                Color::Black => score -= piece.value(),
            }
        }
        score
    }
}
