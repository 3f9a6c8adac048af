//! 搜索引擎
//!
//! 实现 Negamax + Alpha-Beta 剪枝 + 静态搜索 + 迭代加深
//!
//! 所有搜索分支通过执行/撤销在同一个 `Position` 上展开，
//! 返回调用方时局面保持不变

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chess_core::{Move, MoveGenerator, PieceType, Position, Rules};

use crate::evaluate::Evaluator;
use crate::opening::OpeningBook;

/// 将死基准分，实际分值加上剩余深度使引擎偏好更快的将死
const MATE_SCORE: i32 = 10_000;

/// 静态搜索最大延伸层数
const MAX_QUIESCE_DEPTH: u8 = 8;

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// 时间预算（毫秒），`None` 表示不限时
    pub time_limit_ms: Option<u64>,
    pub use_opening_book: bool,
}

impl SearchConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                max_depth: 3,
                time_limit_ms: Some(1000),
                use_opening_book: false,
            },
            Difficulty::Medium => Self {
                max_depth: 4,
                time_limit_ms: Some(3000),
                use_opening_book: false,
            },
            Difficulty::Hard => Self {
                max_depth: 6,
                time_limit_ms: Some(5000),
                use_opening_book: true,
            },
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 搜索结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_move: Move,
    /// 走子方视角的分值（negamax 约定）
    pub score: i32,
    /// 实际完成的最大搜索深度（开局库命中为 0）
    pub depth: u8,
    pub nodes: u64,
}

/// 搜索引擎
pub struct SearchEngine {
    config: SearchConfig,
    nodes_searched: u64,
}

impl SearchEngine {
    /// 创建新的搜索引擎
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(SearchConfig::from_difficulty(difficulty))
    }

    /// 搜索最佳走法
    ///
    /// 无合法走法（将死或逼和）时返回 `None`，否则返回最后一个
    /// 完整完成的迭代深度的最佳走法。搜索结束后局面与进入时一致
    pub fn find_best_move(&mut self, pos: &mut Position) -> Option<SearchResult> {
        self.nodes_searched = 0;

        // 先查开局库，命中的走法仍要通过规则验证
        if self.config.use_opening_book {
            if let Some(mv) = OpeningBook::probe(pos) {
                if let Ok(undo) = Rules::apply_move(pos, &mv) {
                    Rules::undo_move(pos, &mv, undo);
                    pos.move_history.pop();
                    debug!(best = %mv, "开局库命中");
                    return Some(SearchResult {
                        best_move: mv,
                        score: 0,
                        depth: 0,
                        nodes: 0,
                    });
                }
            }
        }

        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let moves = MoveGenerator::generate_legal(pos);
        if moves.is_empty() {
            return None;
        }

        // 迭代加深，保留最后一个完整完成的深度的结果
        let mut best_move = moves[0];
        let mut best_score = 0;
        let mut completed_depth = 0;

        for depth in 1..=self.config.max_depth {
            match self.search_root(pos, &moves, depth, best_move, deadline) {
                Some((mv, score)) => {
                    best_move = mv;
                    best_score = score;
                    completed_depth = depth;
                    debug!(
                        depth,
                        score,
                        best = %mv,
                        nodes = self.nodes_searched,
                        "完成一轮迭代"
                    );
                }
                None => {
                    debug!(depth, "时间耗尽，放弃未完成的迭代");
                    break;
                }
            }
        }

        info!(
            best = %best_move,
            score = best_score,
            depth = completed_depth,
            nodes = self.nodes_searched,
            "搜索结束"
        );

        Some(SearchResult {
            best_move,
            score: best_score,
            depth: completed_depth,
            nodes: self.nodes_searched,
        })
    }

    /// 根节点搜索一个完整深度，超时返回 `None`
    fn search_root(
        &mut self,
        pos: &mut Position,
        moves: &[Move],
        depth: u8,
        prev_best: Move,
        deadline: Option<Instant>,
    ) -> Option<(Move, i32)> {
        let ordered = Self::order_moves(pos, moves.to_vec(), Some(prev_best));

        let mut alpha = i32::MIN + 1;
        let beta = i32::MAX - 1;
        let mut best_move = ordered[0];

        for mv in &ordered {
            let undo = match Rules::apply_move(pos, mv) {
                Ok(undo) => undo,
                Err(_) => continue,
            };
            let result = self.negamax(pos, depth - 1, -beta, -alpha, deadline);
            Rules::undo_move(pos, mv, undo);
            pos.move_history.pop();

            let score = -result?;
            if score > alpha {
                alpha = score;
                best_move = *mv;
            }
        }

        Some((best_move, alpha))
    }

    /// Negamax + Alpha-Beta，返回走子方视角的分值
    ///
    /// 超时返回 `None`，调用方负责在撤销走法之后再向上传播
    fn negamax(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        deadline: Option<Instant>,
    ) -> Option<i32> {
        self.nodes_searched += 1;

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return None;
            }
        }

        // 规则和棋优先于一切评估
        if pos.is_draw_by_rule() {
            return Some(0);
        }

        if depth == 0 {
            return self.quiescence(pos, alpha, beta, 0, deadline);
        }

        let moves = MoveGenerator::generate_legal(pos);
        if moves.is_empty() {
            // 剩余深度越大表示将死来得越早，分值越极端
            return Some(if Rules::is_in_check(pos, pos.side_to_move) {
                -(MATE_SCORE + depth as i32)
            } else {
                0
            });
        }

        let ordered = Self::order_moves(pos, moves, None);

        for mv in &ordered {
            let undo = match Rules::apply_move(pos, mv) {
                Ok(undo) => undo,
                Err(_) => continue,
            };
            let result = self.negamax(pos, depth - 1, -beta, -alpha, deadline);
            Rules::undo_move(pos, mv, undo);
            pos.move_history.pop();

            let score = -result?;
            if score >= beta {
                return Some(beta); // Beta 剪枝
            }
            if score > alpha {
                alpha = score;
            }
        }

        Some(alpha)
    }

    /// 静态搜索：只延伸吃子和将军，消除水平线效应
    ///
    /// 与 `negamax` 一样每个节点检查一次时间预算，超时返回 `None`
    fn quiescence(
        &mut self,
        pos: &mut Position,
        mut alpha: i32,
        beta: i32,
        qdepth: u8,
        deadline: Option<Instant>,
    ) -> Option<i32> {
        self.nodes_searched += 1;

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return None;
            }
        }

        let stand_pat = Self::evaluate_relative(pos);
        if qdepth >= MAX_QUIESCE_DEPTH {
            return Some(stand_pat);
        }

        if stand_pat >= beta {
            return Some(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let moves = MoveGenerator::generate_legal(pos);
        for mv in moves {
            if !mv.capture && !Self::gives_check(pos, &mv) {
                continue;
            }

            let undo = match Rules::apply_move(pos, &mv) {
                Ok(undo) => undo,
                Err(_) => continue,
            };
            let result = self.quiescence(pos, -beta, -alpha, qdepth + 1, deadline);
            Rules::undo_move(pos, &mv, undo);
            pos.move_history.pop();

            let score = -result?;
            if score >= beta {
                return Some(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Some(alpha)
    }

    /// 走法排序：上轮最佳、吃子（按被吃子减攻击子的子力差降序）、将军、安静走法
    fn order_moves(pos: &mut Position, moves: Vec<Move>, prev_best: Option<Move>) -> Vec<Move> {
        let mut best = Vec::new();
        let mut captures = Vec::new();
        let mut checks = Vec::new();
        let mut quiet = Vec::new();

        for mv in moves {
            if Some(mv) == prev_best {
                best.push(mv);
                continue;
            }

            if mv.capture {
                let victim = if mv.en_passant {
                    PieceType::Pawn.value()
                } else {
                    pos.board.get(mv.to).map(|p| p.value()).unwrap_or(0)
                };
                captures.push((victim - mv.piece.value(), mv));
                continue;
            }

            if Self::gives_check(pos, &mv) {
                checks.push(mv);
            } else {
                quiet.push(mv);
            }
        }

        captures.sort_by_key(|(gain, _)| std::cmp::Reverse(*gain));

        let mut ordered = best;
        ordered.extend(captures.into_iter().map(|(_, mv)| mv));
        ordered.extend(checks);
        ordered.extend(quiet);
        ordered
    }

    /// 试探一步走法是否将军对方
    fn gives_check(pos: &mut Position, mv: &Move) -> bool {
        let undo = match Rules::apply_move(pos, mv) {
            Ok(undo) => undo,
            Err(_) => return false,
        };
        let in_check = Rules::is_in_check(pos, pos.side_to_move);
        Rules::undo_move(pos, mv, undo);
        pos.move_history.pop();
        in_check
    }

    /// 走子方视角的静态评估
    fn evaluate_relative(pos: &Position) -> i32 {
        use chess_core::Color;
        let score = Evaluator::evaluate(pos);
        match pos.side_to_move {
            Color::White => score,
            Color::Black => -score,
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Fen, Position};

    fn engine(max_depth: u8) -> SearchEngine {
        SearchEngine::new(SearchConfig {
            max_depth,
            time_limit_ms: None,
            use_opening_book: false,
        })
    }

    #[test]
    fn test_search_initial_position() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut pos = Position::initial();
        let before = Fen::to_string(&pos);

        let result = engine(3).find_best_move(&mut pos).unwrap();

        println!("Best move: {}", result.best_move);
        println!("Nodes searched: {}", result.nodes);
        assert_eq!(result.depth, 3);
        assert!(result.nodes > 0);
        // 搜索不得改变局面
        assert_eq!(Fen::to_string(&pos), before);
        assert!(pos.move_history.is_empty());
    }

    #[test]
    fn test_depth_one_matches_static_eval() {
        let mut pos = Position::initial();
        let result = engine(1).find_best_move(&mut pos).unwrap();

        // 深度 1 的分值等于走完最佳着之后的静态评估
        // （开局没有吃子和将军，静态搜索直接返回 stand-pat）
        let mut after = pos.clone();
        Rules::apply_move(&mut after, &result.best_move).unwrap();
        assert_eq!(result.score, Evaluator::evaluate(&after));
    }

    #[test]
    fn test_finds_mate_in_one() {
        // 底线杀：Ra8#
        let mut pos = Fen::parse("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let result = engine(3).find_best_move(&mut pos).unwrap();

        assert_eq!(result.best_move.uci(), "a1a8");
        assert!(result.score > MATE_SCORE, "将死分值应超过基准");
    }

    #[test]
    fn test_captures_hanging_queen() {
        let mut pos = Fen::parse("q3k3/8/8/8/8/8/Q7/4K3 w - - 0 1").unwrap();
        let result = engine(3).find_best_move(&mut pos).unwrap();

        assert_eq!(result.best_move.uci(), "a2a8");
    }

    #[test]
    fn test_avoids_losing_queen_for_pawn() {
        // e5 兵有 d6 兵保护，吃兵丢后
        let mut pos = Fen::parse("4k3/8/3p4/4p3/8/8/4Q3/4K3 w - - 0 1").unwrap();
        let result = engine(2).find_best_move(&mut pos).unwrap();

        assert_ne!(result.best_move.uci(), "e2e5");
    }

    #[test]
    fn test_no_moves_returns_none() {
        // 黑方被困毙
        let mut pos = Fen::parse("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(engine(3).find_best_move(&mut pos).is_none());
    }

    #[test]
    fn test_opening_book_hit() {
        let mut pos = Position::initial();
        let mut engine = SearchEngine::from_difficulty(Difficulty::Hard);

        let result = engine.find_best_move(&mut pos).unwrap();
        assert_eq!(result.best_move.uci(), "e2e4");
        assert_eq!(result.depth, 0);
        assert!(pos.move_history.is_empty());
    }

    #[test]
    fn test_zero_time_budget_still_moves() {
        let mut pos = Position::initial();
        let mut engine = SearchEngine::new(SearchConfig {
            max_depth: 4,
            time_limit_ms: Some(0),
            use_opening_book: false,
        });

        // 预算耗尽时退回第一个合法走法
        let result = engine.find_best_move(&mut pos).unwrap();
        assert_eq!(result.depth, 0);
        assert_eq!(Fen::to_string(&pos), chess_core::INITIAL_FEN);
    }

    #[test]
    fn test_quiescence_respects_deadline() {
        // 有吃子可延伸的局面，预算耗尽时静态搜索也必须立即放弃
        let fen = "q3k3/8/8/8/8/8/Q7/4K3 w - - 0 1";
        let mut pos = Fen::parse(fen).unwrap();
        let mut engine = engine(1);

        let expired = Some(Instant::now());
        let result = engine.quiescence(&mut pos, i32::MIN + 1, i32::MAX - 1, 0, expired);

        assert!(result.is_none());
        assert_eq!(Fen::to_string(&pos), fen);
        assert!(pos.move_history.is_empty());
    }

    #[test]
    fn test_difficulty_config() {
        let easy = SearchConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.max_depth, 3);
        assert_eq!(easy.time_limit_ms, Some(1000));
        assert!(!easy.use_opening_book);

        let medium = SearchConfig::from_difficulty(Difficulty::Medium);
        assert_eq!(medium.max_depth, 4);

        let hard = SearchConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.max_depth, 6);
        assert!(hard.use_opening_book);
    }

    #[test]
    fn test_prefers_immediate_mate() {
        // 王车杀：深度内存在多条杀法，应直接选一步杀 Ra8#
        let mut pos = Fen::parse("6k1/8/6K1/8/8/8/8/R7 w - - 0 1").unwrap();
        let result = engine(4).find_best_move(&mut pos).unwrap();

        let mv = result.best_move;
        let undo = Rules::apply_move(&mut pos, &mv).unwrap();
        let mated = Rules::is_checkmate(&mut pos, chess_core::Color::Black);
        Rules::undo_move(&mut pos, &mv, undo);
        pos.move_history.pop();

        assert!(mated, "深度足够时应选择立即将死: {}", mv);
    }
}
