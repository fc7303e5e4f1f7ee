use crate::error::OracleError;
use crate::game::{check_winner, Board, Cell, Symbol, ROWS};

use super::oracle::{Oracle, OracleRequest};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Symbol) -> f64;
}

/// Default heuristic that scans all 4-cell windows and scores threats.
pub struct ConnectFourHeuristic;

impl ConnectFourHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> f64 {
        if own == 3 && empty == 1 {
            50.0
        } else if own == 2 && empty == 2 {
            10.0
        } else if opp == 3 && empty == 1 {
            -80.0
        } else if opp == 2 && empty == 2 {
            -10.0
        } else {
            0.0
        }
    }
}

impl Heuristic for ConnectFourHeuristic {
    fn evaluate(&self, board: &Board, player: Symbol) -> f64 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let mut score = 0.0;

        // Center column bonus
        for row in 0..ROWS {
            let cell = board.get(row, 3);
            if cell == own_cell {
                score += 3.0;
            } else if cell == opp_cell {
                score -= 3.0;
            }
        }

        for run in Board::runs() {
            let (mut own, mut opp, mut empty) = (0, 0, 0);
            for (r, c) in run {
                match board.get(r, c) {
                    Cell::Empty => empty += 1,
                    cell if cell == own_cell => own += 1,
                    _ => opp += 1,
                }
            }
            score += Self::score_window(own, opp, empty);
        }

        score
    }
}

/// Column ordering: center-first for better alpha-beta pruning.
const MOVE_ORDER: [usize; 7] = [3, 2, 4, 1, 5, 0, 6];

const WIN_SCORE: f64 = 100_000.0;

/// Oracle backed by a depth-limited negamax search with alpha-beta pruning.
pub struct NegamaxOracle {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl NegamaxOracle {
    pub fn new(depth: usize) -> Self {
        NegamaxOracle {
            depth: depth.max(1),
            heuristic: Box::new(ConnectFourHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        NegamaxOracle {
            depth: depth.max(1),
            heuristic,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Best column for `player`, or `None` on a full board.
    pub fn best_move(&self, board: &Board, player: Symbol) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        let mut alpha = f64::NEG_INFINITY;

        for col in MOVE_ORDER {
            let Some(score) = self.score_move(board, player, col, self.depth, alpha, f64::INFINITY)
            else {
                continue;
            };
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((col, score));
            }
            alpha = alpha.max(score);
        }

        best.map(|(col, _)| col)
    }

    /// Score of `player` dropping into `col`, or `None` if the column is full.
    /// Faster wins score higher.
    fn score_move(
        &self,
        board: &Board,
        player: Symbol,
        col: usize,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> Option<f64> {
        let mut next = *board;
        next.drop_piece(col, player).ok()?;
        if check_winner(&next, player) {
            return Some(WIN_SCORE + depth as f64);
        }
        Some(-self.negamax(&next, player.other(), depth - 1, -beta, -alpha))
    }

    /// Value of `board` for `player`, who is about to move.
    fn negamax(&self, board: &Board, player: Symbol, depth: usize, mut alpha: f64, beta: f64) -> f64 {
        if board.is_full() {
            return 0.0;
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, player);
        }

        let mut best = f64::NEG_INFINITY;
        for col in MOVE_ORDER {
            let Some(score) = self.score_move(board, player, col, depth, alpha, beta) else {
                continue;
            };
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Oracle for NegamaxOracle {
    fn name(&self) -> &str {
        "negamax"
    }

    fn propose(&mut self, request: &OracleRequest) -> Result<String, OracleError> {
        self.best_move(&request.board, request.to_move)
            .map(|col| col.to_string())
            .ok_or(OracleError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::random::random_column;
    use crate::ai::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Play columns alternately starting with X.
    fn play(columns: &[usize]) -> Board {
        let mut board = Board::new();
        for (ply, &col) in columns.iter().enumerate() {
            board.drop_piece(col, Symbol::for_ply(ply)).unwrap();
        }
        board
    }

    // --- Heuristic tests ---

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        let h = ConnectFourHeuristic;
        assert_eq!(h.evaluate(&board, Symbol::X), 0.0);
        assert_eq!(h.evaluate(&board, Symbol::O), 0.0);
    }

    #[test]
    fn heuristic_center_preference() {
        let h = ConnectFourHeuristic;
        let board_center = play(&[3]);
        let board_edge = play(&[0]);

        let score_center = h.evaluate(&board_center, Symbol::X);
        let score_edge = h.evaluate(&board_edge, Symbol::X);
        assert!(
            score_center > score_edge,
            "Center ({score_center}) should score higher than edge ({score_edge})"
        );
    }

    #[test]
    fn heuristic_three_in_a_row_scores_high() {
        let h = ConnectFourHeuristic;
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Symbol::X).unwrap();
        }
        let score = h.evaluate(&board, Symbol::X);
        assert!(score > 40.0, "3-in-a-row should score high, got {score}");
    }

    // --- Search tests ---

    #[test]
    fn selects_legal_column() {
        let oracle = NegamaxOracle::new(4);
        let col = oracle.best_move(&Board::new(), Symbol::X).unwrap();
        assert!(col < 7);
    }

    #[test]
    fn takes_winning_move() {
        // X stacks three in column 0; O scatters.
        let board = play(&[0, 1, 0, 2, 0, 6]);
        let oracle = NegamaxOracle::new(4);
        assert_eq!(oracle.best_move(&board, Symbol::X), Some(0));
    }

    #[test]
    fn blocks_opponent_win() {
        // O holds bottom 0,1,2 and threatens 3.
        let board = play(&[6, 0, 6, 1, 5, 2]);
        let oracle = NegamaxOracle::new(4);
        assert_eq!(oracle.best_move(&board, Symbol::X), Some(3));
    }

    #[test]
    fn prefers_win_over_block() {
        // Both X (bottom) and O (second row) threaten column 3; X moves.
        let board = play(&[0, 0, 1, 1, 2, 2]);
        let oracle = NegamaxOracle::new(2);
        assert_eq!(oracle.best_move(&board, Symbol::X), Some(3));
    }

    #[test]
    fn full_board_yields_empty_reply() {
        let mut board = Board::new();
        for col in 0..7 {
            for _ in 0..6 {
                board.drop_piece(col, Symbol::X).unwrap();
            }
        }
        let mut oracle = NegamaxOracle::new(3);
        let request = OracleRequest {
            board,
            legal: vec![],
            to_move: Symbol::O,
            difficulty: Difficulty::Hard,
        };
        assert!(matches!(oracle.propose(&request), Err(OracleError::EmptyReply)));
    }

    /// Rewards pieces in column 1 and nothing else.
    struct LeftEdge;

    impl Heuristic for LeftEdge {
        fn evaluate(&self, board: &Board, player: Symbol) -> f64 {
            (0..6)
                .map(|row| match board.get(row, 0) {
                    Cell::Empty => 0.0,
                    cell if cell == player.to_cell() => 10.0,
                    _ => -10.0,
                })
                .sum()
        }
    }

    #[test]
    fn custom_heuristic_steers_the_search() {
        let board = Board::new();
        assert_eq!(NegamaxOracle::new(1).best_move(&board, Symbol::X), Some(3));

        let oracle = NegamaxOracle::with_heuristic(1, Box::new(LeftEdge));
        assert_eq!(oracle.depth(), 1);
        assert_eq!(oracle.best_move(&board, Symbol::X), Some(0));
    }

    #[test]
    fn depth_is_at_least_one() {
        assert_eq!(NegamaxOracle::new(0).depth(), 1);
    }

    // --- Integration tests ---

    #[test]
    fn beats_random_play() {
        let games_per_side = 8;
        let mut wins = 0;
        let mut rng = StdRng::seed_from_u64(42);
        let oracle = NegamaxOracle::new(3);

        for game in 0..games_per_side * 2 {
            let oracle_symbol = if game % 2 == 0 { Symbol::X } else { Symbol::O };
            let mut board = Board::new();
            let mut ply = 0;
            loop {
                let to_move = Symbol::for_ply(ply);
                let col = if to_move == oracle_symbol {
                    oracle.best_move(&board, to_move)
                } else {
                    random_column(&board.legal_columns(), &mut rng)
                };
                let Some(col) = col else { break };
                board.drop_piece(col, to_move).unwrap();
                if check_winner(&board, to_move) {
                    if to_move == oracle_symbol {
                        wins += 1;
                    }
                    break;
                }
                ply += 1;
            }
        }

        let total = games_per_side * 2;
        assert!(
            wins * 10 > total * 8,
            "Negamax should beat random >80% of the time, got {wins}/{total}"
        );
    }
}
