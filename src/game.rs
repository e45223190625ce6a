//! Turn-taking session on top of the rule engine.
//!
//! [`Game`] owns the board, enforces X-first strict alternation, validates
//! moves before placing, and resolves the status after each accepted move
//! (win checked before draw). Both presentation front ends drive the same
//! session; they only translate clicks into `(row, col)` and render the
//! results.

use thiserror::Error;
use tracing::debug;

use crate::{Board, BoardSize, Mark, Pos, WinResult};

/// Where a game currently stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    /// Moves are still being accepted.
    InProgress,
    /// Somebody completed a line.
    Won(WinResult),
    /// The board filled with no winner.
    Draw,
}

/// Why a move was rejected. Nothing here is fatal; the caller decides how
/// to surface a rejected move (typically by ignoring the click).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("cell ({row}, {col}) is already taken")]
    CellTaken { row: u8, col: u8 },
    #[error("the game is already over")]
    GameOver,
}

/// One game from the first move to a win or draw.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    current: Mark,
    status: GameStatus,
}

impl Game {
    /// Start a fresh game. X always moves first.
    pub fn new(size: BoardSize) -> Game {
        Game {
            board: Board::new(size),
            current: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    /// The board as it stands.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is. After a win this stays on the winner.
    #[inline]
    pub fn current_player(&self) -> Mark {
        self.current
    }

    #[inline]
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// The win, if one has been reached.
    pub fn winner(&self) -> Option<&WinResult> {
        match &self.status {
            GameStatus::Won(win) => Some(win),
            _ => None,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Play the current player's mark at `(row, col)`.
    ///
    /// On success the status is re-resolved (win before draw) and, if the
    /// game continues, the turn passes to the other player.
    pub fn play(&mut self, row: u8, col: u8) -> Result<&GameStatus, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let n = self.board.size().n();
        if row >= n || col >= n {
            return Err(MoveError::OutOfBounds { row, col });
        }
        let pos = Pos::new(row, col);
        if !self.board.is_empty(pos) {
            return Err(MoveError::CellTaken { row, col });
        }

        let mark = self.current;
        self.board.place(pos, mark);
        debug!(row, col, %mark, "mark placed");

        if let Some(win) = self.board.check_winner() {
            debug!(winner = %win.winner, "game won");
            self.status = GameStatus::Won(win);
        } else if self.board.is_full() {
            debug!("game drawn");
            self.status = GameStatus::Draw;
        } else {
            self.current = mark.opponent();
        }

        Ok(&self.status)
    }

    /// Wipe the board for a rematch on the same size. X moves first again.
    pub fn reset(&mut self) {
        self.board.reset();
        self.current = Mark::X;
        self.status = GameStatus::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineKind, WinLine};

    #[test]
    fn test_new_game() {
        let game = Game::new(BoardSize::Three);
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(*game.status(), GameStatus::InProgress);
        assert!(!game.is_over());
        assert_eq!(game.board().mark_count(), 0);
    }

    #[test]
    fn test_turns_alternate_starting_with_x() {
        let mut game = Game::new(BoardSize::Three);
        game.play(0, 0).unwrap();
        assert_eq!(game.board().mark_at(Pos::new(0, 0)), Some(Mark::X));
        assert_eq!(game.current_player(), Mark::O);
        game.play(1, 1).unwrap();
        assert_eq!(game.board().mark_at(Pos::new(1, 1)), Some(Mark::O));
        assert_eq!(game.current_player(), Mark::X);
    }

    #[test]
    fn test_rejects_taken_cell() {
        let mut game = Game::new(BoardSize::Three);
        game.play(0, 0).unwrap();
        assert_eq!(game.play(0, 0), Err(MoveError::CellTaken { row: 0, col: 0 }));
        // The rejection burns no turn.
        assert_eq!(game.current_player(), Mark::O);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let mut game = Game::new(BoardSize::Three);
        assert_eq!(game.play(3, 0), Err(MoveError::OutOfBounds { row: 3, col: 0 }));
        assert_eq!(game.play(0, 9), Err(MoveError::OutOfBounds { row: 0, col: 9 }));
        assert_eq!(game.current_player(), Mark::X);
    }

    #[test]
    fn test_win_is_detected_and_ends_game() {
        let mut game = Game::new(BoardSize::Three);
        game.play(0, 0).unwrap(); // X
        game.play(1, 0).unwrap(); // O
        game.play(0, 1).unwrap(); // X
        game.play(1, 1).unwrap(); // O
        let status = game.play(0, 2).unwrap(); // X completes row 0
        assert_eq!(
            *status,
            GameStatus::Won(WinResult {
                winner: Mark::X,
                line: WinLine { kind: LineKind::Row, index: 0 },
            })
        );
        assert!(game.is_over());
        assert_eq!(game.winner().unwrap().winner, Mark::X);
        // The turn stays with the winner.
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.play(2, 2), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_is_detected() {
        let mut game = Game::new(BoardSize::Three);
        // X X O / O O X / X O X with no three in a line.
        for (row, col) in [
            (0, 0), // X
            (1, 1), // O
            (0, 1), // X
            (0, 2), // O
            (2, 0), // X
            (1, 0), // O
            (1, 2), // X
            (2, 1), // O
            (2, 2), // X
        ] {
            game.play(row, col).unwrap();
        }
        assert_eq!(*game.status(), GameStatus::Draw);
        assert!(game.is_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_reset_for_rematch() {
        let mut game = Game::new(BoardSize::Four);
        game.play(0, 0).unwrap();
        game.play(1, 1).unwrap();
        game.reset();
        assert_eq!(*game.status(), GameStatus::InProgress);
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.board().mark_count(), 0);
        assert_eq!(game.board().size(), BoardSize::Four);
    }

    #[test]
    fn test_move_error_messages() {
        assert_eq!(
            MoveError::CellTaken { row: 1, col: 2 }.to_string(),
            "cell (1, 2) is already taken"
        );
        assert_eq!(MoveError::GameOver.to_string(), "the game is already over");
    }
}
