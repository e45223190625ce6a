//! Heuristic move selection for the computer player.
//!
//! The computer always plays [`Mark::O`]; the human plays [`Mark::X`]. No
//! game-tree search: the selector applies a fixed priority chain — win,
//! block, center, corners, random — with an "easy" short-circuit that takes
//! a uniformly random move 70% of the time. Randomness comes from an
//! injected [`Rng`] so callers (and tests) control it.

use rand::Rng;
use tracing::instrument;

use crate::{Board, Mark, MoveList, Pos};

/// Probability that the easy difficulty plays a random move outright,
/// skipping the heuristic chain.
pub const EASY_RANDOM_CHANCE: f64 = 0.7;

/// Difficulty of the computer player.
///
/// Only `Easy` carries the random short-circuit. `Hard` is the plain
/// win/block/center/corner/random chain, and any unrecognized difficulty
/// label maps onto it (see [`Difficulty::from_label`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    /// Map a difficulty label to a difficulty. Anything other than
    /// `"easy"` falls through to `Hard`.
    pub fn from_label(label: &str) -> Difficulty {
        match label {
            "easy" => Difficulty::Easy,
            _ => Difficulty::Hard,
        }
    }
}

/// Choose a move for the computer (O), or None if the board is full.
///
/// Priority order:
/// 1. On easy, with probability [`EASY_RANDOM_CHANCE`]: a uniformly random
///    available move (an independent draw per call).
/// 2. The first move in scan order that wins for O.
/// 3. The first move in scan order that X would win with, to block it.
/// 4. The center cell `(⌊N/2⌋, ⌊N/2⌋)` if empty.
/// 5. The first empty corner of `(0,0), (0,N-1), (N-1,0), (N-1,N-1)`.
/// 6. A uniformly random available move.
///
/// Win/block probes run on stack copies of the board; the caller's board is
/// never mutated. Given a fixed random source the result is reproducible.
#[instrument(skip(rng))]
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Pos> {
    let moves = board.available_moves();
    if moves.is_empty() {
        return None;
    }

    if difficulty == Difficulty::Easy && rng.random_bool(EASY_RANDOM_CHANCE) {
        return Some(random_move(&moves, rng));
    }

    // Win if possible, otherwise deny the opponent's win.
    if let Some(pos) = winning_move(board, Mark::O) {
        return Some(pos);
    }
    if let Some(pos) = winning_move(board, Mark::X) {
        return Some(pos);
    }

    let center = board.size().center();
    if board.is_empty(center) {
        return Some(center);
    }

    let n = board.size().n();
    let corners = [
        Pos::new(0, 0),
        Pos::new(0, n - 1),
        Pos::new(n - 1, 0),
        Pos::new(n - 1, n - 1),
    ];
    for corner in corners {
        if board.is_empty(corner) {
            return Some(corner);
        }
    }

    Some(random_move(&moves, rng))
}

/// Find the first available move in scan order that completes a line for
/// `mark`, probing each candidate on a copy of the board.
pub fn winning_move(board: &Board, mark: Mark) -> Option<Pos> {
    for pos in board.available_moves().iter() {
        let mut probe = *board;
        probe.place(pos, mark);
        if probe.check_winner().map(|win| win.winner) == Some(mark) {
            return Some(pos);
        }
    }
    None
}

/// Pick a uniformly random move from a non-empty list.
#[inline]
fn random_move<R: Rng + ?Sized>(moves: &MoveList, rng: &mut R) -> Pos {
    moves.get(rng.random_range(0..moves.len()))
}
