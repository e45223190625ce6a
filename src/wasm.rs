//! WASM bindings for tictactoe-core
//!
//! Provides a JavaScript-friendly API for the game logic. The RNG behind
//! the easy difficulty is seeded by the caller so wasm builds need no OS
//! entropy source.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::ai::{self, Difficulty};
use crate::game::{Game, GameStatus};
use crate::{BoardSize, Mark, Pos};

/// WASM-friendly wrapper around a game session
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
    rng: SmallRng,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game. `size` must be 3, 4, or 5; `seed` feeds the
    /// AI's random source (pass e.g. `Date.now()`).
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8, seed: u64) -> Result<WasmGame, JsValue> {
        let size = BoardSize::from_u8(size)
            .ok_or_else(|| JsValue::from_str("board size must be 3, 4, or 5"))?;
        Ok(WasmGame {
            inner: Game::new(size),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Board side length
    #[wasm_bindgen(js_name = boardSize)]
    pub fn board_size(&self) -> u8 {
        self.inner.board().size().n()
    }

    /// Whose turn it is: "X" or "O"
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> String {
        self.inner.current_player().to_string()
    }

    /// Check whether a move would be accepted
    #[wasm_bindgen(js_name = isValidMove)]
    pub fn is_valid_move(&self, row: u8, col: u8) -> bool {
        !self.inner.is_over() && self.inner.board().is_valid_move(row, col)
    }

    /// Play the current player's mark. Returns true if the move was accepted.
    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, row: u8, col: u8) -> bool {
        self.inner.play(row, col).is_ok()
    }

    /// Choose a move for the computer (O) as a `{row, col}` object, or null
    /// on a finished or full board. Does not apply the move - call
    /// `makeMove` with the result.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self, difficulty: &str) -> JsValue {
        let pos = if self.inner.is_over() {
            None
        } else {
            let difficulty = Difficulty::from_label(difficulty);
            ai::choose_move(self.inner.board(), difficulty, &mut self.rng)
        };
        serde_wasm_bindgen::to_value(&pos).unwrap()
    }

    /// Check for a winner as `{winner, line: {kind, index}}`, or null
    #[wasm_bindgen(js_name = checkWinner)]
    pub fn check_winner(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.board().check_winner()).unwrap()
    }

    /// Get the winning line as flat coordinates [row, col, row, col, ...]
    /// Returns an empty array if no winner
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<u8> {
        if let GameStatus::Won(win) = self.inner.status() {
            return win
                .line
                .cells(self.inner.board().size())
                .flat_map(|pos| [pos.row, pos.col])
                .collect();
        }
        vec![]
    }

    /// Check if the game ended in a draw
    #[wasm_bindgen(js_name = isDraw)]
    pub fn is_draw(&self) -> bool {
        *self.inner.status() == GameStatus::Draw
    }

    /// Check if the game is over (won or drawn)
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_over()
    }

    /// All empty cells as a JSON array of `{row, col}` objects
    #[wasm_bindgen(js_name = availableMoves)]
    pub fn available_moves(&self) -> JsValue {
        let moves: Vec<Pos> = self.inner.board().available_moves().iter().collect();
        serde_wasm_bindgen::to_value(&moves).unwrap()
    }

    /// Cell content at (row, col): 0 = empty, 1 = X, 2 = O.
    /// Out-of-range coordinates read as empty.
    #[wasm_bindgen(js_name = cellAt)]
    pub fn cell_at(&self, row: u8, col: u8) -> u8 {
        let board = self.inner.board();
        let n = board.size().n();
        if row >= n || col >= n {
            return 0;
        }
        board.mark_at(Pos::new(row, col)).map_or(0, |mark| mark as u8)
    }

    /// Get game status: "ongoing", "x_wins", "o_wins", or "draw"
    pub fn status(&self) -> String {
        match self.inner.status() {
            GameStatus::InProgress => "ongoing".to_string(),
            GameStatus::Won(win) => match win.winner {
                Mark::X => "x_wins".to_string(),
                Mark::O => "o_wins".to_string(),
            },
            GameStatus::Draw => "draw".to_string(),
        }
    }

    /// Wipe the board for a rematch on the same size
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
