//! WASM bindings for vertex-core
//!
//! Provides a JavaScript-friendly API for the game rules.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::{initialize_with_rng, Cell, GameConfig, GameState};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game. `seed` drives blocker placement.
    #[wasm_bindgen(constructor)]
    pub fn new(board_size: u8, with_blockers: bool, seed: u64) -> Result<WasmGame, JsError> {
        let config = GameConfig::new(board_size, with_blockers);
        let inner = initialize_with_rng(&config, &mut StdRng::seed_from_u64(seed))?;
        Ok(WasmGame { inner })
    }

    /// Full state as a plain JS object (camelCase fields)
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(Into::into)
    }

    /// Current player (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player as u8
    }

    /// Winner: 0 (none), 1 (P1), or 2 (P2)
    pub fn winner(&self) -> u8 {
        self.inner.winner.map_or(0, |p| p as u8)
    }

    /// Legal destinations as a flat array [row, col, row, col, ...]
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<i32> {
        self.inner
            .legal_moves()
            .into_iter()
            .flat_map(|cell| [cell.row, cell.col])
            .collect()
    }

    /// Fill the highlight cache for the side to move
    #[wasm_bindgen(js_name = showLegalMoves)]
    pub fn show_legal_moves(&mut self) {
        self.inner = self.inner.with_legal_moves();
    }

    /// Apply a move. Returns true if it was legal and applied.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, row: i32, col: i32) -> bool {
        match self.inner.try_apply_move(Cell::new(row, col)) {
            Ok(next) => {
                self.inner = next;
                true
            }
            Err(_) => false,
        }
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame {
            inner: self.inner.clone(),
        }
    }
}
