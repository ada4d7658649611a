//! Engine abstraction layer used by the UCI subsystem.
//!
//! Defines common input parameters and output payloads so the engine
//! strategies can be selected at runtime behind one trait interface.

use crate::errors::EngineResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

/// Parsed `go` parameters. Clock fields are accepted as configuration but
/// only `depth` is enforced; there is no in-flight time cutoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
    pub infinite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub score: Option<f64>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Pick a move for the side to move. A game-over position yields an
    /// output with no best move rather than an error, so the protocol
    /// layer can answer `bestmove 0000`.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput>;
}
