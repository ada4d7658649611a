//! UCI protocol front-end and command loop.
//!
//! `EngineSession` owns the current position and the selected engine
//! strategy, parses UCI commands, routes `go` requests, and emits
//! protocol-compliant output to a generic writer. Errors surface as
//! `info string` lines; the session never panics on bad input.

use std::io::{self, BufRead, Write};

use crate::engines::engine_alpha_beta::AlphaBetaEngine;
use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::move_generation::perft::perft_divide;
use crate::moves::move_descriptions::is_capture;
use crate::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_AUTHOR: &str = "Quince Chess developers";
const DEFAULT_SKILL_LEVEL: u8 = 5;

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = EngineSession::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct EngineSession {
    game_state: GameState,
    engine: Box<dyn Engine>,
    skill_level: u8,
    fixed_depth_override: Option<u8>,
}

impl EngineSession {
    pub fn new() -> Self {
        Self {
            game_state: GameState::new_game(),
            engine: build_engine(DEFAULT_SKILL_LEVEL),
            skill_level: DEFAULT_SKILL_LEVEL,
            fixed_depth_override: None,
        }
    }

    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Skill Level type spin default {} min 1 max 8",
                    DEFAULT_SKILL_LEVEL
                )?;
                writeln!(
                    out,
                    "option name FixedDepth type spin default 0 min 0 max 16"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "perft" => {
                let depth_text = parts.next().unwrap_or("1");
                if let Err(err) = self.handle_perft(depth_text, out) {
                    writeln!(out, "info string perft error: {}", err)?;
                }
            }
            "lm" => {
                if let Err(err) = self.write_move_list(out, false) {
                    writeln!(out, "info string lm error: {}", err)?;
                }
            }
            "ca" => {
                if let Err(err) = self.write_move_list(out, true) {
                    writeln!(out, "info string ca error: {}", err)?;
                }
            }
            "display" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
                writeln!(out, "fen {}", self.game_state.get_fen())?;
            }
            "stop" => {
                // Search runs synchronously inside `go`; nothing to stop.
            }
            "quit" | "exit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::<String>::new();
        let mut value_tokens = Vec::<String>::new();
        let mut mode = "";

        for tok in tokens {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok.to_owned()),
                _ if mode == "value" => value_tokens.push(tok.to_owned()),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Skill Level") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Skill Level value '{}'", value))?;
            self.skill_level = parsed;
            self.engine = build_engine(self.skill_level);
            self.engine.new_game();
        } else if name.eq_ignore_ascii_case("FixedDepth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid FixedDepth value '{}'", value))?;
            self.fixed_depth_override = if parsed == 0 { None } else { Some(parsed) };
        } else {
            self.engine
                .set_option(&name, &value)
                .map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().peekable();
        let _ = tokens.next(); // position

        let mut base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    let _ = tokens.next();
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                GameState::from_fen(&fen_parts.join(" ")).map_err(|e| e.to_string())?
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        if tokens.peek().copied() == Some("moves") {
            let _ = tokens.next();
            for text in tokens {
                let mv = parse_long_algebraic(text, &base_state).map_err(|e| e.to_string())?;
                make_move(&mut base_state, mv).map_err(|e| e.to_string())?;
            }
        }

        self.game_state = base_state;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let mut params = parse_go_params(line)?;
        if params.depth.is_none() {
            params.depth = self.fixed_depth_override;
        }

        let result = self
            .engine
            .choose_move(&self.game_state, &params)
            .map_err(|e| e.to_string())?;

        for info in &result.info_lines {
            writeln!(out, "{}", info).map_err(|e| e.to_string())?;
        }

        match result.best_move {
            Some(best_move) => {
                let text = move_to_long_algebraic(best_move).map_err(|e| e.to_string())?;
                writeln!(out, "bestmove {}", text).map_err(|e| e.to_string())?;
            }
            None => {
                writeln!(out, "bestmove 0000").map_err(|e| e.to_string())?;
            }
        }

        Ok(())
    }

    fn handle_perft(&self, depth_text: &str, out: &mut impl Write) -> Result<(), String> {
        let depth = depth_text
            .parse::<u8>()
            .map_err(|_| format!("invalid perft depth '{}'", depth_text))?;

        let counts = perft_divide(&self.game_state, depth).map_err(|e| e.to_string())?;

        let mut total = 0u64;
        for (mv, nodes) in &counts {
            let text = move_to_long_algebraic(*mv).map_err(|e| e.to_string())?;
            writeln!(out, "{}: {}", text, nodes).map_err(|e| e.to_string())?;
            total += nodes;
        }
        writeln!(out, "nodes {}", total).map_err(|e| e.to_string())?;

        Ok(())
    }

    fn write_move_list(&self, out: &mut impl Write, captures_only: bool) -> Result<(), String> {
        let moves = LegalMoveGenerator
            .generate_legal_moves(&self.game_state)
            .map_err(|e| e.to_string())?;

        let mut texts = Vec::with_capacity(moves.len());
        for mv in moves {
            if captures_only && !is_capture(mv) {
                continue;
            }
            texts.push(move_to_long_algebraic(mv).map_err(|e| e.to_string())?);
        }

        writeln!(out, "{}", texts.join(" ")).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl Default for EngineSession {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_go_params(line: &str) -> Result<GoParams, String> {
    let mut params = GoParams::default();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut i = 0usize;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                params.depth = tokens.get(i).and_then(|x| x.parse::<u8>().ok());
            }
            "movetime" => {
                i += 1;
                params.movetime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "wtime" => {
                i += 1;
                params.wtime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "btime" => {
                i += 1;
                params.btime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "winc" => {
                i += 1;
                params.winc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "binc" => {
                i += 1;
                params.binc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "movestogo" => {
                i += 1;
                params.movestogo = tokens.get(i).and_then(|x| x.parse::<u16>().ok());
            }
            "infinite" => {
                params.infinite = true;
            }
            _ => {}
        }
        i += 1;
    }

    Ok(params)
}

fn build_engine(skill_level: u8) -> Box<dyn Engine> {
    match skill_level {
        1 => Box::new(RandomEngine::new()),
        2 => Box::new(GreedyEngine::new()),
        3 => Box::new(MinimaxEngine::new(2)),
        4 => Box::new(MinimaxEngine::new(3)),
        5 => Box::new(AlphaBetaEngine::new(3)),
        6 => Box::new(AlphaBetaEngine::new(4)),
        7 => Box::new(AlphaBetaEngine::new(5)),
        _ => Box::new(AlphaBetaEngine::new(6)),
    }
}

#[cfg(test)]
mod tests {
    use super::EngineSession;
    use crate::game_state::chess_types::Color;

    fn run(session: &mut EngineSession, line: &str) -> String {
        let mut out = Vec::<u8>::new();
        session
            .handle_command(line, &mut out)
            .expect("command should not fail on io");
        String::from_utf8(out).expect("output should be utf8")
    }

    #[test]
    fn uci_handshake_identifies_the_engine() {
        let mut session = EngineSession::new();

        let out = run(&mut session, "uci");
        assert!(out.contains("id name "));
        assert!(out.ends_with("uciok\n"));

        let out = run(&mut session, "isready");
        assert_eq!(out, "readyok\n");
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut session = EngineSession::new();
        let out = run(&mut session, "position startpos moves e2e4 e7e5 g1f3");

        assert!(out.is_empty());
        assert_eq!(session.game_state.side_to_move, Color::Black);
        assert_eq!(session.game_state.fullmove_number, 2);
    }

    #[test]
    fn position_fen_round_trips_through_display() {
        let mut session = EngineSession::new();
        let fen = "8/8/8/8/8/8/4P3/4K2k w - - 0 1";

        let out = run(&mut session, &format!("position fen {fen}"));
        assert!(out.is_empty());
        assert_eq!(session.game_state.get_fen(), fen);

        let display = run(&mut session, "display");
        assert!(display.contains(&format!("fen {fen}")));
    }

    #[test]
    fn illegal_move_text_reports_an_error_and_keeps_state() {
        let mut session = EngineSession::new();
        let out = run(&mut session, "position startpos moves e9e4");

        assert!(out.contains("info string position error"));
        assert_eq!(session.game_state, crate::game_state::game_state::GameState::new_game());
    }

    #[test]
    fn go_on_a_mated_position_answers_null_move() {
        let mut session = EngineSession::new();
        run(
            &mut session,
            "position fen 4R1k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
        );

        let out = run(&mut session, "go depth 2");
        assert!(out.contains("bestmove 0000"));
    }

    #[test]
    fn go_depth_produces_a_best_move() {
        let mut session = EngineSession::new();
        run(&mut session, "setoption name Skill Level value 5");

        let out = run(&mut session, "go depth 2");
        assert!(out.contains("bestmove "));
        assert!(!out.contains("bestmove 0000"));
    }

    #[test]
    fn perft_divide_reports_per_move_counts_and_total() {
        let mut session = EngineSession::new();
        let out = run(&mut session, "perft 2");

        assert!(out.contains("e2e4: 20"));
        assert!(out.contains("nodes 400"));
        assert_eq!(out.lines().count(), 21);
    }

    #[test]
    fn lm_and_ca_list_moves_in_text_form() {
        let mut session = EngineSession::new();

        let lm = run(&mut session, "lm");
        assert_eq!(lm.split_whitespace().count(), 20);
        assert!(lm.contains("e2e4"));

        // No captures from the start position.
        let ca = run(&mut session, "ca");
        assert_eq!(ca.trim(), "");

        run(&mut session, "position startpos moves e2e4 d7d5");
        let ca = run(&mut session, "ca");
        assert_eq!(ca.trim(), "e4d5");
    }

    #[test]
    fn setoption_fixed_depth_sets_and_clears_the_override() {
        let mut session = EngineSession::new();
        assert_eq!(session.fixed_depth_override, None);

        run(&mut session, "setoption name FixedDepth value 4");
        assert_eq!(session.fixed_depth_override, Some(4));

        run(&mut session, "setoption name FixedDepth value 0");
        assert_eq!(session.fixed_depth_override, None);
    }

    #[test]
    fn setoption_skill_level_switches_engines() {
        let mut session = EngineSession::new();

        run(&mut session, "setoption name Skill Level value 1");
        assert_eq!(session.skill_level, 1);
        assert_eq!(session.engine.name(), "Quince Random");

        run(&mut session, "setoption name Skill Level value 3");
        assert_eq!(session.engine.name(), "Quince Minimax");
    }

    #[test]
    fn quit_terminates_the_loop() {
        let mut session = EngineSession::new();
        let mut out = Vec::<u8>::new();

        assert!(session
            .handle_command("quit", &mut out)
            .expect("quit should not fail"));
        assert!(!session
            .handle_command("isready", &mut out)
            .expect("isready should not fail"));
    }
}
