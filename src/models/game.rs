//! Game session - the application layer for chess game state.
//!
//! `GameSession` owns the move log and the navigation cursor together and is
//! the only thing that mutates either. Every operation validates before it
//! mutates, so a rejected call leaves (log, cursor) exactly as they were.

use std::fmt;

use shakmaty::{Position, Role, Square};
use tracing::{debug, warn};

use crate::domain::rules::{self, Applied, DrawClaim, GameOutcome};
use crate::domain::{Cursor, MoveInput, MoveLog, MoveRecord, PieceColor, Snapshot};
use crate::error::{Error, Result};
use crate::models::analysis::AnalysisRequest;
use crate::models::config::{SessionConfig, UndoPolicy};

/// The main game model containing all chess game state
#[derive(Clone, Debug)]
pub struct GameSession {
    log: MoveLog,
    cursor: Cursor,
    config: SessionConfig,
}

impl GameSession {
    /// Empty game from the standard starting position
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            log: MoveLog::default(),
            cursor: Cursor::default(),
            config,
        }
    }

    /// Empty game from an arbitrary legal position
    pub fn from_fen(fen: &str, config: SessionConfig) -> Result<Self> {
        let initial = Snapshot::from_fen(fen)?;
        Ok(Self {
            log: MoveLog::new(initial),
            cursor: Cursor::default(),
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only view of the move log
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn initial_position(&self) -> &Snapshot {
        self.log.initial()
    }

    /// Get the currently viewed position
    pub fn current_position(&self) -> &Snapshot {
        self.cursor.current_position(&self.log)
    }

    pub fn current_fen(&self) -> &str {
        self.current_position().fen()
    }

    /// Plies shown; 0 is the initial position
    pub fn current_ply(&self) -> usize {
        self.cursor.ply()
    }

    /// Index of the displayed move record; `None` at the initial position
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.current_index()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.can_go_forward(&self.log)
    }

    /// Check if we're on the last ply (new moves extend the game)
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end(&self.log)
    }

    /// Navigate to a ply, following the configured index policy.
    ///
    /// Plies count moves shown: `ply == index + 1` for move-record index
    /// `index`, and ply 0 is the initial position. `go_to(1)` shows the
    /// position after the first move.
    pub fn go_to(&mut self, ply: usize) -> Result<bool> {
        self.cursor
            .go_to(&self.log, ply, self.config.index_policy)
            .inspect_err(|e| warn!(%e, "navigation rejected"))
    }

    /// Navigate by move-record index; `None` is the initial position.
    pub fn go_to_index(&mut self, index: Option<usize>) -> Result<bool> {
        self.go_to(index.map_or(0, |i| i + 1))
    }

    /// Go forward one move
    pub fn next(&mut self) -> bool {
        self.cursor.next(&self.log)
    }

    /// Go back one move
    pub fn previous(&mut self) -> bool {
        self.cursor.previous()
    }

    /// Go to the starting position
    pub fn go_to_start(&mut self) -> bool {
        self.cursor.go_to_start()
    }

    /// Go to the last move
    pub fn go_to_end(&mut self) -> bool {
        self.cursor.go_to_end(&self.log)
    }

    /// Play a move from the displayed position.
    ///
    /// When the cursor is scrubbed back, every record after it is discarded
    /// before the new move is appended. The cursor ends on the new move.
    pub fn play_move(&mut self, from: Square, to: Square, promotion: Option<Role>) -> Result<&MoveRecord> {
        self.play(MoveInput { from, to, promotion })
    }

    pub fn play(&mut self, input: MoveInput) -> Result<&MoveRecord> {
        self.ensure_playable(&input.to_string())?;
        let applied = rules::apply(self.current_position(), &input, self.config.auto_queen)
            .inspect_err(|e| warn!(%e, "move rejected"))?;
        Ok(self.commit(applied))
    }

    /// Play a move given as UCI text (`e2e4`, `e7e8q`)
    pub fn play_uci(&mut self, uci: &str) -> Result<&MoveRecord> {
        let input: MoveInput = uci.parse()?;
        self.play(input)
    }

    /// Play a move given in standard algebraic notation (`Nf3`, `O-O`)
    pub fn play_san(&mut self, san: &str) -> Result<&MoveRecord> {
        self.ensure_playable(san)?;
        let applied = rules::apply_san(self.current_position(), san)
            .inspect_err(|e| warn!(%e, "move rejected"))?;
        Ok(self.commit(applied))
    }

    /// Finished games take no further moves, so the game-over status of a
    /// displayed position never changes.
    fn ensure_playable(&self, notation: &str) -> Result<()> {
        if !self.is_game_over() {
            return Ok(());
        }
        let err = Error::IllegalMove {
            uci: notation.to_string(),
            fen: self.current_fen().to_string(),
        };
        warn!(%err, outcome = ?self.outcome(), "move after game end rejected");
        Err(err)
    }

    fn commit(&mut self, applied: Applied) -> &MoveRecord {
        let keep = self.cursor.ply();
        let dropped = self.log.len() - keep;
        if dropped > 0 {
            debug!(keep, dropped, "branching off history");
            self.log.truncate(keep);
        }
        debug!(uci = %applied.input, san = %applied.san, "move played");
        self.log.push(applied);
        self.cursor = Cursor::at_end(&self.log);
        // push just appended, so there is a last record
        &self.log.records()[self.log.len() - 1]
    }

    /// Take back the last move of the game.
    ///
    /// With `UndoPolicy::RequireEnd` this only works when the cursor is on
    /// the last ply; otherwise it returns `None` and changes nothing. With
    /// `UndoPolicy::SnapToEnd` the cursor jumps to the end first.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        if !self.is_at_end() {
            match self.config.undo_policy {
                UndoPolicy::RequireEnd => {
                    debug!(ply = self.cursor.ply(), "undo refused away from the end");
                    return None;
                }
                UndoPolicy::SnapToEnd => {
                    self.go_to_end();
                }
            }
        }
        let record = self.log.pop()?;
        self.cursor = Cursor::at_end(&self.log);
        debug!(san = record.san(), "move undone");
        Some(record)
    }

    /// Replace the whole game with `moves` played from `start_fen`.
    ///
    /// Every move is validated in order. On the first bad one the load fails
    /// with `MalformedSequence` and the session keeps its previous game.
    pub fn load_from_sequence(&mut self, start_fen: &str, moves: &[MoveInput]) -> Result<()> {
        let auto_queen = self.config.auto_queen;
        let log = build_log(start_fen, moves, |pos, mv| rules::apply(pos, mv, auto_queen))?;
        self.install(log);
        Ok(())
    }

    /// Same as `load_from_sequence`, with moves in standard algebraic notation
    pub fn load_from_san<S: AsRef<str> + fmt::Display>(&mut self, start_fen: &str, moves: &[S]) -> Result<()> {
        let log = build_log(start_fen, moves, |pos, san| rules::apply_san(pos, san.as_ref()))?;
        self.install(log);
        Ok(())
    }

    fn install(&mut self, log: MoveLog) {
        debug!(moves = log.len(), start = log.initial().fen(), "game loaded");
        self.cursor = Cursor::at_end(&log);
        self.log = log;
    }

    /// Every record of the game, regardless of the cursor
    pub fn export_sequence(&self) -> &[MoveRecord] {
        self.log.records()
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.current_position().side_to_move()
    }

    pub fn outcome(&self) -> GameOutcome {
        rules::classify(self.current_position())
    }

    /// Outcome at the last ply, wherever the cursor is
    pub fn final_outcome(&self) -> GameOutcome {
        rules::classify(self.log.end_position())
    }

    /// Draw the side to move could claim at the displayed position.
    /// Scans the history up to the cursor for repetitions.
    pub fn draw_claim(&self) -> Option<DrawClaim> {
        let ply = self.cursor.ply();
        rules::draw_claim(self.current_position(), self.log.repetitions_at(ply))
    }

    pub fn can_claim_draw(&self) -> bool {
        self.draw_claim().is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_over()
    }

    pub fn is_check(&self) -> bool {
        self.current_position().chess().is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.outcome(), GameOutcome::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.outcome() == GameOutcome::Stalemate
    }

    pub fn is_draw(&self) -> bool {
        self.outcome().is_draw()
    }

    /// PGN result of the displayed position
    pub fn result_tag(&self) -> &'static str {
        self.outcome().result_tag()
    }

    /// Get the move list for display
    pub fn move_list(&self) -> Vec<MoveListEntry> {
        let current = self.current_index();
        self.log
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let (move_num, is_black) = record.move_number();
                let after = record.after().chess();
                MoveListEntry {
                    ply: record.ply(),
                    move_num,
                    is_black,
                    san: record.san().to_string(),
                    uci: record.uci(),
                    is_check: after.is_check(),
                    is_checkmate: after.is_checkmate(),
                    is_current: current == Some(index),
                }
            })
            .collect()
    }

    /// Request for the analysis collaborator describing the displayed position
    pub fn analysis_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            fen: self.current_fen().to_string(),
            depth: self.config.analysis_depth,
            multipv: self.config.multipv,
        }
    }

    /// The first `max_plies` moves of the game and the position they reach
    pub fn opening_summary(&self, max_plies: usize) -> OpeningSummary {
        let moves: Vec<String> = self
            .log
            .records()
            .iter()
            .take(max_plies)
            .map(|r| r.san().to_string())
            .collect();
        let fen = self
            .log
            .position_at(moves.len())
            .unwrap_or_else(|| self.log.initial())
            .fen()
            .to_string();
        OpeningSummary {
            move_count: moves.len(),
            moves,
            fen,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Replay `moves` from `start_fen` into a fresh log without touching any session.
fn build_log<T: fmt::Display>(
    start_fen: &str,
    moves: &[T],
    mut step: impl FnMut(&Snapshot, &T) -> Result<Applied>,
) -> Result<MoveLog> {
    let mut log = MoveLog::new(Snapshot::from_fen(start_fen)?);
    for (index, mv) in moves.iter().enumerate() {
        let applied = step(log.end_position(), mv).map_err(|e| {
            let err = Error::MalformedSequence {
                ply: index + 1,
                notation: mv.to_string(),
                reason: e.to_string(),
            };
            warn!(%err, "load aborted");
            err
        })?;
        log.push(applied);
    }
    Ok(log)
}

/// Display data for one move in the move list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveListEntry {
    pub ply: usize,
    pub move_num: u32,
    pub is_black: bool,
    pub san: String,
    pub uci: String,
    /// Whether this move gives check
    pub is_check: bool,
    /// Whether this move gives checkmate
    pub is_checkmate: bool,
    /// Whether this move produced the displayed position
    pub is_current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpeningSummary {
    pub moves: Vec<String>,
    pub fen: String,
    pub move_count: usize,
}
