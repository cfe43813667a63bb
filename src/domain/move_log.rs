//! Move log: the ordered record of plies played in a game.
//!
//! This is a pure domain module. Every record caches the position it was
//! played from and the position it produced, so reading any point of the
//! game is an index lookup.

use shakmaty::{Role, Square};

use super::chess::{PieceColor, Snapshot};
use super::rules::Applied;
use super::uci::MoveInput;

/// One ply of the game. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    ply: usize,
    input: MoveInput,
    san: String,
    before: Snapshot,
    after: Snapshot,
}

impl MoveRecord {
    pub(crate) fn new(ply: usize, before: Snapshot, applied: Applied) -> Self {
        Self {
            ply,
            input: applied.input,
            san: applied.san,
            before,
            after: applied.after,
        }
    }

    /// 1-based half-move number within this log
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn from(&self) -> Square {
        self.input.from
    }

    pub fn to(&self) -> Square {
        self.input.to
    }

    pub fn promotion(&self) -> Option<Role> {
        self.input.promotion
    }

    pub fn input(&self) -> MoveInput {
        self.input
    }

    /// Standard algebraic notation, with check/mate suffix
    pub fn san(&self) -> &str {
        &self.san
    }

    pub fn uci(&self) -> String {
        self.input.to_string()
    }

    pub fn before(&self) -> &Snapshot {
        &self.before
    }

    pub fn after(&self) -> &Snapshot {
        &self.after
    }

    /// Get the move number (1-based, for display)
    /// Returns (move_number, is_black_move)
    pub fn move_number(&self) -> (u32, bool) {
        (
            self.before.fullmove_number(),
            self.before.side_to_move() == PieceColor::Black,
        )
    }
}

/// Ordered move records plus the position the game started from.
///
/// Invariant: `records[i].before == records[i - 1].after`, and
/// `records[0].before == initial`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveLog {
    initial: Snapshot,
    records: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            initial,
            records: Vec::new(),
        }
    }

    pub fn initial(&self) -> &Snapshot {
        &self.initial
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position after `ply` half-moves; ply 0 is the initial position.
    pub fn position_at(&self, ply: usize) -> Option<&Snapshot> {
        match ply {
            0 => Some(&self.initial),
            n => self.records.get(n - 1).map(MoveRecord::after),
        }
    }

    /// The position the next appended move is played from
    pub fn end_position(&self) -> &Snapshot {
        self.records.last().map_or(&self.initial, MoveRecord::after)
    }

    /// Append a move played from the end position.
    pub(crate) fn push(&mut self, applied: Applied) {
        let before = self.end_position().clone();
        let ply = self.records.len() + 1;
        self.records.push(MoveRecord::new(ply, before, applied));
    }

    /// Drop every record after the first `ply` plies.
    pub(crate) fn truncate(&mut self, ply: usize) {
        self.records.truncate(ply);
    }

    pub(crate) fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    /// How many times the position after `ply` plies has occurred up to and
    /// including that ply, counting the initial position.
    pub fn repetitions_at(&self, ply: usize) -> usize {
        let Some(target) = self.position_at(ply) else {
            return 0;
        };
        let key = target.repetition_key();
        (0..=ply)
            .filter_map(|p| self.position_at(p))
            .filter(|pos| pos.repetition_key() == key)
            .count()
    }

    /// UCI text of every move, in order
    pub fn uci_moves(&self) -> Vec<String> {
        self.records.iter().map(MoveRecord::uci).collect()
    }
}

impl Default for MoveLog {
    fn default() -> Self {
        Self::new(Snapshot::standard())
    }
}
