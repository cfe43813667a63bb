//! Rules-engine binding: resolving candidate moves against `shakmaty` legal
//! moves, playing them, and classifying terminal positions.

use shakmaty::san::San;
use shakmaty::{File, Move, Position, Role, Square};

use super::chess::{PieceColor, Snapshot};
use super::uci::MoveInput;
use crate::error::{Error, Result};

/// A move accepted by the rules engine together with what it produced
#[derive(Clone, Debug)]
pub struct Applied {
    /// Normalized input (castling as king-to-destination, promotion filled in)
    pub input: MoveInput,
    pub san: String,
    pub after: Snapshot,
}

/// Source square, king-destination square and promotion of a legal move.
fn endpoints(m: &Move) -> Option<(Square, Square, Option<Role>)> {
    match m {
        Move::Normal {
            from, to, promotion, ..
        } => Some((*from, *to, *promotion)),
        Move::EnPassant { from, to, .. } => Some((*from, *to, None)),
        Move::Castle { king, rook, .. } => {
            let king_dest = if rook.file() == File::H {
                Square::from_coords(File::G, rook.rank())
            } else {
                Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest, None))
        }
        Move::Put { .. } => None,
    }
}

fn matches_input(m: &Move, input: &MoveInput, auto_queen: bool) -> bool {
    let Some((from, to, promotion)) = endpoints(m) else {
        return false;
    };
    // castling may also be given king-to-rook
    let to_ok = to == input.to
        || matches!(m, Move::Castle { rook, .. } if *rook == input.to);
    if from != input.from || !to_ok {
        return false;
    }
    match (promotion, input.promotion) {
        (None, None) => true,
        (Some(p), Some(q)) => p == q,
        (Some(Role::Queen), None) => auto_queen,
        _ => false,
    }
}

/// Find the legal move `input` denotes in `position`, if any.
pub fn resolve(position: &Snapshot, input: &MoveInput, auto_queen: bool) -> Option<Move> {
    position
        .chess()
        .legal_moves()
        .into_iter()
        .find(|m| matches_input(m, input, auto_queen))
}

/// Validate and play `input`. Fails with `IllegalMove` and touches nothing
/// when the rules engine rejects it.
pub fn apply(position: &Snapshot, input: &MoveInput, auto_queen: bool) -> Result<Applied> {
    let illegal = || Error::IllegalMove {
        uci: input.to_string(),
        fen: position.fen().to_string(),
    };
    let m = resolve(position, input, auto_queen).ok_or_else(illegal)?;
    play_resolved(position, m).ok_or_else(illegal)
}

/// Resolve a SAN token (`Nf3`, `O-O`, `exd6`) in `position` and play it.
pub fn apply_san(position: &Snapshot, san: &str) -> Result<Applied> {
    let parsed: San = san
        .trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .parse()
        .map_err(|_| Error::InvalidNotation(san.to_string()))?;
    let illegal = || Error::IllegalMove {
        uci: san.to_string(),
        fen: position.fen().to_string(),
    };
    let m = parsed.to_move(position.chess()).map_err(|_| illegal())?;
    play_resolved(position, m).ok_or_else(illegal)
}

fn play_resolved(position: &Snapshot, m: Move) -> Option<Applied> {
    let (from, to, promotion) = endpoints(&m)?;
    let mut san = San::from_move(position.chess(), m.clone()).to_string();
    let next = position.chess().clone().play(m).ok()?;
    if next.is_checkmate() {
        san.push('#');
    } else if next.is_check() {
        san.push('+');
    }
    Some(Applied {
        input: MoveInput {
            from,
            to,
            promotion,
        },
        san,
        after: Snapshot::from_chess(next),
    })
}

/// How the game stands at a position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Checkmate { winner: PieceColor },
    Stalemate,
    InsufficientMaterial,
}

impl GameOutcome {
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameOutcome::Stalemate | GameOutcome::InsufficientMaterial
        )
    }

    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }

    /// PGN result tag
    pub fn result_tag(self) -> &'static str {
        match self {
            GameOutcome::Ongoing => "*",
            GameOutcome::Checkmate {
                winner: PieceColor::White,
            } => "1-0",
            GameOutcome::Checkmate {
                winner: PieceColor::Black,
            } => "0-1",
            _ => "1/2-1/2",
        }
    }
}

/// Classify `position`. Only positions the rules end by themselves count;
/// repetition and the fifty-move rule are claims, see [`DrawClaim`].
pub fn classify(position: &Snapshot) -> GameOutcome {
    let chess = position.chess();
    if chess.is_checkmate() {
        GameOutcome::Checkmate {
            winner: position.side_to_move().other(),
        }
    } else if chess.is_stalemate() {
        GameOutcome::Stalemate
    } else if chess.is_insufficient_material() {
        GameOutcome::InsufficientMaterial
    } else {
        GameOutcome::Ongoing
    }
}

/// A draw the side to move may claim; the game goes on unless it is claimed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawClaim {
    ThreefoldRepetition,
    /// A hundred plies without a capture or pawn move
    FiftyMoves,
}

/// Claimable draw at `position`; `repetitions` is how often its repetition
/// key has occurred in the game so far, itself included.
pub fn draw_claim(position: &Snapshot, repetitions: usize) -> Option<DrawClaim> {
    if repetitions >= 3 {
        Some(DrawClaim::ThreefoldRepetition)
    } else if position.halfmove_clock() >= 100 {
        Some(DrawClaim::FiftyMoves)
    } else {
        None
    }
}
