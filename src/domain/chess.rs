//! Position codec: the opaque position value and its structured board view.
//! Pure functions over `shakmaty` types, no session state.

use std::fmt;
use std::hash::{Hash, Hasher};

use shakmaty::fen::Fen;
use shakmaty::{Board, CastlingMode, Chess, Color as SColor, EnPassantMode, File, Position, Rank, Role, Square};

use crate::error::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn other(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

impl From<SColor> for PieceColor {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => PieceColor::White,
            SColor::Black => PieceColor::Black,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    /// FEN letter: uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: piece.color.into(),
    }
}

/// A complete board state at one instant.
///
/// Built only by decoding a FEN or by the rules engine playing a move. The
/// encoding is computed once on construction, and two snapshots are equal
/// exactly when their encodings are.
#[derive(Clone, Debug)]
pub struct Snapshot {
    chess: Chess,
    fen: String,
}

impl Snapshot {
    /// The standard starting position
    pub fn standard() -> Self {
        Self::from_chess(Chess::default())
    }

    /// Decode a FEN string, rejecting anything that is not a legal position.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidPosition {
            fen: fen.to_string(),
            reason,
        };
        let parsed = Fen::from_ascii(fen.trim().as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let chess: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self::from_chess(chess))
    }

    pub(crate) fn from_chess(chess: Chess) -> Self {
        let fen = Fen::from_position(&chess, EnPassantMode::Legal).to_string();
        Self { chess, fen }
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// The rules-engine position behind this snapshot
    pub fn chess(&self) -> &Chess {
        &self.chess
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.chess.turn().into()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.chess.halfmoves()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.chess.fullmoves().get()
    }

    pub fn is_standard_start(&self) -> bool {
        *self == Self::standard()
    }

    /// FEN without the two clock fields; equal keys mean a repeated position.
    pub fn repetition_key(&self) -> &str {
        match self.fen.match_indices(' ').nth(3) {
            Some((idx, _)) => &self.fen[..idx],
            None => &self.fen,
        }
    }

    pub fn board_view(&self) -> BoardView {
        BoardView::from_board(self.chess.board())
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.fen == other.fen
    }
}

impl Eq for Snapshot {}

impl Hash for Snapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fen.hash(state);
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen)
    }
}

/// Piece placement as an 8x8 grid, row 0 = rank 8, col 0 = file a.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    squares: [[Option<Piece>; 8]; 8],
}

impl BoardView {
    fn from_board(board: &Board) -> Self {
        let mut squares = [[None; 8]; 8];
        for (row, cells) in squares.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = board.piece_at(to_square(row, col)).map(shakmaty_to_piece);
            }
        }
        Self { squares }
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.squares.get(row)?.get(col).copied().flatten()
    }
}
