//! Pure chess domain: positions, moves, the move log and its cursor.

pub mod chess;
pub mod move_log;
pub mod navigation;
pub mod rules;
pub mod uci;

pub use chess::{BoardView, Piece, PieceColor, PieceKind, Snapshot, shakmaty_to_piece, to_square};
pub use move_log::{MoveLog, MoveRecord};
pub use navigation::{Cursor, IndexPolicy};
pub use rules::{DrawClaim, GameOutcome};
pub use uci::{MoveInput, UciCommand};
