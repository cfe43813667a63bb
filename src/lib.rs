//! Game-state navigation for a chess application.
//!
//! A [`GameSession`] owns the move log of one game and the pointer into it.
//! Moves are validated by `shakmaty`, every record caches the positions
//! around it, and navigation is pointer arithmetic over those records.

pub mod domain;
pub mod error;
pub mod models;

pub use domain::{GameOutcome, IndexPolicy, MoveInput, MoveLog, MoveRecord, Snapshot};
pub use error::{Error, Result};
pub use models::{GameMetadata, GameRecord, GameSession, SessionConfig, SharedSession, UndoPolicy};
