//! Application layer: the game session façade and what it hands to
//! collaborators.

pub mod analysis;
pub mod config;
pub mod game;
pub mod pgn;
pub mod record;
pub mod shared;

pub use analysis::AnalysisRequest;
pub use config::{SessionConfig, UndoPolicy};
pub use game::{GameSession, MoveListEntry, OpeningSummary};
pub use pgn::export_pgn;
pub use record::{GameMetadata, GameRecord};
pub use shared::{SessionView, SharedSession};
