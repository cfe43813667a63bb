//! Error taxonomy for the navigation core.
//!
//! Every variant is a rejected operation: the session's (log, pointer) pair is
//! exactly what it was before the call.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested move is not legal in the position it was played from.
    #[error("illegal move {uci} in position {fen}")]
    IllegalMove { uci: String, fen: String },

    /// A navigation target outside `0..=len` plies.
    #[error("ply {ply} is out of range (log holds {len} moves)")]
    InvalidIndex { ply: usize, len: usize },

    /// An imported sequence contains an unplayable move. `ply` is 1-based.
    #[error("malformed sequence at ply {ply} ({notation}): {reason}")]
    MalformedSequence {
        ply: usize,
        notation: String,
        reason: String,
    },

    /// A position string that does not decode to a legal position.
    #[error("invalid position {fen:?}: {reason}")]
    InvalidPosition { fen: String, reason: String },

    /// Move text that cannot be parsed at all.
    #[error("invalid move notation {0:?}")]
    InvalidNotation(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
