//! Thread-safe handle to a single game session.
//!
//! All mutation of one session goes through one mutex, so a reader never sees
//! a truncated log with a stale cursor.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::MoveRecord;
use crate::error::Result;
use crate::models::game::GameSession;
use crate::models::record::GameRecord;

/// Consistent read of the state the board and move list render from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionView {
    pub fen: String,
    pub ply: usize,
    pub index: Option<usize>,
    pub len: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_game_over: bool,
}

impl SessionView {
    fn of(session: &GameSession) -> Self {
        Self {
            fen: session.current_fen().to_string(),
            ply: session.current_ply(),
            index: session.current_index(),
            len: session.len(),
            can_go_back: session.can_go_back(),
            can_go_forward: session.can_go_forward(),
            is_check: session.is_check(),
            is_checkmate: session.is_checkmate(),
            is_game_over: session.is_game_over(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
}

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    // Operations validate before mutating, so a panicking holder cannot have
    // left the session half-updated.
    fn lock(&self) -> MutexGuard<'_, GameSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only closure under the lock
    pub fn with<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        f(&self.lock())
    }

    /// Run a mutating closure under the lock
    pub fn update<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn view(&self) -> SessionView {
        self.with(SessionView::of)
    }

    pub fn play_uci(&self, uci: &str) -> Result<MoveRecord> {
        self.update(|s| s.play_uci(uci).cloned())
    }

    pub fn undo(&self) -> Option<MoveRecord> {
        self.update(GameSession::undo)
    }

    pub fn go_to(&self, ply: usize) -> Result<bool> {
        self.update(|s| s.go_to(ply))
    }

    pub fn next(&self) -> bool {
        self.update(GameSession::next)
    }

    pub fn previous(&self) -> bool {
        self.update(GameSession::previous)
    }

    pub fn go_to_start(&self) -> bool {
        self.update(GameSession::go_to_start)
    }

    pub fn go_to_end(&self) -> bool {
        self.update(GameSession::go_to_end)
    }

    /// Replace the game with `record`. The replacement is built outside the
    /// lock and swapped in whole; on error nothing changes.
    pub fn load(&self, record: &GameRecord) -> Result<()> {
        let config = self.with(|s| s.config().clone());
        let fresh = record.to_session(config)?;
        *self.lock() = fresh;
        Ok(())
    }
}
