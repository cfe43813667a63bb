//! Navigation pointer over a move log.
//!
//! The cursor counts plies: 0 is the initial position, `k` is the position
//! after the k-th move. Everything it answers is derived from
//! `(MoveLog, ply)`, and no position is ever replayed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chess::Snapshot;
use super::move_log::MoveLog;
use crate::error::{Error, Result};

/// What `go_to` does with a target past the end of the log
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// Reject with `InvalidIndex`, pointer unchanged
    #[default]
    Strict,
    /// Move to the last ply instead
    Clamp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    ply: usize,
}

impl Cursor {
    /// A cursor resting on the last ply of `log`
    pub fn at_end(log: &MoveLog) -> Self {
        Self { ply: log.len() }
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Index of the displayed move record; `None` at the initial position.
    pub fn current_index(&self) -> Option<usize> {
        self.ply.checked_sub(1)
    }

    pub fn current_position<'a>(&self, log: &'a MoveLog) -> &'a Snapshot {
        log.position_at(self.ply)
            .unwrap_or_else(|| log.end_position())
    }

    pub fn can_go_back(&self) -> bool {
        self.ply > 0
    }

    pub fn can_go_forward(&self, log: &MoveLog) -> bool {
        self.ply < log.len()
    }

    pub fn is_at_end(&self, log: &MoveLog) -> bool {
        self.ply == log.len()
    }

    /// Navigate to a specific ply. Returns whether the pointer moved.
    pub fn go_to(&mut self, log: &MoveLog, ply: usize, policy: IndexPolicy) -> Result<bool> {
        let target = if ply <= log.len() {
            ply
        } else {
            match policy {
                IndexPolicy::Strict => {
                    return Err(Error::InvalidIndex {
                        ply,
                        len: log.len(),
                    });
                }
                IndexPolicy::Clamp => log.len(),
            }
        };
        Ok(self.jump(target))
    }

    /// Go forward one move; no-op at the end
    pub fn next(&mut self, log: &MoveLog) -> bool {
        self.can_go_forward(log) && self.jump(self.ply + 1)
    }

    /// Go back one move; no-op at the start
    pub fn previous(&mut self) -> bool {
        self.can_go_back() && self.jump(self.ply - 1)
    }

    pub fn go_to_start(&mut self) -> bool {
        self.jump(0)
    }

    pub fn go_to_end(&mut self, log: &MoveLog) -> bool {
        self.jump(log.len())
    }

    fn jump(&mut self, ply: usize) -> bool {
        if ply == self.ply {
            return false;
        }
        debug!(from = self.ply, to = ply, "navigate");
        self.ply = ply;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::apply;

    fn log_of(moves: &[&str]) -> MoveLog {
        let mut log = MoveLog::default();
        for mv in moves {
            let applied = apply(log.end_position(), &mv.parse().unwrap(), true).unwrap();
            log.push(applied);
        }
        log
    }

    #[test]
    fn test_navigation() {
        let log = log_of(&["e2e4", "e7e5"]);
        let mut cursor = Cursor::at_end(&log);
        assert_eq!(cursor.current_index(), Some(1));

        assert!(cursor.previous());
        assert_eq!(cursor.current_index(), Some(0));
        assert_eq!(cursor.current_position(&log), log.records()[0].after());

        assert!(cursor.previous());
        assert_eq!(cursor.current_index(), None);
        assert_eq!(cursor.current_position(&log), log.initial());

        assert!(!cursor.previous()); // Can't go back from the start
        assert_eq!(cursor.ply(), 0);

        assert!(cursor.next(&log));
        assert_eq!(cursor.ply(), 1);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let log = log_of(&["d2d4"]);
        let mut cursor = Cursor::at_end(&log);
        let before = cursor;
        assert!(!cursor.can_go_forward(&log));
        assert!(!cursor.next(&log));
        assert_eq!(cursor, before);
    }

    #[test]
    fn test_go_to_policies() {
        let log = log_of(&["e2e4", "e7e5", "g1f3"]);
        let mut cursor = Cursor::default();

        assert_eq!(cursor.go_to(&log, 2, IndexPolicy::Strict), Ok(true));
        assert_eq!(
            cursor.go_to(&log, 4, IndexPolicy::Strict),
            Err(Error::InvalidIndex { ply: 4, len: 3 })
        );
        assert_eq!(cursor.ply(), 2);

        assert_eq!(cursor.go_to(&log, 40, IndexPolicy::Clamp), Ok(true));
        assert_eq!(cursor.ply(), 3);
        assert_eq!(cursor.go_to(&log, 3, IndexPolicy::Strict), Ok(false));
    }

    #[test]
    fn test_go_to_end_idempotent() {
        let log = log_of(&["c2c4", "c7c5"]);
        let mut cursor = Cursor::default();
        assert!(cursor.go_to_end(&log));
        let once = cursor;
        assert!(!cursor.go_to_end(&log));
        assert_eq!(cursor, once);
        assert!(cursor.go_to_start());
        assert!(!cursor.go_to_start());
    }
}
