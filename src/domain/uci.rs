//! UCI move notation and analysis command rendering.
//!
//! Moves cross the collaborator boundary as long algebraic text (`e2e4`,
//! `e7e8q`). Analysis commands are only rendered here; spawning and talking
//! to an engine process is the analysis collaborator's job.

use std::fmt;
use std::str::FromStr;

use shakmaty::{Role, Square};

use crate::error::Error;

/// A candidate move as handed in by the UI or an importer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveInput {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl FromStr for MoveInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || Error::InvalidNotation(s.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let bytes = text.as_bytes();
        let from = Square::from_ascii(&bytes[0..2]).map_err(|_| invalid())?;
        let to = Square::from_ascii(&bytes[2..4]).map_err(|_| invalid())?;
        let promotion = match bytes.get(4) {
            None => None,
            Some(&c) => match Role::from_char(c.to_ascii_lowercase() as char) {
                Some(role @ (Role::Knight | Role::Bishop | Role::Rook | Role::Queen)) => Some(role),
                _ => return Err(invalid()),
            },
        };
        if from == to {
            return Err(invalid());
        }
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// UCI commands sent to an analysis engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    /// Set an engine option
    SetOption { name: String, value: String },
    /// Set position (startpos or FEN, with optional moves)
    Position { fen: Option<String>, moves: Vec<String> },
    /// Start analysis with depth limit
    GoDepth(u32),
    /// Stop analysis
    Stop,
}

impl UciCommand {
    /// Convert command to UCI protocol string
    pub fn to_uci_string(&self) -> String {
        match self {
            UciCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            UciCommand::Position { fen, moves } => {
                let mut cmd = String::from("position ");
                match fen {
                    Some(f) => {
                        cmd.push_str("fen ");
                        cmd.push_str(f);
                    }
                    None => cmd.push_str("startpos"),
                }
                if !moves.is_empty() {
                    cmd.push_str(" moves ");
                    cmd.push_str(&moves.join(" "));
                }
                cmd
            }
            UciCommand::GoDepth(d) => format!("go depth {}", d),
            UciCommand::Stop => "stop".to_string(),
        }
    }
}
