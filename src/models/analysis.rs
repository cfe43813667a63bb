//! Analysis request handed to the engine collaborator.
//!
//! The session only describes what to analyze. Running the engine, caching
//! results and cancelling stale requests belong to the collaborator.

use crate::domain::UciCommand;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Position to analyze
    pub fen: String,
    pub depth: u32,
    /// Number of principal variations to request
    pub multipv: u32,
}

impl AnalysisRequest {
    /// Commands to send an already initialized UCI engine, in order
    pub fn commands(&self) -> Vec<UciCommand> {
        vec![
            UciCommand::Stop,
            UciCommand::SetOption {
                name: "MultiPV".to_string(),
                value: self.multipv.to_string(),
            },
            UciCommand::Position {
                fen: Some(self.fen.clone()),
                moves: Vec::new(),
            },
            UciCommand::GoDepth(self.depth),
        ]
    }

    /// The command lines as the engine reads them
    pub fn to_uci_lines(&self) -> Vec<String> {
        self.commands().iter().map(UciCommand::to_uci_string).collect()
    }
}
