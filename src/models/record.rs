//! Persistence record: everything needed to rebuild a session exactly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::MoveInput;
use crate::error::{Error, Result};
use crate::models::config::SessionConfig;
use crate::models::game::GameSession;

/// Optional PGN header fields carried alongside a game
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GameMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// `YYYY.MM.DD`, with `??` for unknown parts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,
    /// `1-0`, `0-1`, `1/2-1/2` or `*`; derived from the game when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_elo: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black_elo: Option<u32>,
    /// ECO opening code, e.g. `B12`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
    /// e.g. `600+0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_control: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination: Option<String>,
}

/// A stored game: starting position plus moves in UCI notation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameRecord {
    pub initial_fen: String,
    pub moves: Vec<String>,
    #[serde(default)]
    pub metadata: GameMetadata,
}

impl GameRecord {
    pub fn from_session(session: &GameSession, metadata: GameMetadata) -> Self {
        Self {
            initial_fen: session.initial_position().fen().to_string(),
            moves: session.log().uci_moves(),
            metadata,
        }
    }

    /// Rebuild a session through the validating loader, cursor at the end.
    pub fn to_session(&self, config: SessionConfig) -> Result<GameSession> {
        let moves = self
            .moves
            .iter()
            .enumerate()
            .map(|(index, text)| {
                text.parse::<MoveInput>().map_err(|e| Error::MalformedSequence {
                    ply: index + 1,
                    notation: text.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let mut session = GameSession::with_config(config);
        session.load_from_sequence(&self.initial_fen, &moves)?;
        Ok(session)
    }
}

impl GameSession {
    /// Snapshot of the whole game for persistence
    pub fn record(&self, metadata: GameMetadata) -> GameRecord {
        GameRecord::from_session(self, metadata)
    }

    pub fn from_record(record: &GameRecord, config: SessionConfig) -> Result<Self> {
        record.to_session(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Snapshot;

    #[test]
    fn test_record_round_trip() {
        let mut session = GameSession::new();
        for mv in ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4"] {
            session.play_uci(mv).unwrap();
        }
        session.go_to(2).unwrap();

        let record = session.record(GameMetadata::default());
        assert_eq!(record.moves.len(), 5);

        let mut restored = GameSession::from_record(&record, SessionConfig::default()).unwrap();
        assert_eq!(restored.log(), session.log());
        session.go_to_end();
        restored.go_to_end();
        assert_eq!(restored.current_position(), session.current_position());
    }

    #[test]
    fn test_json_shape() {
        let record = GameRecord {
            initial_fen: Snapshot::standard().fen().to_string(),
            moves: vec!["e2e4".to_string()],
            metadata: GameMetadata {
                white: Some("Anderssen".to_string()),
                ..GameMetadata::default()
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["moves"][0], "e2e4");
        assert_eq!(json["metadata"]["white"], "Anderssen");
        assert!(json["metadata"].get("black").is_none());

        let parsed: GameRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_bad_notation_is_malformed() {
        let record = GameRecord {
            initial_fen: Snapshot::standard().fen().to_string(),
            moves: vec!["e2e4".to_string(), "e7-e5".to_string()],
            metadata: GameMetadata::default(),
        };
        let err = record.to_session(SessionConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedSequence { ply: 2, .. }));
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = schemars::schema_for!(GameRecord);
        let json = serde_json::to_value(&schema).unwrap();
        let props = &json["properties"];
        assert!(props.get("initial_fen").is_some());
        assert!(props.get("moves").is_some());
    }
}
