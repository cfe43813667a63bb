//! PGN export of a session's main line.

use crate::models::game::GameSession;
use crate::models::record::GameMetadata;

const LINE_WIDTH: usize = 80;

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn push_tag(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("[{} \"{}\"]\n", name, escape(value)));
}

/// Render the whole game (independent of the cursor) as PGN text.
pub fn export_pgn(session: &GameSession, metadata: &GameMetadata) -> String {
    let result = metadata
        .result
        .clone()
        .unwrap_or_else(|| session.final_outcome().result_tag().to_string());

    let mut out = String::new();
    let roster = [
        ("Event", metadata.event.as_deref().unwrap_or("?")),
        ("Site", metadata.site.as_deref().unwrap_or("?")),
        ("Date", metadata.date.as_deref().unwrap_or("????.??.??")),
        ("Round", metadata.round.as_deref().unwrap_or("?")),
        ("White", metadata.white.as_deref().unwrap_or("?")),
        ("Black", metadata.black.as_deref().unwrap_or("?")),
        ("Result", result.as_str()),
    ];
    for (name, value) in roster {
        push_tag(&mut out, name, value);
    }
    if let Some(elo) = metadata.white_elo {
        push_tag(&mut out, "WhiteElo", &elo.to_string());
    }
    if let Some(elo) = metadata.black_elo {
        push_tag(&mut out, "BlackElo", &elo.to_string());
    }
    let optional = [
        ("ECO", &metadata.eco),
        ("Opening", &metadata.opening),
        ("TimeControl", &metadata.time_control),
        ("Termination", &metadata.termination),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            push_tag(&mut out, name, value);
        }
    }
    let initial = session.initial_position();
    if !initial.is_standard_start() {
        push_tag(&mut out, "SetUp", "1");
        push_tag(&mut out, "FEN", initial.fen());
    }
    out.push('\n');

    let mut tokens = Vec::new();
    for (index, record) in session.export_sequence().iter().enumerate() {
        let (number, is_black) = record.move_number();
        if !is_black {
            tokens.push(format!("{}.", number));
        } else if index == 0 {
            tokens.push(format!("{}...", number));
        }
        tokens.push(record.san().to_string());
    }
    tokens.push(result);

    let mut line = String::new();
    for token in tokens {
        if !line.is_empty() && line.len() + 1 + token.len() > LINE_WIDTH {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    out.push_str(&line);
    out.push('\n');
    out
}

impl GameSession {
    pub fn to_pgn(&self, metadata: &GameMetadata) -> String {
        export_pgn(self, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::SessionConfig;

    #[test]
    fn test_export_standard_game() {
        let mut session = GameSession::new();
        for mv in ["e2e4", "e7e5", "g1f3"] {
            session.play_uci(mv).unwrap();
        }
        session.go_to_start();
        let metadata = GameMetadata {
            white: Some("Morphy".to_string()),
            eco: Some("C40".to_string()),
            ..GameMetadata::default()
        };
        let pgn = export_pgn(&session, &metadata);
        let expected = "[Event \"?\"]\n\
                        [Site \"?\"]\n\
                        [Date \"????.??.??\"]\n\
                        [Round \"?\"]\n\
                        [White \"Morphy\"]\n\
                        [Black \"?\"]\n\
                        [Result \"*\"]\n\
                        [ECO \"C40\"]\n\
                        \n\
                        1. e4 e5 2. Nf3 *\n";
        assert_eq!(pgn, expected);
    }

    #[test]
    fn test_export_black_to_move_start() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 1";
        let mut session = GameSession::from_fen(fen, SessionConfig::default()).unwrap();
        session.play_uci("e8d7").unwrap();
        session.play_uci("e2e4").unwrap();
        let pgn = session.to_pgn(&GameMetadata::default());
        assert!(pgn.contains("[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 1\"]\n"));
        assert!(pgn.ends_with("\n1... Kd7 2. e4 *\n"));
    }

    #[test]
    fn test_result_from_final_position() {
        let mut session = GameSession::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            session.play_uci(mv).unwrap();
        }
        session.go_to_start();
        let pgn = session.to_pgn(&GameMetadata::default());
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.ends_with("2. g4 Qh4# 0-1\n"));
    }

    #[test]
    fn test_long_games_wrap() {
        let mut session = GameSession::new();
        for _ in 0..10 {
            for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                session.play_uci(mv).unwrap();
            }
        }
        let pgn = session.to_pgn(&GameMetadata {
            result: Some("1/2-1/2".to_string()),
            ..GameMetadata::default()
        });
        let movetext = pgn.split("\n\n").nth(1).unwrap();
        assert!(movetext.lines().count() > 1);
        assert!(movetext.lines().all(|l| l.len() <= LINE_WIDTH));
    }

    #[test]
    fn test_escapes_tag_values() {
        let session = GameSession::new();
        let pgn = session.to_pgn(&GameMetadata {
            event: Some("The \"Immortal\"".to_string()),
            ..GameMetadata::default()
        });
        assert!(pgn.starts_with("[Event \"The \\\"Immortal\\\"\"]\n"));
    }
}
