use gamenav::{Error, GameRecord, GameSession, MoveInput, SessionConfig, Snapshot};

const RUY_LOPEZ: [&str; 10] = [
    "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "e1g1", "f8e7",
];

fn inputs(moves: &[&str]) -> Vec<MoveInput> {
    moves.iter().map(|m| m.parse().unwrap()).collect()
}

fn start_fen() -> String {
    Snapshot::standard().fen().to_string()
}

#[test]
fn pointer_follows_every_applied_move() {
    let mut session = GameSession::new();
    for (n, mv) in RUY_LOPEZ.iter().enumerate() {
        session.play_uci(mv).unwrap();
        assert_eq!(session.current_index(), Some(n));
        assert_eq!(session.current_position(), session.export_sequence()[n].after());
    }
    assert_eq!(session.export_sequence()[8].san(), "O-O");
}

#[test]
fn reference_game_navigation_and_undo() {
    let mut session = GameSession::new();
    for mv in ["e2e4", "e7e5", "g1f3"] {
        session.play_uci(mv).unwrap();
    }
    assert_eq!(session.export_sequence().len(), 3);

    session.go_to(1).unwrap();
    let only_e4 = GameSession::from_record(
        &GameRecord {
            initial_fen: start_fen(),
            moves: vec!["e2e4".to_string()],
            metadata: Default::default(),
        },
        SessionConfig::default(),
    )
    .unwrap();
    assert_eq!(session.current_position(), only_e4.current_position());

    session.go_to_end();
    session.undo().unwrap();
    assert_eq!(session.export_sequence().len(), 2);
    assert_eq!(session.current_position(), session.export_sequence()[1].after());
    assert_eq!(session.export_sequence()[1].san(), "e5");
}

#[test]
fn export_then_load_reproduces_the_log() {
    let mut original = GameSession::new();
    for mv in RUY_LOPEZ {
        original.play_uci(mv).unwrap();
    }
    original.go_to(4).unwrap();

    let exported: Vec<MoveInput> = original.export_sequence().iter().map(|r| r.input()).collect();
    let mut fresh = GameSession::new();
    fresh
        .load_from_sequence(original.initial_position().fen(), &exported)
        .unwrap();

    assert_eq!(fresh.log(), original.log());
    original.go_to_end();
    fresh.go_to_end();
    assert_eq!(fresh.current_position(), original.current_position());
}

#[test]
fn go_to_end_twice_equals_once() {
    let mut session = GameSession::new();
    for mv in &RUY_LOPEZ[..4] {
        session.play_uci(mv).unwrap();
    }
    session.go_to_start();
    session.go_to_end();
    let once = (session.current_ply(), session.current_fen().to_string());
    session.go_to_end();
    assert_eq!((session.current_ply(), session.current_fen().to_string()), once);
}

#[test]
fn branching_discards_the_tail_for_good() {
    let mut session = GameSession::new();
    for mv in RUY_LOPEZ {
        session.play_uci(mv).unwrap();
    }
    let tail: Vec<Snapshot> = session.export_sequence()[4..]
        .iter()
        .map(|r| r.after().clone())
        .collect();

    // back to the position after ...Nc6, then a different fifth ply
    session.go_to(4).unwrap();
    session.play_uci("f1c4").unwrap();
    assert_eq!(session.len(), 5);

    for ply in 0..=session.len() {
        session.go_to(ply).unwrap();
        assert!(!tail.contains(session.current_position()));
    }
    assert!(matches!(
        session.go_to(6),
        Err(Error::InvalidIndex { ply: 6, len: 5 })
    ));
}

#[test]
fn boundaries_never_move_the_pointer() {
    let mut session = GameSession::new();
    assert!(!session.previous());
    assert!(!session.next());
    session.play_uci("e2e4").unwrap();
    let end = session.current_fen().to_string();
    assert!(!session.next());
    assert_eq!(session.current_fen(), end);
    session.go_to_start();
    assert!(!session.previous());
    assert_eq!(session.current_position(), session.initial_position());
}

#[test]
fn illegal_ply_in_import_leaves_session_untouched() {
    let mut session = GameSession::new();
    for mv in ["d2d4", "d7d5", "c2c4"] {
        session.play_uci(mv).unwrap();
    }
    session.go_to(1).unwrap();
    let log_before = session.log().clone();
    let ply_before = session.current_ply();

    let mut moves = RUY_LOPEZ;
    moves[4] = "f1b6"; // bishop cannot reach b6
    let err = session
        .load_from_sequence(&start_fen(), &inputs(&moves))
        .unwrap_err();

    match err {
        Error::MalformedSequence { ply, notation, .. } => {
            assert_eq!(ply, 5);
            assert_eq!(notation, "f1b6");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(session.log(), &log_before);
    assert_eq!(session.current_ply(), ply_before);
}

#[test]
fn json_record_survives_a_round_trip() {
    let mut session = GameSession::new();
    for mv in RUY_LOPEZ {
        session.play_uci(mv).unwrap();
    }
    let json = serde_json::to_string(&session.record(Default::default())).unwrap();
    let record: GameRecord = serde_json::from_str(&json).unwrap();
    let restored = GameSession::from_record(&record, SessionConfig::default()).unwrap();
    assert_eq!(restored.log(), session.log());
    assert_eq!(restored.current_ply(), RUY_LOPEZ.len());
}
