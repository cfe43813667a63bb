//! Command-line replay of a stored game.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use gamenav::models::MoveListEntry;
use gamenav::{GameRecord, GameSession, SessionConfig};

/// What to print for the displayed position
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Fen,
    Board,
    Moves,
    Pgn,
    Analysis,
}

#[derive(Debug, Parser)]
#[command(version, about = "Replay and navigate a stored chess game")]
pub struct Cli {
    /// Game record (JSON). Without it the game starts empty.
    pub record: Option<PathBuf>,

    /// Session configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ply to display; 0 is the starting position. Defaults to the last ply.
    #[arg(long)]
    pub ply: Option<usize>,

    /// Moves (UCI) to play from the displayed position
    #[arg(long = "play", value_name = "MOVE")]
    pub play: Vec<String>,

    #[arg(long, value_enum, default_value_t = Output::Fen)]
    pub output: Output,

    /// Print the JSON schema of game records and exit
    #[arg(long)]
    pub schema: bool,
}

fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let Some(path) = &cli.config else {
        return Ok(SessionConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    SessionConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_session(cli: &Cli, config: SessionConfig) -> Result<(GameSession, GameRecord)> {
    let Some(path) = &cli.record else {
        let session = GameSession::with_config(config);
        let record = session.record(Default::default());
        return Ok((session, record));
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let record: GameRecord =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let session = GameSession::from_record(&record, config)
        .with_context(|| format!("replaying {}", path.display()))?;
    info!(moves = session.len(), "game loaded");
    Ok((session, record))
}

fn render_board(session: &GameSession) -> String {
    let view = session.current_position().board_view();
    let mut out = String::new();
    for row in 0..8 {
        out.push(char::from(b'8' - row as u8));
        for col in 0..8 {
            out.push(' ');
            out.push(view.piece_at(row, col).map_or('.', |p| p.to_char()));
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

fn render_moves(entries: &[MoveListEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let marker = if entry.is_current { '>' } else { ' ' };
        let number = if entry.is_black {
            format!("{}...", entry.move_num)
        } else {
            format!("{}.", entry.move_num)
        };
        out.push_str(&format!("{} {:>6} {:<8} {}\n", marker, number, entry.san, entry.uci));
    }
    out
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.schema {
        let schema = schemars::schema_for!(GameRecord);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let (mut session, record) = load_session(&cli, config)?;

    if let Some(ply) = cli.ply {
        session
            .go_to(ply)
            .with_context(|| format!("jumping to ply {}", ply))?;
    }
    for mv in &cli.play {
        session
            .play_uci(mv)
            .with_context(|| format!("playing {}", mv))?;
    }

    let text = match cli.output {
        Output::Fen => format!("{}\n", session.current_fen()),
        Output::Board => render_board(&session),
        Output::Moves => render_moves(&session.move_list()),
        Output::Pgn => session.to_pgn(&record.metadata),
        Output::Analysis => session.analysis_request().to_uci_lines().join("\n") + "\n",
    };
    print!("{}", text);
    Ok(())
}
