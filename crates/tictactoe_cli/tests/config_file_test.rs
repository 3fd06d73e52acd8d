//! Loading `tictactoe.toml` from disk.

use std::fs;
use tempfile::tempdir;
use tictactoe_cli::{AppConfig, GameSettings};
use tictactoe_engine::{AiScheduling, EngineConfig, Mark, Side};

#[test]
fn test_from_file_reads_all_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tictactoe.toml");
    fs::write(
        &path,
        "[game]\nai_enabled = false\nfirst_mover = \"ai\"\n\n[log]\nfilter = \"debug\"\n",
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap();

    let expected = AppConfig::default().with_game(
        GameSettings::default()
            .with_ai_enabled(false)
            .with_engine(EngineConfig::default().with_first_mover(Side::Ai)),
    );
    assert_eq!(config.game(), expected.game());
    assert_eq!(config.log().filter(), "debug");
}

#[test]
fn test_partial_game_table_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    fs::write(&path, "[game]\nplayer_mark = \"o\"\n").unwrap();

    let config = AppConfig::load(Some(path.as_path())).unwrap();
    let engine = config.game().engine();

    assert!(*config.game().ai_enabled());
    assert_eq!(*engine.player_mark(), Mark::O);
    assert_eq!(*engine.first_mover(), Side::Player);
    assert_eq!(*engine.ai_scheduling(), AiScheduling::Immediate);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = AppConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();

    assert!(err.message.starts_with("Failed to read config file"), "{err}");
}
