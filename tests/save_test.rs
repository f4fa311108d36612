//! Tests for the save record.

use strictly_morris::SaveRecord;
use strictly_morris_rules::{Color, Game, Phase, RulesConfig, Stage};

fn mid_game() -> Game {
    let mut game = Game::new(RulesConfig::default());
    for (position, color) in [(0, Color::Blue), (8, Color::Red), (1, Color::Blue), (9, Color::Red)] {
        game.place(position, color).unwrap();
    }
    game
}

#[test]
fn test_text_layout() {
    let record = SaveRecord::new(mid_game().saved_state(), true, Some(Color::Red));
    let text = record.to_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5 + 16);
    assert_eq!(&lines[..5], ["0", "0", "false", "true", "2"]);
    assert_eq!(&lines[5..7], ["1", "1"]);
    assert_eq!(&lines[13..15], ["2", "2"]);
}

#[test]
fn test_round_trip_through_file() {
    let mut game = mid_game();
    game.place(7, Color::Blue).unwrap();
    let record = SaveRecord::new(game.saved_state(), false, None);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morris.save");
    record.store(&path).unwrap();
    let loaded = SaveRecord::load(&path).unwrap();
    assert_eq!(loaded, record);

    let (state, ai_enabled, ai_color) = loaded.into_parts();
    assert!(!ai_enabled);
    assert_eq!(ai_color, None);
    let restored = Game::restore(RulesConfig::default(), state).unwrap();
    assert_eq!(restored.phase(), Phase::Removing { resume: Stage::Placing });
    assert_eq!(restored.turn(), Color::Blue);
    assert_eq!(restored.snapshot(), game.snapshot());
}

#[test]
fn test_malformed_records_rejected() {
    assert!(SaveRecord::parse("").is_err());
    assert!(SaveRecord::parse("0\n0\nfalse\nfalse\n").is_err());
    assert!(SaveRecord::parse("7\n0\nfalse\nfalse\n-1\n0\n").is_err());
    assert!(SaveRecord::parse("0\n2\nfalse\nfalse\n-1\n0\n").is_err());
    assert!(SaveRecord::parse("0\n0\nmaybe\nfalse\n-1\n0\n").is_err());
    assert!(SaveRecord::parse("0\n0\nfalse\nfalse\n-1\n0\n9\n").is_err());
}

#[test]
fn test_wrong_board_size_rejected_on_restore() {
    let record = SaveRecord::parse("1\n1\nfalse\nfalse\n-1\n0\n0\n0\n").unwrap();
    let (state, _, _) = record.into_parts();
    assert!(Game::restore(RulesConfig::default(), state).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SaveRecord::load(dir.path().join("absent.save")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}
