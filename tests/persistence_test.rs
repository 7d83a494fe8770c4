//! Integration test: files on disk
//!
//! Score board persistence across sessions, config files and model files.

use flappy3d::scene::Model;
use flappy3d::scores::{ScoreBoard, ScoreStore};
use flappy3d::GameConfig;
use std::fs;
use std::io;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("flappy3d_it_{}_{}", std::process::id(), name));
    let _ = fs::remove_file(&path);
    path
}

// =============================================================================
// Scores
// =============================================================================

#[test]
fn test_best_score_survives_sessions() {
    let path = temp_path("scores.dat");

    // First session: two runs
    {
        let store = ScoreStore::with_path(&path);
        let mut board = store.load().unwrap();
        assert_eq!(board, ScoreBoard::default());
        assert!(board.record_run(5, 1_000));
        store.save(&board).unwrap();
        assert!(!board.record_run(3, 2_000));
        store.save(&board).unwrap();
    }

    // Second session sees both runs and the best
    let store = ScoreStore::with_path(&path);
    let mut board = store.load().unwrap();
    assert_eq!(board.best, 5);
    assert_eq!(board.runs, 2);
    assert_eq!(board.last_played, 2_000);

    assert!(board.record_run(8, 3_000));
    store.save(&board).unwrap();
    assert_eq!(store.load().unwrap().best, 8);

    store.reset().unwrap();
    assert_eq!(store.load().unwrap(), ScoreBoard::default());
    // Resetting twice is fine
    store.reset().unwrap();
}

#[test]
fn test_save_leaves_no_temp_file() {
    let path = temp_path("clean.dat");
    let store = ScoreStore::with_path(&path);
    store.save(&ScoreBoard::default()).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("dat.tmp").exists());
    store.reset().unwrap();
}

#[test]
fn test_tampered_best_score_rejected() {
    let path = temp_path("tampered.dat");
    let store = ScoreStore::with_path(&path);
    store
        .save(&ScoreBoard {
            best: 3,
            runs: 1,
            last_played: 0,
        })
        .unwrap();

    // Payload starts after the 8-byte magic and 4-byte length; best comes first
    let mut bytes = fs::read(&path).unwrap();
    bytes[12] = 250;
    fs::write(&path, &bytes).unwrap();

    assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::InvalidData);
    store.reset().unwrap();
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_missing_config_file_gives_defaults() {
    let path = temp_path("absent_config.json");
    assert_eq!(GameConfig::load(&path).unwrap(), GameConfig::default());
}

#[test]
fn test_partial_config_file_overrides_only_given_fields() {
    let path = temp_path("partial_config.json");
    fs::write(
        &path,
        r#"{ "physics": { "gravity": -0.002 }, "obstacles": { "gap": 2.5 }, "frame_ms": 20 }"#,
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    let defaults = GameConfig::default();
    assert_eq!(config.physics.gravity, -0.002);
    assert_eq!(config.physics.flap_strength, defaults.physics.flap_strength);
    assert_eq!(config.obstacles.gap, 2.5);
    assert_eq!(config.obstacles.speed, defaults.obstacles.speed);
    assert_eq!(config.frame_ms, 20);
    assert_eq!(config.camera, defaults.camera);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_dumped_config_loads_back() {
    let path = temp_path("dumped_config.json");
    let mut config = GameConfig::default();
    config.obstacles.spawn_interval = 90;
    config.audio.enabled = false;
    fs::write(&path, config.to_json_pretty().unwrap()).unwrap();

    assert_eq!(GameConfig::load(&path).unwrap(), config);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_broken_config_file_is_invalid_data() {
    let path = temp_path("broken_config.json");
    fs::write(&path, "{ physics: ").unwrap();
    assert_eq!(
        GameConfig::load(&path).unwrap_err().kind(),
        io::ErrorKind::InvalidData
    );
    fs::remove_file(&path).unwrap();
}

// =============================================================================
// Models
// =============================================================================

#[test]
fn test_model_file_loads() {
    let path = temp_path("cube_model.json");
    fs::write(
        &path,
        r#"{ "name": "cube", "parts": [ { "min": [-1, -1, -1], "max": [1, 1, 1], "color": [255, 0, 0] } ] }"#,
    )
    .unwrap();

    let model = Model::load_or_builtin(Some(&path));
    assert_eq!(model.name, "cube");
    assert_eq!(model.parts.len(), 1);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_unreadable_model_falls_back_to_builtin() {
    let missing = temp_path("missing_model.json");
    assert_eq!(Model::load_or_builtin(Some(&missing)), Model::builtin_bird());

    let empty = temp_path("empty_model.json");
    fs::write(&empty, r#"{ "name": "nothing", "parts": [] }"#).unwrap();
    assert_eq!(Model::load_or_builtin(Some(&empty)), Model::builtin_bird());
    fs::remove_file(&empty).unwrap();

    assert_eq!(Model::load_or_builtin(None), Model::builtin_bird());
}
