//! Integration test: high score persistence across runs
//!
//! Uses a JSON store in a scratch directory and checks that only a beaten
//! high score is written, and that a reloaded session sees it.

use blazing_runner::audio::SilentCuePlayer;
use blazing_runner::high_score::{JsonScoreStore, ScoreStore};
use blazing_runner::runner::{GamePhase, Obstacle, RunnerSession};
use blazing_runner::RunnerConfig;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "blazing-runner-it-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    dir.join("high_score.json")
}

/// Run a session against `store` until a forced collision at `score`.
fn finish_run_at(
    store: JsonScoreStore,
    score: u64,
) -> RunnerSession<SilentCuePlayer, JsonScoreStore> {
    let config = RunnerConfig {
        seed: Some(11),
        ..RunnerConfig::default()
    };
    let mut session = RunnerSession::new(config, SilentCuePlayer, store);
    session.press_jump();
    session.spawner.timer_ms = 1.0e9;

    let hitbox = session.player.hitbox();
    session.obstacles.push(Obstacle {
        x: hitbox.x,
        y: session.player.ground_y - 40.0,
        width: 30.0,
        height: 40.0,
        passed: false,
    });
    session.score = score;
    session.tick(Duration::from_millis(16));
    assert_eq!(session.phase(), GamePhase::Over);
    session
}

#[test]
fn test_missing_file_reads_as_zero() {
    let store = JsonScoreStore::at(scratch_file("missing"));
    assert_eq!(store.load(), 0);
    assert_eq!(store.record().set_at, None);
}

#[test]
fn test_beaten_score_is_written_with_timestamp() {
    let path = scratch_file("beaten");
    let session = finish_run_at(JsonScoreStore::at(&path), 750);

    let summary = session.summary().copied().unwrap();
    assert!(summary.new_record);
    assert_eq!(summary.high_score, 750);

    let on_disk = JsonScoreStore::at(&path).record();
    assert_eq!(on_disk.best, 750);
    assert!(on_disk.set_at.is_some());

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_lower_score_leaves_file_untouched() {
    let path = scratch_file("kept");
    let mut store = JsonScoreStore::at(&path);
    store.store(1_000).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let session = finish_run_at(store, 400);

    let summary = session.summary().copied().unwrap();
    assert!(!summary.new_record);
    assert_eq!(summary.score, 400);
    assert_eq!(summary.high_score, 1_000);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_reload_sees_new_best() {
    let path = scratch_file("reload");
    finish_run_at(JsonScoreStore::at(&path), 321);

    let reloaded = RunnerSession::new(
        RunnerConfig::default(),
        SilentCuePlayer,
        JsonScoreStore::at(&path),
    );
    assert_eq!(reloaded.phase(), GamePhase::Ready);
    assert_eq!(reloaded.high_score, 321);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_corrupt_file_reads_as_zero_and_is_replaced() {
    let path = scratch_file("corrupt");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let session = finish_run_at(JsonScoreStore::at(&path), 90);
    assert!(session.summary().unwrap().new_record);
    assert_eq!(JsonScoreStore::at(&path).load(), 90);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_clear_resets_best() {
    let path = scratch_file("clear");
    let mut store = JsonScoreStore::at(&path);
    store.store(5_000).unwrap();
    store.clear().unwrap();
    assert_eq!(store.load(), 0);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}
