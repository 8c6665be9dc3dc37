//! Driver tests - cross-thread intents, full runs, snapshot encoding

use std::ops::ControlFlow;
use std::thread;

use blockfall::core::{Engine, GameSnapshot, ScriptedRandomizer};
use blockfall::driver::{AutoPlayer, Driver, DriverConfig, DriverError, StopReason};
use blockfall::types::{Color, Intent, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

fn headless(max_pending_intents: usize) -> DriverConfig {
    DriverConfig {
        max_pending_intents,
        realtime: false,
        ..DriverConfig::default()
    }
}

fn o_only() -> Engine<ScriptedRandomizer> {
    Engine::with_randomizer(ScriptedRandomizer::for_pieces(&[(ShapeKind::O, Color::Yellow)]))
}

#[test]
fn test_intents_from_producer_thread() {
    let (mut driver, tx) = Driver::new(o_only(), headless(8));

    let producer = thread::spawn(move || {
        for _ in 0..6 {
            tx.blocking_send(Intent::MoveRight).unwrap();
        }
    });
    producer.join().unwrap();

    let report = driver.tick();
    assert_eq!(report.intents_applied, 6);
    // O piece is two wide: x stops at 8
    assert_eq!(driver.snapshot().active.x, 8);
    assert_eq!(driver.snapshot().active.y, 1);

    // Producer dropped its sender; later ticks see nothing
    assert_eq!(driver.tick().intents_applied, 0);
}

#[test]
fn test_dropped_driver_closes_channel() {
    let (driver, tx) = Driver::new(o_only(), headless(4));
    assert!(!tx.is_closed());
    drop(driver);
    assert!(tx.is_closed());
    assert_eq!(tx.try_send(Intent::Rotate), Err(DriverError::Closed));
}

#[test]
fn test_intents_after_game_over_are_discarded() {
    let (mut driver, tx) = Driver::new(o_only(), headless(4));
    let summary = driver.run(|_, _| ControlFlow::Continue(()));
    assert_eq!(summary.stopped, StopReason::GameOver);

    let frozen = *driver.snapshot();
    tx.try_send(Intent::MoveLeft).unwrap();
    tx.try_send(Intent::Rotate).unwrap();

    let report = driver.tick();
    assert_eq!(report.intents_applied, 0);
    assert!(report.game_over);
    assert_eq!(*driver.snapshot(), frozen);
}

#[test]
fn test_engine_handed_back_after_run() {
    let config = DriverConfig {
        max_ticks: Some(25),
        ..headless(4)
    };
    let (mut driver, tx) = Driver::new(o_only(), config);
    let summary = driver.run(|_, _| ControlFlow::Continue(()));
    let last = *driver.snapshot();

    let mut engine = driver.into_engine();
    assert!(tx.is_closed());
    assert_eq!(engine.snapshot(), last);
    assert_eq!(engine.pieces_locked(), summary.pieces_locked);

    // The engine keeps playing on its own
    engine.step_gravity();
    assert_ne!(engine.snapshot(), last);
}

#[test]
fn test_auto_player_game_is_reproducible() {
    fn play(seed: u32) -> (blockfall::driver::RunSummary, GameSnapshot) {
        let config = DriverConfig {
            max_ticks: Some(2_000),
            ..headless(3)
        };
        let (mut driver, tx) = Driver::new(Engine::new(seed), config);
        let mut player = AutoPlayer::new(seed as u64, 2);
        let summary = driver.run(|_, _| {
            player.feed(&tx).unwrap();
            ControlFlow::Continue(())
        });
        (summary, *driver.snapshot())
    }

    let (a, snap_a) = play(99);
    let (b, snap_b) = play(99);
    assert_eq!(a, b);
    assert_eq!(snap_a, snap_b);
    assert!(a.ticks > 0);
    assert_eq!(a.score, a.lines * 100);
}

#[test]
fn test_snapshot_json_shape() {
    let (mut driver, _tx) = Driver::new(o_only(), headless(4));
    driver.tick();

    let value = serde_json::to_value(driver.snapshot()).unwrap();
    let grid = value["grid"].as_array().unwrap();
    assert_eq!(grid.len(), GRID_HEIGHT as usize);
    assert!(grid
        .iter()
        .all(|row| row.as_array().unwrap().len() == GRID_WIDTH as usize));
    assert_eq!(value["active"]["color"], "yellow");
    assert_eq!(value["active"]["shape"], serde_json::json!([[1, 1], [1, 1]]));
    assert_eq!(value["active"]["y"], 1);
    assert_eq!(value["score"], 0);
    assert_eq!(value["game_over"], false);

    let back: GameSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(back, *driver.snapshot());
}
