//! Fixed-tick driver: drain intents, one gravity step, snapshot.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, trace};

use crate::core::{Engine, GameSnapshot, Randomizer, SimpleRng, StepOutcome};
use crate::intents::{intent_channel, IntentReceiver, IntentSender};
use crate::types::TICK_MS;

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Length of one tick
    pub tick: Duration,
    /// Stop after this many ticks (None = until game over)
    pub max_ticks: Option<u64>,
    /// Channel capacity; also the most intents applied in one tick
    pub max_pending_intents: usize,
    /// Sleep out the remainder of each tick
    pub realtime: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS as u64),
            max_ticks: None,
            max_pending_intents: 16,
            realtime: true,
        }
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    pub intents_applied: u32,
    pub pieces_locked: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
}

impl TickReport {
    fn record(&mut self, outcome: StepOutcome) {
        if let StepOutcome::Locked(placed) = outcome {
            self.pieces_locked += 1;
            self.lines_cleared += placed.lines_cleared;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GameOver,
    TickLimit,
    Observer,
}

/// Final state of a [`Driver::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub game_over: bool,
    pub stopped: StopReason,
}

/// Sole owner of an engine; everything else talks to it through intents
pub struct Driver<R = SimpleRng> {
    engine: Engine<R>,
    intents: IntentReceiver,
    config: DriverConfig,
    ticks: u64,
    snapshot: GameSnapshot,
}

impl<R: Randomizer> Driver<R> {
    /// Wrap an engine and open its intent channel
    pub fn new(engine: Engine<R>, config: DriverConfig) -> (Self, IntentSender) {
        let (tx, rx) = intent_channel(config.max_pending_intents);
        let snapshot = engine.snapshot();
        let driver = Self {
            engine,
            intents: rx,
            config,
            ticks: 0,
            snapshot,
        };
        (driver, tx)
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot as of the end of the last tick
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Give the engine back, closing the intent channel
    pub fn into_engine(self) -> Engine<R> {
        self.engine
    }

    /// Run one tick. After game over, queued intents are discarded and nothing else happens.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        let mut remaining = self.config.max_pending_intents.max(1);
        while remaining > 0 {
            let Some(intent) = self.intents.try_recv() else {
                break;
            };
            remaining -= 1;
            if self.engine.game_over() {
                continue;
            }
            report.record(self.engine.apply_intent(intent));
            report.intents_applied += 1;
        }

        report.record(self.engine.step_gravity());
        report.game_over = self.engine.game_over();

        self.engine.snapshot_into(&mut self.snapshot);

        trace!(
            tick = report.tick,
            intents = report.intents_applied,
            locked = report.pieces_locked,
            lines = report.lines_cleared,
            "tick"
        );
        report
    }

    /// Tick until game over, the tick limit, or the observer breaks.
    ///
    /// The observer sees every post-tick snapshot and may feed intents for the next tick.
    pub fn run<F>(&mut self, mut on_tick: F) -> RunSummary
    where
        F: FnMut(&GameSnapshot, &TickReport) -> ControlFlow<()>,
    {
        let stopped = loop {
            if self.engine.game_over() {
                break StopReason::GameOver;
            }
            if self.config.max_ticks.is_some_and(|max| self.ticks >= max) {
                break StopReason::TickLimit;
            }

            let started = Instant::now();
            let report = self.tick();
            if on_tick(&self.snapshot, &report).is_break() {
                break StopReason::Observer;
            }

            if self.config.realtime {
                if let Some(rest) = self.config.tick.checked_sub(started.elapsed()) {
                    thread::sleep(rest);
                }
            }
        };

        let summary = RunSummary {
            ticks: self.ticks,
            score: self.engine.score(),
            lines: self.engine.lines(),
            pieces_locked: self.engine.pieces_locked(),
            game_over: self.engine.game_over(),
            stopped,
        };
        info!(
            ticks = summary.ticks,
            score = summary.score,
            lines = summary.lines,
            stopped = ?summary.stopped,
            "run finished"
        );
        summary
    }
}
