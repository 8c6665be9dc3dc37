//! Scripted random intent source for headless play.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::intents::{DriverError, IntentSender};
use crate::types::Intent;

/// Relative weights, in [`Intent::ALL`] order: left, right, soft drop, rotate
const INTENT_WEIGHTS: [u32; 4] = [30, 30, 15, 25];
const TOTAL_WEIGHT: u32 = 100;

/// Emits random intents, a fixed number per tick
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: StdRng,
    per_tick: usize,
}

impl AutoPlayer {
    pub fn new(seed: u64, per_tick: usize) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), per_tick)
    }

    pub fn from_entropy(per_tick: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), per_tick)
    }

    fn with_rng(rng: StdRng, per_tick: usize) -> Self {
        Self { rng, per_tick }
    }

    pub fn per_tick(&self) -> usize {
        self.per_tick
    }

    pub fn next_intent(&mut self) -> Intent {
        let mut roll = self.rng.gen_range(0..TOTAL_WEIGHT);
        for (intent, weight) in Intent::ALL.into_iter().zip(INTENT_WEIGHTS) {
            if roll < weight {
                return intent;
            }
            roll -= weight;
        }
        Intent::Rotate
    }

    /// Queue this tick's intents. A full queue drops the rest of the batch.
    ///
    /// Returns how many were queued; errors only if the driver is gone.
    pub fn feed(&mut self, tx: &IntentSender) -> Result<usize, DriverError> {
        let mut queued = 0;
        for _ in 0..self.per_tick {
            match tx.try_send(self.next_intent()) {
                Ok(()) => queued += 1,
                Err(DriverError::QueueFull(_)) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(queued)
    }
}
