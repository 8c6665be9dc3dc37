//! Reference host loop for the engine.
//!
//! The engine is strictly single-threaded. This crate is the one place that owns it:
//! producers on any thread hold an [`IntentSender`] and push [`Intent`]s into a
//! bounded channel; the [`Driver`] drains that channel once per tick, applies one
//! gravity step, and refreshes the snapshot the renderer reads.
//!
//! Per tick, in order:
//!
//! 1. apply queued intents in arrival order
//! 2. `step_gravity()` exactly once
//! 3. refresh the snapshot and hand it to the observer
//! 4. sleep out the rest of the tick (realtime mode only)
//!
//! [`AutoPlayer`] is a scripted intent source for headless runs.
//!
//! [`Intent`]: blockfall_types::Intent

pub mod autoplay;
pub mod driver;
pub mod intents;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use autoplay::AutoPlayer;
pub use driver::{Driver, DriverConfig, RunSummary, StopReason, TickReport};
pub use intents::{intent_channel, DriverError, IntentReceiver, IntentSender};
