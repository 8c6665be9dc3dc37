//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the whole piece/grid state machine: piece generation, rotation,
//! collision testing, commitment to the grid, and line clearing with gravity.
//! It has no dependencies on rendering, input devices, or I/O.
//!
//! - **Deterministic**: same seed (or scripted randomizer) produces identical games
//! - **Testable**: every rule is reachable through the public API
//! - **Portable**: any host that can call functions and read a snapshot can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with row clearing
//! - [`shape`]: bit-matrix piece templates and quarter-turn rotation
//! - [`rng`]: injectable randomness ([`Randomizer`])
//! - [`engine`]: the state machine ([`Engine`])
//! - [`snapshot`]: the read-only render view
//!
//! # Rules
//!
//! - Pieces spawn at (3, 0); shape and color are drawn uniformly and independently
//! - Rotation is unchecked by default; [`Engine::try_rotate`] only rotates when the result fits
//! - A blocked downward move commits the piece; blocked sideways moves do nothing
//! - Each cleared row scores 100, no multi-line bonus
//! - The game ends when a freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Engine, StepOutcome};
//! use blockfall_types::Intent;
//!
//! let mut engine = Engine::new(12345);
//! engine.apply_intent(Intent::MoveLeft);
//! engine.apply_intent(Intent::Rotate);
//!
//! // Gravity until the first piece locks
//! while !matches!(engine.step_gravity(), StepOutcome::Locked(_)) {}
//!
//! assert_eq!(engine.pieces_locked(), 1);
//! assert_eq!(engine.score(), 0);
//! ```
//!
//! Hosts call [`Engine::step_gravity`] once per tick (10 ticks per second in the
//! reference loop) after applying that tick's intents.

pub mod engine;
pub mod grid;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use engine::{ActivePiece, Engine, EngineError, Piece, PlaceOutcome, StepOutcome};
pub use grid::Grid;
pub use rng::{Randomizer, ScriptedRandomizer, SimpleRng};
pub use shape::{Shape, ShapeError};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PieceSnapshot};
