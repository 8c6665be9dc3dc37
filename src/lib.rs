//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof: `blockfall::{core,driver,types}`.

pub use blockfall_core as core;
pub use blockfall_driver as driver;
pub use blockfall_types as types;
