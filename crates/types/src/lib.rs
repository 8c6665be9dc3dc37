//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the engine, the driver and any host that
//! renders a snapshot all agree on these definitions.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, 0), the top-left corner of the piece's bounding box
//!
//! # Timing
//!
//! There are no levels and no speed curve. The host applies one gravity step
//! per tick; the reference tick is `TICK_MS` (10 ticks per second).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, Intent, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! let intent = Intent::from_str("moveLeft").unwrap();
//! assert_eq!(intent.delta(), Some((-1, 0)));
//!
//! assert_eq!(Color::from_id(Color::Red.id()), Some(Color::Red));
//! assert_eq!((GRID_WIDTH, GRID_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Grid dimensions
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 20;

/// Spawn anchor for every new active piece (top-left of the bounding box)
pub const SPAWN_X: i8 = 3;
pub const SPAWN_Y: i8 = 0;

/// Reference tick length in milliseconds (10 ticks per second)
pub const TICK_MS: u32 = 100;

/// Flat score per cleared row. There is no multi-line bonus.
pub const POINTS_PER_LINE: u32 = 100;

/// Catalog shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    L,
    J,
}

impl ShapeKind {
    /// Every catalog entry, in draw order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
        }
    }
}

/// Seven-entry color palette. Any color may appear with any shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Orange,
    Blue,
    Purple,
    Green,
    Red,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
        Color::Purple,
        Color::Green,
        Color::Red,
    ];

    /// Stable 1-based id; 0 is reserved for empty cells in exported grids.
    pub fn id(&self) -> u8 {
        match self {
            Color::Cyan => 1,
            Color::Yellow => 2,
            Color::Orange => 3,
            Color::Blue => 4,
            Color::Purple => 5,
            Color::Green => 6,
            Color::Red => 7,
        }
    }

    /// Inverse of [`Color::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
        }
    }
}

/// Player intents accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::Rotate,
    ];

    /// Parse intent from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotate" => Some(Intent::Rotate),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::Rotate => "rotate",
        }
    }

    /// Translation applied by a movement intent; `None` for rotation.
    pub fn delta(&self) -> Option<(i8, i8)> {
        match self {
            Intent::MoveLeft => Some((-1, 0)),
            Intent::MoveRight => Some((1, 0)),
            Intent::SoftDrop => Some((0, 1)),
            Intent::Rotate => None,
        }
    }
}

/// Cell on the grid (None = empty, Some = filled with a placed piece's color)
pub type Cell = Option<Color>;
