use serde::{Deserialize, Serialize};

use crate::engine::{ActivePiece, Piece};
use crate::shape::Shape;
use crate::types::{Color, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: Color,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.piece.kind,
            shape: value.piece.shape,
            color: value.piece.color,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute (x, y) of filled cells that lie on the grid, for overlay drawing
    pub fn visible_cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (ax, ay) = (self.x as i16, self.y as i16);
        self.shape.cells().filter_map(move |(dx, dy)| {
            let (x, y) = (ax + dx as i16, ay + dy as i16);
            let on_grid = (0..GRID_WIDTH as i16).contains(&x) && (0..GRID_HEIGHT as i16).contains(&y);
            on_grid.then_some((x as usize, y as usize))
        })
    }
}

/// Read-only view for rendering. Grid cells are color ids, 0 = empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Grid color at (x, y), `None` when empty or out of range
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&id| Color::from_id(id))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = Piece::new(ShapeKind::I, Color::Cyan);
        Self {
            grid: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: ActiveSnapshot::from(ActivePiece::spawn(placeholder)),
            next: PieceSnapshot::from(placeholder),
            score: 0,
            lines: 0,
            pieces_locked: 0,
            game_over: false,
        }
    }
}
