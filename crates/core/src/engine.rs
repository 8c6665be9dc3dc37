//! Engine module - the piece/grid state machine
//!
//! Owns the grid, the active piece, the one-slot look-ahead, the score and the
//! game-over latch. Hosts drive it with intents plus one gravity step per tick
//! (`move_piece(0, 1)`), and read it back through [`Engine::snapshot`].
//!
//! States are `Playing` and `GameOver`. The only transition happens inside
//! [`Engine::place_piece`], when the freshly spawned piece does not fit at the
//! spawn anchor. Once over, every operation is a no-op.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::rng::{Randomizer, SimpleRng};
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PieceSnapshot};
use crate::types::{
    Color, Intent, ShapeKind, GRID_HEIGHT, GRID_WIDTH, POINTS_PER_LINE, SPAWN_X, SPAWN_Y,
};

/// A piece without a position: catalog kind, current (possibly rotated) shape, color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    /// Piece in its catalog orientation
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self {
            kind,
            shape: Shape::template(kind),
            color,
        }
    }
}

/// The falling piece: a piece plus the grid position of its bounding box's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a piece at the spawn anchor
    pub fn spawn(piece: Piece) -> Self {
        Self::at(piece, SPAWN_X, SPAWN_Y)
    }

    pub fn at(piece: Piece, x: i8, y: i8) -> Self {
        Self { piece, x, y }
    }

    /// Absolute grid coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> {
        let (x, y) = (self.x as i16, self.y as i16);
        self.piece
            .shape
            .cells()
            .map(move |(dx, dy)| (x + dx as i16, y + dy as i16))
    }
}

/// Raw movement rejected at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("move delta ({dx}, {dy}) is outside -1..=1")]
    InvalidDelta { dx: i8, dy: i8 },
}

/// Result of committing the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub lines_cleared: u32,
    pub game_over: bool,
}

/// What a move or intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Anchor translated
    Moved,
    /// Shape replaced by its rotation
    Rotated,
    /// Sideways/upward move or checked rotation refused; nothing changed
    Blocked,
    /// Downward move refused, so the piece was committed
    Locked(PlaceOutcome),
    /// Game already over; nothing changed
    Ignored,
}

/// The falling-block engine
#[derive(Debug, Clone)]
pub struct Engine<R = SimpleRng> {
    grid: Grid,
    active: ActivePiece,
    next: Piece,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    game_over: bool,
    rng: R,
}

impl Engine<SimpleRng> {
    /// New game driven by the seeded LCG
    pub fn new(seed: u32) -> Self {
        Self::with_randomizer(SimpleRng::new(seed))
    }
}

impl Engine<StdRng> {
    /// New game seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_randomizer(StdRng::from_entropy())
    }
}

impl Default for Engine<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: Randomizer> Engine<R> {
    /// Empty grid, score 0, a fresh active piece at the spawn anchor and a fresh next piece
    pub fn with_randomizer(rng: R) -> Self {
        let mut engine = Self {
            grid: Grid::new(),
            active: ActivePiece::spawn(Piece::new(ShapeKind::I, Color::Cyan)),
            next: Piece::new(ShapeKind::I, Color::Cyan),
            score: 0,
            lines: 0,
            pieces_locked: 0,
            game_over: false,
            rng,
        };
        engine.active = ActivePiece::spawn(engine.generate_piece());
        engine.next = engine.generate_piece();
        engine
    }

    /// Resume from an arbitrary grid and active piece (fixtures, replays).
    ///
    /// The next piece is drawn from `rng`. The game-over latch starts cleared even if
    /// `active` overlaps the grid.
    pub fn from_parts(grid: Grid, active: ActivePiece, rng: R) -> Self {
        let mut engine = Self {
            grid,
            active,
            next: active.piece,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            game_over: false,
            rng,
        };
        engine.next = engine.generate_piece();
        engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn randomizer(&self) -> &R {
        &self.rng
    }

    /// Uniform shape, then an independent uniform color
    pub fn generate_piece(&mut self) -> Piece {
        let kind = ShapeKind::ALL[self.rng.next_index(ShapeKind::ALL.len())];
        let color = Color::ALL[self.rng.next_index(Color::ALL.len())];
        Piece::new(kind, color)
    }

    /// Rotate the active shape in place without any fit check.
    ///
    /// The rotated piece may overlap the stack or stick out of the grid; the next
    /// gravity step then fails and commits it where it is. See [`Engine::try_rotate`].
    pub fn rotate_active(&mut self) {
        if self.game_over {
            return;
        }
        self.active.piece.shape = self.active.piece.shape.rotated();
    }

    /// Rotate only if the rotated shape fits at the current anchor
    pub fn try_rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = ActivePiece {
            piece: Piece {
                shape: self.active.piece.shape.rotated(),
                ..self.active.piece
            },
            ..self.active
        };
        if !self.fits(&rotated, 0, 0) {
            return false;
        }
        self.active = rotated;
        true
    }

    /// Whether the active piece shifted by (dx, dy) fits.
    ///
    /// Filled cells must stay inside `0..WIDTH` horizontally and above the floor.
    /// Cells above the top edge (y < 0) are allowed and skip the occupancy check.
    pub fn is_valid_position(&self, dx: i8, dy: i8) -> bool {
        self.fits(&self.active, dx, dy)
    }

    fn fits(&self, piece: &ActivePiece, dx: i8, dy: i8) -> bool {
        if piece.x.checked_add(dx).is_none() || piece.y.checked_add(dy).is_none() {
            return false;
        }
        piece.cells().all(|(x, y)| {
            let (x, y) = (x + dx as i16, y + dy as i16);
            if x < 0 || x >= GRID_WIDTH as i16 || y >= GRID_HEIGHT as i16 {
                return false;
            }
            y < 0 || !self.grid.is_occupied(x as i8, y as i8)
        })
    }

    /// Translate the active piece, or commit it when a downward move is blocked.
    ///
    /// Blocked sideways or upward moves change nothing. Deltas outside `-1..=1` are
    /// rejected before any state is touched.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> Result<StepOutcome, EngineError> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(EngineError::InvalidDelta { dx, dy });
        }
        Ok(self.shift(dx, dy))
    }

    fn shift(&mut self, dx: i8, dy: i8) -> StepOutcome {
        if self.game_over {
            return StepOutcome::Ignored;
        }
        if self.is_valid_position(dx, dy) {
            self.active.x += dx;
            self.active.y += dy;
            StepOutcome::Moved
        } else if dy > 0 {
            StepOutcome::Locked(self.place_piece())
        } else {
            StepOutcome::Blocked
        }
    }

    /// One gravity step; what the host calls once per tick
    pub fn step_gravity(&mut self) -> StepOutcome {
        self.shift(0, 1)
    }

    /// Apply a player intent
    pub fn apply_intent(&mut self, intent: Intent) -> StepOutcome {
        match intent.delta() {
            Some((dx, dy)) => self.shift(dx, dy),
            None if self.game_over => StepOutcome::Ignored,
            None => {
                self.rotate_active();
                StepOutcome::Rotated
            }
        }
    }

    /// Commit the active piece, clear lines, promote the next piece to the spawn anchor.
    ///
    /// Cells outside the grid (only reachable through an unchecked rotation) are
    /// dropped. If the promoted piece does not fit at spawn, the game is over.
    pub fn place_piece(&mut self) -> PlaceOutcome {
        if self.game_over {
            return PlaceOutcome {
                lines_cleared: 0,
                game_over: true,
            };
        }

        let color = self.active.piece.color;
        for (x, y) in self.active.cells() {
            let (Ok(x), Ok(y)) = (i8::try_from(x), i8::try_from(y)) else {
                continue;
            };
            self.grid.set(x, y, Some(color));
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let lines_cleared = self.clear_lines();
        debug!(
            kind = self.active.piece.kind.as_str(),
            x = self.active.x,
            y = self.active.y,
            lines_cleared,
            "piece locked"
        );

        let next = self.generate_piece();
        self.active = ActivePiece::spawn(std::mem::replace(&mut self.next, next));

        if !self.is_valid_position(0, 0) {
            self.game_over = true;
            info!(
                score = self.score,
                lines = self.lines,
                pieces = self.pieces_locked,
                "game over"
            );
        }

        PlaceOutcome {
            lines_cleared,
            game_over: self.game_over,
        }
    }

    /// Remove full rows, shift the rest down, add 100 per removed row. Returns rows removed.
    pub fn clear_lines(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let cleared = self.grid.clear_full_rows().len() as u32;
        self.lines = self.lines.saturating_add(cleared);
        self.score = self
            .score
            .saturating_add(cleared.saturating_mul(POINTS_PER_LINE));
        cleared
    }

    /// Fill a caller-owned snapshot without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);
        out.active = ActiveSnapshot::from(self.active);
        out.next = PieceSnapshot::from(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
