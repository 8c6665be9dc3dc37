//! Property tests: rotation, line clearing, placement bounds, free play

use proptest::prelude::*;

use blockfall::core::{ActivePiece, Engine, Grid, Piece, ScriptedRandomizer, Shape, StepOutcome};
use blockfall::types::{Color, Intent, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

const W: usize = GRID_WIDTH as usize;
const H: usize = GRID_HEIGHT as usize;

fn any_shape() -> impl Strategy<Value = Shape> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(rows, cols)| {
            (Just(cols), prop::collection::vec(any::<bool>(), rows * cols))
        })
        .prop_filter("at least one filled cell", |(_, bits)| bits.iter().any(|&b| b))
        .prop_map(|(cols, bits)| {
            let matrix: Vec<Vec<u8>> = bits
                .chunks(cols)
                .map(|row| row.iter().map(|&b| b as u8).collect())
                .collect();
            Shape::from_matrix(&matrix[..]).unwrap()
        })
}

/// Per row: `None` = full row, `Some(mask)` = partial row with the given occupancy
fn any_rows() -> impl Strategy<Value = Vec<Option<Vec<bool>>>> {
    let partial = prop::collection::vec(any::<bool>(), W)
        .prop_filter("not full", |r| r.iter().any(|&b| !b));
    prop::collection::vec(prop_oneof![1 => Just(None), 3 => partial.prop_map(Some)], H)
}

fn row_bits(grid: &Grid, y: usize) -> Vec<bool> {
    grid.row(y).unwrap().iter().map(|c| c.is_some()).collect()
}

proptest! {
    #[test]
    fn four_rotations_are_identity(shape in any_shape()) {
        let once = shape.rotated();
        prop_assert_eq!(once.rows(), shape.cols());
        prop_assert_eq!(once.cols(), shape.rows());
        prop_assert_eq!(once.filled_count(), shape.filled_count());
        prop_assert_eq!(once.rotated().rotated().rotated(), shape);
    }

    #[test]
    fn clearing_keeps_survivors_in_order(rows in any_rows()) {
        let mut grid = Grid::new();
        for (y, row) in rows.iter().enumerate() {
            match row {
                None => {
                    grid.fill_row(y, Color::Green);
                }
                Some(mask) => {
                    for (x, &filled) in mask.iter().enumerate() {
                        if filled {
                            grid.set(x as i8, y as i8, Some(Color::Blue));
                        }
                    }
                }
            }
        }
        let full = rows.iter().filter(|r| r.is_none()).count();
        let survivors: Vec<Vec<bool>> = rows.iter().flatten().cloned().collect();

        let mut engine = Engine::from_parts(
            grid,
            ActivePiece::spawn(Piece::new(ShapeKind::O, Color::Yellow)),
            ScriptedRandomizer::new(vec![]),
        );
        let cleared = engine.clear_lines();

        prop_assert_eq!(cleared as usize, full);
        prop_assert_eq!(engine.score(), 100 * full as u32);
        prop_assert_eq!(engine.grid().height(), GRID_HEIGHT);
        for y in 0..full {
            prop_assert!(engine.grid().is_row_empty(y));
        }
        for (i, expected) in survivors.iter().enumerate() {
            prop_assert_eq!(&row_bits(engine.grid(), full + i), expected);
        }
    }

    #[test]
    fn checked_play_keeps_active_piece_in_bounds(
        seed in any::<u32>(),
        ops in prop::collection::vec(0u8..5, 1..400),
    ) {
        let mut engine = Engine::new(seed);
        for op in ops {
            match op {
                0 => { engine.apply_intent(Intent::MoveLeft); }
                1 => { engine.apply_intent(Intent::MoveRight); }
                2 => { engine.apply_intent(Intent::SoftDrop); }
                3 => { engine.try_rotate(); }
                _ => { engine.step_gravity(); }
            }

            for y in 0..H {
                prop_assert!(!engine.grid().is_row_full(y), "row {} left full", y);
            }
            if engine.game_over() {
                break;
            }
            for (x, y) in engine.active().cells() {
                prop_assert!((0..GRID_WIDTH as i16).contains(&x), "x = {}", x);
                prop_assert!(y < GRID_HEIGHT as i16, "y = {}", y);
            }
        }
    }

    #[test]
    fn free_play_keeps_grid_and_score_consistent(
        seed in any::<u32>(),
        ops in prop::collection::vec(0usize..5, 1..600),
    ) {
        let mut engine = Engine::new(seed);
        let mut occupied = 0;
        for op in ops {
            let was_over = engine.game_over();
            let outcome = match Intent::ALL.get(op) {
                Some(&intent) => engine.apply_intent(intent),
                None => engine.step_gravity(),
            };

            let now = engine.grid().occupied_count();
            match outcome {
                StepOutcome::Locked(placed) if placed.lines_cleared > 0 => {}
                _ => {
                    prop_assert!(now >= occupied, "{} cells dropped to {}", occupied, now);
                }
            }
            occupied = now;

            for y in 0..H {
                prop_assert!(!engine.grid().is_row_full(y), "row {} left full", y);
            }
            prop_assert_eq!(engine.score(), 100 * engine.lines());
            if was_over {
                prop_assert_eq!(outcome, StepOutcome::Ignored);
            }
        }
    }
}
