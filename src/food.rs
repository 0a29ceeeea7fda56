use log::debug;
use rand::Rng;

use crate::config::{FoodPolicy, MAX_COL, MAX_ROW, MIN_COL, MIN_ROW};
use crate::grid::Cell;
use crate::snake::Snake;

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
}

impl Food {
    #[must_use]
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }

    /// Places food on a playable cell according to `policy`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, policy: FoodPolicy, snake: &Snake) -> Self {
        let cell = match policy {
            FoodPolicy::Uniform => uniform_cell(rng),
            FoodPolicy::AvoidSnake => free_cell(rng, snake).unwrap_or_else(|| uniform_cell(rng)),
        };

        if snake.occupies(cell) {
            debug!("food spawned under the snake at {cell:?}");
        }

        Self { cell }
    }
}

/// Samples any playable cell with equal probability.
#[must_use]
pub fn uniform_cell<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    Cell {
        col: rng.gen_range(MIN_COL..=MAX_COL),
        row: rng.gen_range(MIN_ROW..=MAX_ROW),
    }
}

/// Samples a playable cell the snake does not occupy, or `None` when the
/// snake fills the whole playable area.
#[must_use]
pub fn free_cell<R: Rng + ?Sized>(rng: &mut R, snake: &Snake) -> Option<Cell> {
    let mut candidates = Vec::new();

    for row in MIN_ROW..=MAX_ROW {
        for col in MIN_COL..=MAX_COL {
            let cell = Cell { col, row };
            if !snake.occupies(cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
