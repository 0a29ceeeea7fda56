use crate::config::{BOARD_CELLS, CELL_SIZE, MAX_COL, MAX_ROW, MIN_COL, MIN_ROW};
use crate::input::Direction;

/// Grid cell in logical board coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the top-left pixel coordinate of this cell.
    #[must_use]
    pub fn to_pixel(self) -> PixelPoint {
        PixelPoint {
            x: (self.col * CELL_SIZE) as f32,
            y: (self.row * CELL_SIZE) as f32,
        }
    }

    /// Returns true when the cell lies inside the playable area
    /// (the HUD rows and the outer wall ring are excluded).
    #[must_use]
    pub fn is_in_bounds(self) -> bool {
        (MIN_COL..=MAX_COL).contains(&self.col) && (MIN_ROW..=MAX_ROW).contains(&self.row)
    }

    /// Returns true when the cell lies anywhere on the board, HUD included.
    #[must_use]
    pub fn is_on_board(self) -> bool {
        (0..BOARD_CELLS).contains(&self.col) && (0..BOARD_CELLS).contains(&self.row)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.offset();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

/// Display position in pixel units. Grid-aligned when produced by
/// [`Cell::to_pixel`], fractional while interpolating between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    /// Linear blend from `self` toward `target` by `alpha`.
    #[must_use]
    pub fn lerp(self, target: Self, alpha: f32) -> Self {
        Self {
            x: self.x + (target.x - self.x) * alpha,
            y: self.y + (target.y - self.y) * alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, PixelPoint};

    #[test]
    fn pixel_coordinates_are_multiples_of_cell_size() {
        let pixel = Cell::new(9, 10).to_pixel();

        assert_eq!(pixel, PixelPoint { x: 288.0, y: 320.0 });
    }

    #[test]
    fn bounds_exclude_wall_ring_and_hud_rows() {
        assert!(Cell::new(1, 3).is_in_bounds());
        assert!(Cell::new(17, 17).is_in_bounds());

        assert!(!Cell::new(0, 10).is_in_bounds());
        assert!(!Cell::new(18, 10).is_in_bounds());
        assert!(!Cell::new(9, 2).is_in_bounds());
        assert!(!Cell::new(9, 18).is_in_bounds());
    }

    #[test]
    fn stepping_moves_exactly_one_cell() {
        let cell = Cell::new(5, 5);

        assert_eq!(cell.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let from = Cell::new(4, 4).to_pixel();
        let to = Cell::new(5, 4).to_pixel();

        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.25).x, 136.0);
    }
}
