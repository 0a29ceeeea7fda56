use crate::food::Food;
use crate::grid::{Cell, PixelPoint};
use crate::input::Direction;
use crate::simulation::SimulationState;

/// Straight and corner body pieces, named by the two sides they connect.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BodyShape {
    Horizontal,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Sprite chosen for one segment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Sprite {
    /// Facing the direction of travel.
    Head(Direction),
    Body(BodyShape),
    /// Tip pointing away from the rest of the body.
    Tail(Direction),
}

// Indexed by the directions from a body segment toward its two neighbours.
const BODY_SHAPES: [[BodyShape; 4]; 4] = {
    use BodyShape::{BottomLeft, BottomRight, Horizontal, TopLeft, TopRight, Vertical};
    [
        // Up
        [Vertical, Vertical, TopLeft, TopRight],
        // Down
        [Vertical, Vertical, BottomLeft, BottomRight],
        // Left
        [TopLeft, BottomLeft, Horizontal, Horizontal],
        // Right
        [TopRight, BottomRight, Horizontal, Horizontal],
    ]
};

/// Body piece joining the neighbours that lie `toward_prev` and
/// `toward_next` of a segment.
#[must_use]
pub fn body_shape(toward_prev: Direction, toward_next: Direction) -> BodyShape {
    BODY_SHAPES[toward_prev as usize][toward_next as usize]
}

/// Direction of the step from `from` to the adjacent cell `to`, or `None`
/// when the cells are equal or not in line.
#[must_use]
pub fn direction_between(from: Cell, to: Cell) -> Option<Direction> {
    if from.col == to.col && from.row != to.row {
        return Some(if to.row < from.row {
            Direction::Up
        } else {
            Direction::Down
        });
    }
    if from.row == to.row && from.col != to.col {
        return Some(if to.col < from.col {
            Direction::Left
        } else {
            Direction::Right
        });
    }
    None
}

/// One segment ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSegment {
    pub position: PixelPoint,
    pub sprite: Sprite,
}

/// Display positions for one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub segments: Vec<RenderSegment>,
    pub food: PixelPoint,
    pub score: u32,
    pub level: u32,
}

/// Blends `previous` toward `current` by `alpha` (clamped to `[0, 1]`).
///
/// Segments that did not exist in `previous` (fresh growth) are drawn at
/// their current cell. `heading` is the live heading; when unset the head
/// uses the heading recorded on its segment.
#[must_use]
pub fn interpolate(
    previous: &SimulationState,
    current: &SimulationState,
    heading: Option<Direction>,
    alpha: f32,
) -> RenderFrame {
    let alpha = if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    };
    let snake = &current.snake;
    let last = snake.len().saturating_sub(1);

    let segments = snake
        .segments()
        .enumerate()
        .map(|(index, segment)| {
            let target = segment.cell.to_pixel();
            let origin = previous
                .snake
                .segment(index)
                .map_or(target, |before| before.cell.to_pixel());

            let sprite = if index == 0 {
                Sprite::Head(heading.unwrap_or(segment.heading))
            } else {
                let toward_prev = neighbour_direction(current, index, index - 1);
                if index == last {
                    Sprite::Tail(toward_prev.opposite())
                } else {
                    let toward_next = neighbour_direction(current, index, index + 1);
                    Sprite::Body(body_shape(toward_prev, toward_next))
                }
            };

            RenderSegment {
                position: origin.lerp(target, alpha),
                sprite,
            }
        })
        .collect();

    RenderFrame {
        segments,
        food: food_position(&current.food),
        score: current.score,
        level: current.level,
    }
}

fn neighbour_direction(state: &SimulationState, index: usize, neighbour: usize) -> Direction {
    let (Some(segment), Some(other)) = (state.snake.segment(index), state.snake.segment(neighbour))
    else {
        return Direction::Right;
    };

    // Overlapping cells fall back to the heading recorded on the neighbour,
    // reversed when the neighbour is further along the tail.
    direction_between(segment.cell, other.cell).unwrap_or(if neighbour < index {
        other.heading
    } else {
        other.heading.opposite()
    })
}

fn food_position(food: &Food) -> PixelPoint {
    food.cell.to_pixel()
}
