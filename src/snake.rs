use std::collections::VecDeque;

use crate::grid::Cell;
use crate::input::Direction;

/// One body cell plus the heading the snake had when the cell was entered.
///
/// The heading only feeds sprite selection; movement uses the cell sequence.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub cell: Cell,
    pub heading: Direction,
}

/// Ordered snake body, head at the front.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Segment>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell, heading: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(Segment {
            cell: start,
            heading,
        });

        Self { body }
    }

    /// Creates a snake from explicit cells (front is head), all recorded
    /// with the same heading.
    ///
    /// # Panics
    ///
    /// Panics when `cells` is empty.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>, heading: Direction) -> Self {
        assert!(!cells.is_empty(), "snake needs at least one segment");

        Self {
            body: cells
                .into_iter()
                .map(|cell| Segment { cell, heading })
                .collect(),
        }
    }

    /// Returns the cell one step ahead of the head. Bounds are not checked.
    #[must_use]
    pub fn advance(&self, heading: Direction) -> Cell {
        self.head().step(heading)
    }

    /// Prepends a new head and keeps the tail.
    pub fn grow(&mut self, new_head: Cell, heading: Direction) {
        self.body.push_front(Segment {
            cell: new_head,
            heading,
        });
    }

    /// Prepends a new head and drops the tail.
    pub fn move_to(&mut self, new_head: Cell, heading: Direction) {
        self.grow(new_head, heading);
        let _ = self.body.pop_back();
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body
            .front()
            .expect("snake body must always contain at least one segment")
            .cell
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body
            .back()
            .expect("snake body must always contain at least one segment")
            .cell
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells().any(|occupied| occupied == cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    /// Returns the segment at `index` (0 is the head).
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.body.get(index)
    }

    /// Iterates over occupied cells from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().map(|segment| segment.cell)
    }
}
