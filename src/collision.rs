use crate::grid::Cell;

/// Returns true when `head` leaves the playable area or lands on any cell in
/// `body`.
///
/// `body` is the snake as it was before the head is committed, so callers
/// decide whether the tail cell is part of it.
#[must_use]
pub fn is_terminal<I>(head: Cell, body: I) -> bool
where
    I: IntoIterator<Item = Cell>,
{
    !head.is_in_bounds() || body.into_iter().any(|cell| cell == head)
}
