use super::direction::Velocity;
use crate::grid::Cell;
use std::collections::{HashSet, VecDeque};

/// The cells making up the snake.
///
/// The cells are stored head first; the tail is the last element.  A snake
/// always has at least one cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) cells: VecDeque<Cell>,
}

impl Snake {
    /// Create a one-cell snake at `start`
    pub(crate) fn new(start: Cell) -> Snake {
        Snake {
            cells: VecDeque::from([start]),
        }
    }

    pub(crate) fn head(&self) -> Cell {
        self.cells[0]
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return all of the snake's cells, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Return the cells behind the head
    pub(crate) fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().skip(1).copied()
    }

    pub(crate) fn occupied(&self) -> HashSet<Cell> {
        self.cells().collect()
    }

    /// Compute where the head would be after one step at `velocity`.  The
    /// result is not clamped to the grid.
    pub(crate) fn advance(&self, velocity: Velocity) -> Cell {
        self.head().offset(velocity.delta())
    }

    /// Move the head to `new_head` while keeping the tail in place
    pub(crate) fn grow(&mut self, new_head: Cell) {
        self.cells.push_front(new_head);
    }

    /// Move the head to `new_head` and drop the tail
    pub(crate) fn move_without_growth(&mut self, new_head: Cell) {
        self.cells.push_front(new_head);
        let _ = self.cells.pop_back();
    }
}
