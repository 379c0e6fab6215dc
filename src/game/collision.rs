use super::snake::Snake;
use crate::grid::{Cell, Grid};
use std::fmt;

/// What the snake's head ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "wall"),
            Collision::Body => write!(f, "body"),
        }
    }
}

pub(crate) fn is_wall_collision(grid: Grid, head: Cell) -> bool {
    !grid.in_bounds(head)
}

pub(crate) fn is_self_collision<I>(head: Cell, body: I) -> bool
where
    I: IntoIterator<Item = Cell>,
{
    body.into_iter().any(|c| c == head)
}

/// Check a snake that has already been moved for a collision.
///
/// This must be called after the tail has been dropped (or kept, on a growth
/// tick), so that moving into the cell the tail just left only counts as a
/// collision when the snake grew.
pub(crate) fn detect(grid: Grid, snake: &Snake) -> Option<Collision> {
    let head = snake.head();
    if is_wall_collision(grid, head) {
        Some(Collision::Wall)
    } else if is_self_collision(head, snake.body()) {
        Some(Collision::Body)
    } else {
        None
    }
}
