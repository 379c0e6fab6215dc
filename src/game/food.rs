use crate::consts;
use crate::grid::{Cell, Grid};
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;

/// Choose a cell for the food that is not in `occupied`.
///
/// Random cells are drawn from the whole grid until one is free.  After
/// [`FOOD_PLACEMENT_ATTEMPTS`][consts::FOOD_PLACEMENT_ATTEMPTS] misses the
/// free cells are enumerated and one is picked from them instead, so the
/// result is uniform over the free cells either way.  Returns `None` only if
/// every cell is occupied.
pub(crate) fn place<R: Rng>(grid: Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
    if occupied.iter().filter(|&&c| grid.in_bounds(c)).count() >= grid.area() {
        return None;
    }
    for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
    grid.cells().filter(|c| !occupied.contains(c)).choose(rng)
}
