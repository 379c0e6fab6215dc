use rand::Rng;
use std::fmt;

/// A coordinate on the playing field.
///
/// Coordinates are signed so that a head which has just left the field (e.g.,
/// `(-1, 5)`) can still be represented and then rejected by
/// [`Grid::in_bounds()`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell `dx` columns and `dy` rows away from `self`
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Cell {
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square playing field of `dimension × dimension` cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    dimension: u16,
}

impl Grid {
    pub(crate) fn new(dimension: u16) -> Grid {
        Grid { dimension }
    }

    /// Construct the grid obtained by dividing a square canvas of side
    /// `canvas_size` into cells of side `cell_size`
    pub(crate) fn from_canvas(canvas_size: u16, cell_size: u16) -> Grid {
        Grid::new(canvas_size.checked_div(cell_size).unwrap_or_default())
    }

    pub(crate) fn dimension(self) -> u16 {
        self.dimension
    }

    /// Total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.dimension) * usize::from(self.dimension)
    }

    pub(crate) fn in_bounds(self, cell: Cell) -> bool {
        let n = i32::from(self.dimension);
        (0..n).contains(&cell.x) && (0..n).contains(&cell.y)
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let n = i32::from(self.dimension);
        (0..n).flat_map(move |y| (0..n).map(move |x| Cell { x, y }))
    }

    /// Pick a cell uniformly at random.  The grid must not be empty.
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        let n = i32::from(self.dimension);
        Cell {
            x: rng.random_range(0..n),
            y: rng.random_range(0..n),
        }
    }
}
