#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the `(dx, dy)` step for one cell of movement.  `y` grows
    /// downwards.
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub(crate) fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Vertical,
            Direction::East | Direction::West => Axis::Horizontal,
        }
    }

    #[cfg(test)]
    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

/// The snake's per-tick movement: either standing still (only before the
/// first turn of a game) or one cell in a [`Direction`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Velocity {
    #[default]
    Still,
    Moving(Direction),
}

impl Velocity {
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Velocity::Still => (0, 0),
            Velocity::Moving(d) => d.delta(),
        }
    }

    /// The axis along which the snake is moving, if any
    pub(crate) fn axis(self) -> Option<Axis> {
        match self {
            Velocity::Still => None,
            Velocity::Moving(d) => Some(d.axis()),
        }
    }
}

/// Turns directional input into the velocity used by the next tick.
///
/// A request is only accepted if it is perpendicular to the velocity that the
/// previous tick moved with; this keeps the snake from reversing into its own
/// neck, even when several keys are pressed between two ticks.  Later
/// accepted requests overwrite earlier ones.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Steering {
    /// The velocity that the most recent tick moved with
    committed: Velocity,

    /// The velocity that the next tick will move with
    pending: Velocity,
}

impl Steering {
    pub(crate) fn new() -> Steering {
        Steering::default()
    }

    /// Ask to move in `direction` from the next tick onwards.  Returns `true`
    /// if the request was accepted.
    pub(crate) fn request(&mut self, direction: Direction) -> bool {
        if self.committed.axis() == Some(direction.axis()) {
            false
        } else {
            self.pending = Velocity::Moving(direction);
            true
        }
    }

    /// Lock in the pending velocity for the tick that is about to run and
    /// return it
    pub(crate) fn commit(&mut self) -> Velocity {
        self.committed = self.pending;
        self.committed
    }

    pub(crate) fn committed(&self) -> Velocity {
        self.committed
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> Velocity {
        self.pending
    }
}
