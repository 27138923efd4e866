//! Grid coordinates.

use core::fmt;

/// Immutable coordinate on a sea. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> usize {
        self.x
    }

    pub const fn y(&self) -> usize {
        self.y
    }

    /// Returns `true` if the coordinate lies outside the inclusive ranges
    /// `[x_min, x_max]` and `[y_min, y_max]`.
    pub fn is_out_of_bounds(&self, x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> bool {
        self.x < x_min || self.x > x_max || self.y < y_min || self.y > y_max
    }

    /// Shifted coordinate, or `None` if it would leave the non-negative quadrant.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Orthogonal neighbours in the order left, right, up, down.
    pub fn neighbours(&self) -> impl Iterator<Item = Position> {
        let origin = *self;
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| origin.offset(dx, dy))
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
