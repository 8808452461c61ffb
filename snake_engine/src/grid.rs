//! Grid geometry: the board, cells, points, and directions.

use rand::Rng;

/// Side of one snake/apple cell, in canvas pixels.
pub const CELL: i32 = 10;

/// Side of the square board, in canvas pixels.
pub const BOARD: i32 = 500;

// ════════════════════════════════════════════════════════════════════════════
// Point
// ════════════════════════════════════════════════════════════════════════════

/// An integer canvas coordinate.  Snake and apple cells always sit on
/// multiples of [`CELL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The point one cell away in the given direction.  Y grows downward
    /// (image coordinates).
    pub fn stepped(self, dir: Direction) -> Self {
        match dir {
            Direction::Up => Point::new(self.x, self.y - CELL),
            Direction::Down => Point::new(self.x, self.y + CELL),
            Direction::Left => Point::new(self.x - CELL, self.y),
            Direction::Right => Point::new(self.x + CELL, self.y),
        }
    }
}

/// True while the point lies on the board: `0 <= x,y < BOARD`.
pub fn in_bounds(p: Point) -> bool {
    p.x >= 0 && p.x < BOARD && p.y >= 0 && p.y < BOARD
}

/// A random cell-aligned point strictly inside the board rim, one cell of
/// margin on every side.  The apple never spawns on row/column 0 or the
/// last one.
pub fn random_cell<R: Rng>(rng: &mut R) -> Point {
    let side = BOARD / CELL - 1; // exclusive upper bound of the cell index
    Point::new(rng.gen_range(1..side) * CELL, rng.gen_range(1..side) * CELL)
}

// ════════════════════════════════════════════════════════════════════════════
// Direction
// ════════════════════════════════════════════════════════════════════════════

/// A cardinal movement direction.  "No direction" is `Option::None` at
/// every producer (unclassified swipe, no key latched).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
