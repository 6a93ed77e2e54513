// engine/src/engine/geometry.rs
#![forbid(unsafe_code)]

/// Heading of the actor. Screen coordinates: `Up` decreases `y`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        use Direction::*;
        &[Up, Down, Left, Right]
    }

    /// Unit vector as (dx, dy).
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    #[inline]
    pub fn reverse(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    #[inline]
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self == other.reverse()
    }

    pub fn glyph(self) -> char {
        use Direction::*;
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Grid position in cells: column `x`, row `y`, origin top-left.
///
/// Signed so that the cell one step past the left/top edge is representable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}
