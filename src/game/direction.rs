use ratatui::layout::{Position, Size};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the position one cell away from `pos` in this direction, or
    /// `None` if that would leave a board of size `bounds`
    pub(crate) fn advance(self, pos: Position, bounds: Size) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = y.checked_sub(1)?,
            Direction::East => x = x.checked_add(1).filter(|&x2| x2 < bounds.width)?,
            Direction::South => y = y.checked_add(1).filter(|&y2| y2 < bounds.height)?,
            Direction::West => x = x.checked_sub(1)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Return the direction in which one must step to get from `from` to the
    /// orthogonally adjacent cell `to`.  Returns `None` if the cells are not
    /// adjacent.
    pub(crate) fn between(from: Position, to: Position) -> Option<Direction> {
        let dx = i32::from(to.x) - i32::from(from.x);
        let dy = i32::from(to.y) - i32::from(from.y);
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}
